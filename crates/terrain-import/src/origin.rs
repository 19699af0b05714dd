//! Placement of a grid relative to the scene origin.

use grid_common::{GridHeader, Offset, Xy};
use tracing::debug;

use crate::georef::ReprojectionPlan;

/// Where the grid anchor lands, in grid and scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridAnchorResolution {
    /// Anchor coordinate in the grid CRS
    pub source_point: Xy,
    /// Per-vertex shift aligning cell corners
    pub cell_offset: Offset,
    /// Anchor coordinate in the scene CRS
    pub target_point: Xy,
}

impl GridAnchorResolution {
    pub fn new(header: &GridHeader, plan: &ReprojectionPlan) -> Self {
        let source_point = header.anchor.point();
        Self {
            source_point,
            cell_offset: header.cell_offset(),
            target_point: plan.to_scene(source_point),
        }
    }
}

/// Result of origin reconciliation.
///
/// `staged_origin` holds the origin this import would establish; it is only
/// written to the scene once the geometry is complete.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub anchor: GridAnchorResolution,
    /// Scene origin the placement is relative to
    pub origin_prj: Xy,
    /// Origin to write into a scene that has none
    pub staged_origin: Option<Xy>,
    /// Translation of the object from the scene origin
    pub offset: Offset,
}

impl Placement {
    pub fn establishes_origin(&self) -> bool {
        self.staged_origin.is_some()
    }
}

/// Place the grid relative to the scene origin, proposing the grid center
/// as origin when the scene has none.
pub fn reconcile_origin(
    header: &GridHeader,
    plan: &ReprojectionPlan,
    scene_origin: Option<Xy>,
) -> Placement {
    let anchor = GridAnchorResolution::new(header, plan);

    let (origin_prj, staged_origin) = match scene_origin {
        Some(origin) => (origin, None),
        None => {
            let center = plan.to_scene(header.geometric_center());
            debug!(x = center.x, y = center.y, "Grid center proposed as scene origin");
            (center, Some(center))
        }
    };

    Placement {
        anchor,
        origin_prj,
        staged_origin,
        offset: anchor.target_point - origin_prj,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_common::Anchor;
    use test_utils::fixtures::header::{LV95_CENTER, UTM_32N_CENTER};

    fn utm_header() -> GridHeader {
        GridHeader::new(4, 5, 30.0, -32768.0, Anchor::Corner(Xy::new(690000.0, 5330000.0)))
            .unwrap()
    }

    #[test]
    fn test_first_import_proposes_grid_center() {
        let placement = reconcile_origin(&utm_header(), &ReprojectionPlan::Identity, None);
        let center = Xy::new(UTM_32N_CENTER.0, UTM_32N_CENTER.1);

        assert_eq!(placement.staged_origin, Some(center));
        assert_eq!(placement.origin_prj, center);
        assert_eq!(placement.anchor.cell_offset, Offset::zeros());
        assert_eq!(placement.offset, Offset::new(-75.0, -60.0));
    }

    #[test]
    fn test_center_anchor_origin() {
        let header = GridHeader::new(
            3,
            4,
            25.0,
            -9999.0,
            Anchor::Center(Xy::new(2600012.5, 1200012.5)),
        )
        .unwrap();
        let placement = reconcile_origin(&header, &ReprojectionPlan::Identity, None);

        assert_eq!(
            placement.staged_origin,
            Some(Xy::new(LV95_CENTER.0, LV95_CENTER.1))
        );
        assert_eq!(placement.anchor.cell_offset, Offset::new(-12.5, -12.5));
        assert_eq!(placement.offset, Offset::new(-37.5, -25.0));
    }

    #[test]
    fn test_existing_origin_is_kept() {
        let origin = Xy::new(689000.0, 5331000.0);
        let placement = reconcile_origin(&utm_header(), &ReprojectionPlan::Identity, Some(origin));

        assert!(!placement.establishes_origin());
        assert_eq!(placement.origin_prj, origin);
        assert_eq!(placement.offset, Offset::new(1000.0, -1000.0));
    }
}
