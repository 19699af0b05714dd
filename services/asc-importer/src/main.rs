//! ASCII grid importer.
//!
//! Imports ESRI ASCII grids (.asc/.grd) as quad meshes or point clouds into
//! a georeferenced scene, persisting the scene georeference as JSON and
//! writing the geometry as OBJ or PLY.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use asc_importer::{load_config, load_scene, open_sink, save_scene, ImporterConfig, OutputFormat};
use grid_common::CrsId;
use terrain_import::{
    import_file, GeometrySink, ImportMode, ImportParams, InMemoryScene, NodataPolicy,
};

#[derive(Parser, Debug)]
#[command(name = "asc-importer")]
#[command(about = "Import ESRI ASCII grids as georeferenced terrain meshes")]
struct Args {
    /// Grid files to import, in order
    #[arg(required_unless_present = "list_crs")]
    inputs: Vec<PathBuf>,

    /// CRS of the input files (required when the scene has none)
    #[arg(long, env = "ASC_IMPORT_CRS")]
    crs: Option<CrsId>,

    /// Geometry kind: mesh or cloud
    #[arg(long)]
    mode: Option<ImportMode>,

    /// Keep every n-th row and column
    #[arg(long)]
    step: Option<usize>,

    /// Mesh nodata handling: keep or skip_faces
    #[arg(long)]
    nodata_policy: Option<NodataPolicy>,

    /// Divide scene-local coordinates by the scene scale
    #[arg(long)]
    apply_scale: bool,

    /// Scene georeference file, created on first import
    #[arg(short, long, default_value = "scene.json", env = "ASC_SCENE_FILE")]
    scene: PathBuf,

    /// Output geometry file (OBJ or PLY); omitted to only report
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format, overriding the output file extension
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Configuration file path
    #[arg(short, long, env = "ASC_IMPORTER_CONFIG")]
    config: Option<PathBuf>,

    /// List the predefined coordinate reference systems and exit
    #[arg(long)]
    list_crs: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log as JSON lines
    #[arg(long, env = "ASC_LOG_JSON")]
    log_json: bool,
}

fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    let builder = fmt().with_env_filter(filter).with_target(true).with_level(true);
    if args.log_json {
        builder.json().init();
    } else {
        builder.init();
    }

    if let Err(e) = run(args) {
        error!("Import failed: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ImporterConfig::from_env(),
    };

    if args.list_crs {
        for entry in config.crs_choices() {
            println!("{:<14} {}", entry.id, entry.name);
        }
        return Ok(());
    }

    let mut import = config.import;
    if let Some(mode) = args.mode {
        import.mode = mode;
    }
    if let Some(step) = args.step {
        import.step = step;
    }
    if let Some(policy) = args.nodata_policy {
        import.nodata_policy = policy;
    }
    import.apply_scale |= args.apply_scale;

    let params = ImportParams::new(args.crs.clone().or_else(|| config.default_crs.clone()))
        .with_config(import);
    let registry = config.registry();
    let mut scene = load_scene(&args.scene)?;

    let mut sink: Box<dyn GeometrySink> = match &args.output {
        Some(path) => open_sink(path, args.format)?,
        None => Box::new(InMemoryScene::new()),
    };

    info!(
        inputs = args.inputs.len(),
        crs = ?params.crs,
        scene = %args.scene.display(),
        "Starting import"
    );

    for input in &args.inputs {
        if !asc_parser::has_grid_extension(input) {
            warn!(path = %input.display(), "Unexpected extension, expected .asc or .grd");
        }

        let outcome = import_file(input, &mut scene, &registry, sink.as_mut(), &params)
            .with_context(|| format!("Failed to import {:?}", input))?;

        if let Some(bounds) = outcome.bounds {
            info!(
                name = %outcome.name,
                min_x = bounds.min_x,
                min_y = bounds.min_y,
                max_x = bounds.max_x,
                max_y = bounds.max_y,
                "Placed geometry bounds"
            );
        }

        save_scene(&args.scene, &scene)?;
    }

    Ok(())
}
