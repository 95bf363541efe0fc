//! shapecrate-demo - generate, export and run example shapes

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shapecrate_core::{BuildConfig, ShapeGenerator};
use shapecrate_demos::scenes::NewtonExample;
use shapecrate_demos::{
    init_logging, make_example, run_example, DemoConfig, LoggingConfig, RecordingContext, RunParams,
};
use shapecrate_shapes::{Torus, TorusTopology};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "shapecrate-demo")]
#[command(about = "Procedural shape generation demos")]
#[command(version)]
struct Cli {
    /// JSON configuration file (torus parameters, output size, frame rate)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter directives, overrides RUST_LOG
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a torus to OBJ or JSON, chosen by file extension
    Export {
        /// Output file (.obj or .json)
        #[arg(short, long)]
        out: PathBuf,

        /// Distance from the center to the tube center
        #[arg(long)]
        major: Option<f64>,

        /// Tube radius
        #[arg(long)]
        minor: Option<f64>,

        /// Number of rings around the tube
        #[arg(long)]
        rings: Option<usize>,

        /// Number of segments around the main axis
        #[arg(long)]
        segments: Option<usize>,

        /// Emit one triangle strip per ring instead of a triangle list
        #[arg(long)]
        strips: bool,
    },

    /// Run an example headlessly and print a summary
    Run {
        /// Example name (torus, cube, newton)
        example: String,

        /// Maximum number of frames
        #[arg(short, long, default_value_t = 120)]
        frames: u32,

        /// Simulated frames per second
        #[arg(long)]
        fps: Option<f64>,

        #[arg(long)]
        width: Option<u32>,

        #[arg(long)]
        height: Option<u32>,
    },

    /// Render the Newton fractal to a PPM image
    Newton {
        /// Output .ppm file
        #[arg(short, long)]
        out: PathBuf,

        #[arg(long)]
        width: Option<u32>,

        #[arg(long)]
        height: Option<u32>,
    },

    /// Print the build configuration
    Info,
}

fn load_config(path: Option<&PathBuf>) -> Result<DemoConfig> {
    match path {
        Some(path) => DemoConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(DemoConfig::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig {
        env_filter: cli.log.clone(),
        ..LoggingConfig::default()
    });

    let mut config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Export {
            out,
            major,
            minor,
            rings,
            segments,
            strips,
        } => {
            let params = &mut config.torus;
            params.major_radius = major.unwrap_or(params.major_radius);
            params.minor_radius = minor.unwrap_or(params.minor_radius);
            params.rings = rings.unwrap_or(params.rings);
            params.segments = segments.unwrap_or(params.segments);
            if strips {
                params.topology = TorusTopology::Strips;
            }

            let torus = Torus::from_params(config.torus).context("Invalid torus parameters")?;
            shapecrate_io::write_shape(&torus, &out)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            info!(
                path = %out.display(),
                vertices = torus.vertex_count(),
                indices = torus.indices().len(),
                "exported torus"
            );
        }
        Commands::Run {
            example,
            frames,
            fps,
            width,
            height,
        } => {
            config.fps = fps.unwrap_or(config.fps);
            config.width = width.unwrap_or(config.width);
            config.height = height.unwrap_or(config.height);
            config.validate().context("Invalid run settings")?;

            let mut example = make_example(&example, &config)?;
            let mut ctx = RecordingContext::new();
            let summary = run_example(example.as_mut(), &mut ctx, RunParams::from_config(&config, frames))?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Newton { out, width, height } => {
            let width = width.unwrap_or(config.width);
            let height = height.unwrap_or(config.height);
            let file = File::create(&out).with_context(|| format!("Failed to create {}", out.display()))?;
            NewtonExample::new().write_ppm(BufWriter::new(file), width, height)?;
            info!(path = %out.display(), width, height, "wrote newton fractal");
        }
        Commands::Info => {
            println!("{}", serde_json::to_string_pretty(&BuildConfig::current())?);
        }
    }

    Ok(())
}
