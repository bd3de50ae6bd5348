use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use foamkit::{
    geometry_hash, init_logging, GeometryHash, normalize_layout, pipeline_from_config, CavityRealization, Config,
    ExportRequest, LockState, LogFormat, NormalizeHints, BUILD_DATE, VERSION,
};
use serde_json::Value;
use tracing::info;

#[derive(Parser)]
#[command(name = "foamkit")]
#[command(about = "Export foam insert layouts as SVG drawings, DXF outlines and STEP solids")]
#[command(version)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export drawing, outline and solid for one layout
    Export {
        /// Layout JSON file
        #[arg(long)]
        layout: PathBuf,
        /// Quote identifier, also the artifact file stem
        #[arg(long)]
        quote: String,
        /// Material legend shown on the drawing and in the solid header
        #[arg(long)]
        material: Option<String>,
        /// Output directory (overrides the configuration)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Configuration file (.toml or .json)
        #[arg(long)]
        config: Option<PathBuf>,
        /// How non-rectangular cavities enter the solid
        #[arg(long, value_enum)]
        realization: Option<Realization>,
        /// Fallback thickness per stack entry, bottom first
        #[arg(long = "layer-thickness")]
        layer_thicknesses: Vec<f64>,
        /// The quote is locked; refuse export on geometry drift
        #[arg(long)]
        locked: bool,
        /// Geometry hash committed when the quote was locked
        #[arg(long, requires = "locked")]
        stored_hash: Option<String>,
    },
    /// Print the geometry hash of a layout
    Hash {
        /// Layout JSON file
        #[arg(long)]
        layout: PathBuf,
    },
    /// Write a default configuration file
    InitConfig {
        /// Destination (defaults to the platform config directory)
        path: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Realization {
    BoundingBoxCut,
    VisualOverlay,
}

impl From<Realization> for CavityRealization {
    fn from(value: Realization) -> Self {
        match value {
            Realization::BoundingBoxCut => CavityRealization::BoundingBoxCut,
            Realization::VisualOverlay => CavityRealization::VisualOverlay,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    })?;
    info!(version = VERSION, built = BUILD_DATE, "foamkit starting");

    match cli.command {
        Commands::Export {
            layout,
            quote,
            material,
            out,
            config,
            realization,
            layer_thicknesses,
            locked,
            stored_hash,
        } => {
            let config = Config::load_or_default(config.as_deref())?;
            let pipeline = pipeline_from_config(&config, realization.map(Into::into))?;

            // A locked quote without a stored hash is refused by the pipeline
            let lock = LockState {
                locked,
                stored_hash: stored_hash.as_deref().map(GeometryHash::new),
            };
            let mut request = ExportRequest::new(quote, read_layout(&layout)?)
                .with_hints(NormalizeHints::with_layer_thicknesses(layer_thicknesses))
                .with_lock(lock);
            if let Some(material) = material {
                request = request.with_material(material);
            }

            let Some(bundle) = pipeline
                .export(&request, None)
                .await
                .context("export refused")?
            else {
                bail!("layout {} is unusable; nothing exported", layout.display());
            };

            let dir = out.unwrap_or_else(|| config.output.directory.clone());
            for path in bundle.write_to_dir(&dir)? {
                println!("{}", path.display());
            }
            println!("geometry hash {}", bundle.geometry_hash);
            Ok(())
        }
        Commands::Hash { layout } => {
            let raw = read_layout(&layout)?;
            let canonical = normalize_layout(&raw, &NormalizeHints::default())
                .with_context(|| format!("cannot normalize {}", layout.display()))?;
            println!("{}", geometry_hash(&canonical));
            Ok(())
        }
        Commands::InitConfig { path } => {
            let Some(path) = path.or_else(Config::default_path) else {
                bail!("no platform config directory; pass a path");
            };
            Config::default().save_to_file(&path)?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn read_layout(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read layout {}", path.display()))?;
    serde_json::from_str(&text)
        .map_err(foamkit::ExportError::from)
        .with_context(|| format!("failed to parse layout {}", path.display()))
}
