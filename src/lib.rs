//! # FoamKit
//!
//! Layout-to-geometry export for custom-cut foam packaging inserts.
//!
//! A raw layout (outer block, stack of layers, cavities per layer) is
//! normalized once and then rendered three ways:
//! - an annotated SVG drawing
//! - a DXF outline derived from that drawing
//! - a STEP solid built by the in-process B-rep kernel or a delegated service
//!
//! ## Architecture
//!
//! FoamKit is organized as a workspace with multiple crates:
//!
//! 1. **foamkit-core** - Error taxonomy, unit conversion
//! 2. **foamkit-layout** - Normalizer, cavity resolver, geometry hash, lock gate
//! 3. **foamkit-designer** - SVG drawing, legend overlay, DXF outline
//! 4. **foamkit-brep** - B-rep kernel and STEP writer
//! 5. **foamkit-communication** - Delegated solid-model service client
//! 6. **foamkit-settings** - Export configuration
//! 7. **foamkit** - Export pipeline and command-line binary

pub mod export;

pub use export::{
    DelegatedService, ExportBundle, ExportPipeline, ExportRequest, LocalKernel, SolidJob,
    SolidModelStrategy,
};

pub use foamkit_brep::CavityRealization;
pub use foamkit_core::{ExportError, LayoutError, ServiceError};
pub use foamkit_designer::DrawingOptions;
pub use foamkit_layout::{geometry_hash, normalize_layout, GeometryHash, LockState, NormalizeHints};
pub use foamkit_settings::{Config, SolidStrategy};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Log output style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Initialize logging
///
/// Sets up structured logging with:
/// - Console output on stderr, pretty or JSON lines
/// - RUST_LOG environment variable support (default level INFO)
pub fn init_logging(format: LogFormat) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .with_line_number(true),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
    }

    Ok(())
}

/// Build the pipeline described by a configuration.
///
/// `realization` overrides the configured cavity realization; one of the two
/// must be present.
pub fn pipeline_from_config(
    config: &Config,
    realization: Option<CavityRealization>,
) -> anyhow::Result<ExportPipeline> {
    use anyhow::Context;

    let strategy: Box<dyn SolidModelStrategy> = match config.solid.strategy {
        SolidStrategy::Local => {
            let realization = realization.or(config.solid.realization).context(
                "cavity realization not chosen: set solid.realization or pass --realization",
            )?;
            Box::new(LocalKernel::new(realization))
        }
        SolidStrategy::Delegated => {
            let endpoint = config.service.endpoint.clone().unwrap_or_default();
            let timeout = std::time::Duration::from_millis(config.service.timeout_ms);
            let client = foamkit_communication::SolidServiceClient::new(endpoint, timeout)?;
            Box::new(DelegatedService::new(client))
        }
    };
    Ok(ExportPipeline::new(config.drawing.clone(), strategy))
}
