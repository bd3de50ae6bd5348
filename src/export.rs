//! # Export Pipeline
//!
//! One export turns a raw layout into an [`ExportBundle`]:
//!
//! ```text
//! raw JSON ──> normalize ──> lock gate ──┬──> drawing ──> outline
//!                                        └──> solid (strategy)
//! ```
//!
//! The drawing and the solid share nothing but the canonical layout and are
//! built concurrently. A layout that cannot be normalized produces no
//! bundle; a locked quote refused by the lock gate is the only error.

use async_trait::async_trait;
use foamkit_brep::{build_solid_model, step_file_name, CavityRealization, SolidModelOptions};
use foamkit_communication::{AbortRegistration, SolidRequest, SolidServiceClient};
use foamkit_core::{ExportError, LayoutError};
use foamkit_designer::{build_drawing, build_outline, DrawingOptions, Legend};
use foamkit_layout::{
    check_export_gate, normalize_layout, CanonicalLayout, GeometryHash, LockState, NormalizeHints,
};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Input to one solid-model build.
#[derive(Debug)]
pub struct SolidJob<'a> {
    pub layout: &'a CanonicalLayout,
    pub quote_id: &'a str,
    pub material: Option<&'a str>,
    /// Fired to abandon a delegated build
    pub cancel: Option<AbortRegistration>,
}

/// How the solid model is produced.
#[async_trait]
pub trait SolidModelStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// STEP text, or `None` when no solid could be produced
    async fn build_solid(&self, job: SolidJob<'_>) -> Option<String>;
}

/// In-process B-rep kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalKernel {
    pub realization: CavityRealization,
}

impl LocalKernel {
    pub fn new(realization: CavityRealization) -> Self {
        Self { realization }
    }
}

#[async_trait]
impl SolidModelStrategy for LocalKernel {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn build_solid(&self, job: SolidJob<'_>) -> Option<String> {
        let mut options = SolidModelOptions::new(job.quote_id, self.realization);
        if let Some(material) = job.material {
            options = options.with_material(material);
        }
        build_solid_model(job.layout, &options)
    }
}

/// External solid-model service.
#[derive(Debug, Clone)]
pub struct DelegatedService {
    client: SolidServiceClient,
}

impl DelegatedService {
    pub fn new(client: SolidServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SolidModelStrategy for DelegatedService {
    fn name(&self) -> &'static str {
        "delegated"
    }

    async fn build_solid(&self, job: SolidJob<'_>) -> Option<String> {
        let request = SolidRequest::new(job.quote_id, job.layout)
            .with_material(job.material.map(str::to_string));
        self.client.fetch_solid(&request, job.cancel).await
    }
}

/// One export request.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub quote_id: String,
    pub material: Option<String>,
    pub layout: Value,
    pub hints: NormalizeHints,
    pub lock: LockState,
}

impl ExportRequest {
    pub fn new(quote_id: impl Into<String>, layout: Value) -> Self {
        Self {
            quote_id: quote_id.into(),
            material: None,
            layout,
            hints: NormalizeHints::default(),
            lock: LockState::unlocked(),
        }
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        let material = material.into();
        self.material = (!material.trim().is_empty()).then_some(material);
        self
    }

    pub fn with_hints(mut self, hints: NormalizeHints) -> Self {
        self.hints = hints;
        self
    }

    pub fn with_lock(mut self, lock: LockState) -> Self {
        self.lock = lock;
        self
    }
}

/// Artifacts of one export. Any of them may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportBundle {
    pub quote_id: String,
    pub drawing: Option<String>,
    pub outline: Option<String>,
    pub solid: Option<String>,
    pub geometry_hash: GeometryHash,
}

impl ExportBundle {
    /// File stem shared by all artifacts
    pub fn file_stem(&self) -> String {
        let name = step_file_name(&self.quote_id);
        name.trim_end_matches(".step").to_string()
    }

    /// Write the present artifacts as `<stem>.svg`, `<stem>.dxf` and
    /// `<stem>.step`, returning the written paths.
    pub fn write_to_dir(&self, dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
        std::fs::create_dir_all(dir).map_err(|e| ExportError::WriteFailed {
            artifact: dir.display().to_string(),
            reason: e.to_string(),
        })?;

        let stem = self.file_stem();
        let mut written = Vec::new();
        for (artifact, extension, content) in [
            ("drawing", "svg", &self.drawing),
            ("outline", "dxf", &self.outline),
            ("solid", "step", &self.solid),
        ] {
            let Some(content) = content else {
                debug!(artifact, "Artifact absent; not written");
                continue;
            };
            let path = dir.join(format!("{}.{}", stem, extension));
            std::fs::write(&path, content).map_err(|e| ExportError::WriteFailed {
                artifact: artifact.to_string(),
                reason: e.to_string(),
            })?;
            info!(artifact, path = %path.display(), "Wrote artifact");
            written.push(path);
        }
        Ok(written)
    }
}

/// Drawing options plus a solid-model strategy.
pub struct ExportPipeline {
    drawing: DrawingOptions,
    strategy: Box<dyn SolidModelStrategy>,
}

impl ExportPipeline {
    pub fn new(drawing: DrawingOptions, strategy: Box<dyn SolidModelStrategy>) -> Self {
        Self { drawing, strategy }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Run one export.
    ///
    /// Returns `Ok(None)` when the layout is unusable and
    /// `Err(ExportError::Layout(..))` when a locked quote's geometry changed
    /// or no digest was stored for it.
    pub async fn export(
        &self,
        request: &ExportRequest,
        cancel: Option<AbortRegistration>,
    ) -> Result<Option<ExportBundle>, ExportError> {
        let layout = match normalize_layout(&request.layout, &request.hints) {
            Ok(layout) => layout,
            Err(e @ (LayoutError::InsufficientData { .. } | LayoutError::NoValidLayers { .. })) => {
                warn!(quote = %request.quote_id, error = %e, "Layout unusable; nothing exported");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let geometry_hash = check_export_gate(&request.lock, &layout)?;

        let legend = {
            let legend = Legend::for_layout(request.quote_id.as_str(), &layout);
            match &request.material {
                Some(material) => legend.with_material(material.as_str()),
                None => legend,
            }
        };
        let job = SolidJob {
            layout: &layout,
            quote_id: &request.quote_id,
            material: request.material.as_deref(),
            cancel,
        };

        let two_d = async {
            let drawing = build_drawing(&layout, &self.drawing, &legend);
            let outline = build_outline(Some(&drawing), Some(&layout), &self.drawing);
            (drawing, outline)
        };
        let ((drawing, outline), solid) = tokio::join!(two_d, self.strategy.build_solid(job));

        if solid.is_none() {
            warn!(quote = %request.quote_id, strategy = self.strategy.name(), "No solid model produced");
        }
        info!(
            quote = %request.quote_id,
            hash = %geometry_hash,
            outline = outline.is_some(),
            solid = solid.is_some(),
            "Export complete"
        );

        Ok(Some(ExportBundle {
            quote_id: request.quote_id.clone(),
            drawing: Some(drawing),
            outline,
            solid,
            geometry_hash,
        }))
    }
}
