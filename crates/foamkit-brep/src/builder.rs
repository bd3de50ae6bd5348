//! # Solid Geometry Builder
//!
//! Turns a canonical layout into a complete interchange document.
//!
//! ## Placement
//! - Layer 0 sits on `z = 0`; each following layer starts where the previous one ends
//! - Every layer is a full `L × W × t` box
//! - A cavity box starts at `(x · L, y · W)` in plane, is `min(depth, t)` deep
//!   and its top is flush with the layer top
//!
//! ## Cavity realization
//! Only axis-aligned boxes are built. How non-rectangular cavities are
//! represented is a caller decision, see [`CavityRealization`].

use crate::arena::{EntityArena, EntityId};
use crate::boolean::subtract_all;
use crate::kernel::Kernel;
use crate::metadata::{begin_product, finish_product};
use crate::writer::{write_document, StepHeader};
use foamkit_core::format_length;
use foamkit_core::LengthUnit;
use foamkit_layout::{CanonicalLayout, Cavity};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// How cavities that are not plain rectangles end up in the solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CavityRealization {
    /// Every cavity is subtracted as its bounding rectangle
    BoundingBoxCut,
    /// Rectangles are subtracted; other shapes become separate, uncut
    /// solids for visualization
    VisualOverlay,
}

/// Inputs that are not part of the geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct SolidModelOptions {
    pub quote_id: String,
    pub material_label: Option<String>,
    pub realization: CavityRealization,
}

impl SolidModelOptions {
    pub fn new(quote_id: impl Into<String>, realization: CavityRealization) -> Self {
        Self {
            quote_id: quote_id.into(),
            material_label: None,
            realization,
        }
    }

    pub fn with_material(mut self, label: impl Into<String>) -> Self {
        self.material_label = Some(label.into());
        self
    }
}

/// Record counts of a built document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolidModelStats {
    pub layers: usize,
    /// Boxes built, layer bases and cavities alike
    pub boxes: usize,
    pub faces: usize,
    pub edges: usize,
    pub points: usize,
    pub cavities_cut: usize,
    pub cavities_overlaid: usize,
    pub entities: usize,
}

/// A serialized document with its statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct SolidModel {
    pub document: String,
    pub stats: SolidModelStats,
}

/// Build the interchange document, or nothing when the layout is unusable.
pub fn build_solid_model(layout: &CanonicalLayout, options: &SolidModelOptions) -> Option<String> {
    build_solid_model_with_stats(layout, options).map(|model| model.document)
}

pub fn build_solid_model_with_stats(
    layout: &CanonicalLayout,
    options: &SolidModelOptions,
) -> Option<SolidModel> {
    let block = &layout.block;
    if !block.is_valid() {
        warn!(
            quote_id = %options.quote_id,
            length = block.length,
            width = block.width,
            thickness = block.thickness,
            "Block dimensions unusable; no solid model produced"
        );
        return None;
    }

    let layers: Vec<_> = layout
        .layers
        .iter()
        .filter(|layer| layer.thickness.is_finite() && layer.thickness > 0.0)
        .collect();
    if layers.is_empty() {
        warn!(quote_id = %options.quote_id, "No usable layers; no solid model produced");
        return None;
    }

    let mut arena = EntityArena::new();
    let mut kernel = Kernel::new(&mut arena);
    let mut stats = SolidModelStats {
        layers: layers.len(),
        ..SolidModelStats::default()
    };

    let chain = begin_product(
        &mut kernel,
        &options.quote_id,
        &format!("Foam insert {}", options.quote_id),
    );

    let mut items: Vec<EntityId> = Vec::new();
    let mut z = 0.0;
    for (index, layer) in layers.iter().enumerate() {
        let layer_name = layer
            .label
            .clone()
            .unwrap_or_else(|| format!("Layer {}", index + 1));
        let base = kernel.build_box(
            &layer_name,
            Point3::new(0.0, 0.0, z),
            block.length,
            block.width,
            layer.thickness,
        );
        stats.boxes += 1;

        let top = z + layer.thickness;
        let mut tools = Vec::new();
        for (cavity_index, cavity) in layer.cavities.iter().enumerate() {
            let name = cavity
                .label
                .clone()
                .unwrap_or_else(|| format!("{} cavity {}", layer_name, cavity_index + 1));
            let solid = build_cavity_box(&mut kernel, &name, layout, cavity, top, layer.thickness);
            stats.boxes += 1;

            let subtract = match options.realization {
                CavityRealization::BoundingBoxCut => true,
                CavityRealization::VisualOverlay => cavity.shape.is_rectangular(),
            };
            if subtract {
                tools.push(solid);
                stats.cavities_cut += 1;
            } else {
                debug!(cavity = %name, shape = %cavity.shape, "Cavity emitted as overlay solid");
                items.push(solid);
                stats.cavities_overlaid += 1;
            }
        }

        items.push(subtract_all(&mut kernel, &layer_name, base.solid, &tools));
        z = top;
    }

    finish_product(&mut kernel, chain, &options.quote_id, &items);

    stats.faces = arena.count("ADVANCED_FACE");
    stats.edges = arena.count("EDGE_CURVE");
    stats.points = arena.count("CARTESIAN_POINT");
    stats.entities = arena.len();

    let document = write_document(&header(layout, options), &arena);
    info!(
        quote_id = %options.quote_id,
        layers = stats.layers,
        boxes = stats.boxes,
        entities = stats.entities,
        "Built solid model"
    );

    Some(SolidModel { document, stats })
}

fn build_cavity_box(
    kernel: &mut Kernel<'_>,
    name: &str,
    layout: &CanonicalLayout,
    cavity: &Cavity,
    layer_top: f64,
    layer_thickness: f64,
) -> EntityId {
    let depth = cavity.clamped_depth(layer_thickness);
    if depth < cavity.depth {
        debug!(cavity = %name, requested = cavity.depth, depth, "Cavity depth clamped to layer");
    }
    let (x, y) = cavity.origin_in(&layout.block);
    kernel
        .build_box(
            name,
            Point3::new(x, y, layer_top - depth),
            cavity.length,
            cavity.width,
            depth,
        )
        .solid
}

fn header(layout: &CanonicalLayout, options: &SolidModelOptions) -> StepHeader {
    let block = &layout.block;
    let inches = |v: f64| format_length(v, LengthUnit::Inch);

    let mut header = StepHeader::new(step_file_name(&options.quote_id))
        .describe("FoamKit foam insert")
        .describe(format!(
            "Block {} x {} x {} in",
            inches(block.length),
            inches(block.width),
            inches(block.thickness)
        ))
        .describe(format!("Layers: {}", layout.layers.len()))
        .describe(format!("Cavities: {}", layout.cavity_count()))
        .describe(format!("Quote: {}", options.quote_id));
    if let Some(material) = &options.material_label {
        header = header.describe(format!("Material: {}", material));
    }
    if let Some(corner) = &block.corner {
        header = header.describe(match corner.size {
            Some(size) => format!("Corners: {} {} in", corner.style, inches(size)),
            None => format!("Corners: {}", corner.style),
        });
    }
    header
}

/// File name for a quote's solid model: non-alphanumerics become `_`.
pub fn step_file_name(quote_id: &str) -> String {
    let stem: String = quote_id
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if stem.is_empty() {
        "layout.step".to_string()
    } else {
        format!("{}.step", stem)
    }
}
