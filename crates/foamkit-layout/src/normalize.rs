//! # Layout Normalizer
//!
//! Turns loosely structured layout data into one [`CanonicalLayout`].
//!
//! Two input generations are accepted:
//! - Legacy single-layer layouts: block dimensions plus top-level cavities
//! - Stacked layouts: a `stack` / `layers` array of layers with their own cavities
//!
//! A legacy layout becomes one layer spanning the full block thickness.
//! Missing block dimensions are reported as insufficient data; a partially
//! resolved block is never returned.

use crate::cavity::resolve_cavities;
use crate::fields;
use crate::types::{Block, CanonicalLayout, CornerTreatment, Layer, SkipReason, Validated};
use foamkit_core::LayoutError;
use serde_json::Value;
use tracing::debug;

/// Per-request hints supplied alongside the layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizeHints {
    /// Fallback thickness for the stack entry at the same index
    pub layer_thicknesses: Vec<f64>,
}

impl NormalizeHints {
    pub fn with_layer_thicknesses(thicknesses: Vec<f64>) -> Self {
        Self {
            layer_thicknesses: thicknesses,
        }
    }

    fn thickness_at(&self, index: usize) -> Option<f64> {
        self.layer_thicknesses
            .get(index)
            .copied()
            .filter(|t| t.is_finite() && *t > 0.0)
    }
}

/// Normalize raw layout data.
///
/// # Errors
/// - [`LayoutError::InsufficientData`] when the block cannot be resolved
/// - [`LayoutError::NoValidLayers`] when a stack is present but no entry
///   resolves a positive thickness
pub fn normalize_layout(
    raw: &Value,
    hints: &NormalizeHints,
) -> Result<CanonicalLayout, LayoutError> {
    if !raw.is_object() {
        return Err(LayoutError::InsufficientData {
            reason: "layout is not an object".to_string(),
        });
    }

    let block_src = fields::lookup(raw, fields::BLOCK)
        .filter(|v| v.is_object())
        .unwrap_or(raw);
    let block = resolve_block(block_src)?;

    let stack = fields::array(raw, fields::STACK)
        .or_else(|| fields::array(block_src, fields::STACK))
        .filter(|entries| !entries.is_empty());

    let layers = match stack {
        None => {
            let cavities = fields::array(raw, fields::CAVITIES)
                .or_else(|| fields::array(block_src, fields::CAVITIES))
                .map(|entries| resolve_cavities(entries))
                .unwrap_or_default();
            vec![Layer {
                thickness: block.thickness,
                label: None,
                cavities,
            }]
        }
        Some(entries) => {
            if fields::array(raw, fields::CAVITIES).is_some() {
                debug!("Ignoring top-level cavities because a layer stack is present");
            }
            let mut layers = Vec::with_capacity(entries.len());
            for (index, entry) in entries.iter().enumerate() {
                match resolve_layer(entry, hints.thickness_at(index)) {
                    Validated::Keep(layer) => layers.push(layer),
                    Validated::Skip(reason) => debug!(index, %reason, "Dropping layer"),
                }
            }
            if layers.is_empty() {
                return Err(LayoutError::NoValidLayers {
                    dropped: entries.len(),
                });
            }
            layers
        }
    };

    let layout = CanonicalLayout { block, layers };
    let stack_thickness = layout.stack_thickness();
    if (stack_thickness - layout.block.thickness).abs() > 1e-6 {
        debug!(
            stack_thickness,
            block_thickness = layout.block.thickness,
            "Layer thicknesses do not sum to block thickness"
        );
    }

    Ok(layout)
}

fn resolve_block(src: &Value) -> Result<Block, LayoutError> {
    let dimension = |aliases: &[&str], name: &str| {
        fields::positive(src, aliases).ok_or_else(|| LayoutError::InsufficientData {
            reason: format!("block {} missing or not positive", name),
        })
    };

    let length = dimension(fields::LENGTH, "length")?;
    let width = dimension(fields::WIDTH, "width")?;
    let thickness = dimension(fields::BLOCK_THICKNESS, "thickness")?;

    // Corner metadata is carried as supplied, never interpreted
    let corner = fields::verbatim_text(src, fields::CORNER_STYLE).map(|style| CornerTreatment {
        style: style.to_string(),
        size: fields::verbatim_number(src, fields::CORNER_SIZE),
    });

    Ok(Block {
        length,
        width,
        thickness,
        corner,
    })
}

/// Resolve one stack entry; `hint` is the same-index fallback thickness.
pub fn resolve_layer(raw: &Value, hint: Option<f64>) -> Validated<Layer> {
    if !raw.is_object() {
        return Validated::Skip(SkipReason::NotAnObject);
    }

    let Some(thickness) = fields::positive(raw, fields::LAYER_THICKNESS).or(hint) else {
        return Validated::Skip(SkipReason::Missing("thickness"));
    };

    let cavities = fields::array(raw, fields::CAVITIES)
        .map(|entries| resolve_cavities(entries))
        .unwrap_or_default();

    Validated::Keep(Layer {
        thickness,
        label: fields::text(raw, fields::LABEL).map(str::to_string),
        cavities,
    })
}
