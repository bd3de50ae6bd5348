//! # Cavity Shape Resolver
//!
//! Reconciles the many ways a caller can describe a pocket into one
//! canonical [`Cavity`].
//!
//! Shape precedence:
//! 1. An explicit, recognized `shape` / `type` / `kind`
//! 2. A positive corner radius implies a rounded rectangle
//! 3. A positive diameter implies a circle
//! 4. Otherwise a plain rectangle
//!
//! A cavity whose size, depth or position cannot be resolved is skipped; the
//! rest of the layout is unaffected.

use crate::fields;
use crate::types::{Cavity, CavityShape, NormalizedPoint, SkipReason, Validated};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShapeKind {
    Rect,
    RoundedRect,
    Circle,
    Polygon,
}

fn parse_shape_tag(tag: &str) -> Option<ShapeKind> {
    let normalized: String = tag
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    match normalized.as_str() {
        "rect" | "rectangle" | "box" | "square" => Some(ShapeKind::Rect),
        "roundedrect" | "roundrect" | "roundedrectangle" | "rrect" => Some(ShapeKind::RoundedRect),
        "circle" | "round" | "cylinder" => Some(ShapeKind::Circle),
        "polygon" | "poly" => Some(ShapeKind::Polygon),
        _ => None,
    }
}

/// Resolve one raw cavity entry.
pub fn resolve_cavity(raw: &Value) -> Validated<Cavity> {
    if !raw.is_object() {
        return Validated::Skip(SkipReason::NotAnObject);
    }

    let radius = fields::positive(raw, fields::CORNER_RADIUS);
    let diameter = fields::positive(raw, fields::DIAMETER);
    let kind = match fields::text(raw, fields::SHAPE).and_then(parse_shape_tag) {
        Some(kind) => kind,
        None if radius.is_some() => ShapeKind::RoundedRect,
        None if diameter.is_some() => ShapeKind::Circle,
        None => ShapeKind::Rect,
    };

    let mut length = fields::number(raw, fields::LENGTH);
    let mut width = fields::number(raw, fields::WIDTH);

    if kind == ShapeKind::Circle {
        let d = diameter
            .or_else(|| match (length, width) {
                (Some(l), Some(w)) => Some(l.min(w)),
                (Some(l), None) => Some(l),
                (None, Some(w)) => Some(w),
                (None, None) => None,
            })
            .or_else(|| radius.map(|r| r * 2.0));
        length = d;
        width = d;
    }

    let length = match require_positive(length, "length") {
        Ok(v) => v,
        Err(reason) => return Validated::Skip(reason),
    };
    let width = match require_positive(width, "width") {
        Ok(v) => v,
        Err(reason) => return Validated::Skip(reason),
    };
    let depth = match require_positive(fields::number(raw, fields::DEPTH), "depth") {
        Ok(v) => v,
        Err(reason) => return Validated::Skip(reason),
    };
    let x = match require_normalized(fields::number(raw, fields::POS_X), "x") {
        Ok(v) => v,
        Err(reason) => return Validated::Skip(reason),
    };
    let y = match require_normalized(fields::number(raw, fields::POS_Y), "y") {
        Ok(v) => v,
        Err(reason) => return Validated::Skip(reason),
    };

    let shape = match kind {
        ShapeKind::Rect => CavityShape::Rect,
        ShapeKind::RoundedRect => CavityShape::RoundedRect {
            radius: radius.unwrap_or(0.0).min(length.min(width) / 2.0),
        },
        ShapeKind::Circle => CavityShape::Circle,
        ShapeKind::Polygon => {
            let points = polygon_points(raw);
            if points.len() < 3 {
                return Validated::Skip(SkipReason::TooFewVertices(points.len()));
            }
            CavityShape::Polygon { points }
        }
    };

    Validated::Keep(Cavity {
        shape,
        x,
        y,
        length,
        width,
        depth,
        label: fields::text(raw, fields::LABEL).map(str::to_string),
    })
}

/// Resolve a list of raw cavities, dropping the malformed ones.
pub fn resolve_cavities(entries: &[Value]) -> Vec<Cavity> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| match resolve_cavity(raw) {
            Validated::Keep(cavity) => Some(cavity),
            Validated::Skip(reason) => {
                debug!(index, %reason, "Skipping cavity");
                None
            }
        })
        .collect()
}

fn require_positive(value: Option<f64>, field: &'static str) -> Result<f64, SkipReason> {
    match value {
        None => Err(SkipReason::Missing(field)),
        Some(v) if v > 0.0 => Ok(v),
        Some(v) => Err(SkipReason::NotPositive { field, value: v }),
    }
}

fn require_normalized(value: Option<f64>, field: &'static str) -> Result<f64, SkipReason> {
    match value {
        None => Err(SkipReason::Missing(field)),
        Some(v) if (0.0..=1.0).contains(&v) => Ok(v),
        Some(v) => Err(SkipReason::OutOfRange { field, value: v }),
    }
}

/// Accepts `[[x, y], ...]` or `[{"x": .., "y": ..}, ...]`; invalid vertices are ignored.
fn polygon_points(raw: &Value) -> Vec<NormalizedPoint> {
    let Some(entries) = fields::array(raw, fields::POINTS) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::Array(pair) if pair.len() >= 2 => {
                Some(NormalizedPoint::new(pair[0].as_f64()?, pair[1].as_f64()?))
            }
            Value::Object(_) => Some(NormalizedPoint::new(
                fields::number(entry, &["x", "nx"])?,
                fields::number(entry, &["y", "ny"])?,
            )),
            _ => None,
        })
        .filter(NormalizedPoint::is_valid)
        .collect()
}
