//! # Outline Derivation
//!
//! Produces the DXF outline of a part, preferably from the drawing's own
//! primitives and otherwise straight from the canonical layout.
//!
//! | Drawing primitive | Outline entities |
//! |-------------------|------------------|
//! | `<rect>` | 4 `LINE` |
//! | `<rect rx>` | 4 `LINE` + 4 `ARC` |
//! | `<circle>` | 1 `CIRCLE` |
//! | `<polygon>` | closed `LWPOLYLINE` |
//!
//! The drawing's origin is top-left, the outline's bottom-left:
//! `outline_y = canvas_height - drawing_y - feature_height`, then every
//! value is divided by the drawing scale to get inches. Overlay groups are
//! stripped before parsing so the legend never reaches the outline.

use crate::drawing::{DrawingOptions, Primitive, Projection, BLOCK_ID};
use crate::dxf::{DxfDocument, Point, CAVITY_LAYER, OUTLINE_LAYER};
use crate::legend::strip_annotations;
use foamkit_layout::CanonicalLayout;
use tracing::{debug, warn};

/// Drawing-to-outline coordinate mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flip {
    pub canvas_height: f64,
    pub scale: f64,
}

impl Flip {
    pub fn point(&self, x: f64, y: f64) -> Point {
        Point::new(x / self.scale, (self.canvas_height - y) / self.scale)
    }

    /// Bottom-left corner of a feature whose top-left drawing corner is (x, y)
    pub fn corner(&self, x: f64, y: f64, height: f64) -> Point {
        Point::new(
            x / self.scale,
            (self.canvas_height - y - height) / self.scale,
        )
    }

    pub fn length(&self, value: f64) -> f64 {
        value / self.scale
    }
}

/// Append the outline entities of one drawing primitive.
pub fn add_primitive(doc: &mut DxfDocument, layer: &str, primitive: &Primitive, flip: &Flip) {
    match primitive {
        Primitive::Rect {
            x,
            y,
            width,
            height,
            radius,
        } => {
            let corner = flip.corner(*x, *y, *height);
            let (w, h) = (flip.length(*width), flip.length(*height));
            if *radius > 0.0 {
                doc.add_rounded_rectangle(layer, corner.x, corner.y, w, h, flip.length(*radius));
            } else {
                doc.add_rectangle(layer, corner.x, corner.y, w, h);
            }
        }
        Primitive::Circle { cx, cy, r } => {
            doc.add_circle(layer, flip.point(*cx, *cy), flip.length(*r));
        }
        Primitive::Polygon { points } => {
            let points = points.iter().map(|(x, y)| flip.point(*x, *y)).collect();
            doc.add_polyline(layer, points, true);
        }
    }
}

/// Parse drawing primitives into an outline.
///
/// Returns `None` when the canvas size cannot be read or nothing drawable
/// is found.
pub fn outline_from_drawing(svg: &str, options: &DrawingOptions) -> Option<DxfDocument> {
    let svg = strip_annotations(svg);
    let root_start = svg.find("<svg")?;
    let root = &svg[root_start..root_start + svg[root_start..].find('>')?];

    let canvas_height = extract_attr_f64(root, "height").or_else(|| {
        extract_attr_str(root, "viewBox")
            .and_then(|vb| vb.split_whitespace().nth(3))
            .and_then(|h| h.parse().ok())
    })?;
    let scale = extract_attr_f64(root, "data-scale")
        .filter(|s| *s > 0.0)
        .unwrap_or(options.scale);
    if !(scale > 0.0 && canvas_height > 0.0) {
        return None;
    }
    let flip = Flip {
        canvas_height,
        scale,
    };

    let mut doc = DxfDocument::new();
    let mut search_pos = root_start + root.len();
    while let Some(offset) = svg[search_pos..].find('<') {
        let tag_start = search_pos + offset;
        let Some(tag_len) = svg[tag_start..].find('>') else {
            break;
        };
        let tag = &svg[tag_start..tag_start + tag_len];
        search_pos = tag_start + tag_len + 1;

        let Some(primitive) = parse_primitive(tag) else {
            continue;
        };
        let layer = if extract_attr_str(tag, "id") == Some(BLOCK_ID) {
            OUTLINE_LAYER
        } else {
            CAVITY_LAYER
        };
        add_primitive(&mut doc, layer, &primitive, &flip);
    }

    if doc.is_empty() {
        None
    } else {
        Some(doc)
    }
}

fn parse_primitive(tag: &str) -> Option<Primitive> {
    let name_end = tag
        .find(|c: char| c.is_whitespace() || c == '/')
        .unwrap_or(tag.len());
    match &tag[1..name_end] {
        "rect" => {
            let width = extract_attr_f64(tag, "width")?;
            let height = extract_attr_f64(tag, "height")?;
            if width <= 0.0 || height <= 0.0 {
                return None;
            }
            let radius = extract_attr_f64(tag, "rx")
                .or_else(|| extract_attr_f64(tag, "ry"))
                .unwrap_or(0.0)
                .max(0.0);
            Some(Primitive::Rect {
                x: extract_attr_f64(tag, "x").unwrap_or(0.0),
                y: extract_attr_f64(tag, "y").unwrap_or(0.0),
                width,
                height,
                radius,
            })
        }
        "circle" => {
            let r = extract_attr_f64(tag, "r")?;
            if r <= 0.0 {
                return None;
            }
            Some(Primitive::Circle {
                cx: extract_attr_f64(tag, "cx").unwrap_or(0.0),
                cy: extract_attr_f64(tag, "cy").unwrap_or(0.0),
                r,
            })
        }
        "polygon" => {
            let points = parse_points(extract_attr_str(tag, "points")?);
            (points.len() >= 3).then_some(Primitive::Polygon { points })
        }
        _ => None,
    }
}

fn parse_points(raw: &str) -> Vec<(f64, f64)> {
    let values: Vec<f64> = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect();
    values.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect()
}

fn extract_attr_str<'a>(tag: &'a str, attr: &str) -> Option<&'a str> {
    let pattern = format!(" {}=\"", attr);
    let start = tag.find(&pattern)? + pattern.len();
    let end = tag[start..].find('"')?;
    Some(&tag[start..start + end])
}

fn extract_attr_f64(tag: &str, attr: &str) -> Option<f64> {
    extract_attr_str(tag, attr)
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Derive the outline directly from layout geometry.
pub fn outline_from_layout(layout: &CanonicalLayout, options: &DrawingOptions) -> DxfDocument {
    let projection = Projection::new(layout, options);
    let flip = Flip {
        canvas_height: projection.canvas_height(),
        scale: options.scale,
    };

    let mut doc = DxfDocument::new();
    add_primitive(&mut doc, OUTLINE_LAYER, &projection.block(), &flip);
    for (_, cavity) in layout.cavities() {
        add_primitive(&mut doc, CAVITY_LAYER, &projection.cavity(cavity), &flip);
    }
    doc
}

/// Outline document text, from the drawing when possible.
pub fn build_outline(
    drawing: Option<&str>,
    layout: Option<&CanonicalLayout>,
    options: &DrawingOptions,
) -> Option<String> {
    let doc = match drawing.and_then(|svg| outline_from_drawing(svg, options)) {
        Some(doc) => {
            debug!(entities = doc.entities().len(), "Outline derived from drawing");
            doc
        }
        None => match layout {
            Some(layout) if layout.block.is_valid() && options.scale > 0.0 => {
                let doc = outline_from_layout(layout, options);
                debug!(entities = doc.entities().len(), "Outline derived from layout");
                doc
            }
            _ => {
                warn!("No drawing or layout available; no outline produced");
                return None;
            }
        },
    };

    match doc.to_dxf_string() {
        Ok(text) => Some(text),
        Err(e) => {
            warn!(error = %e, "Outline serialization failed");
            None
        }
    }
}
