//! # Vector Drawing Builder
//!
//! Projects a canonical layout top-down into an SVG drawing.
//!
//! ## Coordinate system
//! - Origin at the top-left of the canvas, Y grows downwards
//! - Canvas is `L · scale + 2 · margin` by `W · scale + 2 · margin`
//! - A cavity's footprint starts at `margin + x · L · scale`, `margin + y · W · scale`
//!
//! ## Structure
//! ```text
//! <svg data-scale data-margin>
//!   <rect id="foamkit-block"/>
//!   <g id="foamkit-layer-N" data-layer data-label>   one per layer
//!     <rect/> | <rect rx ry/> | <circle/> | <polygon/>
//!     <text class="foamkit-label"/>
//!   </g>
//!   <g id="foamkit-legend">...</g>                    overlay, see legend module
//! </svg>
//! ```

use crate::legend::{apply_legend, Legend};
use foamkit_core::trim_decimal;
use foamkit_layout::{CanonicalLayout, Cavity, CavityShape};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use tracing::debug;

/// Id of the outer block outline
pub const BLOCK_ID: &str = "foamkit-block";

/// Drawing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingOptions {
    /// Drawing units per inch
    pub scale: f64,
    /// Blank border around the block, in drawing units
    pub margin: f64,
    /// Render cavity labels next to their shapes
    pub show_labels: bool,
    pub stroke_width: f64,
}

impl Default for DrawingOptions {
    fn default() -> Self {
        Self {
            scale: 40.0,
            margin: 20.0,
            show_labels: true,
            stroke_width: 1.0,
        }
    }
}

/// A primitive in drawing coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Polygon {
        points: Vec<(f64, f64)>,
    },
}

/// Maps layout inches to drawing units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub scale: f64,
    pub margin: f64,
    pub block_length: f64,
    pub block_width: f64,
}

impl Projection {
    pub fn new(layout: &CanonicalLayout, options: &DrawingOptions) -> Self {
        Self {
            scale: options.scale,
            margin: options.margin,
            block_length: layout.block.length,
            block_width: layout.block.width,
        }
    }

    pub fn canvas_width(&self) -> f64 {
        self.block_length * self.scale + 2.0 * self.margin
    }

    pub fn canvas_height(&self) -> f64 {
        self.block_width * self.scale + 2.0 * self.margin
    }

    pub fn block(&self) -> Primitive {
        Primitive::Rect {
            x: self.margin,
            y: self.margin,
            width: self.block_length * self.scale,
            height: self.block_width * self.scale,
            radius: 0.0,
        }
    }

    /// Footprint of `cavity` as a drawing primitive
    pub fn cavity(&self, cavity: &Cavity) -> Primitive {
        let left = self.margin + cavity.x * self.block_length * self.scale;
        let top = self.margin + cavity.y * self.block_width * self.scale;
        let width = cavity.length * self.scale;
        let height = cavity.width * self.scale;

        match &cavity.shape {
            CavityShape::Rect => Primitive::Rect {
                x: left,
                y: top,
                width,
                height,
                radius: 0.0,
            },
            CavityShape::RoundedRect { radius } => Primitive::Rect {
                x: left,
                y: top,
                width,
                height,
                radius: radius * self.scale,
            },
            CavityShape::Circle => {
                let r = width / 2.0;
                Primitive::Circle {
                    cx: left + r,
                    cy: top + r,
                    r,
                }
            }
            CavityShape::Polygon { points } => Primitive::Polygon {
                points: points
                    .iter()
                    .map(|p| (left + p.x * width, top + p.y * height))
                    .collect(),
            },
        }
    }
}

/// Drawing number format
pub(crate) fn n(value: f64) -> String {
    trim_decimal(value, 4)
}

/// XML text/attribute escaping
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn render_primitive(out: &mut String, primitive: &Primitive, attrs: &str) {
    let _ = match primitive {
        Primitive::Rect {
            x,
            y,
            width,
            height,
            radius,
        } if *radius > 0.0 => writeln!(
            out,
            "    <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{}\" ry=\"{}\" {}/>",
            n(*x),
            n(*y),
            n(*width),
            n(*height),
            n(*radius),
            n(*radius),
            attrs
        ),
        Primitive::Rect {
            x, y, width, height, ..
        } => writeln!(
            out,
            "    <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" {}/>",
            n(*x),
            n(*y),
            n(*width),
            n(*height),
            attrs
        ),
        Primitive::Circle { cx, cy, r } => writeln!(
            out,
            "    <circle cx=\"{}\" cy=\"{}\" r=\"{}\" {}/>",
            n(*cx),
            n(*cy),
            n(*r),
            attrs
        ),
        Primitive::Polygon { points } => {
            let pts: Vec<String> = points
                .iter()
                .map(|(x, y)| format!("{},{}", n(*x), n(*y)))
                .collect();
            writeln!(out, "    <polygon points=\"{}\" {}/>", pts.join(" "), attrs)
        }
    };
}

/// Render the annotated drawing of `layout`.
pub fn build_drawing(layout: &CanonicalLayout, options: &DrawingOptions, legend: &Legend) -> String {
    let projection = Projection::new(layout, options);
    let (width, height) = (projection.canvas_width(), projection.canvas_height());
    let stroke = n(options.stroke_width);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" data-scale=\"{s}\" data-margin=\"{m}\">",
        w = n(width),
        h = n(height),
        s = n(options.scale),
        m = n(options.margin)
    );

    let block_attrs = format!(
        "id=\"{}\" fill=\"#f4f4f4\" stroke=\"#000000\" stroke-width=\"{}\"",
        BLOCK_ID, stroke
    );
    let mut block = String::new();
    render_primitive(&mut block, &projection.block(), &block_attrs);
    svg.push_str("  ");
    svg.push_str(block.trim_start());

    let cavity_attrs = format!("fill=\"#ffffff\" stroke=\"#c0392b\" stroke-width=\"{}\"", stroke);
    for (index, layer) in layout.layers.iter().enumerate() {
        let label = layer.label.as_deref().map(escape).unwrap_or_default();
        let _ = writeln!(
            svg,
            "  <g id=\"foamkit-layer-{i}\" data-layer=\"{i}\" data-label=\"{label}\">",
            i = index,
            label = label
        );
        for cavity in &layer.cavities {
            let primitive = projection.cavity(cavity);
            render_primitive(&mut svg, &primitive, &cavity_attrs);
            if options.show_labels {
                if let Some(text) = &cavity.label {
                    let (x, y) = label_anchor(&primitive);
                    let _ = writeln!(
                        svg,
                        "    <text class=\"foamkit-label\" x=\"{}\" y=\"{}\" font-size=\"10\" text-anchor=\"middle\">{}</text>",
                        n(x),
                        n(y),
                        escape(text)
                    );
                }
            }
        }
        svg.push_str("  </g>\n");
    }
    svg.push_str("</svg>\n");

    debug!(
        layers = layout.layers.len(),
        cavities = layout.cavity_count(),
        width,
        height,
        "Built drawing"
    );

    apply_legend(&svg, legend)
}

fn label_anchor(primitive: &Primitive) -> (f64, f64) {
    match primitive {
        Primitive::Rect {
            x, y, width, height, ..
        } => (x + width / 2.0, y + height / 2.0),
        Primitive::Circle { cx, cy, .. } => (*cx, *cy),
        Primitive::Polygon { points } => {
            let count = points.len().max(1) as f64;
            let (sx, sy) = points
                .iter()
                .fold((0.0, 0.0), |(ax, ay), (x, y)| (ax + x, ay + y));
            (sx / count, sy / count)
        }
    }
}
