//! Canonical layout types
//!
//! Every builder downstream of the normalizer works on these types only.
//! All lengths are inches; cavity positions are normalized to the block
//! footprint, measured from the top-left corner of the drawing view.

use serde_json::{json, Map, Value};
use std::fmt;

/// Corner treatment of the outer block.
///
/// Carried through to the artifacts as metadata; never realized geometrically.
#[derive(Debug, Clone, PartialEq)]
pub struct CornerTreatment {
    /// Free-form style tag ("square", "chamfer", "radius", ...)
    pub style: String,
    /// Chamfer or radius magnitude in inches, when supplied
    pub size: Option<f64>,
}

/// Outer foam block.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub length: f64,
    pub width: f64,
    /// Total thickness of the stack
    pub thickness: f64,
    pub corner: Option<CornerTreatment>,
}

impl Block {
    pub fn new(length: f64, width: f64, thickness: f64) -> Self {
        Self {
            length,
            width,
            thickness,
            corner: None,
        }
    }

    /// All three dimensions finite and strictly positive
    pub fn is_valid(&self) -> bool {
        [self.length, self.width, self.thickness]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }

    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("lengthIn".into(), json!(self.length));
        map.insert("widthIn".into(), json!(self.width));
        map.insert("thicknessIn".into(), json!(self.thickness));
        map.insert("length".into(), json!(self.length));
        map.insert("width".into(), json!(self.width));
        map.insert("thickness".into(), json!(self.thickness));
        if let Some(corner) = &self.corner {
            map.insert("cornerStyle".into(), json!(corner.style));
            if let Some(size) = corner.size {
                map.insert("cornerSize".into(), json!(size));
            }
        }
        Value::Object(map)
    }
}

/// A vertex normalized to the owning cavity's footprint (`0..=1` on both axes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_valid(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }
}

/// Cavity cross-section.
#[derive(Debug, Clone, PartialEq)]
pub enum CavityShape {
    Rect,
    RoundedRect { radius: f64 },
    /// Diameter equals the cavity's length and width
    Circle,
    Polygon { points: Vec<NormalizedPoint> },
}

impl CavityShape {
    /// Canonical shape tag
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::RoundedRect { .. } => "roundedRect",
            Self::Circle => "circle",
            Self::Polygon { .. } => "polygon",
        }
    }

    pub fn is_rectangular(&self) -> bool {
        matches!(self, Self::Rect)
    }
}

impl fmt::Display for CavityShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A pocket cut into a layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Cavity {
    pub shape: CavityShape,
    /// Left edge of the footprint, normalized to block length
    pub x: f64,
    /// Top edge of the footprint, normalized to block width
    pub y: f64,
    /// Footprint extent along the block length (inches)
    pub length: f64,
    /// Footprint extent along the block width (inches)
    pub width: f64,
    /// Requested cut depth (inches); clamped to the layer at solid build time
    pub depth: f64,
    pub label: Option<String>,
}

impl Cavity {
    pub fn rect(x: f64, y: f64, length: f64, width: f64, depth: f64) -> Self {
        Self {
            shape: CavityShape::Rect,
            x,
            y,
            length,
            width,
            depth,
            label: None,
        }
    }

    pub fn circle(x: f64, y: f64, diameter: f64, depth: f64) -> Self {
        Self {
            shape: CavityShape::Circle,
            x,
            y,
            length: diameter,
            width: diameter,
            depth,
            label: None,
        }
    }

    pub fn with_shape(mut self, shape: CavityShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Footprint origin in inches relative to the block's top-left corner
    pub fn origin_in(&self, block: &Block) -> (f64, f64) {
        (self.x * block.length, self.y * block.width)
    }

    /// Depth limited to the owning layer's thickness
    pub fn clamped_depth(&self, layer_thickness: f64) -> f64 {
        self.depth.min(layer_thickness)
    }

    pub fn diameter(&self) -> Option<f64> {
        match self.shape {
            CavityShape::Circle => Some(self.length),
            _ => None,
        }
    }

    /// Serializes with canonical fields plus the alias spellings older
    /// consumers expect.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("shape".into(), json!(self.shape.tag()));
        map.insert("type".into(), json!(self.shape.tag()));
        map.insert("x".into(), json!(self.x));
        map.insert("y".into(), json!(self.y));
        map.insert("nx".into(), json!(self.x));
        map.insert("ny".into(), json!(self.y));
        map.insert("lengthIn".into(), json!(self.length));
        map.insert("widthIn".into(), json!(self.width));
        map.insert("depthIn".into(), json!(self.depth));
        map.insert("length".into(), json!(self.length));
        map.insert("width".into(), json!(self.width));
        map.insert("depth".into(), json!(self.depth));
        match &self.shape {
            CavityShape::Rect => {}
            CavityShape::RoundedRect { radius } => {
                map.insert("cornerRadiusIn".into(), json!(radius));
                map.insert("radius".into(), json!(radius));
            }
            CavityShape::Circle => {
                map.insert("diameterIn".into(), json!(self.length));
                map.insert("diameter".into(), json!(self.length));
            }
            CavityShape::Polygon { points } => {
                let pts: Vec<Value> = points.iter().map(|p| json!([p.x, p.y])).collect();
                map.insert("points".into(), Value::Array(pts));
            }
        }
        if let Some(label) = &self.label {
            map.insert("label".into(), json!(label));
        }
        Value::Object(map)
    }
}

/// One foam layer in the stack.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub thickness: f64,
    pub label: Option<String>,
    pub cavities: Vec<Cavity>,
}

impl Layer {
    pub fn new(thickness: f64) -> Self {
        Self {
            thickness,
            label: None,
            cavities: Vec::new(),
        }
    }

    pub fn with_cavity(mut self, cavity: Cavity) -> Self {
        self.cavities.push(cavity);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("thicknessIn".into(), json!(self.thickness));
        map.insert("thickness".into(), json!(self.thickness));
        if let Some(label) = &self.label {
            map.insert("label".into(), json!(label));
        }
        map.insert(
            "cavities".into(),
            Value::Array(self.cavities.iter().map(Cavity::to_value).collect()),
        );
        Value::Object(map)
    }
}

/// The single normalized representation of a foam part.
///
/// Produced by [`crate::normalize_layout`]; shared unchanged by the drawing
/// and solid builders so both artifacts describe the same geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalLayout {
    pub block: Block,
    /// Bottom-to-top; never empty
    pub layers: Vec<Layer>,
}

impl CanonicalLayout {
    /// Sum of layer thicknesses (may differ from the block thickness)
    pub fn stack_thickness(&self) -> f64 {
        self.layers.iter().map(|l| l.thickness).sum()
    }

    pub fn cavity_count(&self) -> usize {
        self.layers.iter().map(|l| l.cavities.len()).sum()
    }

    /// Iterates cavities with the index of their owning layer
    pub fn cavities(&self) -> impl Iterator<Item = (usize, &Cavity)> {
        self.layers
            .iter()
            .enumerate()
            .flat_map(|(i, layer)| layer.cavities.iter().map(move |c| (i, c)))
    }

    pub fn to_value(&self) -> Value {
        json!({
            "block": self.block.to_value(),
            "stack": self.layers.iter().map(Layer::to_value).collect::<Vec<_>>(),
        })
    }
}

/// Outcome of validating one raw item.
#[derive(Debug, Clone, PartialEq)]
pub enum Validated<T> {
    Keep(T),
    Skip(SkipReason),
}

impl<T> Validated<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Keep(item) => Some(item),
            Self::Skip(_) => None,
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip(_))
    }
}

/// Why a raw layer or cavity was dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    NotAnObject,
    Missing(&'static str),
    NotPositive { field: &'static str, value: f64 },
    OutOfRange { field: &'static str, value: f64 },
    TooFewVertices(usize),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "entry is not an object"),
            Self::Missing(field) => write!(f, "missing {}", field),
            Self::NotPositive { field, value } => write!(f, "{} must be positive, got {}", field, value),
            Self::OutOfRange { field, value } => write!(f, "{} must be within 0..1, got {}", field, value),
            Self::TooFewVertices(n) => write!(f, "polygon needs at least 3 vertices, got {}", n),
        }
    }
}
