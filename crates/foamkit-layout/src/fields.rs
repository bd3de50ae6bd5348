//! Field alias resolution
//!
//! Layout data arrives from several generations of callers that spell the
//! same attribute differently. Each canonical attribute has one ordered list
//! of accepted source keys; the first key that yields a usable value wins.
//! Resolution happens once, during normalization.

use foamkit_core::{parse_length, LengthUnit};
use serde_json::Value;

pub const BLOCK: &[&str] = &["block", "outer", "foam"];
pub const STACK: &[&str] = &["stack", "layers"];
pub const CAVITIES: &[&str] = &["cavities", "cutouts", "pockets"];

pub const LENGTH: &[&str] = &["lengthIn", "length_in", "length", "len", "L", "l"];
pub const WIDTH: &[&str] = &["widthIn", "width_in", "width", "W", "w"];
pub const BLOCK_THICKNESS: &[&str] = &[
    "thicknessIn",
    "thickness_in",
    "thickness",
    "heightIn",
    "height_in",
    "height",
    "H",
    "T",
];
pub const LAYER_THICKNESS: &[&str] = &[
    "thicknessIn",
    "thickness_in",
    "thickness",
    "thick",
    "heightIn",
    "height",
];
pub const DEPTH: &[&str] = &["depthIn", "depth_in", "depth", "cutDepthIn", "cut_depth", "d"];
pub const POS_X: &[&str] = &["x", "nx", "xNorm", "x_norm", "left"];
pub const POS_Y: &[&str] = &["y", "ny", "yNorm", "y_norm", "top"];
pub const CORNER_RADIUS: &[&str] = &[
    "cornerRadiusIn",
    "corner_radius_in",
    "cornerRadius",
    "corner_radius",
    "radiusIn",
    "radius",
    "r",
];
pub const DIAMETER: &[&str] = &["diameterIn", "diameter_in", "diameter", "dia"];
pub const SHAPE: &[&str] = &["shape", "type", "kind"];
pub const POINTS: &[&str] = &["points", "vertices", "polygon", "pts"];
pub const LABEL: &[&str] = &["label", "name"];

pub const CORNER_STYLE: &[&str] = &["cornerStyle", "corner_style", "corners"];
pub const CORNER_SIZE: &[&str] = &["cornerSize", "corner_size", "chamferIn", "chamfer_in"];

/// First present, non-null value among `aliases`
pub fn lookup<'a>(obj: &'a Value, aliases: &[&str]) -> Option<&'a Value> {
    let map = obj.as_object()?;
    aliases
        .iter()
        .filter_map(|key| map.get(*key))
        .find(|v| !v.is_null())
}

/// First alias that converts to a finite number.
///
/// Strings are accepted as decimal or fractional inches ("1 1/2"), or with an
/// explicit unit suffix ("38mm", "1.5in").
pub fn number(obj: &Value, aliases: &[&str]) -> Option<f64> {
    let map = obj.as_object()?;
    aliases
        .iter()
        .filter_map(|key| map.get(*key))
        .find_map(value_as_inches)
}

/// First alias that converts to a finite, strictly positive number
pub fn positive(obj: &Value, aliases: &[&str]) -> Option<f64> {
    let map = obj.as_object()?;
    aliases
        .iter()
        .filter_map(|key| map.get(*key))
        .filter_map(value_as_inches)
        .find(|v| *v > 0.0)
}

pub fn text<'a>(obj: &'a Value, aliases: &[&str]) -> Option<&'a str> {
    let map = obj.as_object()?;
    aliases
        .iter()
        .filter_map(|key| map.get(*key))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
}

/// First string among `aliases`, exactly as supplied
pub fn verbatim_text<'a>(obj: &'a Value, aliases: &[&str]) -> Option<&'a str> {
    let map = obj.as_object()?;
    aliases
        .iter()
        .filter_map(|key| map.get(*key))
        .filter_map(Value::as_str)
        .find(|s| !s.is_empty())
}

/// First JSON number among `aliases`, without unit interpretation
pub fn verbatim_number(obj: &Value, aliases: &[&str]) -> Option<f64> {
    let map = obj.as_object()?;
    aliases
        .iter()
        .filter_map(|key| map.get(*key))
        .filter_map(Value::as_f64)
        .find(|v| v.is_finite())
}

pub fn array<'a>(obj: &'a Value, aliases: &[&str]) -> Option<&'a Vec<Value>> {
    let map = obj.as_object()?;
    aliases
        .iter()
        .filter_map(|key| map.get(*key))
        .find_map(Value::as_array)
}

fn value_as_inches(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_with_suffix(s),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

fn parse_with_suffix(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if let Some(mm) = s.strip_suffix("mm") {
        return parse_length(mm, LengthUnit::Millimeter).ok();
    }
    let s = s
        .strip_suffix("in")
        .or_else(|| s.strip_suffix('"'))
        .unwrap_or(s);
    parse_length(s, LengthUnit::Inch).ok()
}
