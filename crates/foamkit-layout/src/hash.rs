//! # Geometry Hash
//!
//! Deterministic SHA-256 digest over the geometric content of a
//! [`CanonicalLayout`].
//!
//! The digest covers:
//! - Block length, width and thickness
//! - Stack count and every layer thickness, in stack order
//! - Each cavity's shape, position, size and depth
//!
//! Labels and corner metadata are presentation only and never hashed.
//!
//! Every number is written with six decimals, so the digest resolves
//! differences of one micro-inch. Values closer than half of that round to
//! the same text and hash identically; this absorbs float noise from
//! re-serialized layouts.
//! Cavities within one layer are an unordered set, so their encodings are
//! sorted before hashing.

use crate::types::{CanonicalLayout, Cavity, CavityShape, Layer};
use sha2::{Digest, Sha256};
use std::fmt;

/// Lowercase hex SHA-256 digest of a layout's geometry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeometryHash(String);

impl GeometryHash {
    /// Wrap an externally stored digest. Whitespace is trimmed and hex is
    /// lower-cased so stored values compare regardless of how they were saved.
    pub fn new(hex: impl AsRef<str>) -> Self {
        Self(hex.as_ref().trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GeometryHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GeometryHash {
    fn from(hex: &str) -> Self {
        Self::new(hex)
    }
}

/// Compute the geometry digest. Never cached.
pub fn geometry_hash(layout: &CanonicalLayout) -> GeometryHash {
    let mut hasher = Sha256::new();
    hasher.update(canonical_encoding(layout).as_bytes());
    let digest: [u8; 32] = hasher.finalize().into();
    GeometryHash(digest.iter().map(|b| format!("{:02x}", b)).collect())
}

/// Text form fed to the hasher, one record per line.
pub fn canonical_encoding(layout: &CanonicalLayout) -> String {
    let block = &layout.block;
    let mut out = format!(
        "block:{}:{}:{}\nstack:{}\n",
        num(block.length),
        num(block.width),
        num(block.thickness),
        layout.layers.len()
    );
    for (index, layer) in layout.layers.iter().enumerate() {
        out.push_str(&encode_layer(index, layer));
    }
    out
}

fn encode_layer(index: usize, layer: &Layer) -> String {
    let mut cavities: Vec<String> = layer.cavities.iter().map(encode_cavity).collect();
    cavities.sort();

    let mut out = format!("layer:{}:{}:{}\n", index, num(layer.thickness), cavities.len());
    for cavity in cavities {
        out.push_str(&cavity);
        out.push('\n');
    }
    out
}

fn encode_cavity(cavity: &Cavity) -> String {
    let detail = match &cavity.shape {
        CavityShape::Rect | CavityShape::Circle => String::new(),
        CavityShape::RoundedRect { radius } => format!(":r={}", num(*radius)),
        CavityShape::Polygon { points } => {
            let pts: Vec<String> = points
                .iter()
                .map(|p| format!("{},{}", num(p.x), num(p.y)))
                .collect();
            format!(":pts={}", pts.join(";"))
        }
    };
    format!(
        "cavity:{}:{}:{}:{}:{}:{}{}",
        cavity.shape.tag(),
        num(cavity.x),
        num(cavity.y),
        num(cavity.length),
        num(cavity.width),
        num(cavity.depth),
        detail
    )
}

fn num(value: f64) -> String {
    let s = format!("{:.6}", value);
    if s == "-0.000000" {
        "0.000000".to_string()
    } else {
        s
    }
}
