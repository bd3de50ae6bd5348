//! # FoamKit Layout
//!
//! Canonical foam-part geometry and everything that produces or guards it.
//!
//! ## Components
//!
//! - **Layout Normalizer**: legacy single-layer or stacked input into one [`CanonicalLayout`]
//! - **Cavity Shape Resolver**: alias-tolerant cavity parsing with explicit shape precedence
//! - **Geometry Hash**: deterministic digest over geometric content only
//! - **Lock Gate**: refuses exports whose geometry drifted from a locked digest
//!
//! All lengths are inches. Field aliases are resolved once, here; downstream
//! crates only ever see canonical types.

pub mod cavity;
pub mod fields;
pub mod hash;
pub mod lock;
pub mod normalize;
pub mod types;

pub use cavity::{resolve_cavities, resolve_cavity};
pub use hash::{canonical_encoding, geometry_hash, GeometryHash};
pub use lock::{check_export_gate, compare_lock, LockComparison, LockState};
pub use normalize::{normalize_layout, resolve_layer, NormalizeHints};
pub use types::{
    Block, CanonicalLayout, Cavity, CavityShape, CornerTreatment, Layer, NormalizedPoint,
    SkipReason, Validated,
};
