//! # FoamKit B-rep
//!
//! Boundary-representation kernel for foam inserts, with interchange
//! (ISO 10303-21 / STEP) serialization.
//!
//! ## Components
//!
//! - **Arena**: the one allocator for record identifiers; never emits a forward reference
//! - **Kernel**: six-face rectangular solids with explicit topology
//! - **Boolean**: chained differences wrapped in a constructive solid
//! - **Metadata**: product chain and millimetre representation context
//! - **Writer**: header and data sections
//! - **Builder**: canonical layout to finished document
//!
//! Geometry is kept in inches and converted to millimetres only when records
//! are rendered.
//!
//! ```rust,ignore
//! use foamkit_brep::{build_solid_model, CavityRealization, SolidModelOptions};
//!
//! let options = SolidModelOptions::new("Q-1001", CavityRealization::BoundingBoxCut);
//! let step = build_solid_model(&layout, &options);
//! ```

pub mod arena;
pub mod boolean;
pub mod builder;
pub mod entity;
pub mod kernel;
pub mod metadata;
pub mod writer;

pub use arena::{EntityArena, EntityId};
pub use boolean::subtract_all;
pub use builder::{
    build_solid_model, build_solid_model_with_stats, step_file_name, CavityRealization,
    SolidModel, SolidModelOptions, SolidModelStats,
};
pub use entity::Entity;
pub use kernel::{BoxSolid, FaceSide, Kernel};
pub use metadata::{begin_product, finish_product, ProductChain};
pub use writer::{write_document, StepHeader};
