//! # FoamKit Designer
//!
//! 2D artifacts for a foam part: the annotated SVG drawing and the DXF
//! outline derived from it.
//!
//! ## Components
//!
//! - **Drawing**: top-down projection of the canonical layout, one group per layer
//! - **Legend**: replaceable overlay with quote, block size, material and cavity count
//! - **DXF**: outline document writer (inches, bottom-left origin)
//! - **Outline**: drawing primitives (or layout geometry) to DXF entities
//!
//! ## Architecture
//!
//! ```text
//! CanonicalLayout ──> Projection ──> SVG drawing ──> legend overlay
//!        │                               │
//!        │                               └──> parsed primitives ──┐
//!        └──────────────> primitives ─────────────────────────────┴──> Y flip ──> DXF
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use foamkit_designer::{build_drawing, build_outline, DrawingOptions, Legend};
//!
//! let options = DrawingOptions::default();
//! let legend = Legend::for_layout("Q-1001", &layout).with_material("PE 1.7 lb");
//! let svg = build_drawing(&layout, &options, &legend);
//! let dxf = build_outline(Some(&svg), Some(&layout), &options);
//! ```

pub mod drawing;
pub mod dxf;
pub mod legend;
pub mod outline;

pub use drawing::{build_drawing, DrawingOptions, Primitive, Projection, BLOCK_ID};
pub use dxf::{DxfDocument, DxfEntity, DxfShape, Point, CAVITY_LAYER, OUTLINE_LAYER};
pub use legend::{apply_legend, strip_annotations, Legend, LEGEND_ID};
pub use outline::{build_outline, outline_from_drawing, outline_from_layout, Flip};
