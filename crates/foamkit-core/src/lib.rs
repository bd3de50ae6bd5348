//! # FoamKit Core
//!
//! Core types and utilities shared by every FoamKit crate.
//! Provides the error taxonomy used across the export pipeline and
//! the inch/millimetre conversions the geometry builders rely on.

pub mod error;
pub mod units;

pub use error::{ExportError, LayoutError, ServiceError};
pub use units::{
    format_length, inches_to_mm, mm_to_inches, parse_length, trim_decimal, LengthUnit, MM_PER_INCH,
};
