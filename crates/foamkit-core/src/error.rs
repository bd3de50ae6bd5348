//! Error handling for FoamKit
//!
//! Provides error types for every stage of the export pipeline:
//! - Layout errors (normalization and lock comparison)
//! - Export errors (artifact persistence)
//! - Service errors (delegated solid-model construction)
//!
//! Expected data-quality problems (a malformed cavity, an unusable layer) are
//! not errors at all; they are skipped during normalization. The variants below
//! describe situations a caller has to react to.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Layout error type
///
/// Raised while turning raw layout data into a canonical layout, or while
/// comparing a canonical layout against a locked geometry digest.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Block dimensions could not be resolved to three positive values
    #[error("Insufficient layout data: {reason}")]
    InsufficientData {
        /// What was missing or invalid.
        reason: String,
    },

    /// A stack was supplied but no layer resolved a positive thickness
    #[error("No valid layers in stack ({dropped} dropped)")]
    NoValidLayers {
        /// Number of stack entries that were dropped.
        dropped: usize,
    },

    /// The geometry of a locked quote no longer matches its committed digest
    #[error("Geometry drift: locked digest {stored} does not match current digest {current}")]
    GeometryDrift {
        /// The digest committed when the quote was locked.
        stored: String,
        /// The digest recomputed from the current layout.
        current: String,
    },

    /// The quote is locked but no digest was committed for it
    #[error("Locked quote has no committed geometry digest (current digest {current})")]
    MissingLockDigest {
        /// The digest recomputed from the current layout.
        current: String,
    },
}

/// Export error type
///
/// Represents failures while persisting or packaging export artifacts.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Artifact could not be written
    #[error("Failed to write {artifact}: {reason}")]
    WriteFailed {
        /// The artifact being written (drawing, outline, solid).
        artifact: String,
        /// The reason the write failed.
        reason: String,
    },

    /// Layout input could not be parsed
    #[error("Invalid layout document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    /// Export was refused because of a layout problem
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Delegated solid-model service error type
///
/// Represents failures talking to an external solid-model builder. These are
/// always logged and converted into an absent artifact by the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// No endpoint configured for the delegated strategy
    #[error("Solid-model service endpoint not configured")]
    NotConfigured,

    /// The request did not finish inside the configured bound
    #[error("Solid-model service timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout duration in milliseconds.
        timeout_ms: u64,
    },

    /// The request was cancelled by the caller
    #[error("Solid-model request cancelled")]
    Cancelled,

    /// The service answered with a non-success status
    #[error("Solid-model service returned status {status}: {detail}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body excerpt or error message.
        detail: String,
    },

    /// The service answered but reported failure in its wrapper
    #[error("Solid-model service rejected the request: {reason}")]
    Rejected {
        /// Error text reported by the service.
        reason: String,
    },

    /// The response body could not be interpreted
    #[error("Malformed solid-model response: {reason}")]
    MalformedResponse {
        /// Why the body was rejected.
        reason: String,
    },

    /// Transport-level failure (connect, TLS, body read)
    #[error("Solid-model transport error: {reason}")]
    Transport {
        /// The underlying transport error message.
        reason: String,
    },
}
