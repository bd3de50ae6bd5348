//! # Lock Gate
//!
//! Compares a canonical layout against the digest committed when its quote
//! was locked for production. The stored digest belongs to the caller and is
//! only ever read here.

use crate::hash::{geometry_hash, GeometryHash};
use crate::types::CanonicalLayout;
use foamkit_core::LayoutError;
use tracing::{debug, warn};

/// Lock status of the owning quote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockState {
    pub locked: bool,
    pub stored_hash: Option<GeometryHash>,
}

impl LockState {
    pub fn unlocked() -> Self {
        Self::default()
    }

    pub fn locked(stored_hash: impl Into<GeometryHash>) -> Self {
        Self {
            locked: true,
            stored_hash: Some(stored_hash.into()),
        }
    }
}

/// Result of comparing a stored digest with the current geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockComparison {
    pub matches: bool,
    /// Freshly computed digest
    pub current: GeometryHash,
}

pub fn compare_lock(stored: &GeometryHash, layout: &CanonicalLayout) -> LockComparison {
    let current = geometry_hash(layout);
    LockComparison {
        matches: &current == stored,
        current,
    }
}

/// Decide whether an export may proceed.
///
/// Returns the current digest when allowed.
///
/// # Errors
/// [`LayoutError::GeometryDrift`] when the quote is locked and the current
/// geometry no longer matches the stored digest;
/// [`LayoutError::MissingLockDigest`] when it is locked with nothing stored.
pub fn check_export_gate(
    lock: &LockState,
    layout: &CanonicalLayout,
) -> Result<GeometryHash, LayoutError> {
    if !lock.locked {
        let current = geometry_hash(layout);
        debug!(hash = %current, "Quote unlocked; geometry hash is informational");
        return Ok(current);
    }

    let Some(stored) = &lock.stored_hash else {
        let current = geometry_hash(layout);
        warn!(hash = %current, "Quote locked without a stored geometry hash; refusing export");
        return Err(LayoutError::MissingLockDigest {
            current: current.to_string(),
        });
    };

    let comparison = compare_lock(stored, layout);
    if comparison.matches {
        Ok(comparison.current)
    } else {
        warn!(stored = %stored, current = %comparison.current, "Geometry drift on locked quote");
        Err(LayoutError::GeometryDrift {
            stored: stored.to_string(),
            current: comparison.current.to_string(),
        })
    }
}
