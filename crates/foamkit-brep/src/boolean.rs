//! Boolean difference
//!
//! Cavities are removed from a layer by chaining one difference per cavity:
//!
//! ```text
//! r1 = base - c1
//! r2 = r1 - c2
//! ...
//! CSG_SOLID(rn)
//! ```
//!
//! The result is a constructive tree over the exact box solids; the evaluated
//! boundary is left to the consuming CAD tool.

use crate::arena::EntityId;
use crate::entity::Entity;
use crate::kernel::Kernel;

/// Subtract every tool solid from `base`, in order.
///
/// Returns `base` unchanged when there is nothing to subtract, otherwise the
/// wrapping CSG solid.
pub fn subtract_all(kernel: &mut Kernel<'_>, name: &str, base: EntityId, tools: &[EntityId]) -> EntityId {
    if tools.is_empty() {
        return base;
    }

    let tree = tools.iter().fold(base, |first, &second| {
        kernel.alloc(Entity::BooleanDifference { first, second })
    });

    kernel.alloc(Entity::CsgSolid {
        name: name.to_string(),
        tree,
    })
}
