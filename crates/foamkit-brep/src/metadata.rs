//! Product metadata chain
//!
//! Minimal part structure that lets CAD tools open the file as a product
//! rather than loose geometry:
//!
//! ```text
//! APPLICATION_CONTEXT
//!   ├── APPLICATION_PROTOCOL_DEFINITION
//!   ├── PRODUCT_CONTEXT -> PRODUCT -> PRODUCT_DEFINITION_FORMATION
//!   └── PRODUCT_DEFINITION_CONTEXT
//!         └── PRODUCT_DEFINITION -> PRODUCT_DEFINITION_SHAPE
//! units + uncertainty -> GEOMETRIC_REPRESENTATION_CONTEXT
//! SHAPE_REPRESENTATION (solids, context) -> SHAPE_DEFINITION_REPRESENTATION
//! ```

use crate::arena::EntityId;
use crate::entity::Entity;
use crate::kernel::Kernel;
use nalgebra::{Point3, Vector3};

/// Handles needed to attach geometry once it has been built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductChain {
    pub definition_shape: EntityId,
    pub context: EntityId,
    /// World placement listed first among the representation items
    pub origin: EntityId,
}

/// Emit the product records and the millimetre representation context.
pub fn begin_product(kernel: &mut Kernel<'_>, product_id: &str, product_name: &str) -> ProductChain {
    let application = kernel.alloc(Entity::ApplicationContext);
    kernel.alloc(Entity::ApplicationProtocolDefinition {
        context: application,
    });
    let product_context = kernel.alloc(Entity::ProductContext {
        context: application,
    });
    let product = kernel.alloc(Entity::Product {
        id: product_id.to_string(),
        name: product_name.to_string(),
        context: product_context,
    });
    let formation = kernel.alloc(Entity::ProductDefinitionFormation { product });
    let definition_context = kernel.alloc(Entity::ProductDefinitionContext {
        context: application,
    });
    let definition = kernel.alloc(Entity::ProductDefinition {
        formation,
        context: definition_context,
    });
    let definition_shape = kernel.alloc(Entity::ProductDefinitionShape { definition });

    let length = kernel.alloc(Entity::LengthUnitMillimetre);
    let angle = kernel.alloc(Entity::PlaneAngleUnit);
    let solid_angle = kernel.alloc(Entity::SolidAngleUnit);
    let uncertainty = kernel.alloc(Entity::Uncertainty { unit: length });
    let context = kernel.alloc(Entity::GeometricContext {
        uncertainty,
        units: [length, angle, solid_angle],
    });

    let location = kernel.alloc(Entity::CartesianPoint(Point3::origin()));
    let axis = kernel.alloc(Entity::Direction(Vector3::z()));
    let ref_direction = kernel.alloc(Entity::Direction(Vector3::x()));
    let origin = kernel.alloc(Entity::Axis2Placement3D {
        location,
        axis,
        ref_direction,
    });

    ProductChain {
        definition_shape,
        context,
        origin,
    }
}

/// Attach the finished solids to the product.
pub fn finish_product(
    kernel: &mut Kernel<'_>,
    chain: ProductChain,
    name: &str,
    solids: &[EntityId],
) -> EntityId {
    let mut items = Vec::with_capacity(solids.len() + 1);
    items.push(chain.origin);
    items.extend_from_slice(solids);

    let representation = kernel.alloc(Entity::ShapeRepresentation {
        name: name.to_string(),
        items,
        context: chain.context,
    });
    kernel.alloc(Entity::ShapeDefinitionRepresentation {
        shape: chain.definition_shape,
        representation,
    })
}
