//! Interchange entity records
//!
//! Every record the kernel can emit. Geometry is held in inches; lengths are
//! converted to millimetres only when a record is rendered.

use crate::arena::EntityId;
use foamkit_core::inches_to_mm;
use nalgebra::{Point3, Vector3};
use std::fmt::Write;

/// One ISO 10303-21 data record.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    // Product metadata
    ApplicationContext,
    ApplicationProtocolDefinition { context: EntityId },
    ProductContext { context: EntityId },
    Product { id: String, name: String, context: EntityId },
    ProductDefinitionFormation { product: EntityId },
    ProductDefinitionContext { context: EntityId },
    ProductDefinition { formation: EntityId, context: EntityId },
    ProductDefinitionShape { definition: EntityId },
    ShapeRepresentation { name: String, items: Vec<EntityId>, context: EntityId },
    ShapeDefinitionRepresentation { shape: EntityId, representation: EntityId },

    // Units and representation context
    LengthUnitMillimetre,
    PlaneAngleUnit,
    SolidAngleUnit,
    Uncertainty { unit: EntityId },
    GeometricContext { uncertainty: EntityId, units: [EntityId; 3] },

    // Geometry
    CartesianPoint(Point3<f64>),
    Direction(Vector3<f64>),
    Vector { direction: EntityId, magnitude: f64 },
    Line { point: EntityId, vector: EntityId },
    Axis2Placement3D { location: EntityId, axis: EntityId, ref_direction: EntityId },
    Plane { position: EntityId },

    // Topology
    VertexPoint { point: EntityId },
    EdgeCurve { start: EntityId, end: EntityId, curve: EntityId },
    OrientedEdge { edge: EntityId },
    EdgeLoop { edges: Vec<EntityId> },
    FaceOuterBound { edge_loop: EntityId },
    AdvancedFace { name: String, bound: EntityId, surface: EntityId },
    ClosedShell { faces: Vec<EntityId> },
    ManifoldSolidBrep { name: String, shell: EntityId },

    // Constructive solids
    BooleanDifference { first: EntityId, second: EntityId },
    CsgSolid { name: String, tree: EntityId },
}

impl Entity {
    /// Identifiers this record points at
    pub fn references(&self) -> Vec<EntityId> {
        match self {
            Self::ApplicationContext
            | Self::LengthUnitMillimetre
            | Self::PlaneAngleUnit
            | Self::SolidAngleUnit
            | Self::CartesianPoint(_)
            | Self::Direction(_) => Vec::new(),
            Self::ApplicationProtocolDefinition { context }
            | Self::ProductContext { context }
            | Self::ProductDefinitionContext { context }
            | Self::Product { context, .. } => vec![*context],
            Self::ProductDefinitionFormation { product } => vec![*product],
            Self::ProductDefinition { formation, context } => vec![*formation, *context],
            Self::ProductDefinitionShape { definition } => vec![*definition],
            Self::ShapeRepresentation { items, context, .. } => {
                let mut refs = items.clone();
                refs.push(*context);
                refs
            }
            Self::ShapeDefinitionRepresentation {
                shape,
                representation,
            } => vec![*shape, *representation],
            Self::Uncertainty { unit } => vec![*unit],
            Self::GeometricContext { uncertainty, units } => {
                let mut refs = vec![*uncertainty];
                refs.extend_from_slice(units);
                refs
            }
            Self::Vector { direction, .. } => vec![*direction],
            Self::Line { point, vector } => vec![*point, *vector],
            Self::Axis2Placement3D {
                location,
                axis,
                ref_direction,
            } => vec![*location, *axis, *ref_direction],
            Self::Plane { position } => vec![*position],
            Self::VertexPoint { point } => vec![*point],
            Self::EdgeCurve { start, end, curve } => vec![*start, *end, *curve],
            Self::OrientedEdge { edge } => vec![*edge],
            Self::EdgeLoop { edges } => edges.clone(),
            Self::FaceOuterBound { edge_loop } => vec![*edge_loop],
            Self::AdvancedFace { bound, surface, .. } => vec![*bound, *surface],
            Self::ClosedShell { faces } => faces.clone(),
            Self::ManifoldSolidBrep { shell, .. } => vec![*shell],
            Self::BooleanDifference { first, second } => vec![*first, *second],
            Self::CsgSolid { tree, .. } => vec![*tree],
        }
    }

    /// Record body without the `#id =` prefix or trailing semicolon
    pub fn render(&self) -> String {
        match self {
            Self::ApplicationContext => {
                "APPLICATION_CONTEXT('core data for automotive mechanical design processes')"
                    .to_string()
            }
            Self::ApplicationProtocolDefinition { context } => format!(
                "APPLICATION_PROTOCOL_DEFINITION('international standard','automotive_design',2000,{})",
                context
            ),
            Self::ProductContext { context } => {
                format!("PRODUCT_CONTEXT('',{},'mechanical')", context)
            }
            Self::Product { id, name, context } => format!(
                "PRODUCT({},{},'',({}))",
                step_string(id),
                step_string(name),
                context
            ),
            Self::ProductDefinitionFormation { product } => {
                format!("PRODUCT_DEFINITION_FORMATION('','',{})", product)
            }
            Self::ProductDefinitionContext { context } => {
                format!("PRODUCT_DEFINITION_CONTEXT('part definition',{},'design')", context)
            }
            Self::ProductDefinition { formation, context } => {
                format!("PRODUCT_DEFINITION('design','',{},{})", formation, context)
            }
            Self::ProductDefinitionShape { definition } => {
                format!("PRODUCT_DEFINITION_SHAPE('','',{})", definition)
            }
            Self::ShapeRepresentation {
                name,
                items,
                context,
            } => format!(
                "SHAPE_REPRESENTATION({},({}),{})",
                step_string(name),
                id_list(items),
                context
            ),
            Self::ShapeDefinitionRepresentation {
                shape,
                representation,
            } => format!("SHAPE_DEFINITION_REPRESENTATION({},{})", shape, representation),
            Self::LengthUnitMillimetre => {
                "(LENGTH_UNIT() NAMED_UNIT(*) SI_UNIT(.MILLI.,.METRE.))".to_string()
            }
            Self::PlaneAngleUnit => {
                "(NAMED_UNIT(*) PLANE_ANGLE_UNIT() SI_UNIT($,.RADIAN.))".to_string()
            }
            Self::SolidAngleUnit => {
                "(NAMED_UNIT(*) SI_UNIT($,.STERADIAN.) SOLID_ANGLE_UNIT())".to_string()
            }
            Self::Uncertainty { unit } => format!(
                "UNCERTAINTY_MEASURE_WITH_UNIT(LENGTH_MEASURE(1.E-07),{},'distance_accuracy_value','confusion accuracy')",
                unit
            ),
            Self::GeometricContext { uncertainty, units } => format!(
                "(GEOMETRIC_REPRESENTATION_CONTEXT(3) GLOBAL_UNCERTAINTY_ASSIGNED_CONTEXT(({})) GLOBAL_UNIT_ASSIGNED_CONTEXT(({})) REPRESENTATION_CONTEXT('Context #1','3D Context with UNIT and UNCERTAINTY'))",
                uncertainty,
                id_list(units)
            ),
            Self::CartesianPoint(p) => format!(
                "CARTESIAN_POINT('',({},{},{}))",
                real(inches_to_mm(p.x)),
                real(inches_to_mm(p.y)),
                real(inches_to_mm(p.z))
            ),
            Self::Direction(d) => {
                format!("DIRECTION('',({},{},{}))", real(d.x), real(d.y), real(d.z))
            }
            Self::Vector {
                direction,
                magnitude,
            } => format!("VECTOR('',{},{})", direction, real(inches_to_mm(*magnitude))),
            Self::Line { point, vector } => format!("LINE('',{},{})", point, vector),
            Self::Axis2Placement3D {
                location,
                axis,
                ref_direction,
            } => format!("AXIS2_PLACEMENT_3D('',{},{},{})", location, axis, ref_direction),
            Self::Plane { position } => format!("PLANE('',{})", position),
            Self::VertexPoint { point } => format!("VERTEX_POINT('',{})", point),
            Self::EdgeCurve { start, end, curve } => {
                format!("EDGE_CURVE('',{},{},{},.T.)", start, end, curve)
            }
            Self::OrientedEdge { edge } => format!("ORIENTED_EDGE('',*,*,{},.T.)", edge),
            Self::EdgeLoop { edges } => format!("EDGE_LOOP('',({}))", id_list(edges)),
            Self::FaceOuterBound { edge_loop } => {
                format!("FACE_OUTER_BOUND('',{},.T.)", edge_loop)
            }
            Self::AdvancedFace {
                name,
                bound,
                surface,
            } => format!(
                "ADVANCED_FACE({},({}),{},.T.)",
                step_string(name),
                bound,
                surface
            ),
            Self::ClosedShell { faces } => format!("CLOSED_SHELL('',({}))", id_list(faces)),
            Self::ManifoldSolidBrep { name, shell } => {
                format!("MANIFOLD_SOLID_BREP({},{})", step_string(name), shell)
            }
            Self::BooleanDifference { first, second } => {
                format!("BOOLEAN_RESULT('',.DIFFERENCE.,{},{})", first, second)
            }
            Self::CsgSolid { name, tree } => format!("CSG_SOLID({},{})", step_string(name), tree),
        }
    }
}

fn id_list(ids: &[EntityId]) -> String {
    let mut out = String::new();
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let _ = write!(out, "{}", id);
    }
    out
}

/// STEP real literal: always carries a decimal point ("50.8", "0.", "-1.")
pub fn real(value: f64) -> String {
    let s = format!("{:.6}", value);
    let s = s.trim_end_matches('0');
    if s == "-0." {
        "0.".to_string()
    } else {
        s.to_string()
    }
}

/// Quoted STEP string; apostrophes doubled, non-ASCII replaced.
pub fn step_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\'' => out.push_str("''"),
            '\\' => out.push_str("\\\\"),
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            _ => out.push('?'),
        }
    }
    out.push('\'');
    out
}
