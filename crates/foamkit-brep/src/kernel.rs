//! # Box Kernel
//!
//! Builds axis-aligned rectangular solids as explicit boundary
//! representations:
//!
//! ```text
//! 8 points -> 8 vertices
//! 6 faces  x 4 edges (line + direction + vector + edge curve + oriented edge)
//!          -> edge loop -> outer bound
//!          -> plane (origin, outward normal, reference direction)
//!          -> advanced face
//! 6 faces  -> closed shell -> manifold solid
//! ```
//!
//! Every face owns its four edges. Loops run counter-clockwise when viewed
//! from outside the solid, so each loop agrees with its face normal.

use crate::arena::{EntityArena, EntityId};
use crate::entity::Entity;
use nalgebra::{Point3, Vector3};

/// The six sides of a box, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceSide {
    Bottom,
    Top,
    Front,
    Back,
    Left,
    Right,
}

impl FaceSide {
    pub const ALL: [FaceSide; 6] = [
        FaceSide::Bottom,
        FaceSide::Top,
        FaceSide::Front,
        FaceSide::Back,
        FaceSide::Left,
        FaceSide::Right,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Bottom => "bottom",
            Self::Top => "top",
            Self::Front => "front",
            Self::Back => "back",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    pub fn outward_normal(self) -> Vector3<f64> {
        match self {
            Self::Bottom => -Vector3::z(),
            Self::Top => Vector3::z(),
            Self::Front => -Vector3::y(),
            Self::Back => Vector3::y(),
            Self::Left => -Vector3::x(),
            Self::Right => Vector3::x(),
        }
    }

    /// In-plane reference direction, perpendicular to the normal
    pub fn reference_direction(self) -> Vector3<f64> {
        match self {
            Self::Left | Self::Right => Vector3::y(),
            _ => Vector3::x(),
        }
    }

    /// Corner indices of the boundary loop.
    ///
    /// Corners 0..4 sit on the bottom plane, 4..8 on the top, in the order
    /// (x0,y0) (x1,y0) (x1,y1) (x0,y1).
    fn corner_loop(self) -> [usize; 4] {
        match self {
            Self::Bottom => [0, 3, 2, 1],
            Self::Top => [4, 5, 6, 7],
            Self::Front => [0, 1, 5, 4],
            Self::Back => [3, 7, 6, 2],
            Self::Left => [0, 4, 7, 3],
            Self::Right => [1, 2, 6, 5],
        }
    }
}

/// Handles to one constructed box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSolid {
    pub solid: EntityId,
    pub shell: EntityId,
    pub faces: [EntityId; 6],
    /// Minimum corner in inches
    pub corner: Point3<f64>,
    /// Length, width, height in inches
    pub size: Vector3<f64>,
}

impl BoxSolid {
    pub fn max_corner(&self) -> Point3<f64> {
        self.corner + self.size
    }
}

/// Solid constructor writing into a borrowed arena.
pub struct Kernel<'a> {
    arena: &'a mut EntityArena,
}

impl<'a> Kernel<'a> {
    pub fn new(arena: &'a mut EntityArena) -> Self {
        Self { arena }
    }

    pub fn arena(&self) -> &EntityArena {
        self.arena
    }

    pub fn alloc(&mut self, entity: Entity) -> EntityId {
        self.arena.alloc(entity)
    }

    /// Build a closed box with its minimum corner at `corner` (inches).
    pub fn build_box(
        &mut self,
        name: &str,
        corner: Point3<f64>,
        length: f64,
        width: f64,
        height: f64,
    ) -> BoxSolid {
        let size = Vector3::new(length, width, height);
        let (x0, y0, z0) = (corner.x, corner.y, corner.z);
        let (x1, y1, z1) = (x0 + length, y0 + width, z0 + height);
        let corners = [
            Point3::new(x0, y0, z0),
            Point3::new(x1, y0, z0),
            Point3::new(x1, y1, z0),
            Point3::new(x0, y1, z0),
            Point3::new(x0, y0, z1),
            Point3::new(x1, y0, z1),
            Point3::new(x1, y1, z1),
            Point3::new(x0, y1, z1),
        ];

        let points = corners.map(|p| self.arena.alloc(Entity::CartesianPoint(p)));
        let vertices = points.map(|point| self.arena.alloc(Entity::VertexPoint { point }));

        let faces = FaceSide::ALL.map(|side| {
            let face_name = format!("{} {}", name, side.name());
            self.build_face(&face_name, side, &corners, &points, &vertices)
        });

        let shell = self.arena.alloc(Entity::ClosedShell {
            faces: faces.to_vec(),
        });
        let solid = self.arena.alloc(Entity::ManifoldSolidBrep {
            name: name.to_string(),
            shell,
        });

        BoxSolid {
            solid,
            shell,
            faces,
            corner,
            size,
        }
    }

    fn build_face(
        &mut self,
        name: &str,
        side: FaceSide,
        corners: &[Point3<f64>; 8],
        points: &[EntityId; 8],
        vertices: &[EntityId; 8],
    ) -> EntityId {
        let ring = side.corner_loop();
        let mut edges = Vec::with_capacity(4);
        for i in 0..4 {
            let (from, to) = (ring[i], ring[(i + 1) % 4]);
            edges.push(self.build_edge(corners[from], corners[to], points[from], vertices[from], vertices[to]));
        }

        let edge_loop = self.arena.alloc(Entity::EdgeLoop { edges });
        let bound = self.arena.alloc(Entity::FaceOuterBound { edge_loop });

        let axis = self.arena.alloc(Entity::Direction(side.outward_normal()));
        let ref_direction = self.arena.alloc(Entity::Direction(side.reference_direction()));
        let position = self.arena.alloc(Entity::Axis2Placement3D {
            location: points[ring[0]],
            axis,
            ref_direction,
        });
        let surface = self.arena.alloc(Entity::Plane { position });

        self.arena.alloc(Entity::AdvancedFace {
            name: name.to_string(),
            bound,
            surface,
        })
    }

    fn build_edge(
        &mut self,
        from: Point3<f64>,
        to: Point3<f64>,
        point: EntityId,
        start: EntityId,
        end: EntityId,
    ) -> EntityId {
        let span = to - from;
        let direction = self.arena.alloc(Entity::Direction(span.normalize()));
        let vector = self.arena.alloc(Entity::Vector {
            direction,
            magnitude: span.norm(),
        });
        let curve = self.arena.alloc(Entity::Line { point, vector });
        let edge = self.arena.alloc(Entity::EdgeCurve { start, end, curve });
        self.arena.alloc(Entity::OrientedEdge { edge })
    }
}
