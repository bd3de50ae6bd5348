use foamkit_brep::{Entity, EntityArena, FaceSide, Kernel};
use nalgebra::{Point3, Vector3};

#[test]
fn test_single_box_topology_counts() {
    let mut arena = EntityArena::new();
    let mut kernel = Kernel::new(&mut arena);
    let solid = kernel.build_box("block", Point3::origin(), 10.0, 8.0, 2.0);

    assert_eq!(arena.count("ADVANCED_FACE"), 6);
    assert_eq!(arena.count("EDGE_LOOP"), 6);
    assert_eq!(arena.count("EDGE_CURVE"), 24);
    assert_eq!(arena.count("ORIENTED_EDGE"), 24);
    assert_eq!(arena.count("CARTESIAN_POINT"), 8);
    assert_eq!(arena.count("VERTEX_POINT"), 8);
    assert_eq!(arena.count("PLANE"), 6);
    assert_eq!(arena.count("CLOSED_SHELL"), 1);
    assert_eq!(arena.count("MANIFOLD_SOLID_BREP"), 1);

    assert_eq!(solid.solid.get(), arena.len());
    assert_eq!(solid.max_corner(), Point3::new(10.0, 8.0, 2.0));
}

#[test]
fn test_face_planes_carry_outward_normals() {
    let mut arena = EntityArena::new();
    let mut kernel = Kernel::new(&mut arena);
    let solid = kernel.build_box("block", Point3::new(1.0, 1.0, 1.0), 2.0, 3.0, 4.0);

    for (face, side) in solid.faces.iter().zip(FaceSide::ALL) {
        let Some(Entity::AdvancedFace { surface, name, .. }) = arena.get(*face) else {
            panic!("expected face at {}", face);
        };
        assert!(name.ends_with(side.name()));

        let Some(Entity::Plane { position }) = arena.get(*surface) else {
            panic!("expected plane");
        };
        let Some(Entity::Axis2Placement3D { axis, .. }) = arena.get(*position) else {
            panic!("expected placement");
        };
        assert_eq!(arena.get(*axis), Some(&Entity::Direction(side.outward_normal())));
    }
}

#[test]
fn test_edges_have_unit_directions_and_lengths() {
    let mut arena = EntityArena::new();
    let mut kernel = Kernel::new(&mut arena);
    kernel.build_box("block", Point3::origin(), 3.0, 2.0, 1.0);

    let mut magnitudes: Vec<f64> = arena
        .iter()
        .filter_map(|(_, entity)| match entity {
            Entity::Vector { direction, magnitude } => {
                if let Some(Entity::Direction(d)) = arena.get(*direction) {
                    assert!((d.norm() - 1.0).abs() < 1e-12);
                }
                Some(*magnitude)
            }
            _ => None,
        })
        .collect();
    magnitudes.sort_by(|a, b| a.total_cmp(b));

    // Each of the 12 box edges is used by two faces
    assert_eq!(magnitudes.len(), 24);
    assert_eq!(magnitudes.iter().filter(|m| **m == 1.0).count(), 8);
    assert_eq!(magnitudes.iter().filter(|m| **m == 2.0).count(), 8);
    assert_eq!(magnitudes.iter().filter(|m| **m == 3.0).count(), 8);
}

#[test]
fn test_reference_directions_lie_in_face() {
    for side in FaceSide::ALL {
        let normal: Vector3<f64> = side.outward_normal();
        assert_eq!(normal.norm(), 1.0);
        assert_eq!(normal.dot(&side.reference_direction()), 0.0);
    }
}
