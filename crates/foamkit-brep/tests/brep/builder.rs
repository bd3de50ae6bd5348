use foamkit_brep::{
    build_solid_model, build_solid_model_with_stats, CavityRealization, SolidModelOptions,
};
use foamkit_layout::{Block, CanonicalLayout, Cavity, CavityShape, Layer};

fn cut() -> SolidModelOptions {
    SolidModelOptions::new("Q-1", CavityRealization::BoundingBoxCut)
}

fn single_layer(cavities: Vec<Cavity>) -> CanonicalLayout {
    let mut layer = Layer::new(2.0);
    layer.cavities = cavities;
    CanonicalLayout {
        block: Block::new(10.0, 8.0, 2.0),
        layers: vec![layer],
    }
}

fn points(doc: &str) -> Vec<(f64, f64, f64)> {
    doc.lines()
        .filter_map(|line| line.split_once("=CARTESIAN_POINT('',(")?.1.strip_suffix("));"))
        .map(|coords| {
            let v: Vec<f64> = coords.split(',').map(|c| c.parse().unwrap()).collect();
            (v[0], v[1], v[2])
        })
        .collect()
}

#[test]
fn test_plain_block_is_one_box() {
    let model = build_solid_model_with_stats(&single_layer(vec![]), &cut()).unwrap();

    assert_eq!(model.stats.boxes, 1);
    assert_eq!(model.stats.faces, 6);
    assert_eq!(model.stats.edges, 24);
    // 8 corners plus the representation origin
    assert_eq!(model.stats.points, 9);
    assert!(!model.document.contains("BOOLEAN_RESULT"));
    assert!(!model.document.contains("CSG_SOLID"));
}

#[test]
fn test_scenario_cavity_placement() {
    let layout = single_layer(vec![Cavity::rect(0.2, 0.3, 3.0, 2.0, 1.0)]);
    let doc = build_solid_model(&layout, &cut()).unwrap();

    // Corner at (2.0, 2.4) in, spanning z 1.0 to 2.0 in
    assert!(doc.contains("CARTESIAN_POINT('',(50.8,60.96,25.4))"));
    assert!(doc.contains("CARTESIAN_POINT('',(50.8,60.96,50.8))"));
    assert!(doc.contains("CARTESIAN_POINT('',(127.,111.76,50.8))"));
    assert_eq!(doc.matches("BOOLEAN_RESULT('',.DIFFERENCE.").count(), 1);
    assert_eq!(doc.matches("=CSG_SOLID(").count(), 1);
}

#[test]
fn test_cavity_depth_clamped_to_layer() {
    let layout = single_layer(vec![Cavity::rect(0.2, 0.3, 3.0, 2.0, 5.0)]);
    let doc = build_solid_model(&layout, &cut()).unwrap();

    let pts = points(&doc);
    assert!(pts.iter().all(|(_, _, z)| *z >= 0.0 && *z <= 50.8 + 1e-9));
    assert!(pts.contains(&(50.8, 60.96, 0.0)));
}

#[test]
fn test_layers_stack_bottom_to_top() {
    let layout = CanonicalLayout {
        block: Block::new(10.0, 8.0, 3.0),
        layers: vec![
            Layer::new(1.0),
            Layer::new(2.0).with_cavity(Cavity::rect(0.0, 0.0, 1.0, 1.0, 0.5)),
        ],
    };
    let model = build_solid_model_with_stats(&layout, &cut()).unwrap();
    assert_eq!(model.stats.layers, 2);
    assert_eq!(model.stats.boxes, 3);

    let pts = points(&model.document);
    // Second layer base starts at 1 in, cavity spans 2.5 to 3 in
    assert!(pts.contains(&(0.0, 0.0, 25.4)));
    assert!(pts.contains(&(0.0, 0.0, 63.5)));
    assert!(pts.contains(&(25.4, 25.4, 76.2)));
}

#[test]
fn test_realization_modes_are_distinct() {
    let layout = single_layer(vec![
        Cavity::rect(0.1, 0.1, 2.0, 2.0, 1.0),
        Cavity::circle(0.6, 0.5, 2.0, 1.0),
        Cavity::rect(0.4, 0.1, 2.0, 1.0, 1.0)
            .with_shape(CavityShape::RoundedRect { radius: 0.25 }),
    ]);

    let boxed = build_solid_model_with_stats(&layout, &cut()).unwrap();
    assert_eq!(boxed.stats.cavities_cut, 3);
    assert_eq!(boxed.stats.cavities_overlaid, 0);
    assert_eq!(boxed.document.matches("BOOLEAN_RESULT(").count(), 3);

    let overlay = SolidModelOptions::new("Q-1", CavityRealization::VisualOverlay);
    let visual = build_solid_model_with_stats(&layout, &overlay).unwrap();
    assert_eq!(visual.stats.cavities_cut, 1);
    assert_eq!(visual.stats.cavities_overlaid, 2);
    assert_eq!(visual.document.matches("BOOLEAN_RESULT(").count(), 1);
    assert_eq!(visual.document.matches("=MANIFOLD_SOLID_BREP(").count(), 4);
}

#[test]
fn test_unusable_layouts_produce_nothing() {
    let no_layers = CanonicalLayout {
        block: Block::new(10.0, 8.0, 2.0),
        layers: vec![],
    };
    assert!(build_solid_model(&no_layers, &cut()).is_none());

    let zero_layer = CanonicalLayout {
        block: Block::new(10.0, 8.0, 2.0),
        layers: vec![Layer::new(0.0)],
    };
    assert!(build_solid_model(&zero_layer, &cut()).is_none());

    let flat = single_layer(vec![]);
    let flat = CanonicalLayout {
        block: Block::new(10.0, 0.0, 2.0),
        ..flat
    };
    assert!(build_solid_model(&flat, &cut()).is_none());
}
