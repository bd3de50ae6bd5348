use foamkit_core::LayoutError;
use foamkit_layout::{
    normalize_layout, Block, CanonicalLayout, Cavity, CavityShape, CornerTreatment, Layer,
    NormalizeHints, NormalizedPoint,
};
use serde_json::json;

fn defaults() -> NormalizeHints {
    NormalizeHints::default()
}

#[test]
fn test_legacy_layout_becomes_single_layer() {
    let raw = json!({
        "lengthIn": 10, "widthIn": 8, "thicknessIn": 2,
        "cavities": [
            { "lengthIn": 3, "widthIn": 2, "depthIn": 1, "x": 0.2, "y": 0.3 }
        ]
    });

    let layout = normalize_layout(&raw, &defaults()).unwrap();
    assert_eq!(layout.block, Block::new(10.0, 8.0, 2.0));
    assert_eq!(layout.layers.len(), 1);
    assert_eq!(layout.layers[0].thickness, 2.0);
    assert_eq!(
        layout.layers[0].cavities,
        vec![Cavity::rect(0.2, 0.3, 3.0, 2.0, 1.0)]
    );
}

#[test]
fn test_nested_block_with_stack() {
    let raw = json!({
        "block": { "length": 12, "width": 9, "thickness": 3 },
        "stack": [
            { "thickness": 1, "label": "Base" },
            { "thicknessIn": 2, "cavities": [
                { "shape": "circle", "diameter": 2, "depth": 1.5, "x": 0.5, "y": 0.5 }
            ]}
        ]
    });

    let layout = normalize_layout(&raw, &defaults()).unwrap();
    assert_eq!(layout.layers.len(), 2);
    assert_eq!(layout.layers[0].label.as_deref(), Some("Base"));
    assert!(layout.layers[0].cavities.is_empty());
    assert_eq!(layout.layers[1].thickness, 2.0);
    assert_eq!(layout.layers[1].cavities[0].diameter(), Some(2.0));
}

#[test]
fn test_missing_block_dimension_is_insufficient() {
    let raw = json!({ "length": 10, "width": 8 });
    let err = normalize_layout(&raw, &defaults()).unwrap_err();
    assert!(matches!(err, LayoutError::InsufficientData { .. }));

    let raw = json!({ "length": 10, "width": 0, "thickness": 2 });
    assert!(normalize_layout(&raw, &defaults()).is_err());

    assert!(normalize_layout(&json!("not a layout"), &defaults()).is_err());
}

#[test]
fn test_layer_thickness_from_hint() {
    let raw = json!({
        "length": 10, "width": 8, "thickness": 3,
        "layers": [ { "label": "A" }, { "label": "B" }, { "thickness": 1 } ]
    });

    let hints = NormalizeHints::with_layer_thicknesses(vec![1.0, 0.0]);
    let layout = normalize_layout(&raw, &hints).unwrap();

    // "B" has neither its own thickness nor a usable hint
    assert_eq!(layout.layers.len(), 2);
    assert_eq!(layout.layers[0].label.as_deref(), Some("A"));
    assert_eq!(layout.layers[0].thickness, 1.0);
    assert_eq!(layout.layers[1].thickness, 1.0);
}

#[test]
fn test_all_layers_dropped() {
    let raw = json!({
        "length": 10, "width": 8, "thickness": 2,
        "stack": [ { "label": "no thickness" }, { "thickness": -1 } ]
    });
    let err = normalize_layout(&raw, &defaults()).unwrap_err();
    assert_eq!(err, LayoutError::NoValidLayers { dropped: 2 });
}

#[test]
fn test_empty_stack_falls_back_to_legacy() {
    let raw = json!({
        "length": 10, "width": 8, "thickness": 2,
        "stack": [],
        "cavities": [ { "length": 1, "width": 1, "depth": 0.5, "x": 0, "y": 0 } ]
    });
    let layout = normalize_layout(&raw, &defaults()).unwrap();
    assert_eq!(layout.layers.len(), 1);
    assert_eq!(layout.layers[0].cavities.len(), 1);
}

#[test]
fn test_stack_ignores_top_level_cavities() {
    let raw = json!({
        "length": 10, "width": 8, "thickness": 2,
        "stack": [ { "thickness": 2 } ],
        "cavities": [ { "length": 1, "width": 1, "depth": 0.5, "x": 0, "y": 0 } ]
    });
    let layout = normalize_layout(&raw, &defaults()).unwrap();
    assert_eq!(layout.cavity_count(), 0);
}

#[test]
fn test_malformed_cavity_dropped_alone() {
    let raw = json!({
        "length": 10, "width": 8, "thickness": 2,
        "cavities": [
            { "length": 1, "width": 1, "depth": 0.5, "x": 0.1, "y": 0.1 },
            { "length": 1, "width": 1, "depth": 0.5, "x": 1.5, "y": 0.1 },
            "garbage",
            { "length": 2, "width": 1, "depth": 0.5, "x": 0.5, "y": 0.5 }
        ]
    });
    let layout = normalize_layout(&raw, &defaults()).unwrap();
    assert_eq!(layout.cavity_count(), 2);
}

#[test]
fn test_corner_metadata_passthrough() {
    let raw = json!({
        "block": { "length": 10, "width": 8, "thickness": 2, "corner_style": "chamfer", "chamferIn": 0.25 }
    });
    let layout = normalize_layout(&raw, &defaults()).unwrap();
    assert_eq!(
        layout.block.corner,
        Some(CornerTreatment {
            style: "chamfer".to_string(),
            size: Some(0.25)
        })
    );

    let raw = json!({
        "block": { "length": 10, "width": 8, "thickness": 2, "cornerStyle": "Radius ", "cornerSize": "6mm" }
    });
    let layout = normalize_layout(&raw, &defaults()).unwrap();
    assert_eq!(
        layout.block.corner,
        Some(CornerTreatment {
            style: "Radius ".to_string(),
            size: None
        })
    );
}

#[test]
fn test_stack_thickness_divergence_tolerated() {
    let raw = json!({
        "length": 10, "width": 8, "thickness": 2,
        "stack": [ { "thickness": 1 }, { "thickness": 1.5 } ]
    });
    let layout = normalize_layout(&raw, &defaults()).unwrap();
    assert_eq!(layout.stack_thickness(), 2.5);
    assert_eq!(layout.block.thickness, 2.0);
}

#[test]
fn test_canonical_round_trip() {
    let mut block = Block::new(14.0, 10.5, 3.0);
    block.corner = Some(CornerTreatment {
        style: "radius".to_string(),
        size: Some(0.5),
    });

    let layout = CanonicalLayout {
        block,
        layers: vec![
            Layer::new(1.0).with_label("Base"),
            Layer::new(2.0)
                .with_cavity(Cavity::rect(0.1, 0.2, 3.0, 2.0, 1.0).with_label("Probe"))
                .with_cavity(Cavity::circle(0.6, 0.4, 1.25, 0.75))
                .with_cavity(
                    Cavity::rect(0.3, 0.6, 2.0, 1.5, 4.0)
                        .with_shape(CavityShape::RoundedRect { radius: 0.25 }),
                )
                .with_cavity(Cavity::rect(0.7, 0.1, 2.0, 2.0, 0.5).with_shape(
                    CavityShape::Polygon {
                        points: vec![
                            NormalizedPoint::new(0.0, 0.0),
                            NormalizedPoint::new(1.0, 0.0),
                            NormalizedPoint::new(0.5, 1.0),
                        ],
                    },
                )),
        ],
    };

    let again = normalize_layout(&layout.to_value(), &defaults()).unwrap();
    assert_eq!(again, layout);
}
