use foamkit_designer::{apply_legend, build_drawing, strip_annotations, DrawingOptions, Legend};
use foamkit_layout::{Block, CanonicalLayout, Cavity, Layer};

fn layout() -> CanonicalLayout {
    CanonicalLayout {
        block: Block::new(12.0, 9.0, 3.0),
        layers: vec![Layer::new(3.0).with_cavity(Cavity::rect(0.25, 0.25, 4.0, 3.0, 1.5))],
    }
}

#[test]
fn test_relegend_replaces_previous_overlay() {
    let layout = layout();
    let svg = build_drawing(&layout, &DrawingOptions::default(), &Legend::new("Q-OLD"));

    let updated = apply_legend(&svg, &Legend::for_layout("Q-NEW", &layout));
    assert!(!updated.contains("Q-OLD"));
    assert!(updated.contains("Quote: Q-NEW"));
    assert_eq!(updated.matches("<g id=\"foamkit-legend\"").count(), 1);
}

#[test]
fn test_repeated_application_never_accumulates() {
    let layout = layout();
    let legend = Legend::for_layout("Q-9", &layout).with_material("EVA");
    let svg = build_drawing(&layout, &DrawingOptions::default(), &legend);

    let mut current = svg.clone();
    for _ in 0..5 {
        current = apply_legend(&current, &legend);
    }
    assert_eq!(current, svg);
}

#[test]
fn test_strip_leaves_geometry() {
    let layout = layout();
    let svg = build_drawing(&layout, &DrawingOptions::default(), &Legend::new("Q-1"));
    let bare = strip_annotations(&svg);

    assert!(!bare.contains("foamkit-legend"));
    assert!(!bare.contains("Quote:"));
    assert!(bare.contains("foamkit-block"));
    assert!(bare.contains("foamkit-layer-0"));
    assert_eq!(strip_annotations(&bare), bare);
}
