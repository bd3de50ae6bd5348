use foamkit_brep::{build_solid_model, CavityRealization, SolidModelOptions};
use foamkit_layout::{Block, CanonicalLayout, Cavity, Layer};

/// Parse `#n=...;` data lines into (id, referenced ids).
fn records(doc: &str) -> Vec<(usize, Vec<usize>)> {
    doc.lines()
        .filter(|line| line.starts_with('#'))
        .map(|line| {
            let (id, body) = line.split_once('=').unwrap();
            let id: usize = id[1..].parse().unwrap();
            let refs = body
                .split('#')
                .skip(1)
                .filter_map(|chunk| {
                    let digits: String = chunk.chars().take_while(char::is_ascii_digit).collect();
                    digits.parse().ok()
                })
                .collect();
            (id, refs)
        })
        .collect()
}

fn layout() -> CanonicalLayout {
    CanonicalLayout {
        block: Block::new(10.0, 8.0, 3.0),
        layers: vec![
            Layer::new(1.0).with_cavity(Cavity::rect(0.1, 0.1, 1.0, 1.0, 0.5)),
            Layer::new(2.0)
                .with_label("Top")
                .with_cavity(Cavity::rect(0.2, 0.3, 3.0, 2.0, 1.0))
                .with_cavity(Cavity::circle(0.6, 0.5, 2.0, 1.0)),
        ],
    }
}

#[test]
fn test_identifiers_strictly_increase_without_forward_references() {
    let options = SolidModelOptions::new("Q-7", CavityRealization::BoundingBoxCut);
    let doc = build_solid_model(&layout(), &options).unwrap();

    let records = records(&doc);
    assert!(!records.is_empty());
    for (index, (id, refs)) in records.iter().enumerate() {
        assert_eq!(*id, index + 1);
        for r in refs {
            assert!(r < id, "#{} references #{}", id, r);
        }
    }
}

#[test]
fn test_millimetre_unit_context() {
    let options = SolidModelOptions::new("Q-7", CavityRealization::BoundingBoxCut);
    let doc = build_solid_model(&layout(), &options).unwrap();

    assert!(doc.contains("SI_UNIT(.MILLI.,.METRE.)"));
    assert!(doc.contains("GEOMETRIC_REPRESENTATION_CONTEXT(3)"));
    // Block corner at full length, width and stack height
    assert!(doc.contains("CARTESIAN_POINT('',(254.,203.2,76.2))"));
}

#[test]
fn test_product_chain_present_in_order() {
    let options = SolidModelOptions::new("Q-7", CavityRealization::BoundingBoxCut);
    let doc = build_solid_model(&layout(), &options).unwrap();

    let position = |keyword: &str| {
        doc.find(&format!("={}(", keyword))
            .unwrap_or_else(|| panic!("{} missing", keyword))
    };
    let chain = [
        "APPLICATION_CONTEXT",
        "APPLICATION_PROTOCOL_DEFINITION",
        "PRODUCT_CONTEXT",
        "PRODUCT",
        "PRODUCT_DEFINITION_FORMATION",
        "PRODUCT_DEFINITION_CONTEXT",
        "PRODUCT_DEFINITION",
        "PRODUCT_DEFINITION_SHAPE",
        "SHAPE_REPRESENTATION",
        "SHAPE_DEFINITION_REPRESENTATION",
    ];
    for pair in chain.windows(2) {
        assert!(position(pair[0]) < position(pair[1]), "{} before {}", pair[0], pair[1]);
    }
    assert!(doc.contains("PRODUCT('Q-7','Foam insert Q-7'"));
}

#[test]
fn test_header_description() {
    let options = SolidModelOptions::new("Q-7", CavityRealization::BoundingBoxCut)
        .with_material("PE 1.7 lb charcoal");
    let doc = build_solid_model(&layout(), &options).unwrap();

    let header = doc.split("DATA;").next().unwrap();
    assert!(header.contains("'Block 10 x 8 x 3 in'"));
    assert!(header.contains("'Cavities: 3'"));
    assert!(header.contains("'Quote: Q-7'"));
    assert!(header.contains("'Material: PE 1.7 lb charcoal'"));
    assert!(header.contains("FILE_NAME('Q_7.step'"));
}
