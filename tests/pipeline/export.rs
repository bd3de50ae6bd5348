use foamkit::{
    geometry_hash, normalize_layout, pipeline_from_config, CavityRealization, Config,
    DrawingOptions, ExportError, ExportPipeline, ExportRequest, LayoutError, LocalKernel,
    LockState, NormalizeHints,
};
use serde_json::{json, Value};
use tempfile::TempDir;

fn entities_section(text: &str) -> &str {
    let start = text.find("ENTITIES").unwrap();
    let end = start + text[start..].find("ENDSEC").unwrap();
    &text[start..end]
}

fn raw_layout() -> Value {
    json!({
        "block": { "lengthIn": 10, "widthIn": 8, "thicknessIn": 2 },
        "cavities": [
            { "shape": "rect", "x": 0.2, "y": 0.3, "lengthIn": 3, "widthIn": 2, "depthIn": 1, "label": "Camera" },
            { "shape": "circle", "x": 0.6, "y": 0.5, "diameterIn": 2, "depthIn": 1 }
        ]
    })
}

fn pipeline() -> ExportPipeline {
    ExportPipeline::new(
        DrawingOptions::default(),
        Box::new(LocalKernel::new(CavityRealization::BoundingBoxCut)),
    )
}

fn current_hash() -> foamkit::GeometryHash {
    geometry_hash(&normalize_layout(&raw_layout(), &NormalizeHints::default()).unwrap())
}

#[tokio::test]
async fn test_local_export_produces_all_artifacts() {
    let request = ExportRequest::new("Q-1001", raw_layout()).with_material("PE 1.7 lb");
    let bundle = pipeline().export(&request, None).await.unwrap().unwrap();

    let drawing = bundle.drawing.as_deref().unwrap();
    assert!(drawing.contains(">Quote: Q-1001</text>"));
    assert!(drawing.contains(">Material: PE 1.7 lb</text>"));

    let outline = bundle.outline.as_deref().unwrap();
    assert!(outline.contains("$INSUNITS"));
    assert!(!outline.contains("Quote"));

    let solid = bundle.solid.as_deref().unwrap();
    assert!(solid.starts_with("ISO-10303-21;"));
    assert!(solid.contains("CARTESIAN_POINT('',(50.8,60.96,25.4))"));
    assert!(solid.contains("Material: PE 1.7 lb"));

    assert_eq!(bundle.geometry_hash, current_hash());
}

#[tokio::test]
async fn test_unusable_layout_exports_nothing() {
    let request = ExportRequest::new("Q-1", json!({ "block": { "lengthIn": 10 } }));
    assert!(pipeline().export(&request, None).await.unwrap().is_none());

    let request = ExportRequest::new(
        "Q-2",
        json!({ "block": { "lengthIn": 10, "widthIn": 8, "thicknessIn": 2 }, "stack": [{ "thicknessIn": 0 }] }),
    );
    assert!(pipeline().export(&request, None).await.unwrap().is_none());
}

#[tokio::test]
async fn test_locked_quote_with_drift_is_refused() {
    let request = ExportRequest::new("Q-1", raw_layout()).with_lock(LockState::locked("deadbeef"));
    let err = pipeline().export(&request, None).await.unwrap_err();
    assert!(matches!(
        err,
        ExportError::Layout(LayoutError::GeometryDrift { ref stored, .. }) if stored == "deadbeef"
    ));
}

#[tokio::test]
async fn test_locked_quote_without_stored_hash_is_refused() {
    let lock = LockState {
        locked: true,
        stored_hash: None,
    };
    let request = ExportRequest::new("Q-1", raw_layout()).with_lock(lock);
    let err = pipeline().export(&request, None).await.unwrap_err();
    assert!(matches!(
        err,
        ExportError::Layout(LayoutError::MissingLockDigest { ref current }) if *current == current_hash().to_string()
    ));
}

#[tokio::test]
async fn test_locked_quote_without_drift_exports() {
    let request =
        ExportRequest::new("Q-1", raw_layout()).with_lock(LockState::locked(current_hash()));
    let bundle = pipeline().export(&request, None).await.unwrap().unwrap();
    assert!(bundle.solid.is_some());
}

#[tokio::test]
async fn test_label_edits_do_not_trip_the_lock() {
    let mut edited = raw_layout();
    edited["cavities"][0]["label"] = json!("Lens");
    let request = ExportRequest::new("Q-1", edited).with_lock(LockState::locked(current_hash()));
    assert!(pipeline().export(&request, None).await.unwrap().is_some());

    let mut moved = raw_layout();
    moved["cavities"][0]["x"] = json!(0.25);
    let request = ExportRequest::new("Q-1", moved).with_lock(LockState::locked(current_hash()));
    assert!(pipeline().export(&request, None).await.is_err());
}

#[tokio::test]
async fn test_bundle_written_to_directory() {
    let dir = TempDir::new().unwrap();
    let request = ExportRequest::new("Q-1001", raw_layout());
    let bundle = pipeline().export(&request, None).await.unwrap().unwrap();

    let written = bundle.write_to_dir(&dir.path().join("out")).unwrap();
    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["Q_1001.svg", "Q_1001.dxf", "Q_1001.step"]);

    let step = std::fs::read_to_string(dir.path().join("out").join("Q_1001.step")).unwrap();
    assert_eq!(Some(step), bundle.solid);
}

#[tokio::test]
async fn test_repeated_exports_are_identical_apart_from_timestamp() {
    let request = ExportRequest::new("Q-1001", raw_layout());
    let first = pipeline().export(&request, None).await.unwrap().unwrap();
    let second = pipeline().export(&request, None).await.unwrap().unwrap();
    assert_eq!(first.drawing, second.drawing);
    assert_eq!(
        entities_section(first.outline.as_deref().unwrap()),
        entities_section(second.outline.as_deref().unwrap())
    );
    assert_eq!(first.geometry_hash, second.geometry_hash);
}

#[test]
fn test_pipeline_requires_realization_choice() {
    let config = Config::default();
    assert!(pipeline_from_config(&config, None).is_err());

    let pipeline = pipeline_from_config(&config, Some(CavityRealization::VisualOverlay)).unwrap();
    assert_eq!(pipeline.strategy_name(), "local");

    let mut config = Config::default();
    config.solid.realization = Some(CavityRealization::BoundingBoxCut);
    assert!(pipeline_from_config(&config, None).is_ok());
}
