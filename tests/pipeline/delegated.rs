use foamkit::{
    pipeline_from_config, CavityRealization, Config, DelegatedService, DrawingOptions,
    ExportPipeline, ExportRequest, LocalKernel, SolidStrategy,
};
use foamkit_communication::{AbortHandle, SolidServiceClient};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn entities_section(text: &str) -> &str {
    let start = text.find("ENTITIES").unwrap();
    let end = start + text[start..].find("ENDSEC").unwrap();
    &text[start..end]
}

const DOC: &str = "ISO-10303-21;\nHEADER;\nENDSEC;\nDATA;\nENDSEC;\nEND-ISO-10303-21;";

fn raw_layout() -> Value {
    json!({
        "block": { "lengthIn": 12, "widthIn": 9, "thicknessIn": 3 },
        "stack": [
            { "thicknessIn": 1, "cavities": [] },
            { "thicknessIn": 2, "label": "Top", "cavities": [
                { "shape": "roundedRect", "x": 0.1, "y": 0.1, "lengthIn": 4, "widthIn": 3, "depthIn": 1.5, "cornerRadiusIn": 0.25 }
            ] }
        ]
    })
}

fn delegated(server: &MockServer, timeout: Duration) -> ExportPipeline {
    let client = SolidServiceClient::new(format!("{}/build", server.uri()), timeout).unwrap();
    ExportPipeline::new(DrawingOptions::default(), Box::new(DelegatedService::new(client)))
}

#[tokio::test]
async fn test_delegated_solid_in_bundle() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/build"))
        .and(body_partial_json(json!({ "quoteId": "Q-77", "materialLegend": "EVA" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "step": DOC })))
        .expect(1)
        .mount(&server)
        .await;

    let request = ExportRequest::new("Q-77", raw_layout()).with_material("EVA");
    let bundle = delegated(&server, Duration::from_secs(5))
        .export(&request, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(bundle.solid.as_deref(), Some(DOC));
    assert!(bundle.drawing.is_some());
}

#[tokio::test]
async fn test_service_failure_keeps_2d_artifacts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let request = ExportRequest::new("Q-77", raw_layout());
    let remote = delegated(&server, Duration::from_secs(5))
        .export(&request, None)
        .await
        .unwrap()
        .unwrap();
    assert!(remote.solid.is_none());

    let local = ExportPipeline::new(
        DrawingOptions::default(),
        Box::new(LocalKernel::new(CavityRealization::BoundingBoxCut)),
    )
    .export(&request, None)
    .await
    .unwrap()
    .unwrap();

    // the 2D artifacts do not depend on the solid strategy
    assert_eq!(remote.drawing, local.drawing);
    assert_eq!(
        entities_section(remote.outline.as_deref().unwrap()),
        entities_section(local.outline.as_deref().unwrap())
    );
    assert_eq!(remote.geometry_hash, local.geometry_hash);
}

#[tokio::test]
async fn test_timeout_yields_no_solid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(DOC)
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let request = ExportRequest::new("Q-77", raw_layout());
    let bundle = delegated(&server, Duration::from_millis(100))
        .export(&request, None)
        .await
        .unwrap()
        .unwrap();
    assert!(bundle.solid.is_none());
    assert!(bundle.outline.is_some());
}

#[tokio::test]
async fn test_cancelled_export_yields_no_solid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(DOC)
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let (handle, registration) = AbortHandle::new_pair();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.abort();
    });

    let request = ExportRequest::new("Q-77", raw_layout());
    let bundle = delegated(&server, Duration::from_secs(30))
        .export(&request, Some(registration))
        .await
        .unwrap()
        .unwrap();
    assert!(bundle.solid.is_none());
}

#[test]
fn test_delegated_pipeline_from_config() {
    let mut config = Config::default();
    config.solid.strategy = SolidStrategy::Delegated;
    config.service.endpoint = Some("http://127.0.0.1:9/build".to_string());
    let pipeline = pipeline_from_config(&config, None).unwrap();
    assert_eq!(pipeline.strategy_name(), "delegated");

    config.service.endpoint = None;
    assert!(pipeline_from_config(&config, None).is_err());
}
