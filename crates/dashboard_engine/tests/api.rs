use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dashboard_core::JobStatus;
use dashboard_engine::{ApiError, ApiSettings, HttpJobApi, JobApi};

fn api_for(server: &MockServer) -> HttpJobApi {
    let settings = ApiSettings {
        base_url: server.uri(),
        ..ApiSettings::default()
    };
    HttpJobApi::new(settings).expect("client builds")
}

#[tokio::test]
async fn create_job_posts_fixed_params() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/jobs"))
        .and(body_json(json!({ "params": { "sql_1": "true", "sql_2": "true" } })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "job_id": "job-1", "status": "queued" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let cancel = CancellationToken::new();

    let created = api.create_job(&cancel).await.expect("create ok");
    assert_eq!(created.job_id, "job-1");
    assert_eq!(created.status, JobStatus::Queued);
}

#[tokio::test]
async fn create_job_surfaces_status_reason_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let cancel = CancellationToken::new();

    let err = api.create_job(&cancel).await.unwrap_err();
    match &err {
        ApiError::Status { status, body, .. } => {
            assert_eq!(*status, 500);
            assert_eq!(body, "backend exploded");
        }
        other => panic!("expected status error, got {other:?}"),
    }
    let message = err.to_string();
    assert!(message.starts_with("create job failed: 500"), "{message}");
    assert!(message.contains("backend exploded"), "{message}");
}

#[tokio::test]
async fn job_status_decodes_optional_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs/job-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "job_id": "job-9",
            "status": "running",
            "progress": 42.5,
        })))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let cancel = CancellationToken::new();

    let response = api.job_status("job-9", &cancel).await.expect("status ok");
    assert_eq!(response.status, JobStatus::Running);
    assert_eq!(response.progress, Some(42.5));
    assert_eq!(response.result, None);
    assert_eq!(response.error, None);
}

#[tokio::test]
async fn job_status_carries_string_result_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs/job-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "job_id": "job-3",
            "status": "succeeded",
            "result": "{\"sql_1\":[],\"sql_2\":[]}",
        })))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let cancel = CancellationToken::new();

    let response = api.job_status("job-3", &cancel).await.expect("status ok");
    assert_eq!(response.status, JobStatus::Succeeded);
    assert_eq!(
        response.result,
        Some(json!("{\"sql_1\":[],\"sql_2\":[]}"))
    );
}

#[tokio::test]
async fn job_status_failure_keeps_error_contract() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{\"error\": \"not found\"}"))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let cancel = CancellationToken::new();

    let err = api.job_status("missing", &cancel).await.unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("get status failed: 404"), "{message}");
}

#[tokio::test]
async fn cancelled_token_aborts_the_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/jobs"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_delay(std::time::Duration::from_secs(5))
                .set_body_json(json!({ "job_id": "job-1", "status": "queued" })),
        )
        .mount(&server)
        .await;

    let api = api_for(&server);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = api.create_job(&cancel).await.unwrap_err();
    assert!(matches!(err, ApiError::Cancelled));
}

#[tokio::test]
async fn non_json_success_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let cancel = CancellationToken::new();

    let err = api.job_status("job-1", &cancel).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}
