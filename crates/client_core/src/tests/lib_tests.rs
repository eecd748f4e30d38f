use super::*;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::IntoResponse,
    routing::post,
    Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Debug, Clone)]
struct CapturedRequest {
    path: String,
    api_key: Option<String>,
    body: Value,
}

type Captured = Arc<Mutex<Vec<CapturedRequest>>>;

#[derive(Clone)]
struct StubState {
    captured: Captured,
    status: StatusCode,
    body: String,
}

async fn stub_handler(
    State(state): State<StubState>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let request = CapturedRequest {
        path: uri.path().to_string(),
        api_key: headers
            .get("x-goog-api-key")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    };
    state.captured.lock().await.push(request);
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}

async fn spawn_stub(status: StatusCode, body: impl Into<String>) -> (String, Captured) {
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        captured: captured.clone(),
        status,
        body: body.into(),
    };
    let app = Router::new().fallback(stub_handler).with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (format!("http://{addr}"), captured)
}

fn http() -> Client {
    build_http_client(Duration::from_secs(10)).expect("http client")
}

fn five_whys_json() -> Value {
    json!({
        "whys": [
            { "why": "Why do customer reports have mistakes?", "answer": "Numbers are entered wrong." },
            { "why": "Why are numbers entered wrong?", "answer": "People type them from memory." },
            { "why": "Why from memory?", "answer": "There is no list of steps to follow." },
            { "why": "Why is there no list?", "answer": "Nobody was asked to write one." },
            { "why": "Why was nobody asked?", "answer": "The team never set a standard way." }
        ],
        "rootCause": "Lack of a standardized data-entry checklist"
    })
}

fn risk_profile_json() -> Value {
    json!({
        "description": "Reports are built from hand-entered data with no checklist.",
        "objective": "Make sure all customer reports are 100% correct.",
        "statements": [
            "If customer data is entered without a checklist, then reports contain avoidable errors."
        ]
    })
}

fn gemini_envelope(texts: &[&str]) -> String {
    let parts: Vec<Value> = texts.iter().map(|text| json!({ "text": text })).collect();
    json!({
        "candidates": [{ "content": { "role": "model", "parts": parts } }]
    })
    .to_string()
}

#[tokio::test]
async fn gemini_five_whys_sends_schema_constrained_request_and_parses_result() {
    let body_text = five_whys_json().to_string();
    let (base_url, captured) = spawn_stub(StatusCode::OK, gemini_envelope(&[&body_text])).await;
    let client = GeminiClient::new(http(), "test-key").with_base_url(base_url);

    let result = client
        .perform_five_whys("Customer reports often have mistakes.")
        .await
        .expect("analysis");

    assert_eq!(result.whys.len(), 5);
    assert_eq!(result.whys[2].answer, "There is no list of steps to follow.");
    assert_eq!(
        result.root_cause,
        "Lack of a standardized data-entry checklist"
    );

    let requests = captured.lock().await;
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(
        request.path,
        "/v1beta/models/gemini-2.5-flash:generateContent"
    );
    assert_eq!(request.api_key.as_deref(), Some("test-key"));
    assert_eq!(
        request.body["generationConfig"]["responseMimeType"],
        "application/json"
    );
    assert_eq!(
        request.body["generationConfig"]["responseSchema"]["required"],
        json!(["whys", "rootCause"])
    );
    let prompt = request.body["contents"][0]["parts"][0]["text"]
        .as_str()
        .expect("prompt text");
    assert!(prompt.contains("\"Customer reports often have mistakes.\""));
}

#[tokio::test]
async fn gemini_risk_details_joins_text_parts_and_uses_configured_model() {
    let body_text = risk_profile_json().to_string();
    let (head, tail) = body_text.split_at(body_text.len() / 2);
    let (base_url, captured) = spawn_stub(StatusCode::OK, gemini_envelope(&[head, tail])).await;
    let client = GeminiClient::new(http(), "test-key")
        .with_base_url(format!("{base_url}/"))
        .with_model("gemini-2.5-pro");

    let profile = client
        .generate_risk_details(
            "Lack of a standardized data-entry checklist",
            "Customer reports often have mistakes.",
        )
        .await
        .expect("risk details");

    assert_eq!(
        profile.objective,
        "Make sure all customer reports are 100% correct."
    );
    assert_eq!(profile.statements.len(), 1);

    let requests = captured.lock().await;
    assert_eq!(
        requests[0].path,
        "/v1beta/models/gemini-2.5-pro:generateContent"
    );
    assert_eq!(
        requests[0].body["generationConfig"]["responseSchema"]["required"],
        json!(["description", "objective", "statements"])
    );
}

#[tokio::test]
async fn gemini_surfaces_provider_error_message() {
    let (base_url, _captured) = spawn_stub(
        StatusCode::BAD_REQUEST,
        json!({
            "error": { "code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT" }
        })
        .to_string(),
    )
    .await;
    let client = GeminiClient::new(http(), "bad-key").with_base_url(base_url);

    let err = client
        .perform_five_whys("Late shipments")
        .await
        .expect_err("must fail");
    assert!(matches!(err, AnalysisError::Upstream { status: 400, .. }));
    assert_eq!(err.to_string(), "API key not valid.");
}

#[tokio::test]
async fn gemini_non_json_text_is_invalid_format() {
    let (base_url, _captured) = spawn_stub(StatusCode::OK, gemini_envelope(&["not json"])).await;
    let client = GeminiClient::new(http(), "test-key").with_base_url(base_url);

    let err = client
        .perform_five_whys("Late shipments")
        .await
        .expect_err("must fail");
    assert!(matches!(
        err,
        AnalysisError::InvalidFormat {
            operation: AnalysisOperation::FiveWhys
        }
    ));
}

#[tokio::test]
async fn gemini_unparsable_success_envelope_is_invalid_format() {
    let (base_url, _captured) = spawn_stub(StatusCode::OK, "<html>oops</html>").await;
    let client = GeminiClient::new(http(), "test-key").with_base_url(base_url);

    let err = client
        .perform_five_whys("Late shipments")
        .await
        .expect_err("must fail");
    assert!(matches!(
        err,
        AnalysisError::InvalidFormat {
            operation: AnalysisOperation::FiveWhys
        }
    ));
    assert_eq!(
        err.to_string(),
        "The AI returned an invalid format for the analysis. Please try again."
    );

    let err = client
        .generate_risk_details("root", "concern")
        .await
        .expect_err("must fail");
    assert!(matches!(
        err,
        AnalysisError::InvalidFormat {
            operation: AnalysisOperation::RiskDetails
        }
    ));
}

#[tokio::test]
async fn gemini_without_candidates_is_empty_response() {
    let (base_url, _captured) =
        spawn_stub(StatusCode::OK, json!({ "candidates": [] }).to_string()).await;
    let client = GeminiClient::new(http(), "test-key").with_base_url(base_url);

    let err = client
        .generate_risk_details("root", "concern")
        .await
        .expect_err("must fail");
    assert!(matches!(
        err,
        AnalysisError::EmptyResponse {
            operation: AnalysisOperation::RiskDetails
        }
    ));
}

#[tokio::test]
async fn relay_five_whys_posts_action_payload() {
    let (base_url, captured) = spawn_stub(StatusCode::OK, five_whys_json().to_string()).await;
    let client = RelayClient::new(http(), format!("{base_url}/api/analyze"));

    let result = client
        .perform_five_whys("Customer reports often have mistakes.")
        .await
        .expect("analysis");
    assert_eq!(
        result.root_cause,
        "Lack of a standardized data-entry checklist"
    );

    let requests = captured.lock().await;
    assert_eq!(requests[0].path, "/api/analyze");
    assert_eq!(requests[0].api_key, None);
    assert_eq!(
        requests[0].body,
        json!({ "action": "fiveWhys", "concern": "Customer reports often have mistakes." })
    );
}

#[tokio::test]
async fn relay_generate_details_posts_root_cause_and_concern() {
    let (base_url, captured) = spawn_stub(StatusCode::OK, risk_profile_json().to_string()).await;
    let client = RelayClient::new(http(), base_url);

    let profile = client
        .generate_risk_details("No checklist", "Reports have mistakes")
        .await
        .expect("risk details");
    let expected: shared::domain::RiskProfile =
        serde_json::from_value(risk_profile_json()).expect("profile");
    assert_eq!(profile, expected);

    let requests = captured.lock().await;
    assert_eq!(
        requests[0].body,
        json!({
            "action": "generateDetails",
            "rootCause": "No checklist",
            "originalConcern": "Reports have mistakes"
        })
    );
}

#[tokio::test]
async fn relay_error_body_message_is_surfaced() {
    let (base_url, _captured) = spawn_stub(
        StatusCode::TOO_MANY_REQUESTS,
        json!({ "error": "quota exceeded" }).to_string(),
    )
    .await;
    let client = RelayClient::new(http(), base_url);

    let err = client
        .perform_five_whys("Late shipments")
        .await
        .expect_err("must fail");
    assert_eq!(err.to_string(), "quota exceeded");
}

#[tokio::test]
async fn relay_unparsable_error_body_reports_status() {
    let (base_url, _captured) =
        spawn_stub(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>").await;
    let client = RelayClient::new(http(), base_url);

    let err = client
        .generate_risk_details("root", "concern")
        .await
        .expect_err("must fail");
    assert!(matches!(err, AnalysisError::RequestFailed { status: 502 }));
    assert_eq!(err.to_string(), "request failed with status 502");
}

#[tokio::test]
async fn relay_response_with_wrong_shape_is_rejected() {
    let (base_url, _captured) = spawn_stub(
        StatusCode::OK,
        json!({ "description": "d", "objective": "o", "statements": "If X, then Y" }).to_string(),
    )
    .await;
    let client = RelayClient::new(http(), base_url);

    let err = client
        .generate_risk_details("root", "concern")
        .await
        .expect_err("must fail");
    assert!(matches!(err, AnalysisError::ShapeMismatch { .. }));
}

#[tokio::test]
async fn slow_collaborator_times_out_as_transport_failure() {
    let app = Router::new().route(
        "/",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "{}"
        }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let http = build_http_client(Duration::from_millis(200)).expect("http client");
    let client = RelayClient::new(http, format!("http://{addr}/"));

    let err = client
        .perform_five_whys("Late shipments")
        .await
        .expect_err("must time out");
    assert!(matches!(err, AnalysisError::Transport(_)));
    assert!(err.to_string().contains("timed out"), "unexpected: {err}");
}

#[tokio::test]
async fn unreachable_collaborator_is_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let client = RelayClient::new(http(), format!("http://{addr}/"));
    let err = client
        .perform_five_whys("Late shipments")
        .await
        .expect_err("must fail");
    assert!(matches!(err, AnalysisError::Transport(_)));
    assert!(!err.to_string().is_empty());
}
