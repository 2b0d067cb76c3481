use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::post,
    Json, Router,
};
use salesai_core::{
    BriefingEngine, ChatCompletionsClient, ChatCompletionsConfig, CompletionError,
    CompletionRequest, CompletionService, StaticRetriever, SynthesisConfig,
};
use salesai_server::http::{create_router, AppState};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Completion service returning a fixed reply, or failing when `reply` is `None`.
struct FixedCompletion {
    reply: Option<String>,
}

#[async_trait]
impl CompletionService for FixedCompletion {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, CompletionError> {
        self.reply.clone().ok_or(CompletionError::Status {
            status: 503,
            body: "upstream unavailable".into(),
        })
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

fn app_with(reply: Option<&str>) -> Router {
    let engine = BriefingEngine::new(
        Arc::new(FixedCompletion {
            reply: reply.map(str::to_string),
        }),
        Arc::new(StaticRetriever),
        SynthesisConfig::default(),
    );
    create_router(AppState::new(engine))
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send_raw(app, method, uri, body.map(|v| v.to_string())).await
}

async fn send_raw(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(raw) => builder
            .header("content-type", "application/json")
            .body(Body::from(raw))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

const OVERCONFIDENT_REPLY: &str = r#"{"insight":"X","confidence":0.99,"reasoning":"Y","sources":["http://a","http://b","http://c","http://d"]}"#;

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_health_reports_stub_retriever() {
    let (status, body) = send(app_with(None), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["retriever"], "stub");
    assert_eq!(body["model"], "openai/gpt-oss-120b");
    assert!(body["uptime_seconds"].is_u64());
}

// ── Briefing ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_briefing_sdr_example() {
    let (status, body) = send(
        app_with(Some(OVERCONFIDENT_REPLY)),
        "POST",
        "/api/briefing/acme-corp?role=sdr&query=budget",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metadata"]["account_id"], "acme-corp");
    assert_eq!(body["metadata"]["role"], "sdr");

    let insight = &body["insights"][0];
    assert_eq!(insight["confidence"], 0.95);
    assert_eq!(insight["text"], "X");
    let citations = insight["citations"].as_array().unwrap();
    assert_eq!(citations.len(), 3);
    assert_eq!(citations[0]["source_url"], "http://a");
    assert_eq!(citations[2]["source_url"], "http://c");

    assert_eq!(body["ice_breakers"].as_array().unwrap().len(), 2);
    assert!(body["financial_metrics"].is_null());
    assert!(body["value_map"].is_null());
}

#[tokio::test]
async fn test_briefing_role_defaults_to_ae() {
    let (status, body) = send(app_with(Some(OVERCONFIDENT_REPLY)), "POST", "/api/briefing/globex", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metadata"]["role"], "ae");
    assert!(body["ice_breakers"].is_null());
    assert_eq!(body["financial_metrics"]["roe"], "12%");
    assert!(!body["value_map"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_briefing_unknown_role_has_no_sections() {
    let (status, body) = send(
        app_with(Some(OVERCONFIDENT_REPLY)),
        "POST",
        "/api/briefing/globex?role=manager",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metadata"]["role"], "manager");
    assert!(body["ice_breakers"].is_null());
    assert!(body["financial_metrics"].is_null());
    assert!(body["value_map"].is_null());
}

#[tokio::test]
async fn test_briefing_repeated_role_takes_first() {
    let (status, body) = send(
        app_with(Some(OVERCONFIDENT_REPLY)),
        "POST",
        "/api/briefing/acme?role=sdr&role=ae",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metadata"]["role"], "sdr");
    assert_eq!(body["ice_breakers"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_briefing_upstream_failure_still_ok() {
    let (status, body) = send(
        app_with(None),
        "POST",
        "/api/briefing/acme?role=ae&query=renewal",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let insight = &body["insights"][0];
    assert_eq!(insight["text"], "Analysis for: renewal");
    assert_eq!(insight["confidence"], 0.5);
    assert!(insight["reasoning"].as_str().unwrap().contains("unavailable"));
    assert!(insight["citations"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_briefing_prose_reply_uses_raw_text() {
    let prose = "Acme's CFO is pushing consolidation. ".repeat(10);
    let (status, body) = send(app_with(Some(&prose)), "POST", "/api/briefing/acme", None).await;

    assert_eq!(status, StatusCode::OK);
    let expected: String = prose.chars().take(200).collect();
    assert_eq!(body["insights"][0]["text"], expected);
    assert_eq!(body["insights"][0]["confidence"], 0.6);
}

#[tokio::test]
async fn test_briefing_assembly_error_is_500_with_detail() {
    let (status, body) = send(
        app_with(Some(r#"{"insight":"X","confidence":"very high"}"#)),
        "POST",
        "/api/briefing/acme",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().contains("confidence"));
}

// ── Drill-down & graph ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_drill_down() {
    let (status, body) = send(
        app_with(None),
        "POST",
        "/api/briefing/acme/drill-down",
        Some(json!({"insight_id": "insight_1", "account_id": "acme"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["insight"]["id"], "insight_1");
    assert_eq!(body["full_context"], "Expanded context here...");
    assert_eq!(body["reasoning_trace"].as_array().unwrap().len(), 3);
    assert_eq!(body["related_graph_paths"][0]["from"], "Acme");
    assert_eq!(body["related_graph_paths"][0]["relation"], "competitive_threat");
}

#[tokio::test]
async fn test_drill_down_without_body_account() {
    let (status, body) = send(
        app_with(None),
        "POST",
        "/api/briefing/acme/drill-down",
        Some(json!({"insight_id": "insight_9"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["insight"]["id"], "insight_9");
}

#[tokio::test]
async fn test_drill_down_missing_insight_id_is_json_error() {
    let (status, body) = send(
        app_with(None),
        "POST",
        "/api/briefing/acme/drill-down",
        Some(json!({"account_id": "acme"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("insight_id"));
}

#[tokio::test]
async fn test_drill_down_malformed_body_is_json_error() {
    let (status, body) = send_raw(
        app_with(None),
        "POST",
        "/api/briefing/acme/drill-down",
        Some("not json".to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_graph() {
    let (status, body) = send(app_with(None), "GET", "/api/graph/initech", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["account_id"], "initech");
    let graph = body["graph"].as_array().unwrap();
    assert_eq!(graph.len(), 2);
    assert_eq!(graph[0]["from"], "initech");
    assert_eq!(graph[1]["relation"], "competes_with");
}

// ── Real HTTP transport against a local upstream ─────────────────────────────

#[derive(Default)]
struct Captured {
    auth: Option<String>,
    body: Option<Value>,
}

async fn spawn_upstream(reply: Value, captured: Arc<Mutex<Captured>>) -> String {
    let upstream = Router::new().route(
        "/v1/chat/completions",
        post(move |headers: axum::http::HeaderMap, Json(body): Json<Value>| {
            let captured = captured.clone();
            let reply = reply.clone();
            async move {
                let mut c = captured.lock().unwrap();
                c.auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                c.body = Some(body);
                Json(reply)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, upstream).await.unwrap();
    });
    format!("http://{}/v1/chat/completions", addr)
}

#[tokio::test]
async fn test_chat_completions_client_end_to_end() {
    let captured = Arc::new(Mutex::new(Captured::default()));
    let reply = json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": "```json\n{\"insight\":\"Renewal in 6 months\",\"confidence\":0.82,\"sources\":[\"https://news.example.com/a\"],\"Action\":\"Book a call\"}\n```"
            }
        }]
    });
    let url = spawn_upstream(reply, captured.clone()).await;

    let client = ChatCompletionsClient::new(
        ChatCompletionsConfig::groq("test-key").with_api_url(url),
    )
    .unwrap();
    let engine = BriefingEngine::new(
        Arc::new(client),
        Arc::new(StaticRetriever),
        SynthesisConfig::default().with_model("test-model"),
    );

    let (status, body) = send(
        create_router(AppState::new(engine)),
        "POST",
        "/api/briefing/acme?role=sdr&query=renewal",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let insight = &body["insights"][0];
    assert_eq!(insight["text"], "Renewal in 6 months");
    assert_eq!(insight["confidence"], 0.82);
    assert_eq!(insight["action"], "Book a call");
    assert_eq!(insight["citations"][0]["source_url"], "https://news.example.com/a");

    let c = captured.lock().unwrap();
    assert_eq!(c.auth.as_deref(), Some("Bearer test-key"));
    let sent = c.body.as_ref().unwrap();
    assert_eq!(sent["model"], "test-model");
    assert_eq!(sent["temperature"], 0.7);
    assert_eq!(sent["max_tokens"], 1024);
    assert_eq!(sent["messages"][0]["role"], "user");
    assert!(sent["messages"][0]["content"]
        .as_str()
        .unwrap()
        .contains("EXECUTIVE DOSSIER: acme"));
}

#[tokio::test]
async fn test_chat_completions_client_upstream_error_degrades() {
    let upstream = Router::new().route(
        "/v1/chat/completions",
        post(|| async { (StatusCode::UNAUTHORIZED, "invalid api key") }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, upstream).await.unwrap();
    });

    let client = ChatCompletionsClient::new(
        ChatCompletionsConfig::groq("bad-key")
            .with_api_url(format!("http://{}/v1/chat/completions", addr)),
    )
    .unwrap();
    let engine = BriefingEngine::new(
        Arc::new(client),
        Arc::new(StaticRetriever),
        SynthesisConfig::default(),
    );

    let (status, body) = send(
        create_router(AppState::new(engine)),
        "POST",
        "/api/briefing/acme?query=pricing",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["insights"][0]["text"], "Analysis for: pricing");
}
