use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use email_triage::application::ports::{LlmClient, LlmClientError};
use email_triage::application::services::PromptBuilder;
use email_triage::domain::Category;
use email_triage::infrastructure::llm::{OpenAiClient, parse_classification};
use email_triage::presentation::config::LlmSettings;

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

#[derive(Default)]
struct Captured {
    body: Option<Value>,
    authorization: Option<String>,
}

async fn serve(app: Router) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}/v1", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}

async fn start_mock_provider(
    response_status: u16,
    response_body: String,
) -> (String, Arc<Mutex<Captured>>, oneshot::Sender<()>) {
    let captured = Arc::new(Mutex::new(Captured::default()));
    let sink = Arc::clone(&captured);

    let app = Router::new().route(
        COMPLETIONS_PATH,
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let sink = Arc::clone(&sink);
            let response_body = response_body.clone();
            async move {
                let mut captured = sink.lock().unwrap();
                captured.body = Some(body);
                captured.authorization = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(String::from);
                let status = StatusCode::from_u16(response_status).unwrap();
                (
                    status,
                    [(axum::http::header::CONTENT_TYPE, "application/json")],
                    response_body,
                )
                    .into_response()
            }
        }),
    );

    let (base_url, shutdown_tx) = serve(app).await;
    (base_url, captured, shutdown_tx)
}

fn completion_with(content: Value) -> String {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content } }
        ]
    })
    .to_string()
}

fn settings(base_url: &str, api_key: Option<&str>, timeout_ms: u64) -> LlmSettings {
    LlmSettings {
        api_key: api_key.map(String::from),
        base_url: base_url.to_string(),
        model: "gpt-3.5-turbo".to_string(),
        temperature: 0.2,
        timeout_ms,
    }
}

async fn classify_against(status: u16, body: String) -> Result<Category, LlmClientError> {
    let (base_url, _captured, shutdown) = start_mock_provider(status, body).await;
    let client = OpenAiClient::new(&settings(&base_url, Some("test-key"), 5_000));

    let result = client
        .classify(&PromptBuilder::default().build("status of ticket 1"))
        .await
        .map(|c| c.category);

    shutdown.send(()).ok();
    result
}

#[tokio::test]
async fn given_valid_answer_when_classifying_then_returns_classification() {
    let content = r#"{"category": "Productive", "suggestedResponse": "Prezado cliente, ..."}"#;
    let (base_url, captured, shutdown) =
        start_mock_provider(200, completion_with(json!(content))).await;
    let client = OpenAiClient::new(&settings(&base_url, Some("test-key"), 5_000));
    let prompt = PromptBuilder::default().build("status of ticket 1");

    let classification = client.classify(&prompt).await.unwrap();

    assert_eq!(classification.category, Category::Productive);
    assert_eq!(classification.suggested_response, "Prezado cliente, ...");

    let captured = captured.lock().unwrap();
    let body = captured.body.as_ref().unwrap();
    assert_eq!(body["model"], "gpt-3.5-turbo");
    assert_eq!(body["response_format"]["type"], "json_object");
    assert!((body["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], prompt.system_message);
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["messages"][1]["content"], prompt.user_message);
    assert_eq!(captured.authorization.as_deref(), Some("Bearer test-key"));

    shutdown.send(()).ok();
}

#[tokio::test]
async fn given_rate_limit_status_when_classifying_then_returns_rate_limited() {
    let result = classify_against(429, r#"{"error": "slow down"}"#.to_string()).await;
    assert!(matches!(result, Err(LlmClientError::RateLimited)));
}

#[tokio::test]
async fn given_server_error_status_when_classifying_then_returns_provider_error() {
    let result = classify_against(500, r#"{"error": "boom"}"#.to_string()).await;
    assert!(matches!(result, Err(LlmClientError::ProviderError(_))));
}

#[tokio::test]
async fn given_category_outside_enumeration_when_classifying_then_returns_schema_invalid() {
    let content = r#"{"category": "Maybe", "suggestedResponse": "..."}"#;
    let result = classify_against(200, completion_with(json!(content))).await;
    assert!(matches!(result, Err(LlmClientError::SchemaInvalid(_))));
}

#[tokio::test]
async fn given_missing_suggested_response_when_classifying_then_returns_schema_invalid() {
    let content = r#"{"category": "Productive"}"#;
    let result = classify_against(200, completion_with(json!(content))).await;
    assert!(matches!(result, Err(LlmClientError::SchemaInvalid(_))));
}

#[tokio::test]
async fn given_missing_category_when_classifying_then_returns_schema_invalid() {
    let content = r#"{"suggestedResponse": "Prezado cliente, ..."}"#;
    let result = classify_against(200, completion_with(json!(content))).await;
    assert!(matches!(result, Err(LlmClientError::SchemaInvalid(_))));
}

#[tokio::test]
async fn given_completion_without_choices_when_classifying_then_returns_schema_invalid() {
    let result = classify_against(200, "{}".to_string()).await;
    assert!(matches!(result, Err(LlmClientError::SchemaInvalid(_))));
}

#[tokio::test]
async fn given_choice_without_message_when_classifying_then_returns_schema_invalid() {
    let result = classify_against(200, r#"{"choices": [{}]}"#.to_string()).await;
    assert!(matches!(result, Err(LlmClientError::SchemaInvalid(_))));
}

#[tokio::test]
async fn given_empty_choices_when_classifying_then_returns_schema_invalid() {
    let result = classify_against(200, r#"{"choices": []}"#.to_string()).await;
    assert!(matches!(result, Err(LlmClientError::SchemaInvalid(_))));
}

#[tokio::test]
async fn given_null_content_when_classifying_then_returns_schema_invalid() {
    let result = classify_against(200, completion_with(Value::Null)).await;
    assert!(matches!(result, Err(LlmClientError::SchemaInvalid(_))));
}

#[tokio::test]
async fn given_prose_content_when_classifying_then_returns_schema_invalid() {
    let result = classify_against(200, completion_with(json!("This email is productive."))).await;
    assert!(matches!(result, Err(LlmClientError::SchemaInvalid(_))));
}

#[tokio::test]
async fn given_no_api_key_when_classifying_then_fails_fast_as_uninitialized() {
    let client = OpenAiClient::new(&settings("http://127.0.0.1:9/v1", None, 5_000));

    let result = client
        .classify(&PromptBuilder::default().build("hello"))
        .await;

    assert!(matches!(result, Err(LlmClientError::ClientUninitialized)));
    assert!(!client.is_configured());
}

#[tokio::test]
async fn given_blank_api_key_when_building_then_client_is_uninitialized() {
    let client = OpenAiClient::new(&settings("http://127.0.0.1:9/v1", Some("   "), 5_000));
    assert!(!client.is_configured());
}

#[tokio::test]
async fn given_closed_port_when_classifying_then_returns_unreachable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = OpenAiClient::new(&settings(
        &format!("http://{}/v1", addr),
        Some("test-key"),
        5_000,
    ));

    let result = client
        .classify(&PromptBuilder::default().build("hello"))
        .await;

    assert!(matches!(result, Err(LlmClientError::Unreachable(_))));
}

#[tokio::test]
async fn given_slow_provider_when_classifying_then_times_out_as_unreachable() {
    let app = Router::new().route(
        COMPLETIONS_PATH,
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            StatusCode::OK
        }),
    );
    let (base_url, shutdown) = serve(app).await;
    let client = OpenAiClient::new(&settings(&base_url, Some("test-key"), 200));

    let result = client
        .classify(&PromptBuilder::default().build("hello"))
        .await;

    assert!(matches!(result, Err(LlmClientError::Unreachable(_))));
    shutdown.send(()).ok();
}

#[test]
fn given_extra_keys_when_parsing_classification_then_rejects() {
    let result = parse_classification(
        r#"{"category": "Unproductive", "suggestedResponse": "Obrigado", "confidence": 0.9}"#,
    );
    assert!(matches!(result, Err(LlmClientError::SchemaInvalid(_))));
}

#[test]
fn given_exact_shape_when_parsing_classification_then_accepts() {
    let classification =
        parse_classification(r#"{"category": "Unproductive", "suggestedResponse": "Obrigado"}"#)
            .unwrap();

    assert_eq!(classification.category, Category::Unproductive);
    assert_eq!(classification.suggested_response, "Obrigado");
}
