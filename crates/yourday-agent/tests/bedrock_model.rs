//! Integration tests for BedrockModel using wiremock.

use aws_sdk_bedrockruntime::config::{BehaviorVersion, Credentials, Region};
use wiremock::matchers::{body_json, header, header_exists, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yourday_agent::BedrockModel;

const MODEL_ID: &str = "anthropic.claude-3-haiku-20240307-v1:0";
const CONVERSE_PATH: &str = "/model/anthropic.claude-3-haiku-20240307-v1%3A0/converse";

fn converse_reply(blocks: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "output": {
            "message": { "role": "assistant", "content": blocks }
        },
        "stopReason": "end_turn",
        "usage": { "inputTokens": 120, "outputTokens": 80, "totalTokens": 200 },
        "metrics": { "latencyMs": 900 }
    })
}

#[tokio::test]
async fn test_complete_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(CONVERSE_PATH))
        .and(header("Authorization", "Bearer bedrock-key"))
        .and(body_json(serde_json::json!({
            "messages": [
                { "role": "user", "content": [ { "text": "Summarize my day" } ] }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(converse_reply(
            serde_json::json!([{ "text": "# Daily Weather & News\n..." }]),
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let model = BedrockModel::with_api_key(MODEL_ID, &mock_server.uri(), "bedrock-key").unwrap();
    let text = model.complete("Summarize my day").await.unwrap();

    assert_eq!(text, "# Daily Weather & News\n...");
}

#[tokio::test]
async fn test_complete_joins_text_blocks() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(CONVERSE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(converse_reply(
            serde_json::json!([{ "text": "# Part one\n" }, { "text": "Part two" }]),
        )))
        .mount(&mock_server)
        .await;

    let model = BedrockModel::with_api_key(MODEL_ID, &mock_server.uri(), "k").unwrap();
    assert_eq!(model.complete("p").await.unwrap(), "# Part one\nPart two");
}

#[tokio::test]
async fn test_throttled_is_agent_error_with_cause() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "message": "Too many requests, please wait before trying again."
        })))
        .mount(&mock_server)
        .await;

    let model = BedrockModel::with_api_key(MODEL_ID, &mock_server.uri(), "k").unwrap();
    let err = model.complete("p").await.unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("429"), "{}", msg);
    assert!(msg.contains("Too many requests"), "{}", msg);
}

#[tokio::test]
async fn test_empty_output_is_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(converse_reply(serde_json::json!([]))),
        )
        .mount(&mock_server)
        .await;

    let model = BedrockModel::with_api_key(MODEL_ID, &mock_server.uri(), "k").unwrap();
    let err = model.complete("p").await.unwrap_err();

    assert!(err.to_string().contains("no text"), "{}", err);
}

#[tokio::test]
async fn test_malformed_body_is_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let model = BedrockModel::with_api_key(MODEL_ID, &mock_server.uri(), "k").unwrap();
    let err = model.complete("p").await.unwrap_err();

    assert!(err.to_string().contains("Invalid Bedrock response"), "{}", err);
}

fn signed_client(endpoint: &str) -> aws_sdk_bedrockruntime::Client {
    let config = aws_sdk_bedrockruntime::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(Credentials::new("AKIDEXAMPLE", "secret", None, None, "test"))
        .endpoint_url(endpoint)
        .build();
    aws_sdk_bedrockruntime::Client::from_conf(config)
}

#[tokio::test]
async fn test_signed_request_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/model/.+/converse$"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(converse_reply(
            serde_json::json!([{ "text": "# Daily Weather & News\n" }, { "text": "..." }]),
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let model = BedrockModel::with_sdk_client(MODEL_ID, signed_client(&mock_server.uri()));
    let text = model.complete("Summarize my day").await.unwrap();

    assert_eq!(text, "# Daily Weather & News\n...");

    let requests = mock_server.received_requests().await.unwrap();
    let auth = requests[0].headers.get("authorization").unwrap().to_str().unwrap();
    assert!(auth.starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/"), "{}", auth);
}

#[tokio::test]
async fn test_signed_request_empty_output_is_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/model/.+/converse$"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(converse_reply(serde_json::json!([]))),
        )
        .mount(&mock_server)
        .await;

    let model = BedrockModel::with_sdk_client(MODEL_ID, signed_client(&mock_server.uri()));
    let err = model.complete("p").await.unwrap_err();

    assert!(err.to_string().contains("end_turn"), "{}", err);
}
