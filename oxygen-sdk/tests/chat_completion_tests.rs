use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::json;

use oxygen_sdk::transport::MockTransport;
use oxygen_sdk::types::chat::{ChatMessage, ChatRequest, ChatResponse};
use oxygen_sdk::{Error, OxygenClient, Result, DEFAULT_CHAT_MODEL};

const CHAT_BODY: &str = r#"{"id":"abc","choices":[],"created":1700000000,"model":"gpt-3.5-turbo-1106","system_fingerprint":"fp1","object":"chat.completion"}"#;

fn client_with(transport: &MockTransport) -> Result<OxygenClient> {
    OxygenClient::builder()
        .base_url("http://mock.oxyapi.test")
        .token("secret")
        .transport(Arc::new(transport.clone()))
        .build()
}

#[tokio::test]
async fn test_chat_completion_decodes_response() -> Result<()> {
    let transport = MockTransport::new().with_response(StatusCode::OK, CHAT_BODY);
    let client = client_with(&transport)?;

    let mut request = ChatRequest::new().add_message(ChatMessage::user("Hello"));
    let response = client.chat_completion(&mut request).await?;

    assert_eq!(response.id, "abc");
    assert_eq!(response.created, 1_700_000_000);
    assert_eq!(response.model, "gpt-3.5-turbo-1106");
    assert_eq!(response.system_fingerprint, "fp1");
    assert_eq!(response.object, "chat.completion");
    assert!(response.choices.is_empty());

    let sent = transport.last_request().expect("request was recorded");
    assert_eq!(sent.url, "http://mock.oxyapi.test/v1/chat/completions");
    Ok(())
}

#[tokio::test]
async fn test_chat_completion_keeps_choices_as_raw_json() -> Result<()> {
    let transport = MockTransport::new().with_json_response(&json!({
        "id": "chatcmpl-1",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": "Paris"},
            "finish_reason": "stop"
        }],
        "created": 1700000001,
        "model": "gpt-4",
        "system_fingerprint": "fp2",
        "object": "chat.completion"
    }))?;
    let client = client_with(&transport)?;

    let mut request = ChatRequest::new()
        .model("gpt-4")
        .add_message(ChatMessage::user("Capital of France?"));
    let response = client.chat_completion(&mut request).await?;

    assert_eq!(response.choices.len(), 1);
    assert_eq!(response.choices[0]["message"]["content"], "Paris");
    assert_eq!(response.choices[0]["finish_reason"], "stop");
    Ok(())
}

#[tokio::test]
async fn test_chat_completion_rejects_empty_messages_without_network_call() -> Result<()> {
    let transport = MockTransport::new().with_response(StatusCode::OK, CHAT_BODY);
    let client = client_with(&transport)?;

    let mut request = ChatRequest::new().model("gpt-4").temperature(0.5);
    let err = client.chat_completion(&mut request).await.unwrap_err();

    assert!(matches!(err, Error::InvalidArgument(_)));
    assert!(transport.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_chat_completion_defaults_empty_model() -> Result<()> {
    let transport = MockTransport::new().with_response(StatusCode::OK, CHAT_BODY);
    let client = client_with(&transport)?;

    let mut request = ChatRequest::new().add_message(ChatMessage::user("Hello"));
    client.chat_completion(&mut request).await?;

    assert_eq!(request.model, DEFAULT_CHAT_MODEL);
    let body = transport
        .last_request()
        .and_then(|r| r.body)
        .expect("request body was recorded");
    assert_eq!(body["model"], DEFAULT_CHAT_MODEL);
    Ok(())
}

#[tokio::test]
async fn test_chat_completion_keeps_explicit_model() -> Result<()> {
    let transport = MockTransport::new().with_response(StatusCode::OK, CHAT_BODY);
    let client = client_with(&transport)?;

    let mut request = ChatRequest::new()
        .model("gpt-4-turbo")
        .add_message(ChatMessage::user("Hello"));
    client.chat_completion(&mut request).await?;

    assert_eq!(request.model, "gpt-4-turbo");
    let body = transport.last_request().and_then(|r| r.body).unwrap();
    assert_eq!(body["model"], "gpt-4-turbo");
    Ok(())
}

#[tokio::test]
async fn test_chat_completion_wire_body_omits_unset_parameters() -> Result<()> {
    let transport = MockTransport::new().with_response(StatusCode::OK, CHAT_BODY);
    let client = client_with(&transport)?;

    let mut request = ChatRequest::new()
        .add_message(ChatMessage::system("Be brief."))
        .add_message(ChatMessage::user("Hello"))
        .max_tokens(64)
        .top_p(0.9);
    client.chat_completion(&mut request).await?;

    let body = transport.last_request().and_then(|r| r.body).unwrap();
    assert_eq!(
        body,
        json!({
            "messages": [
                {"role": "system", "content": "Be brief."},
                {"role": "user", "content": "Hello"}
            ],
            "model": DEFAULT_CHAT_MODEL,
            "max_tokens": 64,
            "top": 0.9
        })
    );
    Ok(())
}

#[tokio::test]
async fn test_chat_completion_reports_malformed_json() -> Result<()> {
    let transport = MockTransport::new()
        .with_response(StatusCode::OK, "not json")
        .with_response(StatusCode::OK, r#"{"id": 42}"#);
    let client = client_with(&transport)?;

    for _ in 0..2 {
        let mut request = ChatRequest::new().add_message(ChatMessage::user("Hello"));
        let err = client.chat_completion(&mut request).await.unwrap_err();
        assert!(matches!(err, Error::Decoding(_)), "got {:?}", err);
    }
    Ok(())
}

#[test]
fn test_chat_request_survives_wire_round_trip() -> Result<()> {
    let request = ChatRequest::new()
        .model("gpt-4")
        .add_message(ChatMessage::assistant("Hi there"))
        .add_message(ChatMessage::new("user", "Tell me a joke"))
        .frequency_penalty(-1.5)
        .max_tokens(256)
        .n(2)
        .stream(false)
        .temperature(0.7)
        .top_p(0.25);

    let wire = serde_json::to_string(&request).map_err(Error::Serialization)?;
    let decoded: ChatRequest = serde_json::from_str(&wire).map_err(Error::Decoding)?;

    assert_eq!(decoded, request);
    assert_eq!(decoded.frequency_penalty, Some(-1.5));
    assert_eq!(decoded.max_tokens, Some(256));
    assert_eq!(decoded.n, Some(2));
    assert_eq!(decoded.stream, Some(false));
    assert_eq!(decoded.temperature, Some(0.7));
    assert_eq!(decoded.top_p, Some(0.25));
    Ok(())
}

#[test]
fn test_chat_response_from_bytes_fills_missing_fields() -> Result<()> {
    let response = ChatResponse::from_slice(br#"{"id":"partial"}"#)?;
    assert_eq!(response.id, "partial");
    assert_eq!(response.created, 0);
    assert!(response.choices.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_chat_completion_accepts_null_fields() -> Result<()> {
    let transport = MockTransport::new().with_response(
        StatusCode::OK,
        r#"{"id":"abc","choices":null,"created":null,"model":"gpt-3.5-turbo-1106","system_fingerprint":null,"object":"chat.completion"}"#,
    );
    let client = client_with(&transport)?;

    let mut request = ChatRequest::new().add_message(ChatMessage::user("Hello"));
    let response = client.chat_completion(&mut request).await?;

    assert_eq!(response.id, "abc");
    assert_eq!(response.system_fingerprint, "");
    assert_eq!(response.created, 0);
    assert!(response.choices.is_empty());
    assert_eq!(response.object, "chat.completion");
    Ok(())
}

#[tokio::test]
async fn test_chat_completion_rejects_non_finite_parameters_without_network_call() -> Result<()>
{
    let transport = MockTransport::new().with_response(StatusCode::OK, CHAT_BODY);
    let client = client_with(&transport)?;

    let requests = [
        ChatRequest::new().frequency_penalty(f64::NAN),
        ChatRequest::new().temperature(f64::INFINITY),
        ChatRequest::new().top_p(f64::NEG_INFINITY),
    ];
    for request in requests {
        let mut request = request.add_message(ChatMessage::user("Hello"));
        let err = client.chat_completion(&mut request).await.unwrap_err();
        assert!(matches!(err, Error::Serialization(_)), "got {:?}", err);
    }

    assert!(transport.requests().is_empty());
    Ok(())
}
