// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use mockito::Matcher;
use serde_json::json;

use codementor_core::domain::analysis::{
    CodeAnalyzer, ANALYSIS_FAILED, ANALYZER_CORRECTION_ID, CONNECTION_ERROR_PREFIX, NO_RESPONSE,
};
use codementor_core::infrastructure::OllamaAnalysisGateway;

fn gateway_for(server: &mockito::ServerGuard) -> OllamaAnalysisGateway {
    OllamaAnalysisGateway::new(format!("{}/api/generate", server.url()), "codellama")
}

#[tokio::test]
async fn test_successful_analysis_returns_response_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/generate")
        .match_body(Matcher::PartialJson(json!({
            "model": "codellama",
            "prompt": "Correct and improve this code: print('oi')",
            "stream": false,
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"model":"codellama","response":"print('oi')  # fixed","done":true}"#)
        .create_async()
        .await;

    let correction = gateway_for(&server).analyze("print('oi')").await;

    mock.assert_async().await;
    assert_eq!(correction.id, ANALYZER_CORRECTION_ID);
    assert_eq!(correction.corrected_code, "print('oi')  # fixed");
    assert!(correction.target_student.is_none());
}

#[tokio::test]
async fn test_missing_response_field_yields_sentinel() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body(r#"{"done":true}"#)
        .create_async()
        .await;

    let correction = gateway_for(&server).analyze("x = 1").await;
    assert_eq!(correction.corrected_code, NO_RESPONSE);
}

#[tokio::test]
async fn test_empty_response_field_yields_sentinel() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body(r#"{"response":""}"#)
        .create_async()
        .await;

    let correction = gateway_for(&server).analyze("x = 1").await;
    assert_eq!(correction.corrected_code, NO_RESPONSE);
}

#[tokio::test]
async fn test_non_json_body_yields_sentinel() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let correction = gateway_for(&server).analyze("x = 1").await;
    assert_eq!(correction.corrected_code, NO_RESPONSE);
}

#[tokio::test]
async fn test_server_error_status_fails_analysis() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/generate")
        .with_status(500)
        .with_body(r#"{"response":"ignored"}"#)
        .create_async()
        .await;

    let correction = gateway_for(&server).analyze("x = 1").await;
    assert_eq!(correction.corrected_code, ANALYSIS_FAILED);
}

#[tokio::test]
async fn test_only_status_200_counts_as_success() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/generate")
        .with_status(201)
        .with_body(r#"{"response":"ignored"}"#)
        .create_async()
        .await;

    let correction = gateway_for(&server).analyze("x = 1").await;
    assert_eq!(correction.corrected_code, ANALYSIS_FAILED);
}

#[tokio::test]
async fn test_unreachable_service_reports_connection_error() {
    let url = "http://127.0.0.1:1/api/generate";
    let gateway = OllamaAnalysisGateway::new(url, "codellama");

    let correction = gateway.analyze("x = 1").await;

    let transport_error = reqwest::Client::new()
        .post(url)
        .json(&json!({"model": "codellama", "prompt": "x = 1", "stream": false}))
        .send()
        .await
        .unwrap_err()
        .to_string();

    let prefix = format!("{}: ", CONNECTION_ERROR_PREFIX);
    assert!(
        correction.corrected_code.starts_with(&prefix),
        "unexpected correction: {}",
        correction.corrected_code
    );
    assert!(
        correction.corrected_code.contains(&transport_error),
        "'{}' does not carry '{}'",
        correction.corrected_code,
        transport_error
    );
}
