// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use parking_lot::RwLock;
use serde_json::{json, Value};
use tower::ServiceExt;

use codementor_core::application::{build_registry, StandardClassroomService};
use codementor_core::domain::analysis::{self, CodeAnalyzer};
use codementor_core::domain::identity::IdentityId;
use codementor_core::domain::script::Correction;
use codementor_core::domain::server_config::SeedConfig;
use codementor_core::presentation::api;

struct EchoAnalyzer;

#[async_trait]
impl CodeAnalyzer for EchoAnalyzer {
    async fn analyze(&self, code: &str) -> Correction {
        analysis::analyzed(format!("fixed: {}", code))
    }
}

fn test_app() -> Router {
    let registry = build_registry(&SeedConfig::demo()).unwrap();
    let service = StandardClassroomService::new(
        Arc::new(RwLock::new(registry)),
        Arc::new(EchoAnalyzer),
        Some(IdentityId(2)),
    );
    api::app(Arc::new(service), None)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_login_success_and_failure() {
    let app = test_app();

    let (status, body) = send(&app, "POST", "/login", Some(json!({"email": "j", "senha": "123"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["usuario"], "João");
    assert_eq!(body["message"], "Welcome, João!");
    assert_eq!(body["id"], 1);
    assert_eq!(body["papel"], "student");

    let (status, body) = send(&app, "POST", "/login", Some(json!({"email": "j", "senha": "nope"}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Login failed. Check your credentials.");
}

#[tokio::test]
async fn test_analyze_anonymous_and_for_student() {
    let app = test_app();

    let (status, body) = send(&app, "POST", "/analisar", Some(json!({"codigo": "x=1"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["correcao"], "fixed: x=1");
    assert!(body.get("script_id").is_none());

    let (status, body) = send(
        &app,
        "POST",
        "/analisar",
        Some(json!({"codigo": "y=2", "aluno_id": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["correcao"], "fixed: y=2");
    assert_eq!(body["script_id"], 1);

    let (status, body) = send(&app, "GET", "/correcao/1/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["correcao"], "fixed: y=2");

    let (status, _) = send(&app, "GET", "/correcao/1/5", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_question_flow() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/enviar_duvida",
        Some(json!({"aluno_id": 1, "conteudo": "What is a closure?"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Question sent successfully.");
    assert_eq!(body["duvida_id"], 1);

    let (status, body) = send(&app, "GET", "/duvidas/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["duvidas"][0]["content"], "What is a closure?");

    let (_, body) = send(&app, "GET", "/resposta/1/1", None).await;
    assert_eq!(body["resposta"], Value::Null);

    let (status, body) = send(
        &app,
        "POST",
        "/responder_duvida",
        Some(json!({"duvida_id": 1, "resposta": "A function capturing its environment."})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Answer sent successfully.");

    let (status, body) = send(&app, "GET", "/resposta/1/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resposta"], "A function capturing its environment.");
}

#[tokio::test]
async fn test_unknown_student_and_question_are_404() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/enviar_duvida",
        Some(json!({"aluno_id": 99, "conteudo": "hi"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("99"));

    let (status, _) = send(
        &app,
        "POST",
        "/responder_duvida",
        Some(json!({"duvida_id": 42, "resposta": "?"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_roster_management() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/gerenciar_turma",
        Some(json!({"professor_id": 2, "turma_id": 1, "acao": "adicionar", "aluno_id": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Student João added to roster 1.");

    let (status, body) = send(
        &app,
        "POST",
        "/gerenciar_turma",
        Some(json!({"professor_id": 2, "turma_id": 1, "acao": "listar"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["alunos"], json!(["João"]));

    let (status, _) = send(
        &app,
        "POST",
        "/gerenciar_turma",
        Some(json!({"professor_id": 2, "turma_id": 1, "acao": "remover"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/gerenciar_turma",
        Some(json!({"professor_id": 2, "turma_id": 9, "acao": "listar"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_students() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/alunos", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["alunos"], json!(["João"]));
}

#[tokio::test]
async fn test_missing_fields_reach_the_service() {
    let app = test_app();

    let (status, body) = send(&app, "POST", "/analisar", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["correcao"], "fixed: ");

    let (status, body) = send(&app, "POST", "/login", Some(json!({"email": "j"}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Login failed. Check your credentials.");
}

#[tokio::test]
async fn test_malformed_requests_keep_message_body() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/enviar_duvida",
        Some(json!({"aluno_id": "1", "conteudo": "hi"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["message"].is_string());

    let (status, body) = send(
        &app,
        "POST",
        "/gerenciar_turma",
        Some(json!({"professor_id": 2, "turma_id": 1, "acao": "apagar"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["message"].is_string());

    let (status, body) = send(&app, "GET", "/duvidas/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}
