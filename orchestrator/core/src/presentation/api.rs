// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// HTTP routes for the classroom frontend. JSON field names follow the
// frontend's wire contract (email/senha, codigo/correcao, aluno_id, ...).

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::application::classroom::{ClassroomService, CorrectionView};
use crate::domain::identity::IdentityId;
use crate::domain::question::QuestionId;
use crate::domain::registry::RegistryError;
use crate::domain::roster::{RosterAction, RosterId, RosterOutcome};
use crate::domain::script::ScriptId;

pub struct AppState {
    pub classroom: Arc<dyn ClassroomService>,
}

pub fn app(service: Arc<dyn ClassroomService>, static_dir: Option<PathBuf>) -> Router {
    let state = Arc::new(AppState { classroom: service });

    let router = Router::new()
        .route("/health", get(health))
        .route("/login", post(login))
        .route("/analisar", post(analyze))
        .route("/enviar_duvida", post(submit_question))
        .route("/responder_duvida", post(answer_question))
        .route("/gerenciar_turma", post(manage_roster))
        .route("/alunos", get(list_students))
        .route("/duvidas/{professor_id}", get(received_questions))
        .route("/resposta/{aluno_id}/{duvida_id}", get(answer_for))
        .route("/correcao/{aluno_id}/{script_id}", get(correction_status))
        .with_state(state);

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Error body shared by every route: `{"message": ...}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        let status = if err.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::CONFLICT
        };
        Self::new(status, err.to_string())
    }
}

/// Malformed or mistyped bodies keep the `{message}` shape.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "message": self.message }))).into_response()
    }
}

type ApiResult = Result<Json<Value>, ApiError>;

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub senha: String,
}

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub codigo: String,
    #[serde(default)]
    pub aluno_id: Option<u64>,
}

#[derive(Deserialize)]
pub struct QuestionRequest {
    pub aluno_id: u64,
    pub conteudo: String,
}

#[derive(Deserialize)]
pub struct AnswerRequest {
    pub duvida_id: u64,
    pub resposta: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RosterVerb {
    Adicionar,
    Remover,
    Listar,
}

#[derive(Deserialize)]
pub struct RosterRequest {
    pub professor_id: u64,
    pub turma_id: u64,
    pub acao: RosterVerb,
    #[serde(default)]
    pub aluno_id: Option<u64>,
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult {
    let Json(payload) = payload?;
    match state.classroom.login(&payload.email, &payload.senha).await {
        Some(user) => Ok(Json(json!({
            "message": format!("Welcome, {}!", user.name),
            "usuario": user.name,
            "id": user.id,
            "papel": user.role,
        }))),
        None => Err(ApiError::new(
            StatusCode::UNAUTHORIZED,
            "Login failed. Check your credentials.",
        )),
    }
}

async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> ApiResult {
    let Json(payload) = payload?;
    match payload.aluno_id {
        Some(student_id) => {
            let review = state
                .classroom
                .submit_code(IdentityId(student_id), &payload.codigo)
                .await?;
            Ok(Json(json!({
                "correcao": review.correction.corrected_code,
                "script_id": review.script_id,
            })))
        }
        None => {
            let correction = state.classroom.analyze_code(&payload.codigo).await;
            Ok(Json(json!({ "correcao": correction.corrected_code })))
        }
    }
}

async fn submit_question(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<QuestionRequest>, JsonRejection>,
) -> ApiResult {
    let Json(payload) = payload?;
    let question_id = state
        .classroom
        .ask_question(IdentityId(payload.aluno_id), &payload.conteudo)
        .await?;
    Ok(Json(json!({
        "message": "Question sent successfully.",
        "duvida_id": question_id,
    })))
}

async fn answer_question(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnswerRequest>, JsonRejection>,
) -> ApiResult {
    let Json(payload) = payload?;
    state
        .classroom
        .answer_question(QuestionId(payload.duvida_id), &payload.resposta)
        .await?;
    Ok(Json(json!({ "message": "Answer sent successfully." })))
}

async fn manage_roster(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RosterRequest>, JsonRejection>,
) -> ApiResult {
    let Json(payload) = payload?;
    let student = payload.aluno_id.map(IdentityId);
    let action = match (payload.acao, student) {
        (RosterVerb::Adicionar, Some(id)) => RosterAction::Add(id),
        (RosterVerb::Remover, Some(id)) => RosterAction::Remove(id),
        (RosterVerb::Listar, _) => RosterAction::List,
        (verb, None) => {
            return Err(ApiError::new(
                StatusCode::BAD_REQUEST,
                format!("aluno_id is required for {:?}", verb).to_lowercase(),
            ))
        }
    };

    let outcome = state
        .classroom
        .manage_roster(IdentityId(payload.professor_id), RosterId(payload.turma_id), action)
        .await?;

    Ok(Json(match outcome {
        RosterOutcome::Confirmation(message) => json!({ "message": message }),
        RosterOutcome::Members(names) => json!({ "alunos": names }),
    }))
}

async fn list_students(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({ "alunos": state.classroom.list_students().await }))
}

async fn received_questions(
    State(state): State<Arc<AppState>>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult {
    let Path(professor_id) = path?;
    let questions = state
        .classroom
        .received_questions(IdentityId(professor_id))
        .await?;
    Ok(Json(json!({ "duvidas": questions })))
}

async fn answer_for(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(u64, u64)>, PathRejection>,
) -> ApiResult {
    let Path((student_id, question_id)) = path?;
    let answer = state
        .classroom
        .answer_for(IdentityId(student_id), QuestionId(question_id))
        .await?;
    Ok(Json(json!({ "resposta": answer })))
}

async fn correction_status(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(u64, u64)>, PathRejection>,
) -> ApiResult {
    let Path((student_id, script_id)) = path?;
    let script_id = ScriptId(script_id);
    match state
        .classroom
        .correction_status(IdentityId(student_id), script_id)
        .await?
    {
        CorrectionView::Ready(correction) => Ok(Json(json!({
            "status": "ready",
            "correcao": correction.corrected_code,
        }))),
        CorrectionView::NotYetCorrected => Ok(Json(json!({ "status": "pending" }))),
        CorrectionView::NoSuchScript => Err(RegistryError::ScriptNotFound(script_id).into()),
    }
}
