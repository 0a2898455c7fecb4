//! # API REST
//!
//! Web form and REST endpoints for the notetaker.
//!
//! Handles:
//! - the interactive HTML form served at `/`
//! - the two form actions as JSON endpoints
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialisation, CORS)
//!
//! All analysis lives in `notetaker-core`; handlers only move text in and records out.

#![warn(rust_2018_idioms)]

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Json},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{AnalyseDialogueReq, AnalyseTranscriptReq, HealthRes, HealthService};
use notetaker_core::{
    entities::{CurrentStatus, Diagnosis, Prognosis, Symptom, Treatment},
    soap::{Assessment, Objective, Plan, Subjective},
    AppContext, ExtractionResult, Intent, PatientName, Sentiment, SentimentResult, SoapNote,
    SummaryRecord, TranscriptAnalysis,
};

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Application state shared across handlers.
///
/// Holds the application context built at startup; it is read-only from here on.
#[derive(Clone)]
pub struct AppState {
    ctx: Arc<AppContext>,
}

impl AppState {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, analyse_transcript, analyse_sentiment),
    components(schemas(
        HealthRes,
        AnalyseTranscriptReq,
        AnalyseDialogueReq,
        TranscriptAnalysis,
        ExtractionResult,
        SummaryRecord,
        PatientName,
        Symptom,
        Diagnosis,
        Treatment,
        CurrentStatus,
        Prognosis,
        SoapNote,
        Subjective,
        Objective,
        Assessment,
        Plan,
        SentimentResult,
        Sentiment,
        Intent,
    ))
)]
pub struct ApiDoc;

/// Builds the router serving the form, its endpoints and the API docs.
pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/transcript/analyse", post(analyse_transcript))
        .route("/dialogue/sentiment", post(analyse_sentiment))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(AppState::new(ctx))
}

/// Serves the interactive form.
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
#[axum::debug_handler(state = AppState)]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/transcript/analyse",
    request_body = AnalyseTranscriptReq,
    responses(
        (status = 200, description = "Entities, summary, keywords and SOAP note", body = TranscriptAnalysis),
        (status = 400, description = "Bad request")
    )
)]
/// Analyse a consultation transcript
///
/// Runs entity extraction, the structured summary, keyword extraction and SOAP note
/// generation over the submitted transcript. Never fails on content: a blank or unrelated
/// transcript yields empty lists, `Not specified` values and a routine checkup note.
#[axum::debug_handler(state = AppState)]
async fn analyse_transcript(Json(req): Json<AnalyseTranscriptReq>) -> Json<TranscriptAnalysis> {
    tracing::debug!(chars = req.transcript.len(), "analysing transcript");
    Json(notetaker_core::analyse_transcript(&req.transcript))
}

#[utoipa::path(
    post,
    path = "/dialogue/sentiment",
    request_body = AnalyseDialogueReq,
    responses(
        (status = 200, description = "Sentiment and intent of the dialogue", body = SentimentResult),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Internal server error")
    )
)]
/// Analyse patient sentiment and intent
///
/// Vocabulary rules decide first; otherwise the fallback model loaded at startup is asked.
/// The model may block on network I/O, so classification runs on the blocking pool.
///
/// # Errors
/// Returns `500 Internal Server Error` if:
/// - the blocking classification task panicked or was cancelled.
#[axum::debug_handler]
async fn analyse_sentiment(
    State(state): State<AppState>,
    Json(req): Json<AnalyseDialogueReq>,
) -> Result<Json<SentimentResult>, (StatusCode, &'static str)> {
    let ctx = state.ctx.clone();
    match tokio::task::spawn_blocking(move || ctx.analyse_sentiment(&req.dialogue)).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            tracing::error!("Sentiment task error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}
