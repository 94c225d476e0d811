//! API handlers for the SME Legal Guard server
//!
//! Provides REST endpoints for:
//! - Contract upload, extraction and the full audit pipeline
//! - Session audit logs
//! - Template listing and download

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::Local;
use report_engine::{generate_report, report_file_name, Dashboard};
use serde::{Deserialize, Serialize};
use shared_types::{AuditLogEntry, UploadedDocument};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::error::ServerError;
use crate::state::{AppState, SessionContext};

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Characters of extracted text echoed back by `/api/extract`
const PREVIEW_CHARS: usize = 500;

/// Handler: GET /
pub async fn handle_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub model: String,
}

/// Handler: GET /health
pub async fn handle_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "legalguard-server",
        version: env!("CARGO_PKG_VERSION"),
        model: state.analyzer.model().to_string(),
    })
}

// ============================================================================
// Templates
// ============================================================================

#[derive(Serialize)]
pub struct TemplateListResponse {
    pub success: bool,
    pub templates: Vec<TemplateInfo>,
    pub count: usize,
}

#[derive(Serialize)]
pub struct TemplateInfo {
    pub name: &'static str,
    pub slug: &'static str,
    pub file_name: String,
    pub description: &'static str,
}

/// Handler: GET /api/templates
pub async fn handle_list_templates() -> Json<TemplateListResponse> {
    let templates: Vec<TemplateInfo> = template_library::list_templates()
        .iter()
        .map(|t| TemplateInfo {
            name: t.name,
            slug: t.slug,
            file_name: t.file_name(),
            description: t.description,
        })
        .collect();

    let count = templates.len();

    Json(TemplateListResponse {
        success: true,
        templates,
        count,
    })
}

/// Handler: GET /api/templates/:slug
///
/// Serves the template text as a `text/plain` attachment.
pub async fn handle_download_template(
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    let template = template_library::get_template_by_slug(&slug)
        .ok_or_else(|| ServerError::TemplateNotFound(slug.clone()))?;

    debug!("Serving template {}", template.name);

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", template.file_name()),
            ),
        ],
        template.text,
    ))
}

// ============================================================================
// Sessions
// ============================================================================

#[derive(Serialize)]
pub struct SessionResponse {
    pub success: bool,
    pub session_id: Uuid,
}

#[derive(Serialize)]
pub struct SessionLogResponse {
    pub success: bool,
    pub session_id: Uuid,
    pub entries: Vec<AuditLogEntry>,
    pub count: usize,
}

/// Handler: POST /api/session
pub async fn handle_create_session(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    let ctx = state.sessions.create().await;
    info!("Created session {}", ctx.id);

    Json(SessionResponse {
        success: true,
        session_id: ctx.id,
    })
}

/// Handler: GET /api/session/:id
pub async fn handle_get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionLogResponse>, ServerError> {
    let ctx = find_session(&state, &id).await?;
    let entries = ctx.entries().await;

    Ok(Json(SessionLogResponse {
        success: true,
        session_id: ctx.id,
        count: entries.len(),
        entries,
    }))
}

/// Handler: DELETE /api/session/:id
pub async fn handle_end_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let session_id = parse_session_id(&id)?;
    if !state.sessions.remove(&session_id).await {
        return Err(ServerError::SessionNotFound(id));
    }

    info!("Ended session {}", session_id);
    Ok(Json(serde_json::json!({ "success": true })))
}

pub(crate) fn parse_session_id(id: &str) -> Result<Uuid, ServerError> {
    Uuid::parse_str(id).map_err(|_| ServerError::SessionNotFound(id.to_string()))
}

async fn find_session(state: &AppState, id: &str) -> Result<Arc<SessionContext>, ServerError> {
    let session_id = parse_session_id(id)?;
    state
        .sessions
        .get(&session_id)
        .await
        .ok_or_else(|| ServerError::SessionNotFound(id.to_string()))
}

// ============================================================================
// Extraction and audit
// ============================================================================

/// Uploaded file body
#[derive(Deserialize)]
pub struct UploadRequest {
    pub filename: String,
    pub content_base64: String,
}

impl UploadRequest {
    fn into_document(self) -> Result<UploadedDocument, ServerError> {
        let bytes = BASE64
            .decode(self.content_base64.trim())
            .map_err(|e| ServerError::InvalidRequest(format!("Invalid file base64: {}", e)))?;
        Ok(UploadedDocument::new(self.filename, bytes))
    }
}

/// Extract text on a blocking worker; no text at all is `UnreadableInput`
async fn extract(document: UploadedDocument) -> Result<(UploadedDocument, String), ServerError> {
    let result = tokio::task::spawn_blocking(move || {
        let text = contract_extract::extract_text(&document);
        (document, text)
    })
    .await
    .map_err(|e| ServerError::Internal(format!("Extraction task failed: {}", e)))?;

    match result {
        (document, Ok(Some(text))) => Ok((document, text)),
        (document, Ok(None)) => {
            warn!("No text extracted from {}", document.filename);
            Err(ServerError::UnreadableInput)
        }
        (document, Err(e)) => {
            error!("Failed to read {}: {}", document.filename, e);
            Err(ServerError::UnreadableInput)
        }
    }
}

#[derive(Serialize)]
pub struct ExtractResponse {
    pub success: bool,
    pub filename: String,
    pub format: String,
    pub char_count: usize,
    pub preview: String,
}

/// Handler: POST /api/extract
pub async fn handle_extract(
    Json(req): Json<UploadRequest>,
) -> Result<Json<ExtractResponse>, ServerError> {
    info!("Extract request: {}", req.filename);
    let (document, text) = extract(req.into_document()?).await?;

    Ok(Json(ExtractResponse {
        success: true,
        format: document
            .format
            .map(|f| f.to_string())
            .unwrap_or_default(),
        filename: document.filename,
        char_count: text.chars().count(),
        preview: text.chars().take(PREVIEW_CHARS).collect(),
    }))
}

/// The rendered PDF report
#[derive(Serialize)]
pub struct ReportArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub page_count: usize,
    pub data_base64: String,
}

#[derive(Serialize)]
pub struct AuditResponse {
    pub success: bool,
    pub filename: String,
    pub analyzed_at: String,
    pub dashboard: Dashboard,
    /// None when PDF generation failed; see `report_error`
    pub report: Option<ReportArtifact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_error: Option<String>,
    pub log_entry: AuditLogEntry,
}

/// Handler: POST /api/session/:id/audit
///
/// Extract, analyze, log, then build the dashboard and PDF. Audits on one
/// session run one at a time; its log stays readable meanwhile.
pub async fn handle_audit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UploadRequest>,
) -> Result<Json<AuditResponse>, ServerError> {
    let ctx = find_session(&state, &id).await?;
    let document = req.into_document()?;

    let _audit = ctx.begin_audit().await;
    info!("Audit request: session={}, file={}", ctx.id, document.filename);

    let (document, text) = extract(document).await?;
    let analysis = state.analyzer.analyze(&text).await?;

    let now = Local::now();
    let log_entry = ctx.record(&document.filename, now.time()).await;

    let dashboard = Dashboard::from_analysis(&analysis);

    let (report, report_error) = match generate_report(
        &document.filename,
        now.naive_local(),
        &analysis,
        state.render_timeout_ms,
    )
    .await
    {
        Ok(rendered) => (
            Some(ReportArtifact {
                file_name: report_file_name(&document.filename),
                mime_type: "application/pdf",
                page_count: rendered.page_count,
                data_base64: BASE64.encode(&rendered.bytes),
            }),
            None,
        ),
        Err(e) => {
            error!("Report generation failed for {}: {}", document.filename, e);
            (None, Some(e.to_string()))
        }
    };

    Ok(Json(AuditResponse {
        success: true,
        filename: document.filename,
        analyzed_at: now.format("%Y-%m-%d %H:%M:%S").to_string(),
        dashboard,
        report,
        report_error,
        log_entry,
    }))
}
