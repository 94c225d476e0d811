//! Audit report assembly
//!
//! Turns an `AnalysisResult` into `sys.inputs` for the embedded report
//! template. Every string passes through `sanitize_for_pdf` first.

use chrono::NaiveDateTime;
use serde_json::{json, Map, Value};
use shared_types::{AnalysisResult, MAX_RISK_SCORE};
use tracing::info;

use crate::compiler::{render_pdf, render_pdf_sync, RenderError, RenderRequest, RenderedPdf};
use crate::sanitize::sanitize_for_pdf;

pub const REPORT_TITLE: &str = "SME Legal Guard: Risk & Negotiation Report";

/// Embedded typst source for the audit report
pub const AUDIT_REPORT_TEMPLATE: &str = include_str!("../templates/audit_report.typ");

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Download name for the report of `document_name`
pub fn report_file_name(document_name: &str) -> String {
    format!("SME_Audit_{}.pdf", document_name)
}

/// Template inputs for one report
pub fn report_inputs(
    document_name: &str,
    generated_at: NaiveDateTime,
    analysis: &AnalysisResult,
) -> Map<String, Value> {
    let risks: Vec<Value> = analysis
        .risks
        .iter()
        .map(|risk| {
            json!({
                "heading": sanitize_for_pdf(&format!("- {} [{}]", risk.clause, risk.level)),
                "impact": sanitize_for_pdf(&format!("Impact: {}", risk.impact)),
                "tip": sanitize_for_pdf(&format!("Negotiation Tip: {}", risk.alternative)),
            })
        })
        .collect();

    let mut inputs = Map::new();
    inputs.insert("title".into(), REPORT_TITLE.into());
    inputs.insert(
        "metadata".into(),
        sanitize_for_pdf(&format!(
            "Document: {} | Date: {}",
            document_name,
            generated_at.format(TIMESTAMP_FORMAT)
        ))
        .into(),
    );
    inputs.insert("summary".into(), sanitize_for_pdf(&analysis.summary).into());
    inputs.insert(
        "score_line".into(),
        format!("Contract Risk Score: {}/{}", analysis.risk_score, MAX_RISK_SCORE).into(),
    );
    inputs.insert("risks".into(), Value::Array(risks));
    inputs
}

fn report_request(
    document_name: &str,
    generated_at: NaiveDateTime,
    analysis: &AnalysisResult,
) -> RenderRequest {
    RenderRequest {
        source: AUDIT_REPORT_TEMPLATE.to_string(),
        inputs: report_inputs(document_name, generated_at, analysis),
    }
}

/// Render the PDF audit report on a blocking worker
pub async fn generate_report(
    document_name: &str,
    generated_at: NaiveDateTime,
    analysis: &AnalysisResult,
    timeout_ms: u64,
) -> Result<RenderedPdf, RenderError> {
    let request = report_request(document_name, generated_at, analysis);
    let rendered = render_pdf(request, timeout_ms).await?;

    info!(
        "Generated report for {} ({} pages, {} bytes)",
        document_name,
        rendered.page_count,
        rendered.bytes.len()
    );
    Ok(rendered)
}

pub fn generate_report_sync(
    document_name: &str,
    generated_at: NaiveDateTime,
    analysis: &AnalysisResult,
) -> Result<RenderedPdf, RenderError> {
    render_pdf_sync(&report_request(document_name, generated_at, analysis))
}
