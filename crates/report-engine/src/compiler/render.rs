//! Typst compilation and PDF export
//!
//! Compilation is CPU bound, so the async entry point moves it onto a
//! blocking worker and bounds it with a timeout.

use std::time::Duration;

use tracing::{debug, warn};
use typst::diag::{Severity, SourceDiagnostic};
use typst::model::Document;

use super::errors::{CompileError, RenderError};
use super::{RenderRequest, RenderedPdf};
use crate::world::ReportWorld;

/// Compile a request to PDF on a blocking worker, giving up after `timeout_ms`
pub async fn render_pdf(request: RenderRequest, timeout_ms: u64) -> Result<RenderedPdf, RenderError> {
    let result = tokio::time::timeout(
        Duration::from_millis(timeout_ms),
        tokio::task::spawn_blocking(move || render_pdf_sync(&request)),
    )
    .await;

    match result {
        Ok(Ok(rendered)) => rendered,
        Ok(Err(join_error)) => Err(RenderError::Task(format!(
            "Compilation task panicked: {}",
            join_error
        ))),
        Err(_timeout) => Err(RenderError::Timeout(timeout_ms)),
    }
}

/// Compile a request to PDF on the current thread
pub fn render_pdf_sync(request: &RenderRequest) -> Result<RenderedPdf, RenderError> {
    let world = ReportWorld::new(&request.source, request.inputs.clone())?;

    let warned = typst::compile(&world);
    let (_, warnings) = categorize_diagnostics(&warned.warnings);
    for warning in &warnings {
        match &warning.hint {
            Some(hint) => debug!("typst warning: {} (hint: {})", warning.message, hint),
            None => debug!("typst warning: {}", warning.message),
        }
    }

    let document = match warned.output {
        Ok(document) => document,
        Err(diagnostics) => {
            let (errors, _) = categorize_diagnostics(&diagnostics);
            if errors.is_empty() {
                return Err(RenderError::Compile(vec![CompileError::new(
                    "Compilation failed with unknown error",
                )]));
            }
            for error in &errors {
                warn!("typst error: {}", error.message);
            }
            return Err(RenderError::Compile(errors));
        }
    };

    let bytes = export_pdf(&document)?;
    Ok(RenderedPdf {
        bytes,
        page_count: document.pages.len(),
    })
}

fn export_pdf(document: &Document) -> Result<Vec<u8>, RenderError> {
    if document.pages.is_empty() {
        return Err(RenderError::Export("Document has no pages".to_string()));
    }

    typst_pdf::pdf(document, &typst_pdf::PdfOptions::default()).map_err(|diagnostics| {
        let (errors, _) = categorize_diagnostics(&diagnostics);
        RenderError::Export(
            errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; "),
        )
    })
}

/// Categorize diagnostics into errors and warnings
fn categorize_diagnostics(
    diagnostics: &[SourceDiagnostic],
) -> (Vec<CompileError>, Vec<CompileError>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for diag in diagnostics {
        let mut compile_error = CompileError::new(diag.message.to_string());

        if !diag.hints.is_empty() {
            let hint = diag
                .hints
                .iter()
                .map(|h| h.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            compile_error = compile_error.with_hint(hint);
        }

        match diag.severity {
            Severity::Error => errors.push(compile_error),
            Severity::Warning => warnings.push(compile_error.as_warning()),
        }
    }

    (errors, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(source: &str, inputs: serde_json::Value) -> RenderRequest {
        RenderRequest {
            source: source.to_string(),
            inputs: inputs.as_object().cloned().unwrap_or_default(),
        }
    }

    #[tokio::test]
    async fn test_render_simple_document() {
        let rendered = render_pdf(request("Hello, *World*!", json!({})), 10_000)
            .await
            .unwrap();

        assert!(rendered.bytes.starts_with(b"%PDF"));
        assert_eq!(rendered.page_count, 1);
    }

    #[tokio::test]
    async fn test_render_with_inputs() {
        let rendered = render_pdf(
            request(
                r#"#let name = sys.inputs.at("name", default: "World")
Hello, #name!"#,
                json!({"name": "Asha"}),
            ),
            10_000,
        )
        .await
        .unwrap();

        assert!(rendered.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_compile_error_reported() {
        let err = render_pdf_sync(&request("#let x = ", json!({}))).unwrap_err();
        match err {
            RenderError::Compile(errors) => assert!(!errors.is_empty()),
            other => panic!("expected compile error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_input_is_compile_error() {
        let err = render_pdf_sync(&request(r#"#sys.inputs.at("title")"#, json!({}))).unwrap_err();
        assert!(matches!(err, RenderError::Compile(_)));
    }

    #[tokio::test]
    async fn test_zero_timeout_elapses() {
        let err = render_pdf(request("Hello", json!({})), 0).await.unwrap_err();
        assert!(matches!(err, RenderError::Timeout(0)));
    }
}
