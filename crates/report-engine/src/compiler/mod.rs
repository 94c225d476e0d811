//! Typst compilation wrapper with timeout and error handling

pub mod errors;
pub mod render;

pub use errors::{CompileError, ErrorSeverity, RenderError};
pub use render::{render_pdf, render_pdf_sync};

/// Typst source plus the values exposed to it as `sys.inputs`
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub source: String,
    pub inputs: serde_json::Map<String, serde_json::Value>,
}

/// A compiled PDF
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}
