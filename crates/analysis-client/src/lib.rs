//! Contract risk analysis client
//!
//! Turns extracted contract text into a validated `AnalysisResult`:
//! 1. truncate the text and build the fixed audit prompt
//! 2. send one chat-completion request (no retry, no streaming, no cache)
//! 3. strip any code fence and parse + validate the JSON reply

pub mod backend;
pub mod error;
pub mod parse;
pub mod prompt;

use std::sync::Arc;

use shared_types::AnalysisResult;
use tracing::info;

pub use backend::{
    ClientConfig, CompletionBackend, HttpCompletionBackend, DEFAULT_ENDPOINT, DEFAULT_MODEL,
    PLACEHOLDER_API_KEY,
};
pub use error::AnalysisError;
pub use parse::{parse_analysis_reply, strip_code_fence};
pub use prompt::{build_prompt, truncate_text, MAX_PROMPT_CHARS};

/// Runs the prompt → completion → parse pipeline against a backend
#[derive(Clone)]
pub struct ContractAnalyzer {
    backend: Arc<dyn CompletionBackend>,
}

impl ContractAnalyzer {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    /// Analyzer backed by the HTTP chat-completion client
    pub fn from_config(config: ClientConfig) -> Result<Self, AnalysisError> {
        Ok(Self::new(Arc::new(HttpCompletionBackend::new(config)?)))
    }

    pub fn model(&self) -> &str {
        self.backend.model()
    }

    /// Analyze contract text. Every call makes a fresh remote request.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        let prompt = build_prompt(text);
        info!(
            "Requesting analysis from {} ({} chars of contract text)",
            self.backend.model(),
            truncate_text(text).chars().count()
        );

        let reply = self.backend.complete(&prompt).await?;
        let result = parse_analysis_reply(&reply)?;

        info!(
            "Analysis complete: score={}, risks={}",
            result.risk_score,
            result.risks.len()
        );
        Ok(result)
    }
}
