use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

pub const MIN_RISK_SCORE: u32 = 1;
pub const MAX_RISK_SCORE: u32 = 100;

/// Upload formats the extractor understands, selected by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

impl DocumentFormat {
    /// Detect the format from a filename's extension (case-insensitive).
    ///
    /// Content is never sniffed: a PDF renamed to `.txt` is treated as text.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".pdf") {
            Some(DocumentFormat::Pdf)
        } else if lower.ends_with(".docx") {
            Some(DocumentFormat::Docx)
        } else if lower.ends_with(".txt") {
            Some(DocumentFormat::Txt)
        } else {
            None
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Txt => "txt",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A document as uploaded by the user. Lives for one request only.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
    /// `None` when the extension is not one of pdf/docx/txt
    pub format: Option<DocumentFormat>,
}

impl UploadedDocument {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        let filename = filename.into();
        let format = DocumentFormat::from_filename(&filename);
        Self {
            filename,
            bytes,
            format,
        }
    }
}

/// Severity band the model assigns to a single clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "High",
            RiskLevel::Medium => "Medium",
            RiskLevel::Low => "Low",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(RiskLevel::High),
            "medium" => Ok(RiskLevel::Medium),
            "low" => Ok(RiskLevel::Low),
            _ => Err(ModelError::UnknownRiskLevel(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for RiskLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One contractual risk identified by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskItem {
    pub clause: String,
    pub level: RiskLevel,
    /// English explanation of the impact
    pub impact: String,
    /// Plain-language Hindi explanation
    pub hindi: String,
    /// Suggested renegotiation wording
    pub alternative: String,
}

/// Complete, validated analysis of one contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub risk_score: u32,
    pub summary: String,
    pub risks: Vec<RiskItem>,
}

impl AnalysisResult {
    /// Check the invariants serde cannot express on its own
    pub fn validate(&self) -> Result<(), ModelError> {
        if !(MIN_RISK_SCORE..=MAX_RISK_SCORE).contains(&self.risk_score) {
            return Err(ModelError::RiskScoreOutOfRange(self.risk_score));
        }
        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("risk_score {0} is outside 1-100")]
    RiskScoreOutOfRange(u32),

    #[error("unknown risk level '{0}', expected High, Medium or Low")]
    UnknownRiskLevel(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DocumentFormat::from_filename("lease.pdf"),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(
            DocumentFormat::from_filename("Offer.DOCX"),
            Some(DocumentFormat::Docx)
        );
        assert_eq!(
            DocumentFormat::from_filename("notes.Txt"),
            Some(DocumentFormat::Txt)
        );
        assert_eq!(DocumentFormat::from_filename("scan.png"), None);
        assert_eq!(DocumentFormat::from_filename("pdf"), None);
    }

    #[test]
    fn test_uploaded_document_detects_format() {
        let doc = UploadedDocument::new("contract.docx", vec![1, 2, 3]);
        assert_eq!(doc.format, Some(DocumentFormat::Docx));

        let doc = UploadedDocument::new("contract.odt", vec![]);
        assert_eq!(doc.format, None);
    }

    #[test]
    fn test_risk_level_parsing_is_case_insensitive() {
        assert_eq!("High".parse::<RiskLevel>().unwrap(), RiskLevel::High);
        assert_eq!("medium".parse::<RiskLevel>().unwrap(), RiskLevel::Medium);
        assert_eq!(" LOW ".parse::<RiskLevel>().unwrap(), RiskLevel::Low);
        assert!(matches!(
            "Severe".parse::<RiskLevel>(),
            Err(ModelError::UnknownRiskLevel(_))
        ));
    }

    #[test]
    fn test_analysis_result_deserializes() {
        let json = r#"{"risk_score":45,"summary":"S","risks":[{"clause":"C","level":"Medium","impact":"I","hindi":"H","alternative":"A"}]}"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();

        assert_eq!(result.risk_score, 45);
        assert_eq!(result.risks.len(), 1);
        assert_eq!(result.risks[0].level, RiskLevel::Medium);
        assert!(result.validate().is_ok());
    }

    #[test]
    fn test_unknown_level_rejected_by_serde() {
        let json = r#"{"clause":"C","level":"Critical","impact":"I","hindi":"H","alternative":"A"}"#;
        let result: Result<RiskItem, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_score_bounds() {
        let mut result = AnalysisResult {
            risk_score: 1,
            summary: String::new(),
            risks: vec![],
        };
        assert!(result.validate().is_ok());

        result.risk_score = 100;
        assert!(result.validate().is_ok());

        result.risk_score = 0;
        assert_eq!(result.validate(), Err(ModelError::RiskScoreOutOfRange(0)));

        result.risk_score = 101;
        assert_eq!(
            result.validate(),
            Err(ModelError::RiskScoreOutOfRange(101))
        );
    }
}
