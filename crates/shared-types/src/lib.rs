pub mod audit;
pub mod types;

pub use audit::{AuditLogEntry, SessionLog};
pub use types::{
    AnalysisResult, DocumentFormat, ModelError, RiskItem, RiskLevel, UploadedDocument,
    MAX_RISK_SCORE, MIN_RISK_SCORE,
};
