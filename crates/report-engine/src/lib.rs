//! Report rendering for contract audits
//!
//! - `dashboard`: the on-screen view model (score banner, band, panels)
//! - `report`: the downloadable PDF, compiled from an embedded typst
//!   template in an in-memory world
//! - `sanitize`: Latin-1 cleanup applied to all PDF text

pub mod compiler;
pub mod dashboard;
pub mod report;
pub mod sanitize;
pub mod world;

pub use compiler::{CompileError, RenderError, RenderedPdf};
pub use dashboard::{band_for_score, Dashboard, RiskPanel};
pub use report::{
    generate_report, generate_report_sync, report_file_name, report_inputs, REPORT_TITLE,
};
pub use sanitize::sanitize_for_pdf;
