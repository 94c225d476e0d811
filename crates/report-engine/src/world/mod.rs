//! Typst World implementation for in-memory report compilation

pub mod fonts;
pub mod report_world;

pub use fonts::{global_font_cache, FontCache};
pub use report_world::ReportWorld;
