//! Contract template library
//!
//! A fixed set of SME-friendly drafts, embedded in the binary at compile
//! time. Lookups never allocate or mutate, so every download of a template
//! is byte-identical.

pub mod embedded;
pub mod registry;

pub use registry::{get_template, get_template_by_slug, list_templates, TemplateEntry};
