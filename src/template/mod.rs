//! Disk-backed `{{name}}` template engine.
//!
//! Templates are tokenized once into an immutable [`CompiledTemplate`] and
//! cached for the lifetime of the process. Rendering interleaves literal
//! fragments with HTML-escaped variable values; variables absent from the
//! mapping are echoed back as their own `{{name}}` marker so unrendered
//! placeholders stay visible in the output.

mod cache;
mod engine;
mod error;
mod render;
mod source;
mod tokenize;

pub use cache::TemplateCache;
pub use engine::TemplateEngine;
pub use error::TemplateError;
pub use render::render;
pub use source::{FileTemplateSource, TemplateSource};
pub use tokenize::tokenize;

/// The parsed form of one template: literal fragments interleaved with
/// placeholder names.
///
/// Holds exactly one more literal than there are placeholders, so rendering
/// walks `literal[0], value[0], literal[1], value[1], …, literal[n]`.
/// Immutable once built; shared across concurrent renders behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTemplate {
    literals: Vec<String>,
    variables: Vec<String>,
}

impl CompiledTemplate {
    /// Literal fragments copied verbatim into the output.
    pub fn literals(&self) -> &[String] {
        &self.literals
    }

    /// Placeholder names in source order. Duplicates are independent
    /// occurrences resolved against the same mapping.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Number of placeholder occurrences in the template.
    pub fn placeholder_count(&self) -> usize {
        self.variables.len()
    }
}
