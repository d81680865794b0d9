use thiserror::Error;

/// Failures surfaced by the template engine.
///
/// Missing variables at render time are not an error; rendering itself never
/// fails. Both compile-path variants propagate unchanged to the caller and are
/// never cached.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The named template has no backing source.
    #[error("template not found: {location}")]
    NotFound { name: String, location: String },

    /// An `{{` open marker with no matching `}}` before end of input.
    /// Compilation halts entirely; no partial result is produced.
    #[error("unclosed variable tag starting at byte {offset}")]
    UnclosedTag { offset: usize },

    /// The source loader failed for a reason other than absence.
    #[error("failed to read template source: {0}")]
    Source(#[from] std::io::Error),
}
