/// A template that could not be compiled.
///
/// `offset` is the byte offset into the template text where the problem was
/// found. `generated_source` is the program listing assembled up to that
/// point, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("template error at byte {offset}: {message}")]
pub struct TemplateError {
    /// What went wrong.
    pub message: String,
    /// Byte offset into the template text.
    pub offset: usize,
    /// Listing of the program compiled before the failure.
    pub generated_source: String,
}
