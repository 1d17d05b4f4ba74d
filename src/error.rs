use crate::Diagnostic;

/// Result type for grammar generation.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors. Warnings are reported as [`Diagnostic`]s instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("rule {0:?} not found in repository")]
    UnresolvedReference(String),

    #[error("repository rule name {0:?} cannot be referenced as an include")]
    InvalidRuleName(String),

    #[error("grammar has no top-level patterns")]
    EmptyGrammar,

    #[error("{} denied diagnostic(s): {}", .0.len(), render(.0))]
    Denied(Vec<Diagnostic>),

    #[error("failed to encode grammar: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("encoded grammar is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn render(diagnostics: &[Diagnostic]) -> String {
    diagnostics.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}
