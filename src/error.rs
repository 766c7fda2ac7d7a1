use crate::lang::CodeLanguage;

/// Errors produced at the edges of a scan (file access, dialect selection,
/// grammar loading, output encoding).
///
/// Scanning itself never fails: malformed source yields a partial tree and
/// whatever facts could be found in it.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("unsupported extension: .{0}")]
    UnsupportedExtension(String),

    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    #[error("{} documents cannot be scanned, only tsx", .0.as_str())]
    UnscannableLanguage(CodeLanguage),

    #[error("parse failed: {0}")]
    ParseFailed(String),

    #[error("grammar load failed: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}
