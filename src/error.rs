use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid raw record on line {line}: {message}")]
    Input { line: usize, message: String },

    #[error("Export error: {0}")]
    Export(String),
}

pub type Result<T> = std::result::Result<T, ScraperError>;

/// Raised when a single field of a crawled resolution cannot be sanitized.
///
/// These never abort a batch; the sanitizer turns them into error records
/// that are exported for manual review.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("{field} field has {found} values, expected {expected}{}", url_suffix(.url))]
    Multiplicity {
        field: &'static str,
        expected: Multiplicity,
        found: usize,
        url: Option<String>,
    },

    #[error("{field} field value '{value}' does not match the expected pattern{}", url_suffix(.url))]
    PatternMismatch {
        field: &'static str,
        value: String,
        url: Option<String>,
    },
}

impl ResolutionError {
    /// Name of the raw field that failed.
    pub fn field(&self) -> &'static str {
        match self {
            ResolutionError::Multiplicity { field, .. } => field,
            ResolutionError::PatternMismatch { field, .. } => field,
        }
    }
}

/// How many raw values a field must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiplicity {
    ExactlyOne,
    AtLeastOne,
}

impl std::fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Multiplicity::ExactlyOne => write!(f, "exactly 1"),
            Multiplicity::AtLeastOne => write!(f, "at least 1"),
        }
    }
}

fn url_suffix(url: &Option<String>) -> String {
    match url {
        Some(url) => format!(" (url: {url})"),
        None => String::new(),
    }
}
