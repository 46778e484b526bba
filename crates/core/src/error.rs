use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("no query provided")]
    MissingQuery,

    #[error("catalog responded with status {status}")]
    UpstreamStatus { status: u16 },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no books found for search: {search}")]
    NoResults { search: String },

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("serialize error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("regex error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl RecommendError {
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::UpstreamStatus { .. } | Self::Http(_))
    }
}

pub type Result<T, E = RecommendError> = std::result::Result<T, E>;
