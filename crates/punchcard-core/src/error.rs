pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid options: {message}")]
    InvalidOptions { message: String },

    #[error("Degenerate period: {message}")]
    DegeneratePeriod { message: String },

    #[error("Options JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            message: message.into(),
        }
    }

    pub fn degenerate_period(message: impl Into<String>) -> Self {
        Self::DegeneratePeriod {
            message: message.into(),
        }
    }
}
