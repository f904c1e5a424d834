/// Application-level errors
///
/// The server reports failures on two levels: the HTTP layer (connection
/// failures, non-2xx statuses) and the payload (`success: false` in an
/// otherwise well-formed reply). Call sites handle the two differently,
/// so they stay separate variants.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned status {status}: {body}")]
    BadStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("request rejected by server: {0}")]
    Rejected(String),
}

impl AppError {
    /// Whether this failure happened below the payload level.
    ///
    /// Non-2xx statuses count as transport failures: the reply never
    /// carried a usable `success` field.
    pub fn is_transport(&self) -> bool {
        matches!(self, AppError::Transport(_) | AppError::BadStatus { .. })
    }
}

pub type AppResult<T> = Result<T, AppError>;
