use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum CalendarError {
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("internal error")]
    Internal,
}

impl CalendarError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}
