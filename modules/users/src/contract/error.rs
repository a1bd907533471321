use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum UsersError {
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("user not found: {id}")]
    NotFound { id: i64 },

    #[error("email '{email}' is already registered")]
    Conflict { email: String },

    #[error("collaborator unavailable: {message}")]
    Unavailable { message: String },

    #[error("internal error")]
    Internal,
}

impl UsersError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn not_found(id: i64) -> Self {
        Self::NotFound { id }
    }

    pub fn conflict(email: impl Into<String>) -> Self {
        Self::Conflict {
            email: email.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<syncmq::BrokerError> for UsersError {
    fn from(e: syncmq::BrokerError) -> Self {
        Self::Unavailable {
            message: e.to_string(),
        }
    }
}
