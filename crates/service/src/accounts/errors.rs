use thiserror::Error;

use crate::errors::ServiceError;

/// Business errors for account workflows.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Passwords not match")]
    PasswordMismatch,
    #[error("User already exists")]
    Conflict,
    #[error("Email or password is missing")]
    MissingCredentials,
    #[error("User not Found")]
    UserNotFound,
    #[error("Wrong password")]
    WrongPassword,
    #[error("not login")]
    NotLoggedIn,
    #[error("invalid token: {0}")]
    InvalidToken(String),
    #[error("Movie already in your fav list")]
    AlreadyFavourite,
    #[error("hashing error: {0}")]
    Hash(String),
    #[error("token error: {0}")]
    Token(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl AuthError {
    /// Message suitable for the client-facing envelope.
    pub fn client_message(&self) -> String {
        match self {
            AuthError::Service(e) => e.client_message(),
            AuthError::Hash(_) | AuthError::Token(_) => "authentication unavailable".to_string(),
            other => other.to_string(),
        }
    }
}
