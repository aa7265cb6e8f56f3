use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::FailBody;
use service::accounts::AuthError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// Error rendered as the fail envelope `{"status": "fail", "message": ...}`.
#[derive(Debug, Error)]
#[error("{status}: {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(FailBody::new(self.message))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        let status = match &e {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::StorageUnavailable(source) => {
                error!(error = %source, "request failed on storage");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ServiceError::IdsExhausted(resource) => {
                error!(resource = %resource, "identifier space exhausted");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, e.client_message())
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        let message = e.client_message();
        let status = match e {
            AuthError::Service(inner) => return ApiError::from(inner),
            AuthError::PasswordMismatch | AuthError::Conflict | AuthError::MissingCredentials => StatusCode::BAD_REQUEST,
            AuthError::AlreadyFavourite => StatusCode::BAD_REQUEST,
            AuthError::UserNotFound | AuthError::WrongPassword => StatusCode::NOT_FOUND,
            AuthError::NotLoggedIn | AuthError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            AuthError::Hash(detail) | AuthError::Token(detail) => {
                error!(error = %detail, "authentication failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::RecordId;

    #[test]
    fn service_errors_map_to_status_codes() {
        let nf = ApiError::from(ServiceError::not_found("movie", &RecordId::from(9)));
        assert_eq!(nf.status, StatusCode::NOT_FOUND);
        assert_eq!(nf.message, "movie with id 9 not found");

        let storage = ServiceError::StorageUnavailable(service::errors::StorageError::Invalid {
            path: "x.json".into(),
            reason: "duplicate id 1".into(),
        });
        let err = ApiError::from(storage);
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "storage unavailable");

        let exhausted = ApiError::from(ServiceError::IdsExhausted("tasks"));
        assert_eq!(exhausted.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(exhausted.message, "no identifiers left");
    }

    #[test]
    fn auth_errors_map_to_status_codes() {
        assert_eq!(ApiError::from(AuthError::Conflict).status, StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(AuthError::UserNotFound).status, StatusCode::NOT_FOUND);
        let wrong = ApiError::from(AuthError::WrongPassword);
        assert_eq!(wrong.status, StatusCode::NOT_FOUND);
        assert_eq!(wrong.message, "Wrong password");
        let not_login = ApiError::from(AuthError::NotLoggedIn);
        assert_eq!(not_login.status, StatusCode::UNAUTHORIZED);
        assert_eq!(not_login.message, "not login");
        assert_eq!(ApiError::from(AuthError::Hash("boom".into())).status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
