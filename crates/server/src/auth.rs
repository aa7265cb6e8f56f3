//! Bearer-token guard for account routes.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use models::RecordId;

use crate::errors::ApiError;
use crate::state::AppState;

/// Id of the user the request's token was issued for.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub RecordId);

/// Reject requests without a valid `Authorization: Bearer <token>` header.
pub async fn protect(State(state): State<AppState>, mut req: Request, next: Next) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    let user_id = state.accounts.authenticate(token)?;
    req.extensions_mut().insert(CurrentUser(user_id));
    Ok(next.run(req).await)
}
