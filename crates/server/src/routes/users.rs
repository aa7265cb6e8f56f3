//! Account routes under `/users`.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use common::types::SuccessBody;
use models::user::{self, AddFavInput, LoginInput, SignupInput};
use serde_json::Value;

use super::resources::{keyed, list_query};
use crate::auth::{protect, CurrentUser};
use crate::errors::ApiError;
use crate::extract::JsonBody;
use crate::state::AppState;

type Body = Json<SuccessBody<Value>>;

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/users/add-fav", post(add_fav))
        .route_layer(middleware::from_fn_with_state(state.clone(), protect));

    Router::new()
        .route("/users", get(list_users))
        .route("/users/signup", post(signup))
        .route("/users/login", post(login))
        .merge(protected)
        .with_state(state)
}

async fn signup(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<SignupInput>,
) -> Result<(StatusCode, Body), ApiError> {
    let session = state.accounts.signup(input).await?;
    let body = SuccessBody::data(keyed("user", session.user.into_value())).with_token(session.token);
    Ok((StatusCode::CREATED, Json(body)))
}

async fn login(State(state): State<AppState>, JsonBody(input): JsonBody<LoginInput>) -> Result<Body, ApiError> {
    let session = state.accounts.login(input).await?;
    Ok(Json(SuccessBody::data(keyed("user", session.user.into_value())).with_token(session.token)))
}

async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Body, ApiError> {
    let query = list_query(params, user::definition().default_page_size);
    let page = state.accounts.list_users(&query).await?;
    let users: Vec<Value> = page.records.into_iter().map(|u| u.into_value()).collect();
    let length = users.len();
    Ok(Json(SuccessBody::data(keyed("users", Value::Array(users))).with_counts(length, page.total)))
}

async fn add_fav(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    JsonBody(input): JsonBody<AddFavInput>,
) -> Result<Body, ApiError> {
    let user = state.accounts.add_favourite(&user_id, input).await?;
    let body = SuccessBody { message: Some("movie is added".to_string()), ..SuccessBody::data(keyed("user", user.into_value())) };
    Ok(Json(body))
}
