//! Generic CRUD routes, one set per resource:
//! `GET/POST /{name}` and `GET/PATCH/PUT/DELETE /{name}/:id`.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use common::types::SuccessBody;
use models::{Record, RecordId};
use serde_json::{Map, Value};
use service::errors::ServiceError;
use service::pagination::{Pagination, DEFAULT_LIMIT};
use service::query::{coerce_query_value, ListQuery};
use service::resource::ResourceStore;

use crate::errors::ApiError;
use crate::extract::JsonBody;

type Body = Json<SuccessBody<Value>>;

pub fn router(store: Arc<ResourceStore>) -> Router {
    let name = store.name();
    Router::new()
        .route(&format!("/{name}"), get(list).post(create))
        .route(&format!("/{name}/:id"), get(get_one).patch(update).put(update).delete(remove))
        .with_state(store)
}

/// Turn query-string pairs into a list query. `page` and `limit` paginate,
/// every other key filters. Without either pagination key the resource's
/// default page size (if any) applies.
pub fn list_query(params: Vec<(String, String)>, default_page_size: Option<u32>) -> ListQuery {
    let mut query = ListQuery::all();
    let (mut page, mut limit, mut paginate) = (None, None, false);
    for (key, raw) in params {
        match key.as_str() {
            "page" => {
                paginate = true;
                page = raw.trim().parse::<u32>().ok();
            }
            "limit" => {
                paginate = true;
                limit = raw.trim().parse::<u32>().ok();
            }
            _ => query = query.filter(key, coerce_query_value(&raw)),
        }
    }
    if paginate || default_page_size.is_some() {
        query = query.paginate(Pagination::from_parts(page, limit, default_page_size.unwrap_or(DEFAULT_LIMIT)));
    }
    query
}

fn parse_id(store: &ResourceStore, raw: &str) -> Result<RecordId, ApiError> {
    store
        .def()
        .id_strategy
        .parse_id(raw)
        .ok_or_else(|| ServiceError::not_found(store.def().singular, &RecordId::from(raw)).into())
}

/// `{key: value}`, the shape of every `data` payload.
pub fn keyed(key: &str, value: Value) -> Value {
    let mut data = Map::new();
    data.insert(key.to_string(), value);
    Value::Object(data)
}

fn single(store: &ResourceStore, record: &Record) -> Value {
    keyed(store.def().singular, record.without(store.def().hidden_fields).into_value())
}

async fn list(
    State(store): State<Arc<ResourceStore>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Body, ApiError> {
    let query = list_query(params, store.def().default_page_size);
    let page = store.list_page(&query).await?;
    let records: Vec<Value> =
        page.records.iter().map(|r| r.without(store.def().hidden_fields).into_value()).collect();
    let length = records.len();
    Ok(Json(SuccessBody::data(keyed(store.name(), Value::Array(records))).with_counts(length, page.total)))
}

async fn get_one(State(store): State<Arc<ResourceStore>>, Path(id): Path<String>) -> Result<Body, ApiError> {
    let id = parse_id(&store, &id)?;
    let record = store.get_by_id(&id).await?;
    Ok(Json(SuccessBody::data(single(&store, &record))))
}

async fn create(
    State(store): State<Arc<ResourceStore>>,
    JsonBody(input): JsonBody<Map<String, Value>>,
) -> Result<(StatusCode, Body), ApiError> {
    let record = store.create(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessBody::data(single(&store, &record)))))
}

async fn update(
    State(store): State<Arc<ResourceStore>>,
    Path(id): Path<String>,
    JsonBody(partial): JsonBody<Map<String, Value>>,
) -> Result<Body, ApiError> {
    let id = parse_id(&store, &id)?;
    let record = store.update(&id, partial).await?;
    Ok(Json(SuccessBody::data(single(&store, &record))))
}

async fn remove(State(store): State<Arc<ResourceStore>>, Path(id): Path<String>) -> Result<Body, ApiError> {
    let id = parse_id(&store, &id)?;
    let record = store.delete(&id).await?;
    Ok(Json(SuccessBody::data(single(&store, &record))))
}
