//! Entity CRUD handlers: create, read, update, delete, list.

use crate::error::AppError;
use crate::extractors::ResolvedEntity;
use crate::response::{success_created, success_one, success_page};
use crate::service::{EntityFacade, ListParams};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

fn facade<'a>(state: &'a AppState, resolved: &ResolvedEntity) -> EntityFacade<'a> {
    EntityFacade::new(&state.pool, state.model.schema(), resolved.entity)
}

fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    body.map(|Json(v)| v)
        .map_err(|e| AppError::BadRequest(e.body_text()))
}

pub async fn list(
    State(state): State<AppState>,
    resolved: ResolvedEntity,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let params = ListParams::from_query(pairs)?;
    let rows = facade(&state, &resolved).list(&params).await?;
    Ok(success_page(rows, params.page.skip, params.page.limit))
}

pub async fn create(
    State(state): State<AppState>,
    resolved: ResolvedEntity,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = json_body(body)?;
    let row = facade(&state, &resolved).create(body).await?;
    Ok(success_created(row))
}

pub async fn read(
    State(state): State<AppState>,
    resolved: ResolvedEntity,
) -> Result<impl IntoResponse, AppError> {
    let row = facade(&state, &resolved).get(resolved.key()?).await?;
    Ok(success_one(row))
}

pub async fn update(
    State(state): State<AppState>,
    resolved: ResolvedEntity,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = json_body(body)?;
    let row = facade(&state, &resolved).update(resolved.key()?, body).await?;
    Ok(success_one(row))
}

pub async fn delete(
    State(state): State<AppState>,
    resolved: ResolvedEntity,
) -> Result<impl IntoResponse, AppError> {
    let row = facade(&state, &resolved).delete(resolved.key()?).await?;
    Ok(success_one(row))
}
