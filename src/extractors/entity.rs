//! Resolve the `:resource` path segment (and optional ids) to an entity definition.

use crate::error::AppError;
use crate::model::{EntityDef, EntityKey};
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use std::collections::HashMap;

pub const RESOURCE_PARAM: &str = "resource";
pub const ID_PARAM: &str = "id";
pub const SECOND_ID_PARAM: &str = "id2";

/// Entity addressed by the request path, with the record key when the path carries ids.
#[derive(Clone, Debug)]
pub struct ResolvedEntity {
    pub entity: &'static EntityDef,
    pub key: Option<EntityKey>,
}

impl ResolvedEntity {
    pub fn key(&self) -> Result<EntityKey, AppError> {
        self.key
            .ok_or_else(|| AppError::BadRequest("record id missing from path".into()))
    }
}

fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::Validation(format!("invalid id '{}'", raw)))
}

#[async_trait]
impl FromRequestParts<AppState> for ResolvedEntity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        let segment = params
            .get(RESOURCE_PARAM)
            .ok_or_else(|| AppError::BadRequest("resource missing from path".into()))?;
        let entity = state
            .model
            .entity_by_path(segment)
            .ok_or_else(|| AppError::NotFound(format!("resource '{}' not found", segment)))?;
        let key = match (params.get(ID_PARAM), params.get(SECOND_ID_PARAM)) {
            (Some(a), Some(b)) => Some(EntityKey::Composite(parse_id(a)?, parse_id(b)?)),
            (Some(a), None) => Some(EntityKey::Single(parse_id(a)?)),
            _ => None,
        };
        Ok(ResolvedEntity { entity, key })
    }
}
