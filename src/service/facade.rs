//! Per-entity facade: the five operations bound to one entity definition.

use super::{CrudService, Page, RequestValidator, WriteMode};
use crate::error::AppError;
use crate::model::{EntityDef, EntityKey};
use serde_json::Value;
use sqlx::PgPool;

/// Parsed list request: pagination plus `(column, raw value)` filters.
#[derive(Debug, Default)]
pub struct ListParams {
    pub page: Page,
    pub filters: Vec<(String, String)>,
}

impl ListParams {
    /// Split query-string pairs into `skip`/`limit` and column filters.
    pub fn from_query<I>(pairs: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut skip = 0;
        let mut limit = super::crud::DEFAULT_LIMIT;
        let mut filters = Vec::new();
        for (k, v) in pairs {
            match k.as_str() {
                "skip" => {
                    skip = v
                        .parse()
                        .map_err(|_| AppError::Validation("skip must be an integer".into()))?
                }
                "limit" => {
                    limit = v
                        .parse()
                        .map_err(|_| AppError::Validation("limit must be an integer".into()))?
                }
                _ => filters.push((k, v)),
            }
        }
        Ok(ListParams {
            page: Page::new(skip, limit)?,
            filters,
        })
    }
}

pub struct EntityFacade<'a> {
    pool: &'a PgPool,
    schema: &'a str,
    entity: &'static EntityDef,
}

impl<'a> EntityFacade<'a> {
    pub fn new(pool: &'a PgPool, schema: &'a str, entity: &'static EntityDef) -> Self {
        EntityFacade { pool, schema, entity }
    }

    pub async fn get(&self, key: EntityKey) -> Result<Value, AppError> {
        self.check_key(&key)?;
        CrudService::read(self.pool, self.schema, self.entity, &key)
            .await?
            .ok_or_else(|| AppError::not_found(self.entity.name))
    }

    /// Unknown filter columns are ignored.
    pub async fn list(&self, params: &ListParams) -> Result<Vec<Value>, AppError> {
        let mut filters = Vec::with_capacity(params.filters.len());
        for (name, raw) in &params.filters {
            let Some(col) = self.entity.column(name) else { continue };
            filters.push((col, RequestValidator::filter_value(col, raw)?));
        }
        CrudService::list(self.pool, self.schema, self.entity, &filters, params.page).await
    }

    pub async fn create(&self, body: Value) -> Result<Value, AppError> {
        let mut body = RequestValidator::validate(self.entity, body, WriteMode::Create)?;
        if let Some(hook) = self.entity.hook {
            hook.prepare(&mut body, WriteMode::Create).await?;
        }
        let row = CrudService::create(self.pool, self.schema, self.entity, &body).await?;
        tracing::info!(entity = self.entity.table, "created");
        Ok(row)
    }

    pub async fn update(&self, key: EntityKey, body: Value) -> Result<Value, AppError> {
        self.check_key(&key)?;
        let mut body = RequestValidator::validate(self.entity, body, WriteMode::Update)?;
        if let Some(hook) = self.entity.hook {
            hook.prepare(&mut body, WriteMode::Update).await?;
        }
        CrudService::update(self.pool, self.schema, self.entity, &key, &body)
            .await?
            .ok_or_else(|| AppError::not_found(self.entity.name))
    }

    pub async fn delete(&self, key: EntityKey) -> Result<Value, AppError> {
        self.check_key(&key)?;
        let row = CrudService::delete(self.pool, self.schema, self.entity, &key)
            .await?
            .ok_or_else(|| AppError::not_found(self.entity.name))?;
        tracing::info!(entity = self.entity.table, key = ?key, "deleted");
        Ok(row)
    }

    fn check_key(&self, key: &EntityKey) -> Result<(), AppError> {
        if self.entity.key.accepts(key) {
            return Ok(());
        }
        let expected = if self.entity.key.is_composite() {
            "two ids"
        } else {
            "a single id"
        };
        Err(AppError::BadRequest(format!(
            "{} records are addressed by {}",
            self.entity.name, expected
        )))
    }
}
