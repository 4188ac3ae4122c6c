//! Generic CRUD execution against PostgreSQL.

use crate::error::AppError;
use crate::model::{ColumnDef, ColumnType, EntityDef, EntityKey};
use crate::sql::{delete, insert, select_by_key, select_list, update, QueryBuf};
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use std::collections::HashMap;

pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 1000;

/// Offset pagination. `limit` is clamped to `MAX_LIMIT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub skip: i64,
    pub limit: i64,
}

impl Default for Page {
    fn default() -> Self {
        Page {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Page {
    pub fn new(skip: i64, limit: i64) -> Result<Self, AppError> {
        if skip < 0 {
            return Err(AppError::Validation("skip must be non-negative".into()));
        }
        if limit < 0 {
            return Err(AppError::Validation("limit must be non-negative".into()));
        }
        Ok(Page {
            skip,
            limit: limit.min(MAX_LIMIT),
        })
    }
}

pub struct CrudService;

impl CrudService {
    /// Fetch one live row by key.
    pub async fn read(
        pool: &PgPool,
        schema: &str,
        entity: &EntityDef,
        key: &EntityKey,
    ) -> Result<Option<Value>, AppError> {
        let q = select_by_key(schema, entity, key)?;
        Self::fetch_optional(pool, entity, &q).await
    }

    /// List a page of live rows with exact-match filters, in key order.
    pub async fn list(
        pool: &PgPool,
        schema: &str,
        entity: &EntityDef,
        filters: &[(&ColumnDef, Value)],
        page: Page,
    ) -> Result<Vec<Value>, AppError> {
        let q = select_list(schema, entity, filters, page.limit, page.skip)?;
        Self::log(&q);
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        let rows = query.fetch_all(pool).await?;
        rows.iter().map(|r| row_to_json(r, entity)).collect()
    }

    /// Insert one row from a validated body. Returns the persisted row.
    pub async fn create(
        pool: &PgPool,
        schema: &str,
        entity: &EntityDef,
        body: &HashMap<String, Value>,
    ) -> Result<Value, AppError> {
        let q = insert(schema, entity, body)?;
        Self::fetch_optional(pool, entity, &q)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    /// Sparse update: only columns present in `body` change. `None` when no live row matches.
    pub async fn update(
        pool: &PgPool,
        schema: &str,
        entity: &EntityDef,
        key: &EntityKey,
        body: &HashMap<String, Value>,
    ) -> Result<Option<Value>, AppError> {
        let q = update(schema, entity, key, body)?;
        Self::fetch_optional(pool, entity, &q).await
    }

    /// Delete (or soft-delete) one row. Returns the removed row, or `None` when absent.
    pub async fn delete(
        pool: &PgPool,
        schema: &str,
        entity: &EntityDef,
        key: &EntityKey,
    ) -> Result<Option<Value>, AppError> {
        let q = delete(schema, entity, key)?;
        Self::fetch_optional(pool, entity, &q).await
    }

    async fn fetch_optional(pool: &PgPool, entity: &EntityDef, q: &QueryBuf) -> Result<Option<Value>, AppError> {
        Self::log(q);
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        let row = query.fetch_optional(pool).await?;
        row.map(|r| row_to_json(&r, entity)).transpose()
    }

    fn log(q: &QueryBuf) {
        tracing::debug!(sql = %q.sql, params = ?q.loggable_params(), "query");
    }
}

fn row_to_json(row: &PgRow, entity: &EntityDef) -> Result<Value, AppError> {
    let mut map = serde_json::Map::new();
    for col in entity.visible_columns() {
        map.insert(col.name.to_string(), cell_to_value(row, col)?);
    }
    Ok(Value::Object(map))
}

/// Decode one cell by its declared column type.
fn cell_to_value(row: &PgRow, col: &ColumnDef) -> Result<Value, AppError> {
    use sqlx::Row;
    let name = col.name;
    Ok(match col.ty {
        ColumnType::Serial | ColumnType::Integer => row
            .try_get::<Option<i32>, _>(name)?
            .map(Value::from)
            .unwrap_or(Value::Null),
        ColumnType::Varchar(_) | ColumnType::Text | ColumnType::Enum(_) => row
            .try_get::<Option<String>, _>(name)?
            .map(Value::String)
            .unwrap_or(Value::Null),
        ColumnType::Decimal(..) => row
            .try_get::<Option<String>, _>(name)?
            .map(|s| match s.parse::<serde_json::Number>() {
                Ok(n) => Value::Number(n),
                Err(_) => Value::String(s),
            })
            .unwrap_or(Value::Null),
        ColumnType::Boolean => row
            .try_get::<Option<bool>, _>(name)?
            .map(Value::Bool)
            .unwrap_or(Value::Null),
        ColumnType::Date => row
            .try_get::<Option<chrono::NaiveDate>, _>(name)?
            .map(|d| Value::String(d.format("%Y-%m-%d").to_string()))
            .unwrap_or(Value::Null),
        ColumnType::Time => row
            .try_get::<Option<chrono::NaiveTime>, _>(name)?
            .map(|t| Value::String(t.format("%H:%M:%S%.f").to_string()))
            .unwrap_or(Value::Null),
        ColumnType::Timestamp => row
            .try_get::<Option<chrono::NaiveDateTime>, _>(name)?
            .map(|d| Value::String(d.format("%Y-%m-%dT%H:%M:%S%.f").to_string()))
            .unwrap_or(Value::Null),
        ColumnType::TimestampTz => row
            .try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(name)?
            .map(|d| Value::String(d.to_rfc3339()))
            .unwrap_or(Value::Null),
        ColumnType::Json => row
            .try_get::<Option<Value>, _>(name)?
            .unwrap_or(Value::Null),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_and_clamps() {
        assert_eq!(Page::default(), Page { skip: 0, limit: 100 });
        assert_eq!(Page::new(5, 5000).unwrap(), Page { skip: 5, limit: 1000 });
        assert!(Page::new(-1, 10).is_err());
        assert!(Page::new(0, -10).is_err());
    }
}
