//! Builds parameterized INSERT, SELECT, UPDATE, DELETE from an entity definition.

use super::params::PgBindValue;
use crate::error::AppError;
use crate::model::{Access, ColumnDef, EntityDef, EntityKey, DELETED_AT, UPDATED_AT};
use serde_json::Value;
use std::collections::HashMap;

/// Quote identifier for PostgreSQL (safe: only from the model).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified name, e.g. `"public"."clinics"`.
pub fn qualified(schema: &str, name: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(name))
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<PgBindValue>,
    /// Positions (0-based) of params that must not be logged.
    redacted: Vec<usize>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
            redacted: Vec::new(),
        }
    }

    fn push_param(&mut self, v: PgBindValue) -> usize {
        self.params.push(v);
        self.params.len()
    }

    fn push_secret(&mut self, v: PgBindValue) -> usize {
        self.redacted.push(self.params.len());
        self.push_param(v)
    }

    /// Params as they may appear in logs.
    pub fn loggable_params(&self) -> Vec<String> {
        self.params
            .iter()
            .enumerate()
            .map(|(i, p)| {
                if self.redacted.contains(&i) {
                    "<redacted>".to_string()
                } else {
                    format!("{:?}", p)
                }
            })
            .collect()
    }
}

/// `$n::type` placeholder for a column value.
fn placeholder(schema: &str, entity: &EntityDef, col: &ColumnDef, n: usize) -> String {
    let enum_type = qualified(schema, &entity.enum_type_name(col.name));
    format!("${}::{}", n, col.ty.cast(&enum_type))
}

/// Push a column value, redacting hook-owned and sensitive columns.
fn push_column(q: &mut QueryBuf, col: &ColumnDef, v: &Value) -> Result<usize, AppError> {
    let bind = PgBindValue::for_column(&col.ty, v)?;
    Ok(if col.sensitive || col.access == Access::Server {
        q.push_secret(bind)
    } else {
        q.push_param(bind)
    })
}

/// SELECT list: visible columns; enums and numerics as `col::text` so rows decode as String.
fn select_column_list(entity: &EntityDef) -> String {
    entity
        .visible_columns()
        .map(|c| {
            let q = quoted(c.name);
            if c.ty.selects_as_text() {
                format!("{}::text AS {}", q, q)
            } else {
                q
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// `"a" = $1::bigint AND "b" = $2::bigint [AND "deleted_at" IS NULL]`.
fn key_predicate(q: &mut QueryBuf, entity: &EntityDef, key: &EntityKey) -> Result<String, AppError> {
    if !entity.key.accepts(key) {
        return Err(AppError::BadRequest(format!(
            "{} is addressed by {}",
            entity.name,
            entity.key.columns().join(" and ")
        )));
    }
    let mut parts: Vec<String> = entity
        .key
        .columns()
        .into_iter()
        .zip(key.values())
        .map(|(col, v)| {
            let n = q.push_param(PgBindValue::key(v));
            format!("{} = ${}::bigint", quoted(col), n)
        })
        .collect();
    if entity.soft_deletes() {
        parts.push(format!("{} IS NULL", quoted(DELETED_AT)));
    }
    Ok(parts.join(" AND "))
}

/// SELECT one live row by key.
pub fn select_by_key(schema: &str, entity: &EntityDef, key: &EntityKey) -> Result<QueryBuf, AppError> {
    let mut q = QueryBuf::new();
    let predicate = key_predicate(&mut q, entity, key)?;
    q.sql = format!(
        "SELECT {} FROM {} WHERE {}",
        select_column_list(entity),
        qualified(schema, entity.table),
        predicate
    );
    Ok(q)
}

/// SELECT page of live rows with exact-match filters, ordered by key columns.
pub fn select_list(
    schema: &str,
    entity: &EntityDef,
    filters: &[(&ColumnDef, Value)],
    limit: i64,
    offset: i64,
) -> Result<QueryBuf, AppError> {
    let mut q = QueryBuf::new();
    let mut where_parts = Vec::new();
    for (col, val) in filters {
        let n = push_column(&mut q, col, val)?;
        where_parts.push(format!("{} = {}", quoted(col.name), placeholder(schema, entity, col, n)));
    }
    if entity.soft_deletes() {
        where_parts.push(format!("{} IS NULL", quoted(DELETED_AT)));
    }
    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    let order = entity
        .key
        .columns()
        .iter()
        .map(|c| quoted(c))
        .collect::<Vec<_>>()
        .join(", ");
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {} LIMIT {} OFFSET {}",
        select_column_list(entity),
        qualified(schema, entity.table),
        where_clause,
        order,
        limit,
        offset
    );
    Ok(q)
}

/// INSERT the writable columns present in `body`. Absent columns take their store default.
pub fn insert(schema: &str, entity: &EntityDef, body: &HashMap<String, Value>) -> Result<QueryBuf, AppError> {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for c in entity.columns {
        if c.access == Access::Generated {
            continue;
        }
        let Some(val) = body.get(c.name) else { continue };
        let n = push_column(&mut q, c, val)?;
        cols.push(quoted(c.name));
        placeholders.push(placeholder(schema, entity, c, n));
    }
    let table = qualified(schema, entity.table);
    let returning = select_column_list(entity);
    q.sql = if cols.is_empty() {
        format!("INSERT INTO {} DEFAULT VALUES RETURNING {}", table, returning)
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            table,
            cols.join(", "),
            placeholders.join(", "),
            returning
        )
    };
    Ok(q)
}

/// UPDATE by key: SET only non-key writable columns present in `body`, plus `updated_at`.
/// With nothing to set, falls back to selecting the current row.
pub fn update(
    schema: &str,
    entity: &EntityDef,
    key: &EntityKey,
    body: &HashMap<String, Value>,
) -> Result<QueryBuf, AppError> {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for c in entity.columns {
        if c.access == Access::Generated || entity.is_key_column(c.name) {
            continue;
        }
        let Some(val) = body.get(c.name) else { continue };
        let n = push_column(&mut q, c, val)?;
        sets.push(format!("{} = {}", quoted(c.name), placeholder(schema, entity, c, n)));
    }
    if sets.is_empty() {
        return select_by_key(schema, entity, key);
    }
    if entity.tracks_updates() {
        sets.push(format!("{} = NOW()", quoted(UPDATED_AT)));
    }
    let predicate = key_predicate(&mut q, entity, key)?;
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} RETURNING {}",
        qualified(schema, entity.table),
        sets.join(", "),
        predicate,
        select_column_list(entity)
    );
    Ok(q)
}

/// DELETE by key. Soft-deleting entities get `deleted_at = NOW()` instead.
pub fn delete(schema: &str, entity: &EntityDef, key: &EntityKey) -> Result<QueryBuf, AppError> {
    let mut q = QueryBuf::new();
    let predicate = key_predicate(&mut q, entity, key)?;
    let table = qualified(schema, entity.table);
    let returning = select_column_list(entity);
    q.sql = if entity.soft_deletes() {
        format!(
            "UPDATE {} SET {} = NOW() WHERE {} RETURNING {}",
            table,
            quoted(DELETED_AT),
            predicate,
            returning
        )
    } else {
        format!("DELETE FROM {} WHERE {} RETURNING {}", table, predicate, returning)
    };
    Ok(q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entities::{APPOINTMENTS, CLINICS, ROLE_PERMISSIONS, USERS};
    use serde_json::json;

    fn body(v: Value) -> HashMap<String, Value> {
        v.as_object().unwrap().clone().into_iter().collect()
    }

    #[test]
    fn select_by_key_filters_soft_deleted() {
        let q = select_by_key("public", &CLINICS, &EntityKey::Single(7)).unwrap();
        assert!(q.sql.starts_with("SELECT \"id\", \"name\""));
        assert!(q.sql.ends_with("FROM \"public\".\"clinics\" WHERE \"id\" = $1::bigint AND \"deleted_at\" IS NULL"));
        assert_eq!(q.params, vec![PgBindValue::I64(7)]);
    }

    #[test]
    fn composite_key_matches_both_columns() {
        let q = select_by_key("public", &ROLE_PERMISSIONS, &EntityKey::Composite(1, 2)).unwrap();
        assert!(q.sql.ends_with("WHERE \"role_id\" = $1::bigint AND \"permission_id\" = $2::bigint"));
        assert_eq!(q.params.len(), 2);
    }

    #[test]
    fn key_shape_mismatch_is_rejected() {
        assert!(matches!(
            delete("public", &ROLE_PERMISSIONS, &EntityKey::Single(1)),
            Err(AppError::BadRequest(_))
        ));
        assert!(select_by_key("public", &CLINICS, &EntityKey::Composite(1, 2)).is_err());
    }

    #[test]
    fn enums_select_as_text_and_cast_to_qualified_type() {
        let q = select_list(
            "clinic",
            &APPOINTMENTS,
            &[(APPOINTMENTS.column("status").unwrap(), json!("Scheduled"))],
            100,
            0,
        )
        .unwrap();
        assert!(q.sql.contains("\"status\"::text AS \"status\""));
        assert!(q.sql.contains("\"status\" = $1::\"clinic\".\"appointments_status\""));
        assert!(q.sql.ends_with("ORDER BY \"id\" LIMIT 100 OFFSET 0"));
    }

    #[test]
    fn list_orders_composite_by_both_keys() {
        let q = select_list("public", &ROLE_PERMISSIONS, &[], 10, 20).unwrap();
        assert_eq!(
            q.sql,
            "SELECT \"role_id\", \"permission_id\" FROM \"public\".\"rolepermissions\" \
             ORDER BY \"role_id\", \"permission_id\" LIMIT 10 OFFSET 20"
        );
    }

    #[test]
    fn insert_skips_generated_and_absent_columns() {
        let q = insert(
            "public",
            &CLINICS,
            &body(json!({"name": "Central", "is_active": false, "id": 9})),
        )
        .unwrap();
        assert!(q.sql.starts_with(
            "INSERT INTO \"public\".\"clinics\" (\"name\", \"is_active\") VALUES ($1::text, $2::boolean) RETURNING "
        ));
        assert_eq!(q.params.len(), 2);
    }

    #[test]
    fn insert_with_no_columns_uses_defaults() {
        let q = insert("public", &CLINICS, &HashMap::new()).unwrap();
        assert!(q.sql.starts_with("INSERT INTO \"public\".\"clinics\" DEFAULT VALUES RETURNING"));
    }

    #[test]
    fn update_sets_only_supplied_columns_and_touches_updated_at() {
        let q = update(
            "public",
            &CLINICS,
            &EntityKey::Single(3),
            &body(json!({"phone_number": "555", "created_at": "2020-01-01T00:00:00Z"})),
        )
        .unwrap();
        assert!(q.sql.starts_with(
            "UPDATE \"public\".\"clinics\" SET \"phone_number\" = $1::text, \"updated_at\" = NOW() \
             WHERE \"id\" = $2::bigint AND \"deleted_at\" IS NULL RETURNING"
        ));
    }

    #[test]
    fn empty_update_reads_current_row() {
        let q = update("public", &CLINICS, &EntityKey::Single(3), &HashMap::new()).unwrap();
        assert!(q.sql.starts_with("SELECT "));
        assert!(!q.sql.contains("updated_at\" = NOW()"));
    }

    #[test]
    fn update_never_assigns_key_columns() {
        let q = update(
            "public",
            &ROLE_PERMISSIONS,
            &EntityKey::Composite(1, 2),
            &body(json!({"role_id": 5})),
        )
        .unwrap();
        assert!(q.sql.starts_with("SELECT "));
    }

    #[test]
    fn delete_is_soft_when_entity_has_deleted_at() {
        let q = delete("public", &CLINICS, &EntityKey::Single(1)).unwrap();
        assert!(q.sql.starts_with("UPDATE \"public\".\"clinics\" SET \"deleted_at\" = NOW() WHERE"));
        let q = delete("public", &ROLE_PERMISSIONS, &EntityKey::Composite(1, 2)).unwrap();
        assert!(q.sql.starts_with("DELETE FROM \"public\".\"rolepermissions\" WHERE"));
    }

    #[test]
    fn password_hash_is_written_but_never_returned_or_logged() {
        let q = insert(
            "public",
            &USERS,
            &body(json!({"username": "ana", "password_hash": "$argon2id$secret"})),
        )
        .unwrap();
        assert!(q.sql.contains("(\"username\", \"password_hash\")"));
        let returning = q.sql.split("RETURNING").nth(1).unwrap();
        assert!(!returning.contains("password_hash"));
        let logged = q.loggable_params();
        assert_eq!(logged[1], "<redacted>");
        assert!(logged[0].contains("ana"));
    }
}
