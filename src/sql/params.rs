//! Convert serde_json::Value to types that sqlx can bind.
//!
//! Each value declares the wire type it is encoded with, chosen from the target
//! column type, so one SQL text always sees the same parameter types.

use crate::error::AppError;
use crate::model::ColumnType;
use serde_json::Value;
use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::{Database, Type};

/// Wire type of a bound parameter. The SQL side always casts `$n::<column type>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindKind {
    Bool,
    Int,
    Text,
    Json,
}

impl BindKind {
    pub fn for_column(ty: &ColumnType) -> Self {
        match ty {
            ColumnType::Serial | ColumnType::Integer => BindKind::Int,
            ColumnType::Boolean => BindKind::Bool,
            ColumnType::Json => BindKind::Json,
            _ => BindKind::Text,
        }
    }

    fn type_info(self) -> PgTypeInfo {
        match self {
            BindKind::Bool => <bool as Type<Postgres>>::type_info(),
            BindKind::Int => <i64 as Type<Postgres>>::type_info(),
            BindKind::Text => <String as Type<Postgres>>::type_info(),
            BindKind::Json => <Value as Type<Postgres>>::type_info(),
        }
    }
}

/// A value that can be bound to a PostgreSQL query.
#[derive(Clone, Debug, PartialEq)]
pub enum PgBindValue {
    Null(BindKind),
    Bool(bool),
    I64(i64),
    String(String),
    Json(Value),
}

impl PgBindValue {
    /// Convert an already validated JSON value for a column of type `ty`.
    pub fn for_column(ty: &ColumnType, v: &Value) -> Result<Self, AppError> {
        let kind = BindKind::for_column(ty);
        if v.is_null() {
            return Ok(PgBindValue::Null(kind));
        }
        Ok(match kind {
            BindKind::Json => PgBindValue::Json(v.clone()),
            BindKind::Int => match v {
                Value::Number(n) => n
                    .as_i64()
                    .map(PgBindValue::I64)
                    .ok_or_else(|| AppError::Validation(format!("expected integer, got {}", n)))?,
                other => {
                    return Err(AppError::Validation(format!("expected integer, got {}", other)))
                }
            },
            BindKind::Bool => match v {
                Value::Bool(b) => PgBindValue::Bool(*b),
                other => {
                    return Err(AppError::Validation(format!("expected boolean, got {}", other)))
                }
            },
            BindKind::Text => match v {
                Value::String(s) => PgBindValue::String(s.clone()),
                Value::Number(n) => PgBindValue::String(n.to_string()),
                Value::Bool(b) => PgBindValue::String(b.to_string()),
                other => {
                    return Err(AppError::Validation(format!("expected scalar, got {}", other)))
                }
            },
        })
    }

    /// Key component. Keys are compared as `bigint` so out-of-range ids simply match nothing.
    pub fn key(v: i64) -> Self {
        PgBindValue::I64(v)
    }

    pub fn kind(&self) -> BindKind {
        match self {
            PgBindValue::Null(k) => *k,
            PgBindValue::Bool(_) => BindKind::Bool,
            PgBindValue::I64(_) => BindKind::Int,
            PgBindValue::String(_) => BindKind::Text,
            PgBindValue::Json(_) => BindKind::Json,
        }
    }
}

impl<'q> Encode<'q, Postgres> for PgBindValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        Ok(match self {
            PgBindValue::Null(_) => IsNull::Yes,
            PgBindValue::Bool(b) => <bool as Encode<Postgres>>::encode_by_ref(b, buf)?,
            PgBindValue::I64(n) => <i64 as Encode<Postgres>>::encode_by_ref(n, buf)?,
            PgBindValue::String(s) => {
                let s_ref: &str = s.as_str();
                <&str as Encode<Postgres>>::encode_by_ref(&s_ref, buf)?
            }
            PgBindValue::Json(v) => <Value as Encode<Postgres>>::encode_by_ref(v, buf)?,
        })
    }

    fn produces(&self) -> Option<PgTypeInfo> {
        Some(self.kind().type_info())
    }
}

impl Type<Postgres> for PgBindValue {
    fn type_info() -> PgTypeInfo {
        <String as Type<Postgres>>::type_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_keeps_the_column_kind() {
        let v = PgBindValue::for_column(&ColumnType::Integer, &Value::Null).unwrap();
        assert_eq!(v, PgBindValue::Null(BindKind::Int));
        let v = PgBindValue::for_column(&ColumnType::Json, &Value::Null).unwrap();
        assert_eq!(v.kind(), BindKind::Json);
    }

    #[test]
    fn decimals_bind_as_exact_text() {
        let v = PgBindValue::for_column(&ColumnType::Decimal(10, 2), &json!(12.5)).unwrap();
        assert_eq!(v, PgBindValue::String("12.5".into()));
    }

    #[test]
    fn json_columns_take_any_value() {
        let v = PgBindValue::for_column(&ColumnType::Json, &json!("plain")).unwrap();
        assert_eq!(v, PgBindValue::Json(json!("plain")));
        let v = PgBindValue::for_column(&ColumnType::Json, &json!([1, 2])).unwrap();
        assert_eq!(v.kind(), BindKind::Json);
    }

    #[test]
    fn rejects_mismatched_scalars() {
        assert!(PgBindValue::for_column(&ColumnType::Integer, &json!("7")).is_err());
        assert!(PgBindValue::for_column(&ColumnType::Boolean, &json!(1)).is_err());
        assert!(PgBindValue::for_column(&ColumnType::Text, &json!({"a": 1})).is_err());
    }
}
