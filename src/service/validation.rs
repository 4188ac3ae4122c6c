//! Request validation and coercion from column definitions.

use super::WriteMode;
use crate::error::AppError;
use crate::model::{ColumnDef, ColumnType, EntityDef};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::{Number, Value};
use std::collections::HashMap;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a request body for `mode`. Returns only client-writable columns, with values
    /// coerced to their canonical wire form, plus the hook's declared inputs untouched.
    pub fn validate(
        entity: &EntityDef,
        body: Value,
        mode: WriteMode,
    ) -> Result<HashMap<String, Value>, AppError> {
        let Value::Object(map) = body else {
            return Err(AppError::Validation("body must be a JSON object".into()));
        };
        let hook_inputs = entity.hook.map(|h| h.inputs()).unwrap_or(&[]);
        let mut out = HashMap::with_capacity(map.len());
        for (k, v) in map {
            if hook_inputs.contains(&k.as_str()) {
                out.insert(k, v);
                continue;
            }
            let Some(col) = entity.column(&k) else { continue };
            if !col.is_client_writable() {
                continue;
            }
            let v = coerce(col, &v)?;
            out.insert(k, v);
        }
        if mode == WriteMode::Create {
            for col in entity.columns {
                if col.is_client_writable()
                    && !col.nullable
                    && !col.has_default()
                    && !out.contains_key(col.name)
                {
                    return Err(AppError::Validation(format!("{} is required", col.name)));
                }
            }
        }
        Ok(out)
    }

    /// Parse a query-string filter value for `col`.
    pub fn filter_value(col: &ColumnDef, raw: &str) -> Result<Value, AppError> {
        if !col.is_filterable() {
            return Err(AppError::Validation(format!("cannot filter on {}", col.name)));
        }
        let v = match col.ty {
            ColumnType::Serial | ColumnType::Integer => raw
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| AppError::Validation(format!("{} must be an integer", col.name)))?,
            ColumnType::Boolean => match raw {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => return Err(AppError::Validation(format!("{} must be true or false", col.name))),
            },
            _ => Value::String(raw.to_string()),
        };
        let v = coerce(col, &v)?;
        if v.is_null() {
            return Err(AppError::Validation(format!("{} filter may not be null", col.name)));
        }
        Ok(v)
    }
}

/// Check one value against its column and return the canonical form.
fn coerce(col: &ColumnDef, v: &Value) -> Result<Value, AppError> {
    let invalid = |what: &str| AppError::Validation(format!("{} must be {}", col.name, what));
    if v.is_null() {
        return if col.nullable {
            Ok(Value::Null)
        } else {
            Err(AppError::Validation(format!("{} may not be null", col.name)))
        };
    }
    match col.ty {
        ColumnType::Serial | ColumnType::Integer => v
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(Value::from)
            .ok_or_else(|| invalid("a 32-bit integer")),
        ColumnType::Decimal(precision, scale) => {
            let n = match v {
                Value::Number(n) => n.clone(),
                Value::String(s) => s
                    .trim()
                    .parse::<Number>()
                    .map_err(|_| invalid("a number"))?,
                _ => return Err(invalid("a number")),
            };
            let finite = n.as_f64().map(f64::is_finite).unwrap_or(false);
            if !finite || !numeric_fits(&n.to_string(), precision, scale) {
                return Err(AppError::Validation(format!(
                    "{} is out of range for NUMERIC({}, {})",
                    col.name, precision, scale
                )));
            }
            Ok(Value::Number(n))
        }
        ColumnType::Boolean => v.as_bool().map(Value::Bool).ok_or_else(|| invalid("a boolean")),
        ColumnType::Varchar(max) => {
            let s = v.as_str().ok_or_else(|| invalid("a string"))?;
            if s.chars().count() > max as usize {
                return Err(AppError::Validation(format!(
                    "{} must be at most {} characters",
                    col.name, max
                )));
            }
            Ok(Value::String(s.to_string()))
        }
        ColumnType::Text => v
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(|| invalid("a string")),
        ColumnType::Enum(allowed) => {
            let s = v.as_str().ok_or_else(|| invalid("a string"))?;
            if allowed.contains(&s) {
                Ok(Value::String(s.to_string()))
            } else {
                Err(AppError::Validation(format!(
                    "{} must be one of: {}",
                    col.name,
                    allowed.join(", ")
                )))
            }
        }
        ColumnType::Date => {
            let s = v.as_str().ok_or_else(|| invalid("a date (YYYY-MM-DD)"))?;
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(|d| Value::String(d.format("%Y-%m-%d").to_string()))
                .map_err(|_| invalid("a date (YYYY-MM-DD)"))
        }
        ColumnType::Time => {
            let s = v.as_str().ok_or_else(|| invalid("a time (HH:MM[:SS])"))?;
            parse_time(s)
                .map(|t| Value::String(t.format("%H:%M:%S%.f").to_string()))
                .ok_or_else(|| invalid("a time (HH:MM[:SS])"))
        }
        ColumnType::Timestamp => {
            let s = v.as_str().ok_or_else(|| invalid("an ISO-8601 date-time"))?;
            parse_timestamp(s)
                .map(|t| Value::String(t.format(TIMESTAMP_FORMAT).to_string()))
                .ok_or_else(|| invalid("an ISO-8601 date-time"))
        }
        ColumnType::TimestampTz => {
            let s = v.as_str().ok_or_else(|| invalid("an RFC 3339 date-time"))?;
            DateTime::parse_from_rfc3339(s)
                .map(|t| Value::String(t.with_timezone(&Utc).to_rfc3339()))
                .map_err(|_| invalid("an RFC 3339 date-time"))
        }
        ColumnType::Json => Ok(v.clone()),
    }
}

/// Whether the decimal text still fits `NUMERIC(precision, scale)` after rounding to
/// `scale` places, half away from zero, the way PostgreSQL stores it.
fn numeric_fits(text: &str, precision: u8, scale: u8) -> bool {
    let unsigned = text.trim_start_matches(['-', '+']);
    let (mantissa, exp) = match unsigned.find(['e', 'E']) {
        Some(i) => match unsigned[i + 1..].parse::<i32>() {
            Ok(e) => (&unsigned[..i], e),
            Err(_) => return false,
        },
        None => (unsigned, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let digits: Vec<u8> = int_part.bytes().chain(frac_part.bytes()).collect();
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return false;
    }
    let digits: Vec<u8> = digits.iter().map(|b| b - b'0').collect();

    // Digits kept after rounding: everything left of the point plus `scale` fraction digits.
    let point = int_part.len() as i64 + i64::from(exp);
    let keep = point + i64::from(scale);
    if keep < 0 {
        return true;
    }
    let keep = keep as usize;
    let mut kept: Vec<u8> = (0..keep).map(|i| digits.get(i).copied().unwrap_or(0)).collect();
    if digits.get(keep).is_some_and(|d| *d >= 5) {
        let mut carry = true;
        for d in kept.iter_mut().rev() {
            if *d == 9 {
                *d = 0;
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, 1);
        }
    }
    let int_len = kept.len().saturating_sub(usize::from(scale));
    let significant = kept[..int_len].iter().skip_while(|d| **d == 0).count();
    significant <= usize::from(precision.saturating_sub(scale))
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

/// Local date-time, or RFC 3339 with offset converted to UTC.
fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc).naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entities::{
        APPOINTMENTS, CLINICS, IOP_EXAMS, OPTICAL_PRESCRIPTION_DETAILS, PERFORMANCE_METRICS, USERS,
    };
    use serde_json::json;

    #[test]
    fn body_must_be_an_object() {
        let err = RequestValidator::validate(&CLINICS, json!([1]), WriteMode::Create).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn create_requires_not_null_columns_without_default() {
        let err = RequestValidator::validate(&CLINICS, json!({"address": "x"}), WriteMode::Create)
            .unwrap_err();
        assert_eq!(err.to_string(), "name is required");
        assert!(RequestValidator::validate(&CLINICS, json!({"name": "A"}), WriteMode::Create).is_ok());
    }

    #[test]
    fn update_does_not_require_but_rejects_null_for_not_null() {
        assert!(RequestValidator::validate(&CLINICS, json!({}), WriteMode::Update).unwrap().is_empty());
        let err = RequestValidator::validate(&CLINICS, json!({"name": null}), WriteMode::Update).unwrap_err();
        assert_eq!(err.to_string(), "name may not be null");
        let ok = RequestValidator::validate(&CLINICS, json!({"address": null}), WriteMode::Update).unwrap();
        assert_eq!(ok["address"], Value::Null);
    }

    #[test]
    fn unknown_and_generated_keys_are_dropped() {
        let out = RequestValidator::validate(
            &CLINICS,
            json!({"name": "A", "id": 5, "created_at": "x", "bogus": 1}),
            WriteMode::Create,
        )
        .unwrap();
        assert_eq!(out.len(), 1);
        assert!(out.contains_key("name"));
    }

    #[test]
    fn hook_inputs_pass_and_server_columns_drop() {
        let out = RequestValidator::validate(
            &USERS,
            json!({"password": "longenough", "password_hash": "forged"}),
            WriteMode::Update,
        )
        .unwrap();
        assert_eq!(out.get("password"), Some(&json!("longenough")));
        assert!(!out.contains_key("password_hash"));
    }

    #[test]
    fn varchar_length_counts_characters() {
        let name: String = "é".repeat(150);
        assert!(RequestValidator::validate(&CLINICS, json!({ "name": name }), WriteMode::Update).is_ok());
        let long: String = "a".repeat(151);
        assert!(RequestValidator::validate(&CLINICS, json!({ "name": long }), WriteMode::Update).is_err());
    }

    #[test]
    fn enum_values_are_checked() {
        let ok = RequestValidator::validate(&APPOINTMENTS, json!({"status": "NoShow"}), WriteMode::Update);
        assert!(ok.is_ok());
        let err = RequestValidator::validate(&APPOINTMENTS, json!({"status": "Lost"}), WriteMode::Update)
            .unwrap_err();
        assert!(err.to_string().starts_with("status must be one of: Scheduled"));
    }

    #[test]
    fn integers_must_fit_32_bits() {
        let col = APPOINTMENTS.column("patient_id").unwrap();
        assert_eq!(coerce(col, &json!(42)).unwrap(), json!(42));
        assert!(coerce(col, &json!(1.5)).is_err());
        assert!(coerce(col, &json!("42")).is_err());
        assert!(coerce(col, &json!(3_000_000_000i64)).is_err());
    }

    #[test]
    fn decimals_accept_numeric_strings() {
        let col = PERFORMANCE_METRICS.column("metric_value").unwrap();
        assert_eq!(coerce(col, &json!("12.50")).unwrap(), json!(12.5));
        assert_eq!(coerce(col, &json!(7)).unwrap(), json!(7));
        assert!(coerce(col, &json!("abc")).is_err());
        assert!(coerce(col, &json!(100_000_000)).is_err());
    }

    #[test]
    fn decimals_are_range_checked_after_rounding_to_scale() {
        let sphere = OPTICAL_PRESCRIPTION_DETAILS.column("sphere_od").unwrap();
        assert!(coerce(sphere, &json!(99.994)).is_ok());
        assert!(coerce(sphere, &json!(-99.99)).is_ok());
        assert!(coerce(sphere, &json!(99.999)).is_err());
        assert!(coerce(sphere, &json!(-99.995)).is_err());
        assert!(coerce(sphere, &json!("99.995")).is_err());
        assert!(coerce(sphere, &json!(100)).is_err());
        assert!(coerce(sphere, &json!(0.004)).is_ok());
        assert!(coerce(sphere, &json!(1e-9)).is_ok());
        assert!(coerce(sphere, &json!(1e20)).is_err());
    }

    #[test]
    fn numeric_fit_counts_integer_digits() {
        assert!(!numeric_fits("9.95", 2, 1));
        assert!(numeric_fits("9.94", 2, 1));
        assert!(numeric_fits("0.5", 1, 0));
        assert!(!numeric_fits("9.5", 1, 0));
        assert!(numeric_fits("12345678.99", 10, 2));
        assert!(numeric_fits("12345678.995", 10, 2));
        assert!(!numeric_fits("99999999.995", 10, 2));
        assert!(numeric_fits("1.5e2", 4, 1));
        assert!(!numeric_fits("abc", 4, 2));
    }

    #[test]
    fn timestamps_are_normalised_to_utc() {
        let col = APPOINTMENTS.column("start_time").unwrap();
        assert_eq!(
            coerce(col, &json!("2024-05-01T10:00:00+02:00")).unwrap(),
            json!("2024-05-01T08:00:00")
        );
        assert_eq!(
            coerce(col, &json!("2024-05-01 09:30:00")).unwrap(),
            json!("2024-05-01T09:30:00")
        );
        assert!(coerce(col, &json!("tomorrow")).is_err());
    }

    #[test]
    fn dates_and_times_parse() {
        let date = PERFORMANCE_METRICS.column("measurement_date").unwrap();
        assert_eq!(coerce(date, &json!("2024-02-29")).unwrap(), json!("2024-02-29"));
        assert!(coerce(date, &json!("2023-02-29")).is_err());
        let time = IOP_EXAMS.column("time_measured").unwrap();
        assert_eq!(coerce(time, &json!("09:15")).unwrap(), json!("09:15:00"));
    }

    #[test]
    fn filters_parse_by_column_type() {
        let patient = APPOINTMENTS.column("patient_id").unwrap();
        assert_eq!(RequestValidator::filter_value(patient, "3").unwrap(), json!(3));
        assert!(RequestValidator::filter_value(patient, "x").is_err());
        let active = CLINICS.column("is_active").unwrap();
        assert_eq!(RequestValidator::filter_value(active, "false").unwrap(), json!(false));
    }
}
