//! Apply the entity model to the database: schema, enum types, tables, and foreign keys.
//! Every statement is idempotent so startup can run it against an existing database.

use crate::error::AppError;
use crate::model::{ClinicModel, ColumnDef, ColumnType, EntityDef, DELETED_AT};
use crate::sql::{qualified, quoted};
use sqlx::PgPool;

/// Run every DDL statement for `model`, in dependency order.
pub async fn apply_migrations(pool: &PgPool, model: &ClinicModel) -> Result<(), AppError> {
    let statements = schema_statements(model);
    tracing::info!(schema = model.schema(), statements = statements.len(), "applying schema");
    for sql in &statements {
        tracing::debug!(sql = %sql, "ddl");
        sqlx::query(sql).execute(pool).await?;
    }
    Ok(())
}

/// DDL for the whole model: schema, then enum types, then tables and their unique
/// indexes, then foreign keys. Foreign keys come last so table order never matters.
pub fn schema_statements(model: &ClinicModel) -> Vec<String> {
    let schema = model.schema();
    let mut out = vec![format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema))];
    for e in model.entities() {
        for c in e.columns {
            if let ColumnType::Enum(values) = c.ty {
                out.push(create_enum(schema, e, c, values));
            }
        }
    }
    for e in model.entities() {
        out.push(create_table(schema, e));
        if e.soft_deletes() {
            for c in e.columns.iter().filter(|c| c.unique) {
                out.push(create_live_unique_index(schema, e, c));
            }
        }
    }
    for e in model.entities() {
        for c in e.columns {
            if let Some(target) = c.references {
                out.push(add_foreign_key(schema, e, c, target));
            }
        }
    }
    out
}

fn literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Run `stmt` unless the object already exists.
fn ignore_duplicate(stmt: &str) -> String {
    format!(
        "DO $$ BEGIN {}; EXCEPTION WHEN duplicate_object THEN NULL; END $$",
        stmt
    )
}

fn create_enum(schema: &str, e: &EntityDef, c: &ColumnDef, values: &[&str]) -> String {
    let values: Vec<String> = values.iter().map(|v| literal(v)).collect();
    ignore_duplicate(&format!(
        "CREATE TYPE {} AS ENUM ({})",
        qualified(schema, &e.enum_type_name(c.name)),
        values.join(", ")
    ))
}

fn column_def(schema: &str, e: &EntityDef, c: &ColumnDef) -> String {
    let enum_type = qualified(schema, &e.enum_type_name(c.name));
    let mut def = format!("{} {}", quoted(c.name), c.ty.ddl(&enum_type));
    if !c.nullable {
        def.push_str(" NOT NULL");
    }
    if let Some(d) = c.default {
        def.push_str(" DEFAULT ");
        if let ColumnType::Enum(_) = c.ty {
            def.push_str(&format!("{}::{}", d, enum_type));
        } else {
            def.push_str(d);
        }
    }
    if c.unique && !e.soft_deletes() {
        def.push_str(" UNIQUE");
    }
    def
}

fn create_table(schema: &str, e: &EntityDef) -> String {
    let mut parts: Vec<String> = e.columns.iter().map(|c| column_def(schema, e, c)).collect();
    let pk: Vec<String> = e.key.columns().iter().map(|c| quoted(c)).collect();
    parts.push(format!("PRIMARY KEY ({})", pk.join(", ")));
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
        qualified(schema, e.table),
        parts.join(",\n  ")
    )
}

/// Uniqueness among live rows only, so a soft-deleted row frees its value.
fn create_live_unique_index(schema: &str, e: &EntityDef, c: &ColumnDef) -> String {
    format!(
        "CREATE UNIQUE INDEX IF NOT EXISTS {} ON {} ({}) WHERE {} IS NULL",
        quoted(&format!("{}_{}_key", e.table, c.name)),
        qualified(schema, e.table),
        quoted(c.name),
        quoted(DELETED_AT)
    )
}

fn add_foreign_key(schema: &str, e: &EntityDef, c: &ColumnDef, target: &str) -> String {
    ignore_duplicate(&format!(
        "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
        qualified(schema, e.table),
        quoted(&format!("{}_{}_fkey", e.table, c.name)),
        quoted(c.name),
        qualified(schema, target),
        quoted("id")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statements() -> Vec<String> {
        schema_statements(&ClinicModel::new("clinic"))
    }

    #[test]
    fn starts_with_schema_and_orders_types_tables_keys() {
        let s = statements();
        assert_eq!(s[0], "CREATE SCHEMA IF NOT EXISTS \"clinic\"");
        let first_table = s.iter().position(|x| x.starts_with("CREATE TABLE")).unwrap();
        let last_enum = s.iter().rposition(|x| x.contains("AS ENUM")).unwrap();
        let first_fk = s.iter().position(|x| x.contains("FOREIGN KEY")).unwrap();
        assert!(last_enum < first_table);
        assert!(first_table < first_fk);
        assert_eq!(s.iter().filter(|x| x.starts_with("CREATE TABLE")).count(), 47);
    }

    #[test]
    fn enum_types_are_per_column_and_idempotent() {
        let s = statements();
        let ddl = s
            .iter()
            .find(|x| x.contains("\"clinic\".\"appointments_status\" AS ENUM"))
            .unwrap();
        assert!(ddl.starts_with("DO $$ BEGIN CREATE TYPE"));
        assert!(ddl.contains("'Scheduled', 'Confirmed', 'CheckedIn'"));
        assert!(ddl.ends_with("EXCEPTION WHEN duplicate_object THEN NULL; END $$"));
    }

    #[test]
    fn table_ddl_carries_keys_defaults_and_uniques() {
        let s = statements();
        let appts = s
            .iter()
            .find(|x| x.starts_with("CREATE TABLE IF NOT EXISTS \"clinic\".\"appointments\""))
            .unwrap();
        assert!(appts.contains("\"id\" SERIAL NOT NULL"));
        assert!(appts.contains(
            "\"status\" \"clinic\".\"appointments_status\" NOT NULL DEFAULT 'Scheduled'::\"clinic\".\"appointments_status\""
        ));
        assert!(appts.contains("\"created_at\" TIMESTAMPTZ NOT NULL DEFAULT NOW()"));
        assert!(appts.contains("PRIMARY KEY (\"id\")"));

        let rp = s
            .iter()
            .find(|x| x.starts_with("CREATE TABLE IF NOT EXISTS \"clinic\".\"rolepermissions\""))
            .unwrap();
        assert!(rp.contains("PRIMARY KEY (\"role_id\", \"permission_id\")"));

        let invoices = s.iter().find(|x| x.contains("\"clinic\".\"invoices\" (")).unwrap();
        assert!(invoices.contains("\"invoice_number\" VARCHAR(50) NOT NULL,"));
        assert!(invoices.contains("\"total_amount\" NUMERIC(10, 2) NOT NULL DEFAULT 0.00"));
    }

    #[test]
    fn uniques_on_soft_deleting_tables_cover_live_rows_only() {
        let s = statements();
        let roles = s
            .iter()
            .find(|x| x.starts_with("CREATE TABLE IF NOT EXISTS \"clinic\".\"roles\""))
            .unwrap();
        assert!(roles.contains("\"name\" VARCHAR(50) NOT NULL UNIQUE"));

        let users = s
            .iter()
            .find(|x| x.starts_with("CREATE TABLE IF NOT EXISTS \"clinic\".\"users\""))
            .unwrap();
        assert!(!users.contains("UNIQUE"));
        assert!(s.contains(
            &"CREATE UNIQUE INDEX IF NOT EXISTS \"users_username_key\" ON \"clinic\".\"users\" (\"username\") \
              WHERE \"deleted_at\" IS NULL"
                .to_string()
        ));
        let users_table = s.iter().position(|x| x.contains("\"clinic\".\"users\" (")).unwrap();
        let users_index = s.iter().position(|x| x.contains("\"users_email_key\"")).unwrap();
        assert!(users_table < users_index);
    }

    #[test]
    fn foreign_keys_reference_parent_ids() {
        let s = statements();
        assert!(s.iter().any(|x| x.contains(
            "ALTER TABLE \"clinic\".\"consultations\" ADD CONSTRAINT \"consultations_appointment_id_fkey\" \
             FOREIGN KEY (\"appointment_id\") REFERENCES \"clinic\".\"appointments\" (\"id\")"
        )));
    }
}
