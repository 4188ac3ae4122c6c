//! Path-segment index over the static entity table.

use super::entities::ALL;
use super::EntityDef;
use std::collections::HashMap;

/// All entity definitions, indexed by URL path segment, plus the database schema they live in.
#[derive(Debug)]
pub struct ClinicModel {
    schema: String,
    by_path: HashMap<&'static str, &'static EntityDef>,
}

impl ClinicModel {
    pub fn new(schema: impl Into<String>) -> Self {
        let by_path = ALL.iter().map(|e| (e.path, *e)).collect();
        ClinicModel {
            schema: schema.into(),
            by_path,
        }
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn entity_by_path(&self, path: &str) -> Option<&'static EntityDef> {
        self.by_path.get(path).copied()
    }

    /// Definitions in creation order (parents before children).
    pub fn entities(&self) -> &'static [&'static EntityDef] {
        ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Access, ColumnType, KeyDef};
    use std::collections::HashSet;

    #[test]
    fn every_path_is_unique_and_indexed() {
        let model = ClinicModel::new("public");
        assert_eq!(model.entities().len(), 47);
        let paths: HashSet<_> = model.entities().iter().map(|e| e.path).collect();
        assert_eq!(paths.len(), model.entities().len());
        for e in model.entities() {
            assert_eq!(model.entity_by_path(e.path).map(|d| d.table), Some(e.table));
        }
        assert!(model.entity_by_path("nope").is_none());
    }

    #[test]
    fn tables_are_unique() {
        let tables: HashSet<_> = ALL.iter().map(|e| e.table).collect();
        assert_eq!(tables.len(), ALL.len());
    }

    #[test]
    fn references_resolve_to_serial_tables() {
        let by_table: HashMap<_, _> = ALL.iter().map(|e| (e.table, *e)).collect();
        for e in ALL {
            for c in e.columns {
                if let Some(target) = c.references {
                    let parent = by_table
                        .get(target)
                        .unwrap_or_else(|| panic!("{}.{} references unknown {}", e.table, c.name, target));
                    assert_eq!(parent.key, KeyDef::Serial("id"), "{} is not id-keyed", target);
                    assert!(matches!(c.ty, ColumnType::Integer));
                }
            }
        }
    }

    #[test]
    fn key_columns_exist_and_are_not_null() {
        for e in ALL {
            for k in e.key.columns() {
                let col = e
                    .column(k)
                    .unwrap_or_else(|| panic!("{} lacks key column {}", e.table, k));
                assert!(!col.nullable, "{}.{} must be NOT NULL", e.table, k);
            }
            if let KeyDef::Serial(k) = e.key {
                assert_eq!(e.column(k).map(|c| c.ty), Some(ColumnType::Serial));
            }
        }
    }

    #[test]
    fn column_names_are_unique_per_entity() {
        for e in ALL {
            let names: HashSet<_> = e.columns.iter().map(|c| c.name).collect();
            assert_eq!(names.len(), e.columns.len(), "duplicate column in {}", e.table);
        }
    }

    #[test]
    fn server_columns_have_a_hook() {
        for e in ALL {
            if e.columns.iter().any(|c| c.access == Access::Server) {
                assert!(e.hook.is_some(), "{} has server columns but no hook", e.table);
            }
        }
    }

    #[test]
    fn composite_and_natural_keys() {
        let model = ClinicModel::new("public");
        let rp = model.entity_by_path("role_permissions").unwrap();
        assert_eq!(rp.key, KeyDef::Composite("role_id", "permission_id"));
        let aps = model.entity_by_path("appointmentservices").unwrap();
        assert!(aps.key.is_composite());
        let opd = model.entity_by_path("optical_prescription_details").unwrap();
        assert_eq!(opd.key, KeyDef::Natural("prescription_id"));
    }

    #[test]
    fn password_hash_is_hidden() {
        let users = ClinicModel::new("public").entity_by_path("users").unwrap();
        assert!(users.visible_columns().all(|c| c.name != "password_hash"));
        assert!(!users.column("password_hash").unwrap().is_client_writable());
    }
}
