use super::*;
use crate::model::{EntityDef, KeyDef};
use crate::service::CredentialHook;

pub static CLINICS: EntityDef = EntityDef {
    name: "Clinic",
    table: "clinics",
    path: "clinics",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        varchar("name", 150).required(),
        text("address"),
        varchar("phone_number", 30),
        varchar("email", 100),
        varchar("website", 255),
        varchar("timezone", 50).required().defaults_to("'UTC'"),
        boolean("is_active").required().defaults_to("TRUE"),
        CREATED,
        UPDATED,
        DELETED,
    ],
    hook: None,
};

pub static ROLES: EntityDef = EntityDef {
    name: "Role",
    table: "roles",
    path: "roles",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        varchar("name", 50).required().unique(),
        text("description"),
        CREATED,
        UPDATED,
    ],
    hook: None,
};

pub static PERMISSIONS: EntityDef = EntityDef {
    name: "Permission",
    table: "permissions",
    path: "permissions",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        varchar("name", 100).required().unique(),
        text("description"),
        CREATED,
        UPDATED,
    ],
    hook: None,
};

pub static ROLE_PERMISSIONS: EntityDef = EntityDef {
    name: "Role Permission",
    table: "rolepermissions",
    path: "role_permissions",
    key: KeyDef::Composite("role_id", "permission_id"),
    columns: &[
        fk("role_id", "roles").required(),
        fk("permission_id", "permissions").required(),
    ],
    hook: None,
};

pub static USERS: EntityDef = EntityDef {
    name: "User",
    table: "users",
    path: "users",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        varchar("username", 50).required().unique(),
        varchar("password_hash", 255).required().server().sensitive(),
        varchar("email", 100).required().unique(),
        varchar("first_name", 100).required(),
        varchar("last_name", 100).required(),
        varchar("phone_number", 30),
        fk("role_id", "roles").required(),
        fk("associated_clinic_id", "clinics"),
        boolean("is_active").required().defaults_to("TRUE"),
        timestamp("last_login_at"),
        CREATED,
        UPDATED,
        DELETED,
    ],
    hook: Some(&CredentialHook),
};

pub static SECURITY_POLICIES: EntityDef = EntityDef {
    name: "Security Policy",
    table: "security_policies",
    path: "security_policies",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        varchar("policy_name", 100).required(),
        text("description"),
        text("requirements"),
        date("last_review_date"),
        date("next_review_date"),
        one_of("status", &["Active", "Under Review", "Archived"]).required(),
        CREATED,
        UPDATED,
    ],
    hook: None,
};

pub static LICENSES_PERMITS: EntityDef = EntityDef {
    name: "License Permit",
    table: "licensespermits",
    path: "licenses_permits",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("clinic_id", "clinics").required(),
        varchar("name", 255).required(),
        varchar("authority", 150),
        varchar("license_number", 100),
        date("issue_date"),
        date("expiry_date").required(),
        one_of("status", &["Active", "Expired", "PendingRenewal"])
            .required()
            .defaults_to("'Active'"),
        varchar("document_path", 512),
        CREATED,
        UPDATED,
        CREATED_BY,
        UPDATED_BY,
        DELETED,
    ],
    hook: None,
};

pub static PERFORMANCE_METRICS: EntityDef = EntityDef {
    name: "Performance Metric",
    table: "performance_metrics",
    path: "performance_metrics",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("clinic_id", "clinics").required(),
        varchar("metric_name", 100).required(),
        decimal("metric_value", 10, 2).required(),
        decimal("metric_target", 10, 2),
        date("measurement_date").required(),
        one_of(
            "metric_category",
            &["Clinical", "Financial", "Operational", "Patient Satisfaction"],
        )
        .required(),
    ],
    hook: None,
};
