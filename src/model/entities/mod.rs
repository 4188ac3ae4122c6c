//! The schema-mapping table: every record kind the backend serves.

mod clinical;
mod engagement;
mod operational;
mod organization;

use super::types::{ColumnDef, ColumnType, CREATED_AT, DELETED_AT, UPDATED_AT};

pub use clinical::*;
pub use engagement::*;
pub use operational::*;
pub use organization::*;

/// All entities, parents before children.
pub static ALL: &[&super::EntityDef] = &[
    &CLINICS,
    &ROLES,
    &PERMISSIONS,
    &ROLE_PERMISSIONS,
    &USERS,
    &SECURITY_POLICIES,
    &LICENSES_PERMITS,
    &PERFORMANCE_METRICS,
    &PATIENTS,
    &RESOURCES,
    &SERVICES,
    &APPOINTMENTS,
    &APPOINTMENT_SERVICES,
    &CONSULTATIONS,
    &DIAGNOSES,
    &PRESCRIPTIONS,
    &OPTICAL_PRESCRIPTION_DETAILS,
    &CONTACT_LENS_PRESCRIPTIONS,
    &IOP_EXAMS,
    &REFRACTION_EXAMS,
    &VISUAL_ACUITY_EXAMS,
    &OPHTHALMOLOGICAL_IMAGES,
    &SURGICAL_PROCEDURES,
    &TRIAGE_ASSESSMENTS,
    &CONSENT_FORMS,
    &CLINICAL_PROTOCOLS,
    &CLINICAL_STUDIES,
    &TELEMEDICINE_SESSIONS,
    &PATIENT_DOCUMENTS,
    &EQUIPMENT,
    &MAINTENANCE_LOGS,
    &INVENTORY_ITEMS,
    &INVOICES,
    &INVOICE_ITEMS,
    &PAYMENTS,
    &AUDIT_LOGS,
    &DATA_ACCESS_LOGS,
    &SURVEYS,
    &SURVEY_RESPONSES,
    &PATIENT_COMMUNICATIONS,
    &PATIENT_NOTIFICATIONS,
    &PATIENT_PORTAL_SESSIONS,
    &EDUCATIONAL_RESOURCES,
    &PATIENT_EDUCATION_TRACKING,
    &MARKETING_CAMPAIGNS,
    &WORKFLOW_TEMPLATES,
    &WORKFLOW_INSTANCES,
];

/// Current UTC time for plain `TIMESTAMP` columns.
const NOW_UTC: &str = "(NOW() AT TIME ZONE 'utc')";

const ID: ColumnDef = ColumnDef::new("id", ColumnType::Serial).required().generated();
const CREATED: ColumnDef = ColumnDef::new(CREATED_AT, ColumnType::TimestampTz)
    .required()
    .defaults_to("NOW()")
    .generated();
const UPDATED: ColumnDef = ColumnDef::new(UPDATED_AT, ColumnType::TimestampTz)
    .required()
    .defaults_to("NOW()")
    .generated();
const DELETED: ColumnDef = ColumnDef::new(DELETED_AT, ColumnType::TimestampTz).generated();
const CREATED_BY: ColumnDef = fk("created_by_user_id", "users");
const UPDATED_BY: ColumnDef = fk("updated_by_user_id", "users");

const fn int(name: &'static str) -> ColumnDef {
    ColumnDef::new(name, ColumnType::Integer)
}

const fn fk(name: &'static str, table: &'static str) -> ColumnDef {
    ColumnDef::new(name, ColumnType::Integer).references(table)
}

const fn varchar(name: &'static str, len: u32) -> ColumnDef {
    ColumnDef::new(name, ColumnType::Varchar(len))
}

const fn text(name: &'static str) -> ColumnDef {
    ColumnDef::new(name, ColumnType::Text)
}

const fn decimal(name: &'static str, precision: u8, scale: u8) -> ColumnDef {
    ColumnDef::new(name, ColumnType::Decimal(precision, scale))
}

const fn boolean(name: &'static str) -> ColumnDef {
    ColumnDef::new(name, ColumnType::Boolean)
}

const fn date(name: &'static str) -> ColumnDef {
    ColumnDef::new(name, ColumnType::Date)
}

const fn time(name: &'static str) -> ColumnDef {
    ColumnDef::new(name, ColumnType::Time)
}

const fn timestamp(name: &'static str) -> ColumnDef {
    ColumnDef::new(name, ColumnType::Timestamp)
}

const fn json(name: &'static str) -> ColumnDef {
    ColumnDef::new(name, ColumnType::Json)
}

const fn one_of(name: &'static str, values: &'static [&'static str]) -> ColumnDef {
    ColumnDef::new(name, ColumnType::Enum(values))
}
