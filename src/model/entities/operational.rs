use super::*;
use crate::model::{EntityDef, KeyDef};

pub static SERVICES: EntityDef = EntityDef {
    name: "Service",
    table: "services",
    path: "services",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("clinic_id", "clinics").required(),
        varchar("name", 150).required(),
        text("description"),
        int("duration_minutes"),
        decimal("base_price", 10, 2).required().defaults_to("0.00"),
        boolean("is_active").required().defaults_to("TRUE"),
        CREATED,
        UPDATED,
        CREATED_BY,
        UPDATED_BY,
        DELETED,
    ],
    hook: None,
};

pub static RESOURCES: EntityDef = EntityDef {
    name: "Resource",
    table: "resources",
    path: "resources",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("clinic_id", "clinics").required(),
        varchar("name", 100).required(),
        one_of("resource_type", &["Room", "Equipment"]).required(),
        varchar("location", 100),
        boolean("is_schedulable").required().defaults_to("TRUE"),
        boolean("is_active").required().defaults_to("TRUE"),
        CREATED,
        UPDATED,
        CREATED_BY,
        UPDATED_BY,
        DELETED,
    ],
    hook: None,
};

pub static EQUIPMENT: EntityDef = EntityDef {
    name: "Equipment",
    table: "equipment",
    path: "equipment",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("clinic_id", "clinics").required(),
        fk("resource_id", "resources"),
        varchar("equipment_name", 150).required(),
        varchar("serial_number", 100).unique(),
        varchar("model_number", 100),
        varchar("manufacturer", 100),
        date("purchase_date"),
        date("warranty_expiry_date"),
        varchar("location", 100),
        one_of(
            "status",
            &["Operational", "UnderMaintenance", "Decommissioned", "NeedsCalibration"],
        )
        .required()
        .defaults_to("'Operational'"),
        date("last_maintenance_date"),
        date("next_maintenance_date"),
        date("last_calibration_date"),
        date("next_calibration_date"),
        text("notes"),
        CREATED,
        UPDATED,
        CREATED_BY,
        UPDATED_BY,
        DELETED,
    ],
    hook: None,
};

pub static MAINTENANCE_LOGS: EntityDef = EntityDef {
    name: "Maintenance Log",
    table: "maintenancelogs",
    path: "maintenance_logs",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("equipment_id", "equipment").required(),
        one_of("log_type", &["Maintenance", "Calibration", "Repair"]).required(),
        date("log_date").required(),
        text("description").required(),
        fk("performed_by_user_id", "users"),
        varchar("external_technician", 150),
        decimal("cost", 10, 2),
        date("next_due_date"),
        CREATED,
    ],
    hook: None,
};

pub static INVENTORY_ITEMS: EntityDef = EntityDef {
    name: "Inventory Item",
    table: "inventoryitems",
    path: "inventory_items",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("clinic_id", "clinics").required(),
        varchar("item_name", 150).required(),
        varchar("item_code", 50).unique(),
        text("description"),
        varchar("category", 100),
        varchar("supplier", 150),
        int("quantity_on_hand").required().defaults_to("0"),
        int("reorder_level"),
        decimal("unit_cost", 10, 2),
        varchar("storage_location", 100),
        date("expiry_date"),
        timestamp("last_counted_at"),
        CREATED,
        UPDATED,
        CREATED_BY,
        UPDATED_BY,
        DELETED,
    ],
    hook: None,
};

pub static INVOICES: EntityDef = EntityDef {
    name: "Invoice",
    table: "invoices",
    path: "invoices",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("clinic_id", "clinics").required(),
        fk("patient_id", "patients").required(),
        fk("consultation_id", "consultations"),
        fk("appointment_id", "appointments"),
        varchar("invoice_number", 50).required().unique(),
        date("invoice_date").required(),
        date("due_date"),
        decimal("total_amount", 10, 2).required().defaults_to("0.00"),
        decimal("amount_paid", 10, 2).required().defaults_to("0.00"),
        one_of(
            "status",
            &["Draft", "Sent", "PartiallyPaid", "Paid", "Overdue", "Void"],
        )
        .required()
        .defaults_to("'Draft'"),
        text("notes"),
        CREATED,
        UPDATED,
        CREATED_BY,
        UPDATED_BY,
        DELETED,
    ],
    hook: None,
};

pub static INVOICE_ITEMS: EntityDef = EntityDef {
    name: "Invoice Item",
    table: "invoiceitems",
    path: "invoice_items",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("invoice_id", "invoices").required(),
        fk("service_id", "services"),
        varchar("description", 255).required(),
        decimal("quantity", 10, 2).required().defaults_to("1.00"),
        decimal("unit_price", 10, 2).required(),
        decimal("total_price", 10, 2).required(),
        CREATED,
        UPDATED,
        DELETED,
    ],
    hook: None,
};

pub static PAYMENTS: EntityDef = EntityDef {
    name: "Payment",
    table: "payments",
    path: "payments",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("invoice_id", "invoices").required(),
        fk("patient_id", "patients").required(),
        fk("clinic_id", "clinics").required(),
        date("payment_date").required(),
        decimal("amount", 10, 2).required(),
        varchar("payment_method", 50),
        varchar("transaction_reference", 100),
        text("notes"),
        CREATED,
        UPDATED,
        CREATED_BY,
        DELETED,
    ],
    hook: None,
};

pub static AUDIT_LOGS: EntityDef = EntityDef {
    name: "Audit Log",
    table: "auditlogs",
    path: "auditlogs",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        timestamp("timestamp").required().defaults_to(NOW_UTC),
        fk("user_id", "users"),
        fk("clinic_id", "clinics"),
        varchar("action_type", 50).required(),
        varchar("entity_type", 50).required(),
        varchar("entity_id", 100),
        text("details"),
        json("old_values"),
        json("new_values"),
        varchar("ip_address", 45),
        varchar("user_agent", 255),
        one_of("severity", &["Low", "Medium", "High", "Critical"]),
        json("related_records"),
        varchar("system_component", 100),
        boolean("is_reviewed").defaults_to("FALSE"),
        fk("reviewed_by_user_id", "users"),
    ],
    hook: None,
};

pub static DATA_ACCESS_LOGS: EntityDef = EntityDef {
    name: "Data Access Log",
    table: "data_access_logs",
    path: "dataaccesslogs",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("user_id", "users").required(),
        varchar("accessed_table", 100).required(),
        int("record_id").required(),
        one_of("access_type", &["View", "Create", "Update", "Delete"]).required(),
        timestamp("access_timestamp").defaults_to(NOW_UTC),
    ],
    hook: None,
};
