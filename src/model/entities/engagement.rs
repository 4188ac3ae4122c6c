use super::*;
use crate::model::{EntityDef, KeyDef};

pub static SURVEYS: EntityDef = EntityDef {
    name: "Survey",
    table: "surveys",
    path: "surveys",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("clinic_id", "clinics").required(),
        varchar("title", 255).required(),
        text("description"),
        one_of(
            "survey_type",
            &["PatientSatisfaction", "EmployeeFeedback", "PostConsultation"],
        )
        .required(),
        boolean("is_active").required().defaults_to("TRUE"),
        CREATED,
        UPDATED,
        CREATED_BY,
        DELETED,
    ],
    hook: None,
};

pub static SURVEY_RESPONSES: EntityDef = EntityDef {
    name: "Survey Response",
    table: "surveyresponses",
    path: "survey_responses",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("survey_id", "surveys").required(),
        fk("patient_id", "patients"),
        fk("user_id", "users"),
        fk("appointment_id", "appointments"),
        timestamp("response_date").required().defaults_to(NOW_UTC),
        json("response_data").required(),
        int("overall_rating"),
        text("comments"),
        boolean("is_anonymous").required().defaults_to("FALSE"),
        int("satisfaction_score"),
        int("nps_score"),
        one_of("feedback_category", &["Service", "Staff", "Facilities", "Treatment"]),
        text("action_taken"),
        date("follow_up_date"),
    ],
    hook: None,
};

pub static PATIENT_COMMUNICATIONS: EntityDef = EntityDef {
    name: "Patient Communication",
    table: "patientcommunications",
    path: "patient_communications",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("patient_id", "patients").required(),
        fk("clinic_id", "clinics").required(),
        one_of(
            "communication_type",
            &["Email", "SMS", "PhoneCall", "PortalMessage", "Chatbot"],
        )
        .required(),
        one_of("direction", &["Outgoing", "Incoming"]).required(),
        varchar("subject", 255),
        text("content").required(),
        one_of("status", &["Sent", "Delivered", "Failed", "Read", "Received"]).required(),
        timestamp("sent_received_at").required().defaults_to(NOW_UTC),
        fk("related_appointment_id", "appointments"),
        fk("related_invoice_id", "invoices"),
        CREATED_BY,
    ],
    hook: None,
};

pub static PATIENT_NOTIFICATIONS: EntityDef = EntityDef {
    name: "Patient Notification",
    table: "patient_notifications",
    path: "patient_notifications",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("patient_id", "patients").required(),
        one_of(
            "notification_type",
            &["Appointment", "Results", "Payment", "Message"],
        )
        .required(),
        text("content").required(),
        boolean("is_read").defaults_to("FALSE"),
        CREATED,
    ],
    hook: None,
};

pub static PATIENT_PORTAL_SESSIONS: EntityDef = EntityDef {
    name: "Patient Portal Session",
    table: "patient_portal_sessions",
    path: "patient_portal_sessions",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("patient_id", "patients").required(),
        timestamp("login_time").defaults_to(NOW_UTC),
        timestamp("logout_time"),
        varchar("ip_address", 45),
        varchar("device_info", 255),
    ],
    hook: None,
};

pub static EDUCATIONAL_RESOURCES: EntityDef = EntityDef {
    name: "Educational Resource",
    table: "educational_resources",
    path: "educational_resources",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        varchar("title", 255).required(),
        one_of("content_type", &["Article", "Video", "PDF", "Interactive"]).required(),
        varchar("content_url", 512),
        text("description"),
        varchar("category", 100),
        json("tags"),
        varchar("language", 50),
        CREATED,
        UPDATED,
    ],
    hook: None,
};

pub static PATIENT_EDUCATION_TRACKING: EntityDef = EntityDef {
    name: "Patient Education Tracking",
    table: "patient_education_tracking",
    path: "patient_education_tracking",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("patient_id", "patients").required(),
        fk("resource_id", "educational_resources").required(),
        timestamp("viewed_at").defaults_to(NOW_UTC),
        one_of("completion_status", &["Started", "Completed", "In Progress"]).required(),
    ],
    hook: None,
};

pub static MARKETING_CAMPAIGNS: EntityDef = EntityDef {
    name: "Marketing Campaign",
    table: "marketingcampaigns",
    path: "marketing_campaigns",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("clinic_id", "clinics").required(),
        varchar("name", 150).required(),
        date("start_date"),
        date("end_date"),
        varchar("channel", 50),
        text("target_audience"),
        decimal("budget", 10, 2),
        one_of("status", &["Planned", "Active", "Completed", "Cancelled"])
            .required()
            .defaults_to("'Planned'"),
        text("goal"),
        text("results_summary"),
        CREATED,
        UPDATED,
        CREATED_BY,
        UPDATED_BY,
        DELETED,
    ],
    hook: None,
};

pub static WORKFLOW_TEMPLATES: EntityDef = EntityDef {
    name: "Workflow Template",
    table: "workflow_templates",
    path: "workflow_templates",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        varchar("name", 100).required(),
        text("description"),
        one_of("workflow_type", &["Clinical", "Administrative", "Emergency"]).required(),
        json("steps").required(),
        boolean("is_active").defaults_to("TRUE"),
        CREATED,
        UPDATED,
    ],
    hook: None,
};

pub static WORKFLOW_INSTANCES: EntityDef = EntityDef {
    name: "Workflow Instance",
    table: "workflow_instances",
    path: "workflow_instances",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("template_id", "workflow_templates"),
        fk("patient_id", "patients"),
        int("current_step"),
        one_of("status", &["InProgress", "Completed", "Cancelled"]).required(),
        timestamp("started_at").defaults_to(NOW_UTC),
        timestamp("completed_at"),
    ],
    hook: None,
};
