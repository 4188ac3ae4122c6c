use super::*;
use crate::model::{EntityDef, KeyDef};

pub static PATIENTS: EntityDef = EntityDef {
    name: "Patient",
    table: "patients",
    path: "patients",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("clinic_id", "clinics").required(),
        varchar("patient_identifier", 50).unique(),
        varchar("first_name", 100).required(),
        varchar("last_name", 100).required(),
        date("date_of_birth").required(),
        one_of("gender", &["Male", "Female", "Other", "PreferNotToSay"]),
        text("address"),
        varchar("phone_number", 30),
        varchar("email", 100),
        varchar("emergency_contact_name", 150),
        varchar("emergency_contact_phone", 30),
        varchar("primary_care_physician", 150),
        varchar("insurance_provider", 100),
        varchar("insurance_policy_number", 100),
        text("medical_history_summary"),
        text("allergies"),
        one_of("preferred_communication_channel", &["Email", "SMS", "Phone", "Portal"]),
        boolean("gdpr_consent").required().defaults_to("FALSE"),
        CREATED,
        UPDATED,
        CREATED_BY,
        UPDATED_BY,
        DELETED,
        fk("user_id", "users"),
    ],
    hook: None,
};

pub static APPOINTMENTS: EntityDef = EntityDef {
    name: "Appointment",
    table: "appointments",
    path: "appointments",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("clinic_id", "clinics").required(),
        fk("patient_id", "patients").required(),
        fk("primary_doctor_id", "users"),
        fk("resource_id", "resources"),
        timestamp("start_time").required(),
        timestamp("end_time").required(),
        varchar("appointment_type", 100),
        one_of(
            "status",
            &[
                "Scheduled",
                "Confirmed",
                "CheckedIn",
                "InProgress",
                "Completed",
                "Cancelled",
                "NoShow",
            ],
        )
        .required()
        .defaults_to("'Scheduled'"),
        text("reason_for_visit"),
        text("cancellation_reason"),
        timestamp("confirmation_sent_at"),
        timestamp("reminder_sent_at"),
        CREATED,
        UPDATED,
        CREATED_BY,
        UPDATED_BY,
        DELETED,
    ],
    hook: None,
};

pub static APPOINTMENT_SERVICES: EntityDef = EntityDef {
    name: "Appointment Service",
    table: "appointmentservices",
    path: "appointmentservices",
    key: KeyDef::Composite("appointment_id", "service_id"),
    columns: &[
        fk("appointment_id", "appointments").required(),
        fk("service_id", "services").required(),
    ],
    hook: None,
};

pub static CONSULTATIONS: EntityDef = EntityDef {
    name: "Consultation",
    table: "consultations",
    path: "consultations",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("appointment_id", "appointments").required().unique(),
        fk("patient_id", "patients").required(),
        fk("clinic_id", "clinics").required(),
        fk("attending_doctor_id", "users").required(),
        timestamp("consultation_start_time"),
        timestamp("consultation_end_time"),
        text("chief_complaint"),
        text("history_of_present_illness"),
        text("past_medical_history"),
        text("family_history"),
        text("social_history"),
        text("review_of_systems"),
        text("assessment_plan"),
        one_of("status", &["Open", "Signed", "Closed"])
            .required()
            .defaults_to("'Open'"),
        timestamp("signed_at"),
        CREATED,
        UPDATED,
        CREATED_BY,
        UPDATED_BY,
        DELETED,
    ],
    hook: None,
};

pub static DIAGNOSES: EntityDef = EntityDef {
    name: "Diagnosis",
    table: "diagnoses",
    path: "diagnoses",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("consultation_id", "consultations").required(),
        fk("patient_id", "patients").required(),
        varchar("icd10_code", 10),
        varchar("diagnosis_description", 255).required(),
        boolean("is_primary").required().defaults_to("FALSE"),
        date("diagnosis_date").required(),
        text("notes"),
        CREATED,
        UPDATED,
        CREATED_BY,
        UPDATED_BY,
        DELETED,
    ],
    hook: None,
};

pub static PRESCRIPTIONS: EntityDef = EntityDef {
    name: "Prescription",
    table: "prescriptions",
    path: "prescriptions",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("consultation_id", "consultations").required(),
        fk("patient_id", "patients").required(),
        one_of("prescription_type", &["Optical", "Medication", "LabOrder", "Other"]).required(),
        date("prescription_date").required(),
        text("notes"),
        one_of("status", &["Active", "Expired", "Cancelled"])
            .required()
            .defaults_to("'Active'"),
        CREATED,
        UPDATED,
        CREATED_BY,
        UPDATED_BY,
        DELETED,
    ],
    hook: None,
};

pub static OPTICAL_PRESCRIPTION_DETAILS: EntityDef = EntityDef {
    name: "Optical Prescription Detail",
    table: "opticalprescriptiondetails",
    path: "optical_prescription_details",
    key: KeyDef::Natural("prescription_id"),
    columns: &[
        fk("prescription_id", "prescriptions").required(),
        decimal("sphere_od", 4, 2),
        decimal("cylinder_od", 4, 2),
        int("axis_od"),
        decimal("add_od", 4, 2),
        varchar("prism_od", 50),
        decimal("sphere_os", 4, 2),
        decimal("cylinder_os", 4, 2),
        int("axis_os"),
        decimal("add_os", 4, 2),
        varchar("prism_os", 50),
        decimal("pd", 4, 1),
        text("lens_recommendations"),
        date("expiry_date"),
    ],
    hook: None,
};

pub static CONTACT_LENS_PRESCRIPTIONS: EntityDef = EntityDef {
    name: "Contact Lens Prescription",
    table: "contact_lens_prescriptions",
    path: "contactlensprescriptions",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("prescription_id", "prescriptions").required(),
        varchar("lens_type", 100),
        varchar("brand", 100),
        decimal("base_curve_od", 4, 2),
        decimal("base_curve_os", 4, 2),
        decimal("diameter_od", 4, 2),
        decimal("diameter_os", 4, 2),
        varchar("replacement_schedule", 50),
        varchar("wear_schedule", 100),
    ],
    hook: None,
};

pub static IOP_EXAMS: EntityDef = EntityDef {
    name: "IOP Exam",
    table: "iopexams",
    path: "iop_exams",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("consultation_id", "consultations").required(),
        timestamp("exam_date").required().defaults_to(NOW_UTC),
        varchar("method", 50),
        int("iop_od"),
        int("iop_os"),
        time("time_measured"),
        text("notes"),
        CREATED_BY,
    ],
    hook: None,
};

pub static REFRACTION_EXAMS: EntityDef = EntityDef {
    name: "Refraction Exam",
    table: "refractionexams",
    path: "refraction_exams",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("consultation_id", "consultations").required(),
        timestamp("exam_date").required().defaults_to(NOW_UTC),
        one_of("refraction_type", &["Manifest", "Cycloplegic", "Auto"]).required(),
        decimal("sphere_od", 4, 2),
        decimal("cylinder_od", 4, 2),
        int("axis_od"),
        decimal("add_od", 4, 2),
        varchar("prism_od", 50),
        decimal("sphere_os", 4, 2),
        decimal("cylinder_os", 4, 2),
        int("axis_os"),
        decimal("add_os", 4, 2),
        varchar("prism_os", 50),
        decimal("pd", 4, 1),
        text("notes"),
        CREATED_BY,
    ],
    hook: None,
};

pub static VISUAL_ACUITY_EXAMS: EntityDef = EntityDef {
    name: "Visual Acuity Exam",
    table: "visualacuityexams",
    path: "visual_acuity_exams",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("consultation_id", "consultations").required(),
        timestamp("exam_date").required().defaults_to(NOW_UTC),
        varchar("va_od_sc", 20),
        varchar("va_os_sc", 20),
        varchar("va_od_cc", 20),
        varchar("va_os_cc", 20),
        varchar("ph_od", 20),
        varchar("ph_os", 20),
        text("notes"),
        CREATED_BY,
    ],
    hook: None,
};

pub static OPHTHALMOLOGICAL_IMAGES: EntityDef = EntityDef {
    name: "Ophthalmological Image",
    table: "ophthalmological_images",
    path: "ophthalmological_images",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("consultation_id", "consultations").required(),
        fk("patient_id", "patients").required(),
        one_of(
            "image_type",
            &["Retinography", "OCT", "Angiography", "Topography", "Other"],
        ),
        varchar("image_path", 512),
        text("description"),
        timestamp("capture_date"),
        text("analysis_notes"),
        CREATED_BY,
    ],
    hook: None,
};

pub static SURGICAL_PROCEDURES: EntityDef = EntityDef {
    name: "Surgical Procedure",
    table: "surgical_procedures",
    path: "surgical_procedures",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("patient_id", "patients").required(),
        fk("surgeon_id", "users").required(),
        timestamp("procedure_date"),
        varchar("procedure_type", 100),
        one_of("eye", &["OD", "OS", "OU"]),
        text("pre_op_notes"),
        text("surgical_notes"),
        text("post_op_notes"),
        text("complications"),
        one_of("status", &["Scheduled", "Completed", "Cancelled"]),
    ],
    hook: None,
};

pub static TRIAGE_ASSESSMENTS: EntityDef = EntityDef {
    name: "Triage Assessment",
    table: "triage_assessments",
    path: "triage_assessments",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("patient_id", "patients").required(),
        fk("appointment_id", "appointments"),
        one_of("priority_level", &["Emergency", "Urgent", "Non-Urgent"]).required(),
        text("symptoms").required(),
        json("vital_signs"),
        text("assessment_notes"),
        fk("assessed_by_user_id", "users").required(),
        timestamp("assessed_at").defaults_to(NOW_UTC),
    ],
    hook: None,
};

pub static CONSENT_FORMS: EntityDef = EntityDef {
    name: "Consent Form",
    table: "consentforms",
    path: "consentforms",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("patient_id", "patients").required(),
        fk("clinic_id", "clinics").required(),
        fk("consultation_id", "consultations"),
        fk("appointment_id", "appointments"),
        int("form_template_id"),
        varchar("form_title", 255).required(),
        text("form_content_version").required(),
        one_of("status", &["Pending", "Signed", "Revoked"])
            .required()
            .defaults_to("'Pending'"),
        timestamp("signed_at"),
        text("signature_data"),
        varchar("signature_method", 50),
        CREATED,
        UPDATED,
        CREATED_BY,
        UPDATED_BY,
        DELETED,
    ],
    hook: None,
};

pub static CLINICAL_PROTOCOLS: EntityDef = EntityDef {
    name: "Clinical Protocol",
    table: "clinical_protocols",
    path: "clinicalprotocols",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        varchar("name", 200).required(),
        varchar("category", 100).required(),
        text("description"),
        json("protocol_content").required(),
        varchar("version", 20).required(),
        boolean("is_active").defaults_to("TRUE"),
        CREATED,
        UPDATED,
    ],
    hook: None,
};

pub static CLINICAL_STUDIES: EntityDef = EntityDef {
    name: "Clinical Study",
    table: "clinical_studies",
    path: "clinicalstudies",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        varchar("study_name", 255),
        date("start_date"),
        date("end_date"),
        fk("principal_investigator_id", "users"),
        varchar("protocol_number", 100),
        one_of("status", &["Active", "Completed", "Suspended"]),
    ],
    hook: None,
};

pub static TELEMEDICINE_SESSIONS: EntityDef = EntityDef {
    name: "Telemedicine Session",
    table: "telemedicine_sessions",
    path: "telemedicine_sessions",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("patient_id", "patients").required(),
        fk("doctor_id", "users").required(),
        timestamp("session_date"),
        varchar("platform_used", 100),
        text("session_notes"),
        boolean("follow_up_required"),
    ],
    hook: None,
};

pub static PATIENT_DOCUMENTS: EntityDef = EntityDef {
    name: "Patient Document",
    table: "patientdocuments",
    path: "patient_documents",
    key: KeyDef::Serial("id"),
    columns: &[
        ID,
        fk("patient_id", "patients").required(),
        fk("clinic_id", "clinics").required(),
        varchar("document_type", 100).required(),
        varchar("file_name", 255).required(),
        varchar("file_path", 512).required(),
        varchar("mime_type", 100),
        text("description"),
        timestamp("uploaded_at").required().defaults_to(NOW_UTC),
        fk("uploaded_by_user_id", "users"),
        DELETED,
    ],
    hook: None,
};
