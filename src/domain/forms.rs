//! Form submissions persisted to the relational store.
//!
//! One [`FormKind`] per endpoint carries the table, the field lists, and the messages the
//! client sees. The typed payloads below are what the HTTP layer deserializes; a payload that
//! does not fit its struct is rejected before any handler logic runs.

use crate::storage::relational::Row;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

/// Origin tag stored with every newsletter signup.
pub const NEWSLETTER_SOURCE: &str = "website_footer";

pub const DEFAULT_INQUIRY_TYPE: &str = "general";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Newsletter,
    Contact,
    Cv,
    Consultation,
}

impl FormKind {
    pub const ALL: [FormKind; 4] = [
        FormKind::Newsletter,
        FormKind::Contact,
        FormKind::Cv,
        FormKind::Consultation,
    ];

    pub fn table(self) -> &'static str {
        match self {
            FormKind::Newsletter => "newsletter_subscriptions",
            FormKind::Contact => "contact_submissions",
            FormKind::Cv => "cv_submissions",
            FormKind::Consultation => "consultation_requests",
        }
    }

    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            FormKind::Newsletter => &["email"],
            FormKind::Contact | FormKind::Cv | FormKind::Consultation => &["full_name", "email"],
        }
    }

    pub fn optional_fields(self) -> &'static [&'static str] {
        match self {
            FormKind::Newsletter => &[],
            FormKind::Contact => &["company", "phone", "inquiry_type", "message"],
            FormKind::Cv => &[
                "phone",
                "linkedin_url",
                "job_role",
                "experience_years",
                "preferred_industry",
                "message",
            ],
            FormKind::Consultation => &[
                "company",
                "phone",
                "service_interest",
                "preferred_date",
                "message",
            ],
        }
    }

    /// Fields the store receives in addition to the submitted ones.
    pub fn injected_fields(self) -> &'static [&'static str] {
        match self {
            FormKind::Newsletter => &["source"],
            _ => &[],
        }
    }

    pub fn confirmation(self) -> &'static str {
        match self {
            FormKind::Newsletter => "Subscribed successfully",
            FormKind::Contact => "Contact form submitted successfully",
            FormKind::Cv => "CV submitted successfully",
            FormKind::Consultation => "Consultation request submitted successfully",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            FormKind::Newsletter => "Failed to subscribe. Please try again.",
            _ => "Failed to submit. Please try again.",
        }
    }

    /// Name used in log lines.
    pub fn label(self) -> &'static str {
        match self {
            FormKind::Newsletter => "newsletter",
            FormKind::Contact => "contact",
            FormKind::Cv => "cv",
            FormKind::Consultation => "consultation",
        }
    }
}

/// A validated payload that knows its kind and how to become a storage row.
pub trait FormSubmission: DeserializeOwned + Send + 'static {
    const KIND: FormKind;

    /// Required fields copied verbatim; absent optional fields are left out entirely.
    fn into_record(self) -> Row;
}

fn put(row: &mut Row, field: &str, value: String) {
    row.insert(field.to_string(), JsonValue::String(value));
}

fn put_opt(row: &mut Row, field: &str, value: Option<String>) {
    if let Some(v) = value {
        put(row, field, v);
    }
}

fn default_inquiry_type() -> Option<String> {
    Some(DEFAULT_INQUIRY_TYPE.to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewsletterSubmit {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactSubmit {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Defaults to `general` when the field is missing.
    #[serde(default = "default_inquiry_type")]
    pub inquiry_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CvSubmit {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub job_role: Option<String>,
    #[serde(default)]
    pub experience_years: Option<String>,
    #[serde(default)]
    pub preferred_industry: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConsultationSubmit {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub service_interest: Option<String>,
    #[serde(default)]
    pub preferred_date: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl FormSubmission for NewsletterSubmit {
    const KIND: FormKind = FormKind::Newsletter;

    fn into_record(self) -> Row {
        let mut row = Row::new();
        put(&mut row, "email", self.email);
        put(&mut row, "source", NEWSLETTER_SOURCE.to_string());
        row
    }
}

impl FormSubmission for ContactSubmit {
    const KIND: FormKind = FormKind::Contact;

    fn into_record(self) -> Row {
        let mut row = Row::new();
        put(&mut row, "full_name", self.full_name);
        put(&mut row, "email", self.email);
        put_opt(&mut row, "company", self.company);
        put_opt(&mut row, "phone", self.phone);
        put_opt(&mut row, "inquiry_type", self.inquiry_type);
        put_opt(&mut row, "message", self.message);
        row
    }
}

impl FormSubmission for CvSubmit {
    const KIND: FormKind = FormKind::Cv;

    fn into_record(self) -> Row {
        let mut row = Row::new();
        put(&mut row, "full_name", self.full_name);
        put(&mut row, "email", self.email);
        put_opt(&mut row, "phone", self.phone);
        put_opt(&mut row, "linkedin_url", self.linkedin_url);
        put_opt(&mut row, "job_role", self.job_role);
        put_opt(&mut row, "experience_years", self.experience_years);
        put_opt(&mut row, "preferred_industry", self.preferred_industry);
        put_opt(&mut row, "message", self.message);
        row
    }
}

impl FormSubmission for ConsultationSubmit {
    const KIND: FormKind = FormKind::Consultation;

    fn into_record(self) -> Row {
        let mut row = Row::new();
        put(&mut row, "full_name", self.full_name);
        put(&mut row, "email", self.email);
        put_opt(&mut row, "company", self.company);
        put_opt(&mut row, "phone", self.phone);
        put_opt(&mut row, "service_interest", self.service_interest);
        put_opt(&mut row, "preferred_date", self.preferred_date);
        put_opt(&mut row, "message", self.message);
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeSet;

    fn assert_fields_declared(kind: FormKind, row: &Row) {
        for key in row.keys() {
            let declared = kind.required_fields().contains(&key.as_str())
                || kind.optional_fields().contains(&key.as_str())
                || kind.injected_fields().contains(&key.as_str());
            assert!(declared, "{} writes undeclared field '{}'", kind.label(), key);
        }
        for required in kind.required_fields() {
            assert!(row.contains_key(*required), "{} lost '{}'", kind.label(), required);
        }
    }

    #[test]
    fn newsletter_injects_source() {
        let submit: NewsletterSubmit = serde_json::from_value(json!({"email": "a@b.c"})).unwrap();
        let row = submit.into_record();
        assert_eq!(row["email"], "a@b.c");
        assert_eq!(row["source"], NEWSLETTER_SOURCE);
        assert_fields_declared(FormKind::Newsletter, &row);
    }

    #[test]
    fn contact_omits_absent_fields_and_defaults_inquiry_type() {
        let submit: ContactSubmit =
            serde_json::from_value(json!({"full_name": "Ada", "email": "ada@example.com"})).unwrap();
        let row = submit.into_record();
        assert_eq!(row.len(), 3);
        assert_eq!(row["inquiry_type"], DEFAULT_INQUIRY_TYPE);
        assert!(!row.contains_key("company"));
        assert!(!row.contains_key("message"));
        assert_fields_declared(FormKind::Contact, &row);
    }

    #[test]
    fn explicit_null_is_omitted_not_stored() {
        let submit: ContactSubmit = serde_json::from_value(json!({
            "full_name": "Ada",
            "email": "ada@example.com",
            "inquiry_type": null,
            "phone": null
        }))
        .unwrap();
        let row = submit.into_record();
        assert!(!row.contains_key("inquiry_type"));
        assert!(!row.contains_key("phone"));
    }

    #[test]
    fn cv_and_consultation_keep_present_optionals() {
        let cv: CvSubmit = serde_json::from_value(json!({
            "full_name": "Grace",
            "email": "grace@example.com",
            "linkedin_url": "https://linkedin.com/in/grace",
            "experience_years": "10"
        }))
        .unwrap();
        let row = cv.into_record();
        assert_eq!(row["experience_years"], "10");
        assert!(!row.contains_key("job_role"));
        assert_fields_declared(FormKind::Cv, &row);

        let consultation: ConsultationSubmit = serde_json::from_value(json!({
            "full_name": "Linus",
            "email": "linus@example.com",
            "service_interest": "Executive search",
            "preferred_date": "2026-11-02",
            "unknown_field": "ignored"
        }))
        .unwrap();
        let row = consultation.into_record();
        assert_eq!(row["preferred_date"], "2026-11-02");
        assert!(!row.contains_key("unknown_field"));
        assert_fields_declared(FormKind::Consultation, &row);
    }

    #[test]
    fn missing_or_mistyped_required_fields_do_not_parse() {
        assert!(serde_json::from_value::<NewsletterSubmit>(json!({})).is_err());
        assert!(serde_json::from_value::<NewsletterSubmit>(json!({"email": 42})).is_err());
        assert!(serde_json::from_value::<ContactSubmit>(json!({"message": "No name or email"})).is_err());
        assert!(serde_json::from_value::<CvSubmit>(json!({"full_name": "x"})).is_err());
        assert!(serde_json::from_value::<ConsultationSubmit>(json!({"email": "x@y.z"})).is_err());
    }

    #[test]
    fn only_newsletter_tables_take_a_source() {
        for kind in FormKind::ALL {
            let injects_source = kind.injected_fields().contains(&"source");
            assert_eq!(injects_source, kind == FormKind::Newsletter);
        }
    }

    fn assert_schema_matches_struct<T: Serialize>(kind: FormKind, populated: &T) {
        let value = serde_json::to_value(populated).unwrap();
        let keys: BTreeSet<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        let declared: BTreeSet<&str> = kind
            .required_fields()
            .iter()
            .chain(kind.optional_fields())
            .copied()
            .collect();
        assert_eq!(keys, declared, "{} field lists drifted from its payload", kind.label());
    }

    #[test]
    fn field_lists_match_payload_structs() {
        let text = |s: &str| Some(s.to_string());

        assert_schema_matches_struct(
            FormKind::Newsletter,
            &NewsletterSubmit {
                email: "a@b.c".to_string(),
            },
        );
        assert_schema_matches_struct(
            FormKind::Contact,
            &ContactSubmit {
                full_name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                company: text("Analytical"),
                phone: text("+1"),
                inquiry_type: text("general"),
                message: text("hi"),
            },
        );
        assert_schema_matches_struct(
            FormKind::Cv,
            &CvSubmit {
                full_name: "Grace".to_string(),
                email: "grace@example.com".to_string(),
                phone: text("+1"),
                linkedin_url: text("https://linkedin.com/in/grace"),
                job_role: text("Admiral"),
                experience_years: text("40"),
                preferred_industry: text("Navy"),
                message: text("hi"),
            },
        );
        assert_schema_matches_struct(
            FormKind::Consultation,
            &ConsultationSubmit {
                full_name: "Linus".to_string(),
                email: "linus@example.com".to_string(),
                company: text("Kernel"),
                phone: text("+1"),
                service_interest: text("Executive search"),
                preferred_date: text("2026-11-02"),
                message: text("hi"),
            },
        );
    }
}
