// Supabase client: row inserts through the PostgREST endpoint at `/rest/v1/{table}`.

use crate::infra::config::SupabaseSettings;
use crate::storage::relational::{RelationalStore, RelationalStoreError, Row};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::Deserialize;

/// Error body PostgREST returns on a rejected request.
#[derive(Debug, Default, Deserialize)]
struct PostgrestError {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

impl PostgrestError {
    fn describe(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        for part in [&self.message, &self.details, &self.hint].into_iter().flatten() {
            if !part.is_empty() {
                parts.push(part);
            }
        }
        parts.join(" | ")
    }
}

#[derive(Clone)]
pub struct SupabaseStore {
    client: reqwest::Client,
    base_url: String,
}

impl SupabaseStore {
    pub fn new(settings: &SupabaseSettings) -> Result<Self, RelationalStoreError> {
        let mut headers = HeaderMap::new();
        // A key with characters that cannot go into a header is a deployment problem.
        let key = HeaderValue::from_str(&settings.service_key)
            .map_err(|_| RelationalStoreError::NotConfigured)?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", settings.service_key))
            .map_err(|_| RelationalStoreError::NotConfigured)?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: settings.url.trim_end_matches('/').to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }
}

/// Turns a non-success response into `RelationalStoreError::Api`, keeping the raw body
/// when it is not a PostgREST error object.
fn api_error(table: &str, status: StatusCode, body: &str) -> RelationalStoreError {
    let parsed: PostgrestError = serde_json::from_str(body).unwrap_or_default();
    let described = parsed.describe();
    let message = if described.is_empty() {
        body.to_string()
    } else {
        described
    };

    RelationalStoreError::Api {
        table: table.to_string(),
        status: status.as_u16(),
        code: parsed.code,
        message,
    }
}

#[async_trait]
impl RelationalStore for SupabaseStore {
    async fn insert(&self, table: &str, row: Row) -> Result<(), RelationalStoreError> {
        let response = self
            .client
            .post(self.table_url(table))
            .header("Prefer", "return=minimal")
            .json(&row)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(api_error(table, status, &body))
    }

    async fn ping(&self) -> Result<(), RelationalStoreError> {
        let response = self
            .client
            .get(format!("{}/rest/v1/", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(api_error("", status, &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postgrest_body_is_decoded() {
        let body = r#"{"code":"23505","details":"Key (email)=(a@b.c) already exists.","hint":null,"message":"duplicate key value violates unique constraint \"newsletter_subscriptions_email_key\""}"#;
        let err = api_error("newsletter_subscriptions", StatusCode::CONFLICT, body);
        match &err {
            RelationalStoreError::Api { status, code, message, .. } => {
                assert_eq!(*status, 409);
                assert_eq!(code.as_deref(), Some("23505"));
                assert!(message.starts_with("duplicate key value"));
                assert!(message.contains("already exists"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.is_unique_violation());
    }

    #[test]
    fn raw_body_is_kept_when_not_json() {
        let err = api_error("contact_submissions", StatusCode::BAD_GATEWAY, "upstream timeout");
        match err {
            RelationalStoreError::Api { code, message, .. } => {
                assert!(code.is_none());
                assert_eq!(message, "upstream timeout");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let store = SupabaseStore::new(&SupabaseSettings {
            url: "https://project.supabase.co/".to_string(),
            service_key: "key".to_string(),
        })
        .unwrap();
        assert_eq!(
            store.table_url("cv_submissions"),
            "https://project.supabase.co/rest/v1/cv_submissions"
        );
    }
}
