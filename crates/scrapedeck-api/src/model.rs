// Wire types for the scraping service API.
//
// Field names follow the service's camelCase JSON. Every display field is
// optional -- the scraper fills in what it could extract and omits the
// rest. `id` also accepts the backend's `_id` spelling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The `{ "data": ... }` envelope every JSON endpoint responds with.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

/// One scraped company record as the service serializes it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    /// Server-assigned identifier. Never mutated by the client.
    #[serde(alias = "_id")]
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,

    /// Logo image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,

    /// Full-page screenshot URL captured at scrape time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot_url: Option<String>,

    /// All phone numbers found on the page, in page order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phone_numbers: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for `POST /api/scrape`.
#[derive(Debug, Serialize)]
pub(crate) struct ScrapeRequest<'a> {
    pub url: &'a str,
}

/// Request body for `POST /api/delete`.
#[derive(Debug, Serialize)]
pub(crate) struct DeleteRequest<'a> {
    pub ids: &'a [String],
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn record_accepts_mongo_style_id() {
        let json = r#"{"_id":"507f1f77bcf86cd799439011","name":"Acme"}"#;
        let rec: CompanyRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.id, "507f1f77bcf86cd799439011");
        assert_eq!(rec.name.as_deref(), Some("Acme"));
    }

    #[test]
    fn record_tolerates_missing_fields() {
        let rec: CompanyRecord = serde_json::from_str(r#"{"id":"a1"}"#).unwrap();
        assert!(rec.phone_numbers.is_empty());
        assert!(rec.website_url.is_none());
        assert!(rec.created_at.is_none());
    }

    #[test]
    fn record_serializes_camel_case() {
        let rec = CompanyRecord {
            id: "a1".into(),
            website_url: Some("https://example.com".into()),
            ..CompanyRecord::default()
        };
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains("\"websiteUrl\""));
        assert!(!json.contains("phone_numbers"));
    }
}
