// ── Canonical company record ──
//
// The domain-side view of one scraped entity. Mirrors the wire record
// field-for-field but with a typed id and display helpers. Records are
// immutable on the client: a fetched collection is only ever replaced
// wholesale, never patched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CompanyId;

/// Placeholder shown for any absent display field.
pub const PLACEHOLDER: &str = "N/A";

/// One scraped company with contact and social metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub website_url: Option<String>,
    pub logo: Option<String>,
    pub screenshot_url: Option<String>,
    /// Page-order phone numbers; only the first is ever displayed.
    pub phone_numbers: Vec<String>,
    pub facebook_url: Option<String>,
    pub twitter_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub instagram_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Company {
    /// Company name, or the placeholder when the scraper found none.
    pub fn display_name(&self) -> &str {
        non_empty(self.name.as_deref()).unwrap_or(PLACEHOLDER)
    }

    /// The first phone number found on the page, if any.
    pub fn first_phone(&self) -> Option<&str> {
        self.phone_numbers.first().map(String::as_str)
    }

    /// Hostname component of the website URL (e.g. `acme.example`).
    pub fn website_host(&self) -> Option<String> {
        let raw = non_empty(self.website_url.as_deref())?;
        let parsed = url::Url::parse(raw).ok()?;
        parsed.host_str().map(str::to_owned)
    }

    /// Social profile URLs that are actually present, with their labels.
    /// Presence alone (non-empty) decides whether a link renders.
    pub fn social_links(&self) -> Vec<(&'static str, &str)> {
        [
            ("Facebook", self.facebook_url.as_deref()),
            ("Twitter", self.twitter_url.as_deref()),
            ("LinkedIn", self.linkedin_url.as_deref()),
            ("Instagram", self.instagram_url.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, url)| non_empty(url).map(|u| (label, u)))
        .collect()
    }

    pub fn has_social_links(&self) -> bool {
        !self.social_links().is_empty()
    }

    /// Creation date in locale-style `MM/DD/YYYY` form, or the placeholder.
    pub fn created_date(&self) -> String {
        self.created_at
            .map_or_else(|| PLACEHOLDER.to_owned(), |ts| ts.format("%m/%d/%Y").to_string())
    }
}

/// Treat empty strings the same as absent values for display purposes.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Display value for an optional field: the value, or the placeholder.
pub fn or_placeholder(value: Option<&str>) -> &str {
    non_empty(value).unwrap_or(PLACEHOLDER)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn company(name: Option<&str>, website: Option<&str>) -> Company {
        Company {
            id: CompanyId::from("c1"),
            name: name.map(str::to_owned),
            description: None,
            address: None,
            email: None,
            website_url: website.map(str::to_owned),
            logo: None,
            screenshot_url: None,
            phone_numbers: Vec::new(),
            facebook_url: None,
            twitter_url: None,
            linkedin_url: None,
            instagram_url: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn display_name_falls_back_to_placeholder() {
        assert_eq!(company(None, None).display_name(), "N/A");
        assert_eq!(company(Some(""), None).display_name(), "N/A");
        assert_eq!(company(Some("Acme"), None).display_name(), "Acme");
    }

    #[test]
    fn website_host_extracts_hostname() {
        let c = company(None, Some("https://www.acme.example/about?x=1"));
        assert_eq!(c.website_host().as_deref(), Some("www.acme.example"));
    }

    #[test]
    fn website_host_tolerates_garbage() {
        assert_eq!(company(None, Some("not a url")).website_host(), None);
        assert_eq!(company(None, None).website_host(), None);
    }

    #[test]
    fn social_links_skip_absent_and_empty() {
        let mut c = company(None, None);
        assert!(!c.has_social_links());

        c.twitter_url = Some(String::new());
        assert!(!c.has_social_links());

        c.linkedin_url = Some("https://linkedin.com/company/acme".into());
        let links = c.social_links();
        assert_eq!(links, vec![("LinkedIn", "https://linkedin.com/company/acme")]);
    }

    #[test]
    fn first_phone_takes_page_order() {
        let mut c = company(None, None);
        c.phone_numbers = vec!["+1 555 0100".into(), "+1 555 0101".into()];
        assert_eq!(c.first_phone(), Some("+1 555 0100"));
    }
}
