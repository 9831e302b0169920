// Wire-to-domain conversions. The shapes match field-for-field, so this
// is mostly a typed-id boundary; keeping it explicit means the wire
// format can drift without touching consumers.

use scrapedeck_api::CompanyRecord;

use crate::model::{Company, CompanyId};

impl From<CompanyRecord> for Company {
    fn from(rec: CompanyRecord) -> Self {
        Self {
            id: CompanyId::from(rec.id),
            name: rec.name,
            description: rec.description,
            address: rec.address,
            email: rec.email,
            website_url: rec.website_url,
            logo: rec.logo,
            screenshot_url: rec.screenshot_url,
            phone_numbers: rec.phone_numbers,
            facebook_url: rec.facebook_url,
            twitter_url: rec.twitter_url,
            linkedin_url: rec.linkedin_url,
            instagram_url: rec.instagram_url,
            created_at: rec.created_at,
            updated_at: rec.updated_at,
        }
    }
}

impl From<&Company> for CompanyRecord {
    fn from(company: &Company) -> Self {
        Self {
            id: company.id.to_string(),
            name: company.name.clone(),
            description: company.description.clone(),
            address: company.address.clone(),
            email: company.email.clone(),
            website_url: company.website_url.clone(),
            logo: company.logo.clone(),
            screenshot_url: company.screenshot_url.clone(),
            phone_numbers: company.phone_numbers.clone(),
            facebook_url: company.facebook_url.clone(),
            twitter_url: company.twitter_url.clone(),
            linkedin_url: company.linkedin_url.clone(),
            instagram_url: company.instagram_url.clone(),
            created_at: company.created_at,
            updated_at: company.updated_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_fields() {
        let rec = CompanyRecord {
            id: "c1".into(),
            name: Some("Acme".into()),
            website_url: Some("https://acme.example".into()),
            phone_numbers: vec!["+1 555 0100".into()],
            ..CompanyRecord::default()
        };

        let company = Company::from(rec);
        assert_eq!(company.id.as_str(), "c1");

        let back = CompanyRecord::from(&company);
        assert_eq!(back.id, "c1");
        assert_eq!(back.name.as_deref(), Some("Acme"));
        assert_eq!(back.phone_numbers, vec!["+1 555 0100".to_owned()]);
    }
}
