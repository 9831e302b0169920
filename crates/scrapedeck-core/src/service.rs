// ── Service facade ──
//
// Orchestrates gateway calls on behalf of the front-ends: fetch, scrape,
// save, batch delete, CSV export. Holds the CompanyStore so every fetch
// goes through the generation guard. Cheaply cloneable; all methods take
// `&self` so UIs can spawn calls from background tasks.

use std::sync::Arc;

use bytes::Bytes;
use scrapedeck_api::{ApiClient, CompanyRecord};
use tracing::{debug, info};
use url::Url;

use crate::error::CoreError;
use crate::model::Company;
use crate::store::{CompanyStore, Snapshot};

/// Default file name for a CSV export.
pub const CSV_FILE_NAME: &str = "companies.csv";

/// Entry point for consumers: the gateway plus the reactive store.
#[derive(Clone)]
pub struct ScrapeService {
    inner: Arc<ServiceInner>,
}

struct ServiceInner {
    api: ApiClient,
    store: CompanyStore,
}

impl ScrapeService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            inner: Arc::new(ServiceInner {
                api,
                store: CompanyStore::new(),
            }),
        }
    }

    /// Build a service against `base_url` with the given request timeout.
    pub fn connect(base_url: Url, timeout: std::time::Duration) -> Result<Self, CoreError> {
        let api = ApiClient::new(base_url, timeout)?;
        Ok(Self::new(api))
    }

    /// The reactive company store backing the list views.
    pub fn store(&self) -> &CompanyStore {
        &self.inner.store
    }

    /// The configured service base URL.
    pub fn base_url(&self) -> &Url {
        self.inner.api.base_url()
    }

    // ── Collection ───────────────────────────────────────────────────

    /// Fetch the full collection and apply it through the generation guard.
    ///
    /// Returns the fresh snapshot. When a newer fetch has already landed,
    /// the response is discarded and the store's current snapshot is
    /// returned instead. On failure the store keeps its previous value --
    /// stale-but-present beats an empty flash.
    pub async fn refresh(&self) -> Result<Snapshot, CoreError> {
        let generation = self.inner.store.begin_fetch();
        let records = self.inner.api.list_companies().await?;

        let companies: Vec<Arc<Company>> = records
            .into_iter()
            .map(|rec| Arc::new(Company::from(rec)))
            .collect();
        debug!(count = companies.len(), generation, "fetched collection");

        self.inner.store.apply(generation, companies);
        Ok(self.inner.store.snapshot())
    }

    /// Fetch a single record by id.
    pub async fn company(&self, id: &str) -> Result<Company, CoreError> {
        let record = self.inner.api.get_company(id).await?;
        Ok(Company::from(record))
    }

    // ── Scrape / save ────────────────────────────────────────────────

    /// Submit a URL for scraping. The target is validated client-side
    /// first so an obviously malformed URL never leaves the process.
    pub async fn scrape(&self, target: &str) -> Result<Company, CoreError> {
        let parsed = Url::parse(target).map_err(|e| CoreError::ValidationFailed {
            message: format!("invalid URL '{target}': {e}"),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CoreError::ValidationFailed {
                message: format!("unsupported URL scheme '{}'", parsed.scheme()),
            });
        }

        info!(%target, "submitting scrape");
        let record = self.inner.api.scrape(target).await?;
        Ok(Company::from(record))
    }

    /// Persist a scraped record.
    pub async fn save(&self, company: &Company) -> Result<(), CoreError> {
        let record = CompanyRecord::from(company);
        self.inner.api.save(&record).await?;
        info!(id = %company.id, "saved company");
        Ok(())
    }

    // ── Delete / export ──────────────────────────────────────────────

    /// Batch-delete records, then re-fetch the collection.
    ///
    /// Deliberately pessimistic: rows are never removed locally -- the
    /// server is the source of truth and the follow-up fetch reflects it.
    /// On failure nothing changes client-side.
    pub async fn delete_many(&self, ids: &[String]) -> Result<Snapshot, CoreError> {
        self.inner.api.delete(ids).await?;
        info!(count = ids.len(), "deleted companies");
        self.refresh().await
    }

    /// Download the collection as CSV bytes. The caller decides where the
    /// bytes land (conventionally [`CSV_FILE_NAME`]).
    pub async fn export_csv(&self) -> Result<Bytes, CoreError> {
        Ok(self.inner.api.download_csv().await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::engine::ListEngine;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup() -> (MockServer, ScrapeService) {
        let server = MockServer::start().await;
        let base = Url::parse(&server.uri()).unwrap();
        let api = ApiClient::with_client(reqwest::Client::new(), base);
        (server, ScrapeService::new(api))
    }

    fn record(id: &str, name: &str) -> serde_json::Value {
        json!({ "id": id, "name": name })
    }

    async fn mount_list(server: &MockServer, data: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/api/data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": data })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn refresh_replaces_store_snapshot() {
        let (server, service) = setup().await;
        mount_list(&server, json!([record("a", "Acme"), record("b", "Beta")])).await;

        let snap = service.refresh().await.unwrap();
        assert_eq!(snap.len(), 2);
        assert_eq!(service.store().len(), 2);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_snapshot() {
        let (server, service) = setup().await;
        mount_list(&server, json!([record("a", "Acme")])).await;
        service.refresh().await.unwrap();

        server.reset().await;
        Mock::given(method("GET"))
            .and(path("/api/data"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert!(service.refresh().await.is_err());
        assert_eq!(service.store().len(), 1);
    }

    #[tokio::test]
    async fn scrape_rejects_malformed_url_before_any_request() {
        let (_server, service) = setup().await;

        let result = service.scrape("not a url").await;
        assert!(matches!(result, Err(CoreError::ValidationFailed { .. })));

        let result = service.scrape("ftp://acme.example").await;
        assert!(matches!(result, Err(CoreError::ValidationFailed { .. })));
    }

    #[tokio::test]
    async fn scrape_maps_upstream_failure() {
        let (server, service) = setup().await;
        Mock::given(method("POST"))
            .and(path("/api/scrape"))
            .respond_with(ResponseTemplate::new(422).set_body_string("target unreachable"))
            .mount(&server)
            .await;

        let result = service.scrape("https://down.example").await;
        assert!(matches!(result, Err(CoreError::ScrapeFailed { .. })));
    }

    #[tokio::test]
    async fn missing_company_maps_to_not_found() {
        let (server, service) = setup().await;
        Mock::given(method("GET"))
            .and(path("/api/data/nope"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = service.company("nope").await;
        match result {
            Err(CoreError::NotFound { ref id }) => assert_eq!(id, "nope"),
            other => panic!("expected NotFound, got: {other:?}"),
        }
    }

    // Deleting a non-empty selection clears it, and the next fetched
    // collection no longer contains the ids (given a cooperating stub).
    #[tokio::test]
    async fn delete_selected_flow() {
        let (server, service) = setup().await;
        mount_list(
            &server,
            json!([record("a", "Acme"), record("b", "Beta"), record("c", "Coral")]),
        )
        .await;

        let mut engine = ListEngine::new();
        engine.set_collection(service.refresh().await.unwrap().to_vec());
        engine.toggle(&"a".into());
        engine.toggle(&"c".into());

        // The stub deletes a+c: subsequent list calls return only b.
        server.reset().await;
        Mock::given(method("POST"))
            .and(path("/api/delete"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;
        mount_list(&server, json!([record("b", "Beta")])).await;

        let mut ids = engine.selection_ids();
        ids.sort();
        assert_eq!(ids, vec!["a".to_owned(), "c".to_owned()]);

        let snap = service.delete_many(&ids).await.unwrap();
        engine.clear_selection();
        engine.set_collection(snap.to_vec());

        assert_eq!(engine.selected_count(), 0);
        assert_eq!(engine.collection().len(), 1);
        assert_eq!(engine.collection()[0].id.as_str(), "b");
    }

    #[tokio::test]
    async fn failed_delete_leaves_selection_alone() {
        let (server, service) = setup().await;
        mount_list(&server, json!([record("a", "Acme")])).await;

        let mut engine = ListEngine::new();
        engine.set_collection(service.refresh().await.unwrap().to_vec());
        engine.toggle(&"a".into());

        server.reset().await;
        Mock::given(method("POST"))
            .and(path("/api/delete"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert!(service.delete_many(&engine.selection_ids()).await.is_err());
        // Caller only clears on success, so the selection is intact.
        assert_eq!(engine.selected_count(), 1);
    }

    #[tokio::test]
    async fn save_round_trips_the_wire_record() {
        let (server, service) = setup().await;
        Mock::given(method("POST"))
            .and(path("/api/save"))
            .and(body_json(json!({ "id": "a", "name": "Acme" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let company = Company::from(scrapedeck_api::CompanyRecord {
            id: "a".into(),
            name: Some("Acme".into()),
            ..scrapedeck_api::CompanyRecord::default()
        });
        service.save(&company).await.unwrap();
    }
}
