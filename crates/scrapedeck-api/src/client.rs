// Scraping-service HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, `{ "data": ... }`
// envelope unwrapping, and status-to-error mapping. All methods return
// unwrapped payloads -- the envelope is stripped before the caller sees it.

use std::time::Duration;

use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::model::{CompanyRecord, DeleteRequest, Envelope, ScrapeRequest};

/// How much of an error body to keep in diagnostics.
const BODY_PREVIEW_LEN: usize = 200;

/// HTTP client for the scraping service.
///
/// The base URL is the service root (e.g. `https://scraper.example.com`);
/// endpoint paths are appended under `/api/`.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client with the given request timeout.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    /// Create a client from a pre-built `reqwest::Client`.
    ///
    /// Use this in tests or when the caller manages its own client setup.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The service base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a full URL for an API path: `{base}/api/{path}`
    fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/api/{path}"))?)
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Fetch all stored company records: `GET /api/data`.
    pub async fn list_companies(&self) -> Result<Vec<CompanyRecord>, Error> {
        self.get_json(self.api_url("data")?).await
    }

    /// Fetch a single record by id: `GET /api/data/{id}`.
    ///
    /// A 404 maps to [`Error::NotFound`] so callers can distinguish a
    /// missing record from a transport failure.
    pub async fn get_company(&self, id: &str) -> Result<CompanyRecord, Error> {
        let url = self.api_url(&format!("data/{id}"))?;
        debug!("GET {url}");
        let resp = self.http.get(url).send().await?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound { id: id.to_owned() });
        }
        parse_envelope(resp).await
    }

    /// Submit a URL for scraping: `POST /api/scrape`.
    ///
    /// The service fetches the page, extracts metadata, captures a
    /// screenshot, and returns the (unsaved) record. Client errors from
    /// this endpoint mean the scrape itself failed and map to
    /// [`Error::Upstream`].
    pub async fn scrape(&self, target: &str) -> Result<CompanyRecord, Error> {
        let url = self.api_url("scrape")?;
        debug!("POST {url} target={target}");
        let resp = self
            .http
            .post(url)
            .json(&ScrapeRequest { url: target })
            .send()
            .await?;

        if resp.status().is_client_error() {
            let message = body_preview(resp).await;
            return Err(Error::Upstream { message });
        }
        parse_envelope(resp).await
    }

    /// Persist a scraped record: `POST /api/save`.
    pub async fn save(&self, record: &CompanyRecord) -> Result<(), Error> {
        self.post_unit(self.api_url("save")?, record).await
    }

    /// Delete records in a single batch: `POST /api/delete`.
    pub async fn delete(&self, ids: &[String]) -> Result<(), Error> {
        self.post_unit(self.api_url("delete")?, &DeleteRequest { ids })
            .await
    }

    /// Download the full collection as CSV bytes: `GET /api/download-csv`.
    pub async fn download_csv(&self) -> Result<Bytes, Error> {
        let url = self.api_url("download-csv")?;
        debug!("GET {url}");
        let resp = self.http.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = body_preview(resp).await;
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp.bytes().await?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and unwrap the `{ data }` envelope.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");
        let resp = self.http.get(url).send().await?;
        parse_envelope(resp).await
    }

    /// Send a POST with a JSON body, expecting an empty-object response.
    async fn post_unit(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<(), Error> {
        debug!("POST {url}");
        let resp = self.http.post(url).json(body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = body_preview(resp).await;
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}

/// Parse the `{ "data": ... }` envelope, returning the payload on success
/// or a typed error for non-2xx responses.
async fn parse_envelope<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();

    if !status.is_success() {
        let message = body_preview(resp).await;
        return Err(Error::Api {
            status: status.as_u16(),
            message,
        });
    }

    let body = resp.text().await?;
    let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
        let preview = body.get(..body.len().min(BODY_PREVIEW_LEN)).unwrap_or(&body);
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.clone(),
        }
    })?;
    Ok(envelope.data)
}

/// Read up to [`BODY_PREVIEW_LEN`] bytes of a response body for diagnostics.
async fn body_preview(resp: reqwest::Response) -> String {
    let body = resp.text().await.unwrap_or_default();
    body.get(..body.len().min(BODY_PREVIEW_LEN))
        .unwrap_or(&body)
        .to_owned()
}
