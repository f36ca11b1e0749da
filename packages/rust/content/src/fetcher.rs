//! Document fetching.
//!
//! [`ContentClient`] pulls raw markdown over HTTP from the configured
//! content origin. [`DocSession`] serializes overlapping fetches for a
//! single view: each navigation takes a ticket, and only the result carrying
//! the newest ticket may update the view, so a slow earlier response can
//! never overwrite a faster later one.

use chrono::Utc;
use tracing::{debug, instrument, warn};
use url::Url;

use mdsite_shared::{ContentConfig, Document, MdsiteError, Result};

// ---------------------------------------------------------------------------
// ContentClient
// ---------------------------------------------------------------------------

/// HTTP client for the document origin.
#[derive(Debug, Clone)]
pub struct ContentClient {
    http: reqwest::Client,
    base_url: String,
    docs_prefix: String,
}

impl ContentClient {
    /// Build a client from content configuration. No request timeout is set:
    /// the origin is expected to be local or CDN-fronted, and a stale
    /// response is already discarded by the session ticket.
    pub fn new(config: &ContentConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            docs_prefix: config.docs_prefix.trim_matches('/').to_string(),
        }
    }

    /// Absolute URL for a physical resource name.
    pub fn resource_url(&self, resource: &str) -> Result<Url> {
        let raw = format!("{}/{}/{}", self.base_url, self.docs_prefix, resource);
        Url::parse(&raw).map_err(|e| MdsiteError::Network(format!("invalid resource URL {raw}: {e}")))
    }

    /// Fetch one document. Non-success statuses become [`MdsiteError::Http`]
    /// with the numeric code and canonical reason text.
    #[instrument(skip(self), fields(resource = %resource))]
    pub async fn fetch(&self, resource: &str) -> Result<Document> {
        let url = self.resource_url(resource)?;
        debug!(%url, "fetching document");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| MdsiteError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), resource, "document fetch failed");
            return Err(MdsiteError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| MdsiteError::Network(e.to_string()))?;

        Ok(Document {
            resource: resource.to_string(),
            text,
            fetched_at: Utc::now(),
        })
    }
}

// ---------------------------------------------------------------------------
// DocSession
// ---------------------------------------------------------------------------

/// Opaque proof of which fetch a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// What the document view currently shows.
#[derive(Debug, Default)]
pub enum DocView {
    /// A fetch is in flight and nothing has landed yet.
    #[default]
    Loading,
    /// The latest fetch succeeded.
    Ready(Document),
    /// The latest fetch failed.
    Failed(MdsiteError),
}

/// Per-view fetch sequencing.
#[derive(Debug, Default)]
pub struct DocSession {
    generation: u64,
    view: DocView,
}

impl DocSession {
    /// Start a new fetch: the view goes back to loading and a fresh ticket
    /// is issued. Any ticket issued earlier is now stale.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.view = DocView::Loading;
        Ticket(self.generation)
    }

    /// Apply a fetch result. Returns `false` (and leaves the view alone)
    /// when the ticket is stale.
    pub fn complete(&mut self, ticket: Ticket, result: Result<Document>) -> bool {
        if ticket.0 != self.generation {
            debug!(
                ticket = ticket.0,
                current = self.generation,
                "discarding stale fetch result"
            );
            return false;
        }
        self.view = match result {
            Ok(document) => DocView::Ready(document),
            Err(error) => DocView::Failed(error),
        };
        true
    }

    pub fn view(&self) -> &DocView {
        &self.view
    }
}
