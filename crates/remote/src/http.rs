//! HTTP retrieval of remote taxonomy snapshots

use crate::parse::parse_tree;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, info};
use tx_core::{FetchError, RemoteTree, TaxonomyKind, TreeProvider};

/// Default taxonomy service
pub const DEFAULT_BASE_URL: &str = "http://api.wpdev.cahnrs.wsu.edu/";

/// Default transport timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches `GET {base_url}?service={units|topics}`, one attempt per call
pub struct HttpProvider {
    base_url: String,
    client: Client,
}

impl HttpProvider {
    /// Build a provider with the given base URL and transport timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("taxsync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL for `kind`
    pub fn url_for(&self, kind: TaxonomyKind) -> String {
        let sep = if self.base_url.contains('?') { '&' } else { '?' };
        format!("{}{}service={}", self.base_url, sep, kind.service())
    }
}

impl TreeProvider for HttpProvider {
    fn fetch(&self, kind: TaxonomyKind) -> Result<RemoteTree, FetchError> {
        let url = self.url_for(kind);
        debug!("Fetching {} from {}", kind, url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| FetchError::Transport(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transport(format!("GET {} returned {}", url, status)));
        }

        let body = response
            .bytes()
            .map_err(|e| FetchError::Transport(format!("reading body of {} failed: {}", url, e)))?;

        let tree = parse_tree(kind, &body)?;
        info!("Fetched {} remote {} names", tree.node_count(), kind);
        Ok(tree)
    }
}
