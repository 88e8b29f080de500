#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/shares/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! SEC EDGAR client for shares-outstanding disclosures.
//!
//! This crate fetches the XBRL "company concept" document for
//! `dei/EntityCommonStockSharesOutstanding` and returns it as raw JSON for the
//! extremum processor to validate.
//!
//! # Example
//!
//! ```no_run
//! use shares_core::DisclosureSource;
//! use shares_edgar::EdgarClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EdgarClient::new("MyApp/1.0 (contact@example.com)");
//!
//!     let payload = client.fetch_disclosure("0000320193").await?;
//!     println!("Entity: {}", payload["entityName"]);
//!
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde_json::Value;
use shares_core::{DisclosureSource, Result, SharesError};
use tracing::debug;

/// SEC EDGAR API base URL
pub const EDGAR_BASE_URL: &str = "https://data.sec.gov";

/// Concept path, relative to the company's CIK segment
const SHARES_OUTSTANDING_CONCEPT: &str = "dei/EntityCommonStockSharesOutstanding.json";

/// SEC EDGAR client for the shares-outstanding concept.
///
/// Every call issues a single GET carrying an identifying `User-Agent` and
/// `Accept: application/json`; the SEC rejects anonymous clients.
#[derive(Debug, Clone)]
pub struct EdgarClient {
    client: reqwest::Client,
    base_url: String,
    user_agent: String,
}

impl EdgarClient {
    /// Create a new EDGAR client with the specified user agent.
    ///
    /// The SEC requires identifying user agent headers. Format should be:
    /// "AppName/Version (contact@email.com)"
    ///
    /// # Example
    /// ```
    /// use shares_edgar::EdgarClient;
    ///
    /// let client = EdgarClient::new("MyApp/1.0 (contact@example.com)");
    /// ```
    pub fn new(user_agent: &str) -> Self {
        Self::with_client(reqwest::Client::new(), user_agent)
    }

    /// Create a new EDGAR client with a custom HTTP client.
    ///
    /// The user agent is still sent explicitly on every request.
    pub fn with_client(client: reqwest::Client, user_agent: &str) -> Self {
        Self {
            client,
            base_url: EDGAR_BASE_URL.to_string(),
            user_agent: user_agent.to_string(),
        }
    }

    /// Point the client at a different host (mirrors, local fixtures).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// The user agent sent with each request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Build the concept URL for `identifier`.
    ///
    /// The identifier is inserted verbatim; no padding or validation happens here.
    #[must_use]
    pub fn concept_url(&self, identifier: &str) -> String {
        format!(
            "{}/api/xbrl/companyconcept/CIK{}/{}",
            self.base_url, identifier, SHARES_OUTSTANDING_CONCEPT
        )
    }
}

#[async_trait]
impl DisclosureSource for EdgarClient {
    fn name(&self) -> &str {
        "SEC EDGAR"
    }

    async fn fetch_disclosure(&self, identifier: &str) -> Result<Value> {
        let url = self.concept_url(identifier);

        debug!("Fetching shares outstanding from {}", url);
        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| SharesError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SharesError::Network(format!(
                "Failed to fetch shares outstanding for CIK {}: HTTP {}",
                identifier,
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SharesError::Transport(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| {
            SharesError::MalformedResponse(format!(
                "Failed to parse shares outstanding for CIK {}: {}",
                identifier, e
            ))
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
