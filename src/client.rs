//! Typed client for the proxy endpoints.
//!
//! Performs the same validation as the proxy so obviously-bad requests never
//! leave the process: short queries come back as the canned empty success
//! envelope and missing pricing fields fail before any HTTP call.

use crate::error::Result;
use crate::shipping::request::{build_pricing_payload, forwardable_query, SHORT_QUERY_MESSAGE};
use crate::shipping::types::{AddressResult, Envelope, PricingParams, PricingResult};

use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for a running kiriminaja-proxy instance.
///
/// Responses are returned as-is, including ERROR envelopes the proxy sends
/// with a 500 status. The envelope itself is the result.
#[derive(Debug, Clone)]
pub struct ShippingClient {
    base_url: String,
    http: reqwest::Client,
}

impl ShippingClient {
    /// Build a client with its own HTTP client using the default 15-second
    /// timeout.
    pub fn connect(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self::with_client(base_url, http))
    }

    /// Build a client around an existing `reqwest::Client`.
    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    /// Search sub-districts by keyword through the proxy.
    pub async fn search_address(&self, query: &str) -> Result<Envelope<AddressResult>> {
        let trimmed = match forwardable_query(Some(query)) {
            Some(q) => q,
            None => return Ok(Envelope::success(SHORT_QUERY_MESSAGE)),
        };

        let url = format!("{}/api/address", self.base_url);
        let envelope = self
            .http
            .get(&url)
            .query(&[("q", trimmed)])
            .send()
            .await?
            .json()
            .await?;

        Ok(envelope)
    }

    /// Quote shipping prices through the proxy. The captcha token is the
    /// proxy's business on the upstream hop; it is not sent from here.
    pub async fn get_pricing(&self, params: &PricingParams) -> Result<Envelope<PricingResult>> {
        let payload = build_pricing_payload(params)?;

        let url = format!("{}/api/pricing", self.base_url);
        let body = serde_json::json!({
            "from": payload.from,
            "thru": payload.thru,
            "weight": payload.weight,
            "width": payload.width,
            "height": payload.height,
            "length": payload.length,
        });

        let envelope = self.http.post(&url).json(&body).send().await?.json().await?;

        Ok(envelope)
    }
}
