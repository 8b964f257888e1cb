//! Calls to the KiriminAja API.
//!
//! Thin stateless forwarding: each function issues one bounded HTTP call
//! with the injected client and hands back the upstream envelope. Validation
//! happens before the network; failures after it surface as
//! [`ProxyError::Upstream`]. No retries, no caching.

use crate::config::ProxyConfig;
use crate::error::{ProxyError, Result};
use crate::logging::{LogLevel, SharedLogger};
use crate::shipping::request::{build_pricing_payload, forwardable_query, SHORT_QUERY_MESSAGE};
use crate::shipping::types::{AddressResult, Envelope, PricingParams, PricingResult};

use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Instant;

/// Search sub-districts by keyword. Queries that trim below the minimum
/// length short-circuit to an empty success envelope without a network
/// call.
pub async fn search_address(
    query: Option<&str>,
    config: &ProxyConfig,
    client: &reqwest::Client,
    logger: &SharedLogger,
) -> Result<Envelope<AddressResult>> {
    let trimmed = match forwardable_query(query) {
        Some(q) => q,
        None => return Ok(Envelope::success(SHORT_QUERY_MESSAGE)),
    };

    let url = format!("{}/address", config.upstream.base_url.trim_end_matches('/'));
    let started = Instant::now();

    logger.log_with_context(
        LogLevel::Info,
        "upstream",
        format!("GET {}", url),
        json!({"q": trimmed}),
    );

    let response = client
        .get(&url)
        .query(&[("q", trimmed)])
        .send()
        .await
        .map_err(|e| ProxyError::upstream(format!("Request failed: {}", e)))?;

    read_envelope(response, started, logger, "address").await
}

/// Quote shipping prices. Fails with [`ProxyError::InvalidArgument`] before
/// any network call when `from`, `thru` or `weight` is missing.
pub async fn get_pricing(
    params: &PricingParams,
    config: &ProxyConfig,
    client: &reqwest::Client,
    logger: &SharedLogger,
) -> Result<Envelope<PricingResult>> {
    let payload = build_pricing_payload(params)?;

    let url = format!("{}/pricing", config.upstream.base_url.trim_end_matches('/'));
    let started = Instant::now();

    logger.log_with_context(
        LogLevel::Info,
        "upstream",
        format!("POST {}", url),
        json!({
            "from": payload.from,
            "thru": payload.thru,
            "weight": payload.weight,
        }),
    );

    let response = client
        .post(&url)
        .header("Content-Type", "application/json")
        .json(&payload)
        .send()
        .await
        .map_err(|e| ProxyError::upstream(format!("Request failed: {}", e)))?;

    read_envelope(response, started, logger, "pricing").await
}

/// Common tail of both calls: log the exchange, reject non-2xx statuses,
/// parse the body as a typed envelope.
async fn read_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
    started: Instant,
    logger: &SharedLogger,
    route: &str,
) -> Result<Envelope<T>> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ProxyError::upstream(format!("Failed to read response body: {}", e)))?;

    logger.info_timed(
        "upstream",
        format!(
            "{} responded status={} body_len={}",
            route,
            status.as_u16(),
            body.len()
        ),
        started.elapsed(),
    );

    if !status.is_success() {
        return Err(ProxyError::upstream(format!(
            "Upstream returned status {}: {}",
            status.as_u16(),
            truncate(&body, 500)
        )));
    }

    serde_json::from_str(&body).map_err(|e| {
        ProxyError::upstream(format!(
            "Failed to parse upstream response: {}. Body: {}",
            e,
            truncate(&body, 300)
        ))
    })
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
