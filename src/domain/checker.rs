//! Domain availability checker backed by the godaddy.com API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::domain::AvailabilityCheck;
use crate::error::{DaddyError, Result};
use crate::types::{AvailabilityResult, Credentials, RunConfig};

/// Path of the availability endpoint, relative to the API base URL
pub const AVAILABILITY_PATH: &str = "/v1/domains/available";

/// Wait used when a 429 response does not say how long to back off
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 5;

/// Registrar prices are reported in micro-units of the currency
const PRICE_DIVISOR: f64 = 1_000_000.0;

/// 422 code that means the TLD cannot be checked at all
const UNSUPPORTED_TLD: &str = "UNSUPPORTED_TLD";

/// Availability checker for a single TLD
#[derive(Clone)]
pub struct DomainChecker {
    client: Client,
    url: String,
    credentials: Credentials,
    tld: String,
    timeout: Duration,
    max_rate_limit_retries: Option<u32>,
}

impl DomainChecker {
    /// Create a checker from the run configuration
    pub fn new(config: &RunConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("daddy/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DaddyError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: format!("{}{}", config.api_base_url, AVAILABILITY_PATH),
            credentials: config.credentials.clone(),
            tld: config.tld.clone(),
            timeout: config.timeout,
            max_rate_limit_retries: config.max_rate_limit_retries,
        })
    }

    /// Check one candidate label, backing off while the API rate-limits us
    pub async fn check_domain(&self, label: &str) -> Result<AvailabilityResult> {
        let domain = self.domain_for(label);
        let mut rate_limited = 0u32;

        loop {
            let response = self
                .client
                .get(&self.url)
                .query(&[("domain", domain.as_str())])
                .header(AUTHORIZATION, self.credentials.authorization())
                .header(ACCEPT, "application/json")
                .send()
                .await
                .map_err(|e| self.transport_error(&domain, e))?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| self.transport_error(&domain, e))?;
            let parsed: Option<ApiResponse> = serde_json::from_str(&body).ok();

            tracing::debug!(domain = %domain, status = status.as_u16(), "Availability response");

            match status {
                s if s.is_success() => return parse_success(&domain, parsed),
                StatusCode::UNAUTHORIZED => return Err(DaddyError::Unauthorized),
                StatusCode::FORBIDDEN => {
                    let message = parsed
                        .and_then(|p| p.message)
                        .unwrap_or_else(|| "the API key cannot use the availability endpoint".to_string());
                    return Err(DaddyError::forbidden(message));
                }
                StatusCode::UNPROCESSABLE_ENTITY => {
                    let code = parsed.as_ref().and_then(|p| p.code.as_deref());
                    if code == Some(UNSUPPORTED_TLD) {
                        return Err(DaddyError::unsupported_tld(&self.tld));
                    }
                    tracing::debug!(
                        domain = %domain,
                        code = code.unwrap_or("none"),
                        "Malformed domain name, treating as unavailable"
                    );
                    return Ok(AvailabilityResult::unavailable(domain));
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    rate_limited += 1;
                    if let Some(max) = self.max_rate_limit_retries {
                        if rate_limited > max {
                            return Err(DaddyError::unexpected(
                                domain,
                                format!("still rate limited after {} retries", max),
                            ));
                        }
                    }
                    let wait = parsed
                        .and_then(|p| p.retry_after_sec)
                        .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
                    tracing::info!(domain = %domain, wait_secs = wait, "Rate limited, backing off");
                    tokio::time::sleep(Duration::from_secs(wait)).await;
                }
                StatusCode::INTERNAL_SERVER_ERROR => return Err(DaddyError::ServerError),
                other => {
                    let detail = parsed
                        .and_then(|p| p.message)
                        .unwrap_or_else(|| body.trim().to_string());
                    return Err(DaddyError::unexpected(
                        domain,
                        format!("unexpected status {}: {}", other, detail),
                    ));
                }
            }
        }
    }

    fn transport_error(&self, domain: &str, err: reqwest::Error) -> DaddyError {
        if err.is_timeout() {
            DaddyError::timeout(self.timeout.as_secs())
        } else if err.is_connect() {
            DaddyError::connection(err.to_string())
        } else {
            DaddyError::unexpected(domain, err.to_string())
        }
    }
}

#[async_trait]
impl AvailabilityCheck for DomainChecker {
    async fn check(&self, label: &str) -> Result<AvailabilityResult> {
        self.check_domain(label).await
    }

    fn domain_for(&self, label: &str) -> String {
        format!("{}.{}", label, self.tld)
    }
}

fn parse_success(domain: &str, parsed: Option<ApiResponse>) -> Result<AvailabilityResult> {
    let response = parsed
        .ok_or_else(|| DaddyError::unexpected(domain, "response body is not valid JSON"))?;
    let available = response
        .available
        .ok_or_else(|| DaddyError::unexpected(domain, "response has no 'available' field"))?;

    let price = match (available, response.price) {
        (_, Some(raw)) => raw / PRICE_DIVISOR,
        (false, None) => 0.0,
        (true, None) => {
            return Err(DaddyError::unexpected(domain, "response has no 'price' field"));
        }
    };

    Ok(AvailabilityResult {
        domain: response.domain.unwrap_or_else(|| domain.to_string()),
        available,
        currency: response.currency.unwrap_or_else(|| "USD".to_string()),
        price,
    })
}

/// Body of an availability response.
///
/// Success and error bodies share one shape; every field is optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    available: Option<bool>,
    domain: Option<String>,
    currency: Option<String>,
    price: Option<f64>,
    code: Option<String>,
    message: Option<String>,
    retry_after_sec: Option<u64>,
}
