use std::time::{Duration, Instant};

use metrics::{counter, histogram};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use crate::apis::LaunchSource;
use crate::constants::{endpoint, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECONDS, LAUNCHES_PATH, ROCKETS_PATH};
use crate::error::{ReportError, Result};
use crate::types::{RawLaunch, Rocket};

/// Client for the SpaceX v4 REST API
pub struct SpacexClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for SpacexClient {
    fn default() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl SpacexClient {
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Self::new(base_url, DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `url` and parse the body as JSON.
    ///
    /// A non-2xx status is an error even when the body is valid JSON.
    #[instrument(skip(self))]
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        counter!("spacex_fetch_requests_total", "url" => url.to_string()).increment(1);
        let t0 = Instant::now();

        let response = self.client.get(url).send().await.map_err(|e| {
            counter!("spacex_fetch_errors_total", "url" => url.to_string()).increment(1);
            debug!("Request to {} failed: {}", url, e);
            e
        })?;

        let status = response.status();
        if !status.is_success() {
            counter!("spacex_fetch_errors_total", "url" => url.to_string()).increment(1);
            debug!("{} responded with HTTP {}", url, status);
            return Err(ReportError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await?;
        histogram!("spacex_fetch_duration_seconds", "url" => url.to_string())
            .record(t0.elapsed().as_secs_f64());
        debug!("Fetched {} bytes from {}", body.len(), url);

        let parsed = serde_json::from_slice(&body)?;
        Ok(parsed)
    }
}

#[async_trait::async_trait]
impl LaunchSource for SpacexClient {
    fn source_name(&self) -> &'static str {
        "spacex_v4"
    }

    async fn get_launches(&self) -> Result<Vec<RawLaunch>> {
        let launches: Vec<RawLaunch> = self.fetch_json(&endpoint(&self.base_url, LAUNCHES_PATH)).await?;
        info!("Fetched {} launches", launches.len());
        Ok(launches)
    }

    async fn get_rockets(&self) -> Result<Vec<Rocket>> {
        let rockets: Vec<Rocket> = self.fetch_json(&endpoint(&self.base_url, ROCKETS_PATH)).await?;
        info!("Fetched {} rockets", rockets.len());
        Ok(rockets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let client = SpacexClient::with_base_url("http://localhost:9000/v4/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000/v4");
    }

    #[test]
    fn default_points_at_public_api() {
        assert_eq!(SpacexClient::default().base_url(), DEFAULT_BASE_URL);
        assert_eq!(SpacexClient::default().source_name(), "spacex_v4");
    }

    #[tokio::test]
    async fn transport_failure_is_a_fetch_failure() {
        // Nothing listens on port 9 of the loopback interface
        let client = SpacexClient::new("http://127.0.0.1:9", 2).unwrap();
        let err = client.get_rockets().await.unwrap_err();
        assert!(matches!(err, ReportError::Http(_)));
        assert!(err.is_fetch_failure());
    }
}
