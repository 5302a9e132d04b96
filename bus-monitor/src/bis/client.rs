//! BIS HTTP client.
//!
//! Both endpoints take the service key as a `serviceKey` query parameter
//! and answer with XML. The stop lookup has no search parameter: it returns
//! the whole stop list and callers filter locally.

use tracing::debug;

use crate::domain::{Arrival, Stop, StopId};

use super::BusInfoApi;
use super::convert::{parse_arrivals, parse_stations};
use super::error::BisError;

/// Default base URL for the Gwangju BIS open API.
const DEFAULT_BASE_URL: &str = "http://api.gwangju.go.kr";

const STATION_INFO_PATH: &str = "/xml/stationInfo";
const ARRIVE_INFO_PATH: &str = "/xml/arriveInfo";

/// Configuration for the BIS client.
#[derive(Debug, Clone)]
pub struct BisConfig {
    /// Service key for the stop lookup endpoint
    pub station_key: String,
    /// Service key for the arrivals endpoint
    pub arrival_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl BisConfig {
    /// Create a new config with one key per endpoint.
    pub fn new(station_key: impl Into<String>, arrival_key: impl Into<String>) -> Self {
        Self {
            station_key: station_key.into(),
            arrival_key: arrival_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the BIS stop lookup and arrivals endpoints.
#[derive(Debug, Clone)]
pub struct BisClient {
    http: reqwest::Client,
    base_url: String,
    station_key: String,
    arrival_key: String,
}

impl BisClient {
    /// Create a new BIS client.
    pub fn new(config: BisConfig) -> Result<Self, BisError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            station_key: config.station_key,
            arrival_key: config.arrival_key,
        })
    }

    /// Fetch the full stop list.
    pub async fn fetch_stations(&self) -> Result<Vec<Stop>, BisError> {
        let body = self
            .get_xml(STATION_INFO_PATH, &[("serviceKey", self.station_key.as_str())])
            .await?;

        let stops = parse_stations(&body)?;
        debug!(count = stops.len(), "fetched station list");
        Ok(stops)
    }

    /// Fetch the arrivals currently reported for a stop, in upstream order.
    pub async fn fetch_arrivals(&self, stop_id: &StopId) -> Result<Vec<Arrival>, BisError> {
        let body = self
            .get_xml(
                ARRIVE_INFO_PATH,
                &[
                    ("serviceKey", self.arrival_key.as_str()),
                    ("BUSSTOP_ID", stop_id.as_str()),
                ],
            )
            .await?;

        let arrivals = parse_arrivals(&body)?;
        debug!(stop = %stop_id, count = arrivals.len(), "fetched arrivals");
        Ok(arrivals)
    }

    /// Returns the raw body. It is decoded by the XML reader, which honours
    /// the declared document encoding.
    async fn get_xml(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<u8>, BisError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(BisError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BisError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

impl BusInfoApi for BisClient {
    async fn stations(&self) -> Result<Vec<Stop>, BisError> {
        self.fetch_stations().await
    }

    async fn arrivals(&self, stop_id: &StopId) -> Result<Vec<Arrival>, BisError> {
        self.fetch_arrivals(stop_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = BisConfig::new("station-key", "arrival-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.station_key, "station-key");
        assert_eq!(config.arrival_key, "arrival-key");
    }

    #[test]
    fn config_builders() {
        let config = BisConfig::new("k", "k")
            .with_base_url("http://localhost:8080")
            .with_timeout(5);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client =
            BisClient::new(BisConfig::new("k", "k").with_base_url("http://localhost:8080/"))
                .unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}
