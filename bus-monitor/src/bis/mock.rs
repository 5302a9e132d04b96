//! Mock BIS client for running without API access.
//!
//! Serves canned XML documents, either given directly or loaded from a
//! directory, through the same parsing path as the live client.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::{Arrival, Stop, StopId};

use super::BusInfoApi;
use super::convert::{parse_arrivals, parse_stations};
use super::error::BisError;

/// Mock BIS client that serves XML documents from memory.
#[derive(Debug, Clone, Default)]
pub struct MockBisClient {
    stations_xml: Vec<u8>,
    /// Arrivals documents, keyed by stop id.
    arrivals_xml: HashMap<String, Vec<u8>>,
    station_requests: Arc<AtomicUsize>,
    arrival_requests: Arc<AtomicUsize>,
}

impl MockBisClient {
    /// Create a mock that answers the stop lookup with `stations_xml`.
    pub fn new(stations_xml: impl Into<Vec<u8>>) -> Self {
        Self {
            stations_xml: stations_xml.into(),
            ..Default::default()
        }
    }

    /// Answer arrivals requests for `stop_id` with `xml`.
    pub fn with_arrivals(mut self, stop_id: impl Into<String>, xml: impl Into<Vec<u8>>) -> Self {
        self.arrivals_xml.insert(stop_id.into(), xml.into());
        self
    }

    /// Load mock data from a directory.
    ///
    /// Expects `stations.xml` and, optionally, an `arrivals/` directory with
    /// one `{BUSSTOP_ID}.xml` file per stop.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, BisError> {
        let data_dir = data_dir.as_ref();

        let stations_path = data_dir.join("stations.xml");
        let stations_xml = std::fs::read(&stations_path).map_err(|e| {
            BisError::NotConfigured(format!("failed to read {}: {e}", stations_path.display()))
        })?;

        let mut client = Self::new(stations_xml);

        let arrivals_dir = data_dir.join("arrivals");
        if !arrivals_dir.is_dir() {
            return Ok(client);
        }

        let entries = std::fs::read_dir(&arrivals_dir).map_err(|e| {
            BisError::NotConfigured(format!("failed to read {}: {e}", arrivals_dir.display()))
        })?;

        for entry in entries {
            let path = entry
                .map_err(|e| BisError::NotConfigured(format!("failed to read entry: {e}")))?
                .path();

            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("xml") {
                continue;
            }

            // "2054.xml" -> "2054"
            let Some(stop_id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let xml = std::fs::read(&path).map_err(|e| {
                BisError::NotConfigured(format!("failed to read {}: {e}", path.display()))
            })?;

            client.arrivals_xml.insert(stop_id.to_string(), xml);
        }

        Ok(client)
    }

    /// Number of stop lookups served so far.
    pub fn station_requests(&self) -> usize {
        self.station_requests.load(Ordering::Relaxed)
    }

    /// Number of arrivals requests served so far, across all stops.
    pub fn arrival_requests(&self) -> usize {
        self.arrival_requests.load(Ordering::Relaxed)
    }
}

impl BusInfoApi for MockBisClient {
    async fn stations(&self) -> Result<Vec<Stop>, BisError> {
        self.station_requests.fetch_add(1, Ordering::Relaxed);
        parse_stations(&self.stations_xml)
    }

    async fn arrivals(&self, stop_id: &StopId) -> Result<Vec<Arrival>, BisError> {
        self.arrival_requests.fetch_add(1, Ordering::Relaxed);

        let xml = self
            .arrivals_xml
            .get(stop_id.as_str())
            .ok_or_else(|| BisError::Api {
                status: 404,
                message: format!("no mock arrivals for stop {stop_id}"),
            })?;

        parse_arrivals(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATIONS: &str = "<ROOT><STATION><BUSSTOP_NAME>광주시청</BUSSTOP_NAME>\
                            <BUSSTOP_ID>2054</BUSSTOP_ID></STATION></ROOT>";
    const ARRIVALS: &str = "<ROOT><ARRIVE><LINE_NAME>첨단09</LINE_NAME>\
                            <REMAIN_MIN>4</REMAIN_MIN></ARRIVE></ROOT>";

    #[tokio::test]
    async fn serves_in_memory_documents() {
        let client = MockBisClient::new(STATIONS).with_arrivals("2054", ARRIVALS);

        let stops = client.stations().await.unwrap();
        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].name, "광주시청");

        let arrivals = client.arrivals(&stops[0].id).await.unwrap();
        assert_eq!(arrivals[0].line_name, "첨단09");

        assert_eq!(client.station_requests(), 1);
        assert_eq!(client.arrival_requests(), 1);
    }

    #[tokio::test]
    async fn unknown_stop_returns_error() {
        let client = MockBisClient::new(STATIONS);
        let id = StopId::parse("9999").unwrap();

        let result = client.arrivals(&id).await;
        assert!(matches!(result, Err(BisError::Api { status: 404, .. })));
    }

    #[tokio::test]
    async fn loads_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("stations.xml"), STATIONS).unwrap();
        std::fs::create_dir(dir.path().join("arrivals")).unwrap();
        std::fs::write(dir.path().join("arrivals/2054.xml"), ARRIVALS).unwrap();
        std::fs::write(dir.path().join("arrivals/README.txt"), "ignored").unwrap();

        let client = MockBisClient::from_dir(dir.path()).unwrap();
        let id = StopId::parse("2054").unwrap();

        assert_eq!(client.arrivals(&id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn loads_bundled_sample_data() {
        let client = MockBisClient::from_dir("data/mock").unwrap();
        let stops = client.stations().await.unwrap();

        assert!(!stops.is_empty());
        assert!(client.arrivals(&stops[0].id).await.is_ok());
    }

    #[test]
    fn missing_directory_is_not_configured() {
        let dir = tempfile::tempdir().unwrap();
        let result = MockBisClient::from_dir(dir.path().join("nope"));
        assert!(matches!(result, Err(BisError::NotConfigured(_))));
    }
}
