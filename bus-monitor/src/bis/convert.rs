//! Conversion from BIS DTOs to domain types.
//!
//! Absent text fields become empty strings. Remaining minutes and stops are
//! parsed leniently: a bad value becomes "unknown" rather than failing the
//! record. The only record that is dropped is a station without an id, since
//! it cannot be queried for arrivals.

use tracing::warn;

use crate::domain::{Arrival, RemainMin, Stop, StopId};

use super::error::BisError;
use super::types::{ARRIVE_TAG, ArriveItem, STATION_TAG, StationItem};
use super::xml::extract_records;

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// Station record has no `BUSSTOP_ID`, or only whitespace
    #[error("invalid stop id {0:?}")]
    InvalidStopId(String),
}

/// Convert a single station record.
pub fn convert_station(item: &StationItem) -> Result<Stop, ConversionError> {
    let raw_id = item.busstop_id.as_deref().unwrap_or_default();
    let id = StopId::parse(raw_id).map_err(|_| ConversionError::InvalidStopId(raw_id.into()))?;

    Ok(Stop {
        name: text(&item.busstop_name),
        id,
        ars_id: text(&item.ars_id),
        next_stop: text(&item.next_busstop),
    })
}

/// Convert station records, skipping (and logging) unusable ones.
pub fn convert_stations(items: &[StationItem]) -> Vec<Stop> {
    items
        .iter()
        .filter_map(|item| match convert_station(item) {
            Ok(stop) => Some(stop),
            Err(e) => {
                warn!(
                    name = item.busstop_name.as_deref().unwrap_or_default(),
                    "skipping station: {e}"
                );
                None
            }
        })
        .collect()
}

/// Convert a single arrival record.
pub fn convert_arrival(item: &ArriveItem) -> Arrival {
    Arrival {
        line_name: text(&item.line_name),
        remain_min: RemainMin::parse(item.remain_min.as_deref()),
        remain_stop: item
            .remain_stop
            .as_deref()
            .and_then(|s| s.trim().parse().ok()),
        current_location: text(&item.busstop_name),
    }
}

/// Parse a `stationInfo` body into stops, preserving document order.
pub fn parse_stations(xml: &[u8]) -> Result<Vec<Stop>, BisError> {
    let items: Vec<StationItem> = extract_records(xml, STATION_TAG)?
        .iter()
        .map(StationItem::from_record)
        .collect();

    Ok(convert_stations(&items))
}

/// Parse an `arriveInfo` body into arrivals, preserving document order.
pub fn parse_arrivals(xml: &[u8]) -> Result<Vec<Arrival>, BisError> {
    Ok(extract_records(xml, ARRIVE_TAG)?
        .iter()
        .map(|record| convert_arrival(&ArriveItem::from_record(record)))
        .collect())
}

fn text(field: &Option<String>) -> String {
    field.clone().unwrap_or_default()
}
