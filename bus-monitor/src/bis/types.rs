//! BIS API response DTOs.
//!
//! These types mirror the XML records one field per child element. Every
//! field is an `Option` because the API omits elements rather than sending
//! empty ones in many cases.

use super::xml::XmlRecord;

/// Record tag for entries in the `stationInfo` response.
pub const STATION_TAG: &str = "STATION";

/// Record tag for entries in the `arriveInfo` response.
pub const ARRIVE_TAG: &str = "ARRIVE";

/// One `STATION` record from `stationInfo`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationItem {
    /// Display name of the stop.
    pub busstop_name: Option<String>,

    /// Opaque id passed back to `arriveInfo`.
    pub busstop_id: Option<String>,

    /// Public stop number.
    pub ars_id: Option<String>,

    /// Name of the next stop in the direction of travel.
    pub next_busstop: Option<String>,
}

impl StationItem {
    pub fn from_record(record: &XmlRecord) -> Self {
        Self {
            busstop_name: owned(record, "BUSSTOP_NAME"),
            busstop_id: owned(record, "BUSSTOP_ID"),
            ars_id: owned(record, "ARS_ID"),
            next_busstop: owned(record, "NEXT_BUSSTOP"),
        }
    }
}

/// One `ARRIVE` record from `arriveInfo`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArriveItem {
    /// Route name, e.g. "첨단09" or "Line 5".
    pub line_name: Option<String>,

    /// Minutes until arrival. "999" or absent when there is no estimate.
    pub remain_min: Option<String>,

    /// Stops remaining before the requested stop.
    pub remain_stop: Option<String>,

    /// Stop the bus is currently at or has just passed.
    pub busstop_name: Option<String>,
}

impl ArriveItem {
    pub fn from_record(record: &XmlRecord) -> Self {
        Self {
            line_name: owned(record, "LINE_NAME"),
            remain_min: owned(record, "REMAIN_MIN"),
            remain_stop: owned(record, "REMAIN_STOP"),
            busstop_name: owned(record, "BUSSTOP_NAME"),
        }
    }
}

fn owned(record: &XmlRecord, name: &str) -> Option<String> {
    record.field(name).map(str::to_string)
}
