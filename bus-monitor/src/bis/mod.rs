//! Gwangju BIS (Bus Information System) client.
//!
//! This module provides an HTTP client for the two BIS open API endpoints
//! the monitor uses:
//! - `stationInfo` returns the complete stop list; there is no server-side
//!   search, so name matching happens locally
//! - `arriveInfo` returns the buses currently approaching one stop
//!
//! Both answer with XML. Fields are frequently omitted, so every field is
//! optional until conversion applies its default.

mod client;
mod convert;
mod error;
mod mock;
mod types;
mod xml;

pub use client::{BisClient, BisConfig};
pub use convert::{ConversionError, parse_arrivals, parse_stations};
pub use error::BisError;
pub use mock::MockBisClient;
pub use types::{ArriveItem, StationItem};
pub use xml::{XmlRecord, extract_records};

use crate::domain::{Arrival, Stop, StopId};

/// Source of stop and arrival data.
///
/// Implemented by the live [`BisClient`] and by [`MockBisClient`].
#[allow(async_fn_in_trait)]
pub trait BusInfoApi {
    /// The complete stop list, in upstream order.
    async fn stations(&self) -> Result<Vec<Stop>, BisError>;

    /// Buses currently approaching `stop_id`, in upstream order.
    async fn arrivals(&self, stop_id: &StopId) -> Result<Vec<Arrival>, BisError>;
}
