//! Domain types for the bus arrival monitor.
//!
//! These are the validated forms of what the BIS API reports. Everything
//! here is rebuilt on every request; nothing is cached between polls.

mod arrival;
mod route;
mod stop;

pub use arrival::{Arrival, RemainMin, UNKNOWN_REMAIN_MIN, sort_by_remaining};
pub use route::RouteSet;
pub use stop::{InvalidStopId, Stop, StopId};
