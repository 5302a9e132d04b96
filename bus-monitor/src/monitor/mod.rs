//! The three monitoring operations: find a stop, list its routes, and
//! report its arrivals.
//!
//! Each operation turns remote failures into an empty result plus a console
//! message, so a bad response never ends the session.

mod config;
mod finder;
mod lines;
mod report;

pub use config::MonitorConfig;
pub use finder::{filter_stops, find_stops};
pub use lines::list_lines;
pub use report::{ArrivalBoard, Block, BlockStyle, BoardBody, report};
