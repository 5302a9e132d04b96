//! Gwangju bus arrival monitor.
//!
//! An interactive terminal program that answers: "when is my bus coming?"
//! Find a stop by name, pick a route, and watch arrival countdowns refresh
//! every second, with an alert tone when a bus is about to arrive.

pub mod alert;
pub mod bis;
pub mod console;
pub mod domain;
pub mod driver;
pub mod monitor;
