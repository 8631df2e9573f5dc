//! telemetry/mod.rs
//! Counters describing what one transform consumed and produced.

pub mod counters;

pub use counters::*;
