//! Core types for bench-stats.
//!
//! Holds the error type, the running-statistics data model and its
//! finalization math, histogram binning, report formatting and the
//! command-line settings shared by the other crates.

pub mod calculations;
pub mod error;
pub mod formatting;
pub mod histogram;
pub mod models;
pub mod settings;
