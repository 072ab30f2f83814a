//! Data ingestion layer for bench-stats.
//!
//! Responsible for extracting observations from benchmark log lines,
//! folding them into running aggregates, running the per-report analysis
//! pipelines and rendering the finished reports.

pub mod aggregator;
pub mod analysis;
pub mod reader;
pub mod writer;

pub use stats_core as core;
