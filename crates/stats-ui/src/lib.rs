//! Terminal UI layer for bench-stats.
//!
//! Provides themes, the histogram header and view, and the viewer event loop
//! built on top of [`ratatui`] for inspecting latency distributions in the
//! terminal.

pub mod app;
pub mod header;
pub mod histogram_view;
pub mod themes;

pub use stats_core as core;
