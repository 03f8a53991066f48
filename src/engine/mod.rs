//! Engine controller for managing search and game state.
//!
//! This module provides a unified interface for driving search, pondering,
//! and time control from a UCI front end.

mod controller;
pub mod time;

pub use controller::{EngineController, SearchJob, SearchParams};
pub use time::{build_search_request, compute_time_limits, TimeConfig, TimeControl};
