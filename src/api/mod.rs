//! REST API module.
//!
//! Contains the read-only map endpoints served under `/api/map`.

mod map;

pub use map::*;
