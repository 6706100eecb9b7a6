//! Data models for the globe map backend.
//!
//! Field names serialize as camelCase to match the frontend map component.

mod card;
mod country;
mod state;

pub use card::*;
pub use country::*;
pub use state::*;
