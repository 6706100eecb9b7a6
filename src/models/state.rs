//! State model for map metadata.

use serde::{Deserialize, Serialize};

/// A state or province belonging to a [`Country`](super::Country).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub id: String,
    pub country_id: String,
    pub name: String,
}
