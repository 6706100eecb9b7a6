//! Card model for free-form site content.

use serde::{Deserialize, Serialize};

/// A free-form content record (project, education entry, image) tied to a
/// country and optionally a state.
///
/// The surrogate `id` is assigned by the store; `created_at`, `updated_at`
/// and `deleted_at` track the record lifecycle alongside it. For upsert
/// purposes a card is identified by `(country_id, title)`, not by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: i64,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
    pub country_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_id: Option<String>,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub img_folder_path: String,
    pub link: String,
    pub github: String,
    #[serde(rename = "type")]
    pub card_type: String,
}

/// Fields supplied when upserting a card. The surrogate id and lifecycle
/// timestamps are managed by the store.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertCardRequest {
    pub country_id: String,
    #[serde(default)]
    pub state_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub img_folder_path: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub github: String,
    #[serde(default, rename = "type")]
    pub card_type: String,
}
