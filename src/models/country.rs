//! Country model for map metadata.

use serde::{Deserialize, Serialize};

/// A country rendered on the globe, keyed by its ISO code.
///
/// Seeded from `conf/countries.csv` and read-only through the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: String,
    pub name: String,
    /// Integer degrees, negative for the southern hemisphere
    pub latitude: i64,
    /// Integer degrees, negative for the western hemisphere
    pub longitude: i64,
}
