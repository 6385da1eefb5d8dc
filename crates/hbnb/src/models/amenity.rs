use serde::{Deserialize, Serialize};

use super::base::BaseModel;

/// An amenity a place can offer (wifi, pool, ...).
///
/// Linked to places many-to-many through
/// [`PlaceAmenity`](super::PlaceAmenity).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Amenity {
    /// Identity and timestamps.
    #[serde(flatten)]
    pub base: BaseModel,
    /// Amenity name (required).
    pub name: String,
}

impl Amenity {
    /// Create an amenity with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: BaseModel::new(),
            name: name.into(),
        }
    }
}
