use serde::{Deserialize, Serialize};

use super::base::BaseModel;

/// A city, belonging to a [`State`](super::State).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct City {
    /// Identity and timestamps.
    #[serde(flatten)]
    pub base: BaseModel,
    /// Owning state.
    pub state_id: String,
    /// City name (required).
    pub name: String,
}

impl City {
    /// Create a city in the given state.
    #[must_use]
    pub fn new(state_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            base: BaseModel::new(),
            state_id: state_id.into(),
            name: name.into(),
        }
    }
}
