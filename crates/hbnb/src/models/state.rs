use serde::{Deserialize, Serialize};

use super::base::BaseModel;

/// A state grouping cities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct State {
    /// Identity and timestamps.
    #[serde(flatten)]
    pub base: BaseModel,
    /// State name (required).
    pub name: String,
}

impl State {
    /// Create a state with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: BaseModel::new(),
            name: name.into(),
        }
    }
}
