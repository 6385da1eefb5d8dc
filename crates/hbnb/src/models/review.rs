use serde::{Deserialize, Serialize};

use super::base::BaseModel;

/// A user's review of a place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Review {
    /// Identity and timestamps.
    #[serde(flatten)]
    pub base: BaseModel,
    /// Reviewed place.
    pub place_id: String,
    /// Author.
    pub user_id: String,
    /// Review body (required).
    pub text: String,
}

impl Review {
    /// Create a review of `place_id` written by `user_id`.
    #[must_use]
    pub fn new(
        place_id: impl Into<String>,
        user_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            base: BaseModel::new(),
            place_id: place_id.into(),
            user_id: user_id.into(),
            text: text.into(),
        }
    }
}
