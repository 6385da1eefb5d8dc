use serde::{Deserialize, Serialize};

use super::base::BaseModel;

/// A user owning places and writing reviews.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// Identity and timestamps.
    #[serde(flatten)]
    pub base: BaseModel,
    /// Login email (required).
    pub email: String,
    /// Password (required).
    pub password: String,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
}

impl User {
    /// Create a user with the given credentials.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            base: BaseModel::new(),
            email: email.into(),
            password: password.into(),
            first_name: None,
            last_name: None,
        }
    }
}
