//! Identity and timestamps shared by every entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ModelKind;

/// Common fields carried by every entity.
///
/// Flattened into each entity's serialized form, so a stored object reads
/// `{"id": ..., "created_at": ..., "updated_at": ..., <attributes>}`.
/// Missing fields are filled in as at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseModel {
    /// Unique identifier (UUID v4 unless loaded from storage).
    pub id: String,
    /// When the entity was created.
    pub created_at: DateTime<Utc>,
    /// When the entity was last saved.
    pub updated_at: DateTime<Utc>,
}

impl BaseModel {
    /// Create a base with a fresh id and both timestamps set to now.
    #[must_use]
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updated_at`.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Storage key of this entity: `"<ClassName>.<id>"`.
    #[must_use]
    pub fn key(&self, kind: ModelKind) -> String {
        format!("{}.{}", kind.class_name(), self.id)
    }
}

impl Default for BaseModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_assigns_unique_ids() {
        let a = BaseModel::new();
        let b = BaseModel::new();
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
        assert_eq!(a.created_at, a.updated_at);
    }

    #[test]
    fn test_touch_moves_updated_at() {
        let mut base = BaseModel::new();
        let created = base.created_at;
        std::thread::sleep(std::time::Duration::from_millis(2));
        base.touch();
        assert_eq!(base.created_at, created);
        assert!(base.updated_at > created);
    }

    #[test]
    fn test_key_format() {
        let mut base = BaseModel::new();
        base.id = "1234".to_string();
        assert_eq!(base.key(ModelKind::Place), "Place.1234");
    }

    #[test]
    fn test_deserialize_fills_missing_fields() {
        let base: BaseModel = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        assert_eq!(base.id, "abc");

        let base: BaseModel = serde_json::from_str("{}").unwrap();
        assert!(!base.id.is_empty());
    }
}
