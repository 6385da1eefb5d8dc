//! Storage layer for hbnb.
//!
//! This module defines the [`Storage`] interface every entity works against
//! and its two implementations:
//!
//! - [`db::DbStorage`]: `SQLite` tables with foreign keys, cascading deletes
//!   and transactional saves.
//! - [`file::FileStorage`]: an in-memory collection serialized to a single
//!   JSON document.
//!
//! The backend is chosen once, from configuration, by [`open`].

pub mod db;
pub mod file;
pub mod migrations;
pub mod schema;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::models::{Amenity, Model, ModelKind, Place, Review};

/// Which backend is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageMode {
    /// Relational storage ([`db::DbStorage`]).
    Db,
    /// JSON file storage ([`file::FileStorage`]).
    File,
}

impl StorageMode {
    /// Interpret the storage-type flag: `db` selects the relational backend,
    /// anything else the file backend.
    #[must_use]
    pub fn from_flag(flag: &str) -> Self {
        if flag == "db" {
            Self::Db
        } else {
            Self::File
        }
    }
}

impl fmt::Display for StorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Db => write!(f, "db"),
            Self::File => write!(f, "file"),
        }
    }
}

/// Persistence of entities.
///
/// `new` registers an object, `save` commits everything registered since the
/// last save (refreshing each object's `updated_at`), `delete` removes one
/// object. The relationship queries have scanning defaults for backends
/// without joins.
pub trait Storage: fmt::Debug {
    /// The active backend.
    fn mode(&self) -> StorageMode;

    /// All stored objects of `kind` (or of every kind), keyed
    /// `"<ClassName>.<id>"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to read.
    fn all(&self, kind: Option<ModelKind>) -> Result<BTreeMap<String, Model>>;

    /// Register an object for persistence. An object registered under an
    /// existing key replaces it.
    fn new(&mut self, obj: Model);

    /// Commit all pending registrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the batch; the relational
    /// backend reports constraint violations as
    /// [`Error::Constraint`](crate::Error::Constraint) and keeps none of it.
    fn save(&mut self) -> Result<()>;

    /// Remove an object.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to stage the removal.
    fn delete(&mut self, obj: &Model) -> Result<()>;

    /// Rebuild the in-memory view from persisted state.
    ///
    /// # Errors
    ///
    /// Returns an error if persisted state cannot be read.
    fn reload(&mut self) -> Result<()>;

    /// End a unit of work, discarding anything not saved.
    ///
    /// # Errors
    ///
    /// Returns an error if persisted state cannot be read back.
    fn close(&mut self) -> Result<()>;

    /// Fetch one object.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to read.
    fn get(&self, kind: ModelKind, id: &str) -> Result<Option<Model>> {
        let key = format!("{}.{id}", kind.class_name());
        Ok(self.all(Some(kind))?.remove(&key))
    }

    /// Number of stored objects of `kind` (or of every kind).
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to read.
    fn count(&self, kind: Option<ModelKind>) -> Result<usize> {
        Ok(self.all(kind)?.len())
    }

    /// Reviews of `place`. Scans every stored review.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to read.
    fn place_reviews(&self, place: &Place) -> Result<Vec<Review>> {
        Ok(self
            .all(Some(ModelKind::Review))?
            .into_values()
            .filter_map(|model| match model {
                Model::Review(review) if review.place_id == place.base.id => Some(review),
                _ => None,
            })
            .collect())
    }

    /// Amenities linked to `place`. Scans every stored amenity for the ids
    /// in `place.amenity_ids`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to read.
    fn place_amenities(&self, place: &Place) -> Result<Vec<Amenity>> {
        Ok(self
            .all(Some(ModelKind::Amenity))?
            .into_values()
            .filter_map(|model| match model {
                Model::Amenity(amenity) if place.amenity_ids.contains(&amenity.base.id) => {
                    Some(amenity)
                }
                _ => None,
            })
            .collect())
    }

    /// Object counts per kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to read.
    fn stats(&self) -> Result<StorageStats> {
        let mut counts = BTreeMap::new();
        for kind in ModelKind::ALL {
            counts.insert(kind, self.count(Some(kind))?);
        }
        Ok(StorageStats {
            mode: self.mode(),
            counts,
        })
    }
}

/// Statistics about the storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageStats {
    /// Active backend.
    pub mode: StorageMode,
    /// Number of stored objects per kind.
    pub counts: BTreeMap<ModelKind, usize>,
}

impl StorageStats {
    /// Total number of stored objects.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Open the backend selected by `config` and load its persisted state.
///
/// # Errors
///
/// Returns an error if the database or storage file cannot be opened or read.
pub fn open(config: &Config) -> Result<Box<dyn Storage>> {
    let storage: Box<dyn Storage> = match config.storage_mode() {
        StorageMode::Db => Box::new(db::DbStorage::open(
            config.database_path(),
            config.is_test_env(),
        )?),
        StorageMode::File => Box::new(file::FileStorage::open(config.file_path())?),
    };
    info!("Using {} storage", storage.mode());
    Ok(storage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amenity, Review};

    #[test]
    fn test_mode_from_flag() {
        assert_eq!(StorageMode::from_flag("db"), StorageMode::Db);
        assert_eq!(StorageMode::from_flag("file"), StorageMode::File);
        assert_eq!(StorageMode::from_flag(""), StorageMode::File);
        assert_eq!(StorageMode::from_flag("mysql"), StorageMode::File);
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(StorageMode::Db.to_string(), "db");
        assert_eq!(StorageMode::File.to_string(), "file");
    }

    #[test]
    fn test_open_file_mode() {
        let path = std::env::temp_dir().join(format!("hbnb_open_test_{}.json", std::process::id()));
        let mut config = Config::default();
        config.storage.file_path = Some(path.clone());

        let storage = open(&config).unwrap();
        assert_eq!(storage.mode(), StorageMode::File);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_open_db_mode() {
        let path = std::env::temp_dir().join(format!("hbnb_open_test_{}.db", std::process::id()));
        let mut config = Config::default();
        config.storage.kind = "db".to_string();
        config.storage.database_path = Some(path.clone());

        let storage = open(&config).unwrap();
        assert_eq!(storage.mode(), StorageMode::Db);

        drop(storage);
        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_file(path.with_extension("db-wal"));
        let _ = std::fs::remove_file(path.with_extension("db-shm"));
    }

    #[test]
    fn test_get_and_count_defaults() {
        let mut storage = file::FileStorage::new(std::env::temp_dir().join("hbnb_unused.json"));
        let wifi = Amenity::new("Wifi");
        let id = wifi.base.id.clone();
        storage.new(wifi.into());
        storage.new(Review::new("p", "u", "ok").into());

        assert_eq!(storage.count(None).unwrap(), 2);
        assert_eq!(storage.count(Some(ModelKind::Amenity)).unwrap(), 1);
        assert!(storage.get(ModelKind::Amenity, &id).unwrap().is_some());
        assert!(storage.get(ModelKind::Review, &id).unwrap().is_none());
    }

    #[test]
    fn test_stats() {
        let mut storage = file::FileStorage::new(std::env::temp_dir().join("hbnb_unused.json"));
        storage.new(Amenity::new("Wifi").into());
        storage.new(Amenity::new("Pool").into());

        let stats = storage.stats().unwrap();
        assert_eq!(stats.mode, StorageMode::File);
        assert_eq!(stats.counts[&ModelKind::Amenity], 2);
        assert_eq!(stats.counts[&ModelKind::Place], 0);
        assert_eq!(stats.total(), 2);
    }
}
