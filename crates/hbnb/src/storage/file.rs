//! JSON file storage.
//!
//! Every object lives in one in-memory map keyed `"<ClassName>.<id>"`;
//! `save` writes the whole map as a single JSON object and `reload` reads it
//! back. There are no joins, no cascades and no referential checks.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::{Storage, StorageMode};
use crate::error::{Error, Result};
use crate::models::{Model, ModelKind};

/// Storage backed by a single JSON document.
#[derive(Debug)]
pub struct FileStorage {
    /// Path to the JSON document.
    path: PathBuf,
    /// Every registered object.
    objects: BTreeMap<String, Model>,
    /// Keys registered since the last save.
    pending: BTreeSet<String>,
}

impl FileStorage {
    /// Create an empty storage writing to `path`. Nothing is read.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            objects: BTreeMap::new(),
            pending: BTreeSet::new(),
        }
    }

    /// Create a storage for `path` and load whatever it holds.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut storage = Self::new(path);
        storage.reload()?;
        Ok(storage)
    }

    /// Get the path to the JSON document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn invalid(&self, message: impl Into<String>) -> Error {
        Error::StorageFile {
            path: self.path.clone(),
            message: message.into(),
        }
    }
}

impl Storage for FileStorage {
    fn mode(&self) -> StorageMode {
        StorageMode::File
    }

    fn all(&self, kind: Option<ModelKind>) -> Result<BTreeMap<String, Model>> {
        Ok(self
            .objects
            .iter()
            .filter(|(_, model)| kind.map_or(true, |k| model.kind() == k))
            .map(|(key, model)| (key.clone(), model.clone()))
            .collect())
    }

    fn new(&mut self, obj: Model) {
        let key = obj.key();
        self.pending.insert(key.clone());
        self.objects.insert(key, obj);
    }

    fn save(&mut self) -> Result<()> {
        for key in std::mem::take(&mut self.pending) {
            if let Some(model) = self.objects.get_mut(&key) {
                model.base_mut().touch();
            }
        }

        let mut document = Map::new();
        for (key, model) in &self.objects {
            document.insert(key.clone(), Value::Object(model.to_map()?));
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        std::fs::write(&self.path, serde_json::to_string(&document)?)?;
        debug!(
            "Saved {} objects to {}",
            self.objects.len(),
            self.path.display()
        );
        Ok(())
    }

    fn delete(&mut self, obj: &Model) -> Result<()> {
        let key = obj.key();
        self.pending.remove(&key);
        if self.objects.remove(&key).is_some() {
            debug!("Deleted {}", key);
        }
        Ok(())
    }

    fn reload(&mut self) -> Result<()> {
        self.objects.clear();
        self.pending.clear();

        if !self.path.exists() {
            debug!("No storage file at {}, starting empty", self.path.display());
            return Ok(());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let Value::Object(document) = serde_json::from_str(&contents)? else {
            return Err(self.invalid("expected a JSON object at top level"));
        };

        for (key, value) in document {
            let Value::Object(map) = value else {
                return Err(self.invalid(format!("entry {key} is not an object")));
            };
            let model = Model::from_map(map)?;
            let actual = model.key();
            if actual != key {
                warn!("Entry {} holds object {}, storing under the latter", key, actual);
            }
            self.objects.insert(actual, model);
        }

        info!(
            "Loaded {} objects from {}",
            self.objects.len(),
            self.path.display()
        );
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.reload()
    }
}
