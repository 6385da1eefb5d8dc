//! Relational storage on `SQLite`.
//!
//! Each entity type has its own table; place/amenity links live in the
//! `place_amenity` association table. Registrations and deletions are staged
//! and applied by `save` inside one transaction with foreign keys deferred to
//! commit, so a batch either lands whole or not at all. Deleting a row
//! cascades to its dependents (a place's reviews and amenity links, a
//! state's cities, ...).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, Connection, Params, Row, Transaction};
use tracing::{debug, info};

use super::{migrations, Storage, StorageMode};
use crate::error::{Error, Result};
use crate::models::{
    Amenity, BaseModel, City, Model, ModelKind, Place, Review, State, User,
};

/// A change waiting for the next `save`.
#[derive(Debug, Clone)]
enum PendingOp {
    Upsert(Model),
    Delete { kind: ModelKind, id: String },
}

impl PendingOp {
    fn key(&self) -> String {
        match self {
            Self::Upsert(model) => model.key(),
            Self::Delete { kind, id } => format!("{}.{id}", kind.class_name()),
        }
    }
}

/// Storage backed by an `SQLite` database.
#[derive(Debug)]
pub struct DbStorage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
    /// Changes staged since the last save.
    pending: Vec<PendingOp>,
}

impl DbStorage {
    /// Open or create a database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// With `reset`, every table is dropped before the schema is created.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>, reset: bool) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch(
            "PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL; PRAGMA foreign_keys=ON;",
        )?;

        let mut storage = Self {
            path,
            conn,
            pending: Vec::new(),
        };
        if reset {
            migrations::drop_schema(&storage.conn)?;
        }
        storage.reload()?;

        info!("Database opened successfully at {}", storage.path.display());
        Ok(storage)
    }

    /// Create an in-memory database for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;

        let mut storage = Self {
            path: PathBuf::from(":memory:"),
            conn,
            pending: Vec::new(),
        };
        storage.reload()?;
        Ok(storage)
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of changes waiting for `save`.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn stage(&mut self, op: PendingOp) {
        let key = op.key();
        self.pending.retain(|existing| existing.key() != key);
        self.pending.push(op);
    }

    /// Load models of `kind` matching `filter` (a `WHERE` clause or empty).
    fn query_models(&self, kind: ModelKind, filter: &str, params: impl Params) -> Result<Vec<Model>> {
        let sql = format!(
            "SELECT {} FROM {} {filter} ORDER BY id",
            select_list(kind),
            table_name(kind)
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut models = stmt
            .query_map(params, |row| row_to_model(kind, row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        for model in &mut models {
            if let Model::Place(place) = model {
                place.amenity_ids = self.linked_amenity_ids(&place.base.id)?;
            }
        }
        Ok(models)
    }

    fn linked_amenity_ids(&self, place_id: &str) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT amenity_id FROM place_amenity WHERE place_id = ?1 ORDER BY amenity_id",
        )?;
        let ids = stmt
            .query_map([place_id], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(ids)
    }
}

impl Storage for DbStorage {
    fn mode(&self) -> StorageMode {
        StorageMode::Db
    }

    fn all(&self, kind: Option<ModelKind>) -> Result<BTreeMap<String, Model>> {
        let kinds = kind.map_or_else(|| ModelKind::ALL.to_vec(), |k| vec![k]);
        let mut objects = BTreeMap::new();
        for kind in kinds {
            for model in self.query_models(kind, "", [])? {
                objects.insert(model.key(), model);
            }
        }
        Ok(objects)
    }

    fn new(&mut self, obj: Model) {
        self.stage(PendingOp::Upsert(obj));
    }

    fn save(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let ops = std::mem::take(&mut self.pending);
        let count = ops.len();

        // Dropping the transaction on any early return rolls it back.
        let tx = self.conn.transaction()?;
        tx.execute_batch("PRAGMA defer_foreign_keys=ON;")?;
        for op in ops {
            match op {
                PendingOp::Upsert(mut model) => {
                    model.check_attributes()?;
                    model.base_mut().touch();
                    upsert(&tx, &model).map_err(Error::from_sqlite)?;
                }
                PendingOp::Delete { kind, id } => {
                    tx.execute(
                        &format!("DELETE FROM {} WHERE id = ?1", table_name(kind)),
                        [&id],
                    )
                    .map_err(Error::from_sqlite)?;
                }
            }
        }
        tx.commit().map_err(Error::from_sqlite)?;

        debug!("Committed {} changes", count);
        Ok(())
    }

    fn delete(&mut self, obj: &Model) -> Result<()> {
        self.stage(PendingOp::Delete {
            kind: obj.kind(),
            id: obj.id().to_string(),
        });
        Ok(())
    }

    fn reload(&mut self) -> Result<()> {
        migrations::initialize_schema(&self.conn)?;
        self.pending.clear();
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if !self.pending.is_empty() {
            debug!("Discarding {} uncommitted changes", self.pending.len());
        }
        self.pending.clear();
        Ok(())
    }

    fn get(&self, kind: ModelKind, id: &str) -> Result<Option<Model>> {
        Ok(self
            .query_models(kind, "WHERE id = ?1", [id])?
            .into_iter()
            .next())
    }

    fn count(&self, kind: Option<ModelKind>) -> Result<usize> {
        let kinds = kind.map_or_else(|| ModelKind::ALL.to_vec(), |k| vec![k]);
        let mut total = 0;
        for kind in kinds {
            let count: i64 = self.conn.query_row(
                &format!("SELECT COUNT(*) FROM {}", table_name(kind)),
                [],
                |row| row.get(0),
            )?;
            total += usize::try_from(count).unwrap_or(0);
        }
        Ok(total)
    }

    fn place_reviews(&self, place: &Place) -> Result<Vec<Review>> {
        Ok(self
            .query_models(ModelKind::Review, "WHERE place_id = ?1", [&place.base.id])?
            .into_iter()
            .filter_map(|model| match model {
                Model::Review(review) => Some(review),
                _ => None,
            })
            .collect())
    }

    fn place_amenities(&self, place: &Place) -> Result<Vec<Amenity>> {
        Ok(self
            .query_models(
                ModelKind::Amenity,
                "WHERE id IN (SELECT amenity_id FROM place_amenity WHERE place_id = ?1)",
                [&place.base.id],
            )?
            .into_iter()
            .filter_map(|model| match model {
                Model::Amenity(amenity) => Some(amenity),
                _ => None,
            })
            .collect())
    }
}

/// Table backing `kind`.
#[must_use]
pub fn table_name(kind: ModelKind) -> &'static str {
    match kind {
        ModelKind::State => "states",
        ModelKind::City => "cities",
        ModelKind::User => "users",
        ModelKind::Place => "places",
        ModelKind::Amenity => "amenities",
        ModelKind::Review => "reviews",
    }
}

/// Columns after `id, created_at, updated_at`.
fn attribute_columns(kind: ModelKind) -> &'static [&'static str] {
    match kind {
        ModelKind::State | ModelKind::Amenity => &["name"],
        ModelKind::City => &["state_id", "name"],
        ModelKind::User => &["email", "password", "first_name", "last_name"],
        ModelKind::Place => &[
            "city_id",
            "user_id",
            "name",
            "description",
            "number_rooms",
            "number_bathrooms",
            "max_guest",
            "price_by_night",
            "latitude",
            "longitude",
        ],
        ModelKind::Review => &["place_id", "user_id", "text"],
    }
}

fn all_columns(kind: ModelKind) -> Vec<&'static str> {
    let mut columns = vec!["id", "created_at", "updated_at"];
    columns.extend_from_slice(attribute_columns(kind));
    columns
}

fn select_list(kind: ModelKind) -> String {
    all_columns(kind).join(", ")
}

fn attribute_values(model: &Model) -> Vec<Value> {
    match model {
        Model::State(State { name, .. }) | Model::Amenity(Amenity { name, .. }) => {
            vec![name.clone().into()]
        }
        Model::City(city) => vec![city.state_id.clone().into(), city.name.clone().into()],
        Model::User(user) => vec![
            user.email.clone().into(),
            user.password.clone().into(),
            user.first_name.clone().into(),
            user.last_name.clone().into(),
        ],
        Model::Place(place) => vec![
            place.city_id.clone().into(),
            place.user_id.clone().into(),
            place.name.clone().into(),
            place.description.clone().into(),
            place.number_rooms.into(),
            place.number_bathrooms.into(),
            place.max_guest.into(),
            place.price_by_night.into(),
            place.latitude.into(),
            place.longitude.into(),
        ],
        Model::Review(review) => vec![
            review.place_id.clone().into(),
            review.user_id.clone().into(),
            review.text.clone().into(),
        ],
    }
}

/// Insert or update one row; a place also rewrites its association rows.
///
/// Updates go through `ON CONFLICT DO UPDATE` rather than `INSERT OR
/// REPLACE`, which would delete the row first and fire the cascades.
fn upsert(tx: &Transaction<'_>, model: &Model) -> rusqlite::Result<()> {
    let kind = model.kind();
    let columns = all_columns(kind);
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
    let updates: Vec<String> = columns[1..]
        .iter()
        .map(|column| format!("{column} = excluded.{column}"))
        .collect();
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT(id) DO UPDATE SET {}",
        table_name(kind),
        columns.join(", "),
        placeholders.join(", "),
        updates.join(", ")
    );

    let base = model.base();
    let mut values: Vec<Value> = vec![
        base.id.clone().into(),
        base.created_at.to_rfc3339().into(),
        base.updated_at.to_rfc3339().into(),
    ];
    values.extend(attribute_values(model));
    tx.execute(&sql, params_from_iter(values))?;

    if let Model::Place(place) = model {
        tx.execute(
            "DELETE FROM place_amenity WHERE place_id = ?1",
            [&place.base.id],
        )?;
        for link in place.links() {
            tx.execute(
                "INSERT OR IGNORE INTO place_amenity (place_id, amenity_id) VALUES (?1, ?2)",
                params![link.place_id, link.amenity_id],
            )?;
        }
    }
    Ok(())
}

fn parse_timestamp(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Convert a row selected with [`select_list`] into a model.
fn row_to_model(kind: ModelKind, row: &Row) -> rusqlite::Result<Model> {
    let base = BaseModel {
        id: row.get(0)?,
        created_at: parse_timestamp(row, 1)?,
        updated_at: parse_timestamp(row, 2)?,
    };

    let model = match kind {
        ModelKind::State => Model::State(State {
            base,
            name: row.get(3)?,
        }),
        ModelKind::City => Model::City(City {
            base,
            state_id: row.get(3)?,
            name: row.get(4)?,
        }),
        ModelKind::User => Model::User(User {
            base,
            email: row.get(3)?,
            password: row.get(4)?,
            first_name: row.get(5)?,
            last_name: row.get(6)?,
        }),
        ModelKind::Place => Model::Place(Place {
            base,
            city_id: row.get(3)?,
            user_id: row.get(4)?,
            name: row.get(5)?,
            description: row.get(6)?,
            number_rooms: row.get(7)?,
            number_bathrooms: row.get(8)?,
            max_guest: row.get(9)?,
            price_by_night: row.get(10)?,
            latitude: row.get(11)?,
            longitude: row.get(12)?,
            amenity_ids: Vec::new(),
        }),
        ModelKind::Amenity => Model::Amenity(Amenity {
            base,
            name: row.get(3)?,
        }),
        ModelKind::Review => Model::Review(Review {
            base,
            place_id: row.get(3)?,
            user_id: row.get(4)?,
            text: row.get(5)?,
        }),
    };
    Ok(model)
}
