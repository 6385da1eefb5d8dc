//! Domain entities.
//!
//! Every entity embeds a [`BaseModel`] and is carried through storage as a
//! [`Model`], a closed sum over the entity types. The serialized form of a
//! model is a flat attribute mapping tagged with its class name under
//! `"__class__"`, the same shape the file backend persists.

pub mod amenity;
pub mod base;
pub mod city;
pub mod place;
pub mod review;
pub mod state;
pub mod user;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

pub use amenity::Amenity;
pub use base::BaseModel;
pub use city::City;
pub use place::{Place, PlaceAmenity};
pub use review::Review;
pub use state::State;
pub use user::User;

/// Key under which the class name is serialized.
pub const CLASS_KEY: &str = "__class__";

/// The entity types known to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModelKind {
    /// [`State`]
    State,
    /// [`City`]
    City,
    /// [`User`]
    User,
    /// [`Place`]
    Place,
    /// [`Amenity`]
    Amenity,
    /// [`Review`]
    Review,
}

impl ModelKind {
    /// Every kind, parents before children.
    pub const ALL: [Self; 6] = [
        Self::State,
        Self::City,
        Self::User,
        Self::Place,
        Self::Amenity,
        Self::Review,
    ];

    /// The class name used in storage keys and `__class__`.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::State => "State",
            Self::City => "City",
            Self::User => "User",
            Self::Place => "Place",
            Self::Amenity => "Amenity",
            Self::Review => "Review",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

impl FromStr for ModelKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.class_name() == s)
            .ok_or_else(|| Error::UnknownClass(s.to_string()))
    }
}

/// Any persisted entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__class__")]
pub enum Model {
    /// A state.
    State(State),
    /// A city.
    City(City),
    /// A user.
    User(User),
    /// A place.
    Place(Place),
    /// An amenity.
    Amenity(Amenity),
    /// A review.
    Review(Review),
}

impl Model {
    /// The entity type.
    #[must_use]
    pub fn kind(&self) -> ModelKind {
        match self {
            Self::State(_) => ModelKind::State,
            Self::City(_) => ModelKind::City,
            Self::User(_) => ModelKind::User,
            Self::Place(_) => ModelKind::Place,
            Self::Amenity(_) => ModelKind::Amenity,
            Self::Review(_) => ModelKind::Review,
        }
    }

    /// Identity and timestamps.
    #[must_use]
    pub fn base(&self) -> &BaseModel {
        match self {
            Self::State(m) => &m.base,
            Self::City(m) => &m.base,
            Self::User(m) => &m.base,
            Self::Place(m) => &m.base,
            Self::Amenity(m) => &m.base,
            Self::Review(m) => &m.base,
        }
    }

    /// Mutable identity and timestamps.
    pub fn base_mut(&mut self) -> &mut BaseModel {
        match self {
            Self::State(m) => &mut m.base,
            Self::City(m) => &mut m.base,
            Self::User(m) => &mut m.base,
            Self::Place(m) => &mut m.base,
            Self::Amenity(m) => &mut m.base,
            Self::Review(m) => &mut m.base,
        }
    }

    /// The entity id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.base().id
    }

    /// Storage key: `"<ClassName>.<id>"`.
    #[must_use]
    pub fn key(&self) -> String {
        self.base().key(self.kind())
    }

    /// Reject attribute values neither backend can store faithfully.
    /// JSON and `SQLite` both turn a non-finite float into null.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAttribute`] for a non-finite place coordinate.
    pub fn check_attributes(&self) -> Result<()> {
        let Self::Place(place) = self else {
            return Ok(());
        };
        for (attribute, value) in [("latitude", place.latitude), ("longitude", place.longitude)] {
            if let Some(value) = value.filter(|v| !v.is_finite()) {
                return Err(Error::InvalidAttribute {
                    key: self.key(),
                    attribute,
                    message: format!("must be finite, got {value}"),
                });
            }
        }
        Ok(())
    }

    /// Serialize to an attribute mapping, class name under `__class__`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAttribute`] for a non-finite coordinate.
    pub fn to_map(&self) -> Result<Map<String, Value>> {
        self.check_attributes()?;
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(Error::internal(format!(
                "{} serialized to a non-object: {other}",
                self.kind()
            ))),
        }
    }

    /// Rebuild a model from an attribute mapping produced by [`Model::to_map`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownClass`] if `__class__` is missing or names no
    /// entity, and [`Error::Json`] if an attribute has the wrong type.
    pub fn from_map(map: Map<String, Value>) -> Result<Self> {
        let class = map
            .get(CLASS_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| Error::UnknownClass(String::new()))?;
        ModelKind::from_str(class)?;
        Ok(serde_json::from_value(Value::Object(map))?)
    }

    /// The place, if this is one.
    #[must_use]
    pub fn as_place(&self) -> Option<&Place> {
        match self {
            Self::Place(place) => Some(place),
            _ => None,
        }
    }

    /// The amenity, if this is one.
    #[must_use]
    pub fn as_amenity(&self) -> Option<&Amenity> {
        match self {
            Self::Amenity(amenity) => Some(amenity),
            _ => None,
        }
    }

    /// The review, if this is one.
    #[must_use]
    pub fn as_review(&self) -> Option<&Review> {
        match self {
            Self::Review(review) => Some(review),
            _ => None,
        }
    }
}

macro_rules! impl_from_entity {
    ($($entity:ident),+ $(,)?) => {
        $(
            impl From<$entity> for Model {
                fn from(entity: $entity) -> Self {
                    Self::$entity(entity)
                }
            }
        )+
    };
}

impl_from_entity!(State, City, User, Place, Amenity, Review);
