//! Places and their relationships.
//!
//! A place belongs to a city and a user, has many reviews and is linked to
//! many amenities. Relationship traversal goes through the [`Storage`] the
//! caller hands in, so the same calls work against either backend: the file
//! backend recomputes each relationship by scanning its collection on every
//! access, the relational backend answers from its foreign keys.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::amenity::Amenity;
use super::base::BaseModel;
use super::review::Review;
use super::Model;
use crate::error::Result;
use crate::storage::Storage;

/// A rentable place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Place {
    /// Identity and timestamps.
    #[serde(flatten)]
    pub base: BaseModel,
    /// City the place is in.
    pub city_id: String,
    /// Owner.
    pub user_id: String,
    /// Display name (required).
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Number of rooms.
    pub number_rooms: u32,
    /// Number of bathrooms.
    pub number_bathrooms: u32,
    /// Maximum number of guests.
    pub max_guest: u32,
    /// Price per night.
    pub price_by_night: u32,
    /// Latitude.
    pub latitude: Option<f64>,
    /// Longitude.
    pub longitude: Option<f64>,
    /// Ids of linked amenities, without duplicates, in link order.
    pub amenity_ids: Vec<String>,
}

/// One row of the `place_amenity` association.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlaceAmenity {
    /// Linked place.
    pub place_id: String,
    /// Linked amenity.
    pub amenity_id: String,
}

impl Place {
    /// Create a place owned by `user_id` in `city_id`.
    #[must_use]
    pub fn new(
        city_id: impl Into<String>,
        user_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            base: BaseModel::new(),
            city_id: city_id.into(),
            user_id: user_id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Reviews whose `place_id` is this place.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to read.
    pub fn reviews(&self, storage: &dyn Storage) -> Result<Vec<Review>> {
        storage.place_reviews(self)
    }

    /// Amenities linked to this place.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to read.
    pub fn amenities(&self, storage: &dyn Storage) -> Result<Vec<Amenity>> {
        storage.place_amenities(self)
    }

    /// Link an amenity to this place.
    ///
    /// Only [`Model::Amenity`] values are accepted; anything else is ignored.
    /// Returns `true` when the link was added, `false` when the value was not
    /// an amenity or was already linked.
    pub fn link_amenity(&mut self, value: &Model) -> bool {
        let Model::Amenity(amenity) = value else {
            debug!(
                "Ignoring {} linked as amenity of place {}",
                value.kind(),
                self.base.id
            );
            return false;
        };

        if self.amenity_ids.contains(&amenity.base.id) {
            return false;
        }
        self.amenity_ids.push(amenity.base.id.clone());
        true
    }

    /// Remove an amenity link. Returns `true` if the link existed.
    pub fn unlink_amenity(&mut self, amenity_id: &str) -> bool {
        let before = self.amenity_ids.len();
        self.amenity_ids.retain(|id| id != amenity_id);
        self.amenity_ids.len() != before
    }

    /// The association rows this place owns, one per distinct amenity id.
    ///
    /// `amenity_ids` is public and may hold repeats; they collapse here.
    pub fn links(&self) -> impl Iterator<Item = PlaceAmenity> + '_ {
        let mut seen = BTreeSet::new();
        self.amenity_ids
            .iter()
            .filter(move |amenity_id| seen.insert(*amenity_id))
            .map(|amenity_id| PlaceAmenity {
                place_id: self.base.id.clone(),
                amenity_id: amenity_id.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{City, State, User};
    use crate::storage::{db::DbStorage, file::FileStorage};

    fn file_storage() -> FileStorage {
        FileStorage::new(std::env::temp_dir().join("hbnb_place_unused.json"))
    }

    /// A state, city and user so the relational backend accepts a place.
    fn seed(storage: &mut dyn Storage) -> (City, User) {
        let state = State::new("California");
        let city = City::new(&state.base.id, "San Francisco");
        let user = User::new("owner@example.com", "pwd");
        storage.new(state.into());
        storage.new(city.clone().into());
        storage.new(user.clone().into());
        (city, user)
    }

    #[test]
    fn test_new_place_defaults() {
        let place = Place::new("c1", "u1", "Loft");
        assert_eq!(place.name, "Loft");
        assert_eq!(place.number_rooms, 0);
        assert_eq!(place.price_by_night, 0);
        assert!(place.description.is_none());
        assert!(place.amenity_ids.is_empty());
    }

    #[test]
    fn test_amenity_ids_are_per_instance() {
        let mut first = Place::new("c1", "u1", "First");
        let second = Place::new("c1", "u1", "Second");
        let wifi = Amenity::new("Wifi");

        assert!(first.link_amenity(&wifi.into()));
        assert_eq!(first.amenity_ids.len(), 1);
        assert!(second.amenity_ids.is_empty());
    }

    #[test]
    fn test_link_amenity_twice_keeps_one() {
        let mut place = Place::new("c1", "u1", "Loft");
        let wifi: Model = Amenity::new("Wifi").into();

        assert!(place.link_amenity(&wifi));
        assert!(!place.link_amenity(&wifi));
        assert_eq!(place.amenity_ids.len(), 1);
    }

    #[test]
    fn test_link_non_amenity_is_ignored() {
        let mut place = Place::new("c1", "u1", "Loft");
        let review: Model = Review::new(&place.base.id, "u1", "Nice").into();

        assert!(!place.link_amenity(&review));
        assert!(place.amenity_ids.is_empty());
    }

    #[test]
    fn test_unlink_amenity() {
        let mut place = Place::new("c1", "u1", "Loft");
        let wifi = Amenity::new("Wifi");
        let wifi_id = wifi.base.id.clone();
        place.link_amenity(&wifi.into());

        assert!(place.unlink_amenity(&wifi_id));
        assert!(!place.unlink_amenity(&wifi_id));
        assert!(place.amenity_ids.is_empty());
    }

    #[test]
    fn test_links_yield_association_rows() {
        let mut place = Place::new("c1", "u1", "Loft");
        let wifi = Amenity::new("Wifi");
        let wifi_id = wifi.base.id.clone();
        place.link_amenity(&wifi.into());

        let links: Vec<PlaceAmenity> = place.links().collect();
        assert_eq!(
            links,
            vec![PlaceAmenity {
                place_id: place.base.id.clone(),
                amenity_id: wifi_id,
            }]
        );
    }

    #[test]
    fn test_reviews_file_mode_scans_collection() {
        let mut storage = file_storage();
        let place = Place::new("c1", "u1", "Loft");
        let other = Place::new("c1", "u1", "Other");
        let mine = Review::new(&place.base.id, "u1", "Great");
        storage.new(place.clone().into());
        storage.new(mine.clone().into());
        storage.new(Review::new(&other.base.id, "u1", "Meh").into());

        let reviews = place.reviews(&storage).unwrap();
        assert_eq!(reviews, vec![mine]);
    }

    #[test]
    fn test_reviews_file_mode_recomputed_on_access() {
        let mut storage = file_storage();
        let place = Place::new("c1", "u1", "Loft");
        assert!(place.reviews(&storage).unwrap().is_empty());

        storage.new(Review::new(&place.base.id, "u1", "Great").into());
        assert_eq!(place.reviews(&storage).unwrap().len(), 1);
    }

    #[test]
    fn test_amenities_file_mode() {
        let mut storage = file_storage();
        let wifi = Amenity::new("Wifi");
        let pool = Amenity::new("Pool");
        storage.new(wifi.clone().into());
        storage.new(pool.into());

        let mut place = Place::new("c1", "u1", "Loft");
        place.link_amenity(&wifi.clone().into());
        place.link_amenity(&wifi.clone().into());

        assert_eq!(place.amenities(&storage).unwrap(), vec![wifi]);
    }

    #[test]
    fn test_repeated_amenity_id_collapses() {
        let mut storage = file_storage();
        let wifi = Amenity::new("Wifi");
        storage.new(wifi.clone().into());

        let mut place = Place::new("c1", "u1", "Loft");
        place.amenity_ids.push(wifi.base.id.clone());
        place.amenity_ids.push(wifi.base.id.clone());

        assert_eq!(place.amenities(&storage).unwrap(), vec![wifi]);
        assert_eq!(place.links().count(), 1);
    }

    #[test]
    fn test_dangling_references_resolve_empty_in_file_mode() {
        let storage = file_storage();
        let mut place = Place::new("no-city", "no-user", "Ghost");
        place.amenity_ids.push("missing".to_string());

        assert!(place.reviews(&storage).unwrap().is_empty());
        assert!(place.amenities(&storage).unwrap().is_empty());
    }

    #[test]
    fn test_reviews_db_mode() {
        let mut storage = DbStorage::open_in_memory().unwrap();
        let (city, user) = seed(&mut storage);
        let place = Place::new(&city.base.id, &user.base.id, "Loft");
        let review = Review::new(&place.base.id, &user.base.id, "Great");
        storage.new(place.clone().into());
        storage.new(review.clone().into());
        storage.save().unwrap();

        let reviews = place.reviews(&storage).unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].base.id, review.base.id);
        assert_eq!(reviews[0].text, "Great");
    }

    #[test]
    fn test_amenities_db_mode() {
        let mut storage = DbStorage::open_in_memory().unwrap();
        let (city, user) = seed(&mut storage);
        let wifi = Amenity::new("Wifi");
        let pool = Amenity::new("Pool");
        let mut place = Place::new(&city.base.id, &user.base.id, "Loft");
        place.link_amenity(&wifi.clone().into());
        storage.new(wifi.clone().into());
        storage.new(pool.into());
        storage.new(place.clone().into());
        storage.save().unwrap();

        let amenities = place.amenities(&storage).unwrap();
        assert_eq!(amenities.len(), 1);
        assert_eq!(amenities[0].name, "Wifi");
    }
}
