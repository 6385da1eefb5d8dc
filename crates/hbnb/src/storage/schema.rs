//! `SQLite` schema definitions for hbnb.
//!
//! This module contains the SQL statements for creating and managing
//! the database schema.

/// SQL statement to create the states table.
pub const CREATE_STATES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS states (
    id TEXT PRIMARY KEY NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    name TEXT NOT NULL CHECK (name <> '')
)
";

/// SQL statement to create the cities table.
pub const CREATE_CITIES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS cities (
    id TEXT PRIMARY KEY NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    state_id TEXT NOT NULL REFERENCES states(id) ON DELETE CASCADE,
    name TEXT NOT NULL CHECK (name <> '')
)
";

/// SQL statement to create the users table.
pub const CREATE_USERS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    email TEXT NOT NULL CHECK (email <> ''),
    password TEXT NOT NULL CHECK (password <> ''),
    first_name TEXT,
    last_name TEXT
)
";

/// SQL statement to create the places table.
pub const CREATE_PLACES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS places (
    id TEXT PRIMARY KEY NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    city_id TEXT NOT NULL REFERENCES cities(id) ON DELETE CASCADE,
    user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name TEXT NOT NULL CHECK (name <> ''),
    description TEXT,
    number_rooms INTEGER NOT NULL DEFAULT 0 CHECK (number_rooms >= 0),
    number_bathrooms INTEGER NOT NULL DEFAULT 0 CHECK (number_bathrooms >= 0),
    max_guest INTEGER NOT NULL DEFAULT 0 CHECK (max_guest >= 0),
    price_by_night INTEGER NOT NULL DEFAULT 0 CHECK (price_by_night >= 0),
    latitude REAL,
    longitude REAL
)
";

/// SQL statement to create the amenities table.
pub const CREATE_AMENITIES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS amenities (
    id TEXT PRIMARY KEY NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    name TEXT NOT NULL CHECK (name <> '')
)
";

/// SQL statement to create the reviews table.
pub const CREATE_REVIEWS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS reviews (
    id TEXT PRIMARY KEY NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    place_id TEXT NOT NULL REFERENCES places(id) ON DELETE CASCADE,
    user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    text TEXT NOT NULL CHECK (text <> '')
)
";

/// SQL statement to create the place/amenity association table.
pub const CREATE_PLACE_AMENITY_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS place_amenity (
    place_id TEXT NOT NULL REFERENCES places(id) ON DELETE CASCADE,
    amenity_id TEXT NOT NULL REFERENCES amenities(id) ON DELETE CASCADE,
    PRIMARY KEY (place_id, amenity_id)
)
";

/// SQL statement to create an index on `city_id` for city lookups.
pub const CREATE_PLACES_CITY_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_places_city ON places(city_id)
";

/// SQL statement to create an index on `place_id` for review lookups.
pub const CREATE_REVIEWS_PLACE_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_reviews_place ON reviews(place_id)
";

/// SQL statement to create an index on `amenity_id` for reverse link lookups.
pub const CREATE_PLACE_AMENITY_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_place_amenity_amenity ON place_amenity(amenity_id)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_STATES_TABLE,
    CREATE_CITIES_TABLE,
    CREATE_USERS_TABLE,
    CREATE_PLACES_TABLE,
    CREATE_AMENITIES_TABLE,
    CREATE_REVIEWS_TABLE,
    CREATE_PLACE_AMENITY_TABLE,
    CREATE_PLACES_CITY_INDEX,
    CREATE_REVIEWS_PLACE_INDEX,
    CREATE_PLACE_AMENITY_INDEX,
    CREATE_METADATA_TABLE,
];

/// Every table, children before parents.
pub const TABLES_DROP_ORDER: &[&str] = &[
    "place_amenity",
    "reviews",
    "places",
    "amenities",
    "cities",
    "users",
    "states",
    "metadata",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_statements_not_empty() {
        assert!(!SCHEMA_STATEMENTS.is_empty());
        for stmt in SCHEMA_STATEMENTS {
            assert!(!stmt.is_empty());
        }
    }

    #[test]
    fn test_place_amenity_has_composite_key() {
        assert!(CREATE_PLACE_AMENITY_TABLE.contains("PRIMARY KEY (place_id, amenity_id)"));
        assert!(CREATE_PLACE_AMENITY_TABLE.contains("place_id TEXT NOT NULL REFERENCES places(id)"));
        assert!(
            CREATE_PLACE_AMENITY_TABLE.contains("amenity_id TEXT NOT NULL REFERENCES amenities(id)")
        );
    }

    #[test]
    fn test_reviews_cascade_from_places() {
        assert!(CREATE_REVIEWS_TABLE.contains("REFERENCES places(id) ON DELETE CASCADE"));
    }

    #[test]
    fn test_places_constraints() {
        assert!(CREATE_PLACES_TABLE.contains("city_id TEXT NOT NULL REFERENCES cities(id)"));
        assert!(CREATE_PLACES_TABLE.contains("user_id TEXT NOT NULL REFERENCES users(id)"));
        assert!(CREATE_PLACES_TABLE.contains("CHECK (price_by_night >= 0)"));
    }

    #[test]
    fn test_drop_order_covers_every_table() {
        let created = SCHEMA_STATEMENTS
            .iter()
            .filter(|stmt| stmt.contains("CREATE TABLE"))
            .count();
        assert_eq!(created, TABLES_DROP_ORDER.len());
    }
}
