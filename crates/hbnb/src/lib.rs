//! `hbnb` - storage engine and web front end for an `AirBnB`-style listing site.
//!
//! Entities (states, cities, users, places, amenities, reviews) are kept in
//! one of two interchangeable backends chosen at startup: a relational
//! `SQLite` database or a single JSON document. A small HTTP front end serves
//! the static routes of the site.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod storage;
pub mod web;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use models::{Model, ModelKind, Place};
pub use storage::{Storage, StorageMode, StorageStats};
