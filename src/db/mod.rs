//! Database module: per-engine connector, models and schema.
//!
//! Layout:
//! - `connector.rs`: sqlx `Any` pools behind the profile cache
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database, one script per engine

pub mod connector;
pub mod models;
pub mod schema;

pub use connector::{DbHandle, DbPool, SqlxConnector};
pub use models::{DbAnimal, DbProducto, DbRaza, DbRazaWithCount};
