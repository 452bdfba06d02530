//! Database module: models and schema for the vaccination registry.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite)
//! - `sqlite.rs`: pool setup and the queries used by the service layer

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{DbAppointment, DbChild, DbParent};
pub use schema::SQLITE_INIT;
pub use sqlite::{RegistryStorage, SqlitePool, connect};
