//! Database module: models, schema and per-request access to the SQLite file.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database
//! - `sqlite.rs`: connection factory and the statements run against `todos`

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::TodoItem;
pub use schema::SQLITE_INIT;
pub use sqlite::{Database, TodoStore};
