//! Persistence of the whole library as a single SQLite file, split across
//! one submodule per table plus the store that ties them together.

mod books;
mod connection;
mod loans;
mod members;
mod store;

pub use connection::{default_db_path, SCHEMA_VERSION};
pub use store::Store;
