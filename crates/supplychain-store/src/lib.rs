//! Storage backends for the supply-chain schema and the reporting query set.
//!
//! [`Store`] is the seam between the generator/CLI and the database.
//! [`PostgresStore`] talks to a live server through `sqlx`; [`MemoryStore`]
//! keeps the same rows in process with the same identity, referential
//! integrity, and check semantics.

pub mod memory;
pub mod postgres;
pub mod query_set;
pub mod store;

pub use memory::MemoryStore;
pub use postgres::{PostgresOptions, PostgresStore};
pub use query_set::{QueryOptions, run_query_set};
pub use store::Store;
