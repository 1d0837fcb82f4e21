//! Synthetic data for the supply-chain schema.
//!
//! Row generators take an injected random source so callers (and tests) can
//! pin the output; [`SeedGenerator`] derives one ChaCha stream per entity
//! from a single seed, and [`seed_store`] writes the rows through a
//! [`supplychain_store::Store`] in dependency order.

pub mod catalog;
pub mod engine;
pub mod errors;
pub mod model;
pub mod rows;

pub use catalog::material_catalog;
pub use engine::{SeedGenerator, seed_store};
pub use errors::GenerationError;
pub use model::{SeedOptions, SeedReport};
