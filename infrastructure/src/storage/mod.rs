//! Document store adapters.
//!
//! Implementations of the [`DocumentStore`](dais_application::DocumentStore)
//! port: [`JsonFileStore`] for normal runs and [`MemoryStore`] for
//! `--ephemeral` runs and tests.

mod json_file_store;
mod memory_store;

pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;
