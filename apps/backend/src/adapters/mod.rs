//! Adapters for external dependencies.

pub mod accounts_sea;
pub mod memory;
pub mod sessions_sea;

pub use accounts_sea::AccountDirectorySea;
pub use memory::{InMemoryAccountDirectory, InMemorySessionRepo};
pub use sessions_sea::SessionRepoSea;
