//! Repository traits for domain layer.

pub mod accounts;
pub mod sessions;

pub use accounts::{Account, AccountDirectory, NewAccount};
pub use sessions::{NewSession, SessionRepo};
