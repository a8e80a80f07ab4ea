//! Account directory contract.
//!
//! Registration and verification live elsewhere; the game service only needs
//! to resolve identities and flip the active flag.

use async_trait::async_trait;

use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i64,
    pub sub: String,
    pub name: String,
    /// Contact number for per-turn texts.
    pub phone: Option<String>,
    pub is_active: bool,
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub sub: String,
    pub name: String,
    pub phone: Option<String>,
    pub is_admin: bool,
}

#[async_trait]
pub trait AccountDirectory: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, DomainError>;

    async fn find_by_sub(&self, sub: &str) -> Result<Option<Account>, DomainError>;

    /// Create an active account. Duplicate `sub` is `Conflict(UniqueSub)`.
    async fn create(&self, new: NewAccount) -> Result<Account, DomainError>;

    /// Atomically flip an active account to inactive.
    ///
    /// Unknown id is `NotFound(User)`; an already inactive account is
    /// `Conflict(AlreadyInactive)`.
    async fn deactivate(&self, id: i64) -> Result<Account, DomainError>;
}
