//! User document storage
//!
//! A user is stored as one document with its cart and wishlist embedded.
//! Writers replace the whole document and must present the version they
//! read; a stale version fails with [`crate::error::StoreError::VersionConflict`] so callers
//! can re-read and retry instead of silently losing a concurrent update.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::StoreResult,
    models::{NewUser, User},
};

mod memory;
mod postgres;

pub use memory::InMemoryUserStore;
pub use postgres::PgUserStore;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Creates a user with empty cart and wishlist.
    /// Returns [`crate::error::StoreError::DuplicateEmail`] if the email is taken.
    async fn insert(&self, new_user: NewUser) -> StoreResult<User>;

    /// Returns Ok(None) if no user has this email.
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Returns Ok(None) if the user does not exist.
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Replaces name, cart and wishlist of the stored user if its version
    /// still equals `user.version`, and returns the stored record with the
    /// bumped version.
    /// Returns [`crate::error::StoreError::VersionConflict`] if the version moved on or the
    /// user no longer exists.
    async fn save(&self, user: &User) -> StoreResult<User>;
}
