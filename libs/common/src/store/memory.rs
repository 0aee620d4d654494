//! In-process user store, used by tests and the `memory` backend

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::UserStore;
use crate::{
    error::{StoreError, StoreResult},
    models::{NewUser, User},
};

/// User store keeping every document in a shared map
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes a user. No HTTP operation deletes users; tests use this to
    /// simulate an account that vanished after a token was issued.
    pub async fn remove(&self, id: Uuid) -> Option<User> {
        self.users.write().await.remove(&id)
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, new_user: NewUser) -> StoreResult<User> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == new_user.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            cart: Vec::new(),
            wishlist: Vec::new(),
            version: 0,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn save(&self, user: &User) -> StoreResult<User> {
        let mut users = self.users.write().await;

        let stored = users
            .get_mut(&user.id)
            .filter(|stored| stored.version == user.version)
            .ok_or(StoreError::VersionConflict)?;

        stored.name = user.name.clone();
        stored.cart = user.cart.clone();
        stored.wishlist = user.wishlist.clone();
        stored.version += 1;
        stored.updated_at = Utc::now();

        Ok(stored.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CartLine;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Ann".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_email() {
        let store = InMemoryUserStore::new();
        store.insert(new_user("ann@x.com")).await.unwrap();

        let result = store.insert(new_user("ann@x.com")).await;
        assert!(matches!(result, Err(StoreError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_insert_starts_with_empty_lists() {
        let store = InMemoryUserStore::new();
        let user = store.insert(new_user("ann@x.com")).await.unwrap();

        let found = store.find_by_email("ann@x.com").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert!(found.cart.is_empty());
        assert!(found.wishlist.is_empty());
        assert_eq!(found.version, 0);
    }

    #[tokio::test]
    async fn test_save_bumps_version() {
        let store = InMemoryUserStore::new();
        let mut user = store.insert(new_user("ann@x.com")).await.unwrap();
        user.cart.push(CartLine {
            product_id: "P1".to_string(),
            name: "Shoe".to_string(),
            price: 50.0,
            img: "img".to_string(),
            quantity: 1,
        });

        let saved = store.save(&user).await.unwrap();
        assert_eq!(saved.version, 1);
        assert_eq!(saved.cart.len(), 1);
    }

    #[tokio::test]
    async fn test_save_with_stale_version_conflicts() {
        let store = InMemoryUserStore::new();
        let user = store.insert(new_user("ann@x.com")).await.unwrap();
        store.save(&user).await.unwrap();

        let result = store.save(&user).await;
        assert!(matches!(result, Err(StoreError::VersionConflict)));
    }

    #[tokio::test]
    async fn test_save_of_removed_user_conflicts() {
        let store = InMemoryUserStore::new();
        let user = store.insert(new_user("ann@x.com")).await.unwrap();
        store.remove(user.id).await;

        assert!(matches!(
            store.save(&user).await,
            Err(StoreError::VersionConflict)
        ));
        assert!(store.find_by_id(user.id).await.unwrap().is_none());
    }
}
