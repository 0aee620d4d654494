//! Wishlist operations on the authenticated user's embedded wishlist
//!
//! A wishlist entry is either present or absent: adding a product twice is
//! an error, unlike the cart which accumulates quantities.

use std::sync::Arc;

use common::{
    models::{User, WishlistLine},
    store::UserStore,
};
use tracing::info;

use super::mutate_user;
use crate::error::{ApiError, ApiResult};

/// Append `line` unless its product is already listed
pub fn add_line(wishlist: &mut Vec<WishlistLine>, line: WishlistLine) -> ApiResult<()> {
    if wishlist.iter().any(|l| l.product_id == line.product_id) {
        return Err(ApiError::AlreadyExists);
    }
    wishlist.push(line);
    Ok(())
}

/// Drop the line for `product_id`, if any
pub fn remove_line(wishlist: &mut Vec<WishlistLine>, product_id: &str) {
    wishlist.retain(|l| l.product_id != product_id);
}

/// Wishlist service
#[derive(Clone)]
pub struct WishlistService {
    store: Arc<dyn UserStore>,
}

impl WishlistService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub fn get(&self, user: &User) -> Vec<WishlistLine> {
        user.wishlist.clone()
    }

    pub async fn add(&self, user: User, line: WishlistLine) -> ApiResult<Vec<WishlistLine>> {
        info!("Adding {} to wishlist of user {}", line.product_id, user.id);
        let saved = mutate_user(&self.store, user, |u| {
            add_line(&mut u.wishlist, line.clone())
        })
        .await?;
        Ok(saved.wishlist)
    }

    pub async fn remove(&self, user: User, product_id: &str) -> ApiResult<Vec<WishlistLine>> {
        let saved = mutate_user(&self.store, user, |u| {
            remove_line(&mut u.wishlist, product_id);
            Ok(())
        })
        .await?;
        Ok(saved.wishlist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::user_in;
    use common::store::InMemoryUserStore;

    fn line(product_id: &str) -> WishlistLine {
        WishlistLine {
            product_id: product_id.to_string(),
            name: "Hat".to_string(),
            price: 15.5,
            img: "img".to_string(),
        }
    }

    #[test]
    fn test_add_line_rejects_duplicates() {
        let mut wishlist = Vec::new();
        add_line(&mut wishlist, line("P2")).unwrap();

        assert!(matches!(
            add_line(&mut wishlist, line("P2")),
            Err(ApiError::AlreadyExists)
        ));
        assert_eq!(wishlist, vec![line("P2")]);
    }

    #[test]
    fn test_remove_line_ignores_missing_product() {
        let mut wishlist = vec![line("P1")];
        remove_line(&mut wishlist, "P9");
        assert_eq!(wishlist, vec![line("P1")]);

        remove_line(&mut wishlist, "P1");
        remove_line(&mut wishlist, "P1");
        assert!(wishlist.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_add_leaves_stored_list_unchanged() {
        let memory = InMemoryUserStore::new();
        let user = user_in(&memory).await;
        let store: Arc<dyn UserStore> = Arc::new(memory);
        let wishlist = WishlistService::new(store.clone());

        let lines = wishlist.add(user.clone(), line("P2")).await.unwrap();
        assert_eq!(lines, vec![line("P2")]);

        let fresh = store.find_by_id(user.id).await.unwrap().unwrap();
        let result = wishlist.add(fresh, line("P2")).await;
        assert!(matches!(result, Err(ApiError::AlreadyExists)));

        let stored = store.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(wishlist.get(&stored), vec![line("P2")]);
        assert_eq!(stored.version, 1);
    }

    #[tokio::test]
    async fn test_stale_duplicate_add_is_still_rejected() {
        let memory = InMemoryUserStore::new();
        let user = user_in(&memory).await;
        let store: Arc<dyn UserStore> = Arc::new(memory);
        let wishlist = WishlistService::new(store.clone());

        wishlist.add(user.clone(), line("P2")).await.unwrap();
        // The snapshot predates the first add; the retry sees the fresh list.
        let result = wishlist.add(user, line("P2")).await;

        assert!(matches!(result, Err(ApiError::AlreadyExists)));
    }
}
