//! Cart operations on the authenticated user's embedded cart

use std::sync::Arc;

use common::{
    models::{CartLine, User},
    store::UserStore,
};
use tracing::info;

use super::mutate_user;
use crate::{
    error::{ApiError, ApiResult},
    pricing::{CartSummary, DiscountCode},
};

/// Merge `line` into the cart: an existing product gains the new quantity,
/// anything else is appended.
pub fn add_line(cart: &mut Vec<CartLine>, line: CartLine) -> ApiResult<()> {
    match cart.iter_mut().find(|l| l.product_id == line.product_id) {
        Some(existing) => {
            existing.quantity = existing
                .quantity
                .checked_add(line.quantity)
                .ok_or_else(|| ApiError::Validation("Quantity is too large".to_string()))?;
        }
        None => cart.push(line),
    }
    Ok(())
}

/// Set the exact quantity of an existing line
pub fn set_quantity(cart: &mut [CartLine], product_id: &str, quantity: u32) -> ApiResult<()> {
    let line = cart
        .iter_mut()
        .find(|l| l.product_id == product_id)
        .ok_or(ApiError::ItemNotFound)?;
    line.quantity = quantity;
    Ok(())
}

/// Drop the line for `product_id`, if any
pub fn remove_line(cart: &mut Vec<CartLine>, product_id: &str) {
    cart.retain(|l| l.product_id != product_id);
}

/// Cart service
#[derive(Clone)]
pub struct CartService {
    store: Arc<dyn UserStore>,
}

impl CartService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub fn get(&self, user: &User) -> Vec<CartLine> {
        user.cart.clone()
    }

    pub async fn add(&self, user: User, line: CartLine) -> ApiResult<Vec<CartLine>> {
        info!(
            "Adding {} x {} to cart of user {}",
            line.quantity, line.product_id, user.id
        );
        let saved = mutate_user(&self.store, user, |u| add_line(&mut u.cart, line.clone())).await?;
        Ok(saved.cart)
    }

    pub async fn update_quantity(
        &self,
        user: User,
        product_id: &str,
        quantity: u32,
    ) -> ApiResult<Vec<CartLine>> {
        let saved = mutate_user(&self.store, user, |u| {
            set_quantity(&mut u.cart, product_id, quantity)
        })
        .await?;
        Ok(saved.cart)
    }

    pub async fn remove(&self, user: User, product_id: &str) -> ApiResult<Vec<CartLine>> {
        let saved = mutate_user(&self.store, user, |u| {
            remove_line(&mut u.cart, product_id);
            Ok(())
        })
        .await?;
        Ok(saved.cart)
    }

    pub async fn clear(&self, user: User) -> ApiResult<Vec<CartLine>> {
        info!("Clearing cart of user {}", user.id);
        let saved = mutate_user(&self.store, user, |u| {
            u.cart.clear();
            Ok(())
        })
        .await?;
        Ok(saved.cart)
    }

    /// Price the cart, applying `code` when given
    pub fn summary(&self, user: &User, code: Option<&str>) -> ApiResult<CartSummary> {
        let discount = match code.map(str::trim).filter(|c| !c.is_empty()) {
            Some(code) => Some(
                DiscountCode::parse(code)
                    .ok_or_else(|| ApiError::Validation("Invalid discount code".to_string()))?,
            ),
            None => None,
        };
        Ok(CartSummary::compute(&user.cart, discount))
    }
}
