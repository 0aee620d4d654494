//! Application state shared across handlers

use std::sync::Arc;

use common::store::UserStore;

use crate::{
    jwt::{JwtConfig, TokenService},
    password::PasswordHasher,
    rate_limiter::{RateLimiter, RateLimiterConfig},
    services::{AuthService, CartService, WishlistService},
};

/// Application state shared across handlers
///
/// Built once at startup; every service shares the same store handle.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub cart: CartService,
    pub wishlist: WishlistService,
}

impl AppState {
    pub fn new(
        store: Arc<dyn UserStore>,
        jwt_config: &JwtConfig,
        hasher: PasswordHasher,
        login_limits: RateLimiterConfig,
    ) -> Self {
        let auth = AuthService::new(
            store.clone(),
            TokenService::new(jwt_config),
            hasher,
            RateLimiter::new(login_limits),
        );

        Self {
            auth,
            cart: CartService::new(store.clone()),
            wishlist: WishlistService::new(store),
        }
    }
}
