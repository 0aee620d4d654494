//! Storefront service
//!
//! Registration and login backed by signed identity tokens, plus per-user
//! cart and wishlist management over the user document store in
//! [`common::store`].

pub mod config;
pub mod error;
pub mod extract;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod pricing;
pub mod rate_limiter;
pub mod routes;
pub mod services;
pub mod state;
pub mod validation;

pub use routes::create_router;
pub use state::AppState;
