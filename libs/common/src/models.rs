//! User document model and its embedded cart and wishlist lines

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product line in a user's cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub img: String,
    /// Always at least 1; a line is removed rather than zeroed.
    pub quantity: u32,
}

/// A product line in a user's wishlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistLine {
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub img: String,
}

/// User document
///
/// Owns its cart and wishlist. Every mutation persists the whole record and
/// bumps `version`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(default)]
    pub cart: Vec<CartLine>,
    #[serde(default)]
    pub wishlist: Vec<WishlistLine>,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Public view of the user, without credentials or lists
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// New user creation payload; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Identity returned to clients after login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}
