//! Request and response payloads

use common::models::UserSummary;
use serde::{Deserialize, Serialize};

use crate::validation::{
    validate_email, validate_name, validate_password, validate_price, validate_product_id,
    validate_quantity,
};

/// Boundary validation run on every decoded request body
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Request for user registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)?;
        validate_email(self.email.trim())?;
        validate_password(&self.password)
    }
}

/// Request for user login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), String> {
        if self.email.trim().is_empty() {
            return Err("Email is required".to_string());
        }
        validate_password(&self.password)
    }
}

/// Generic `{message}` body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response for user login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: UserSummary,
}

fn default_quantity() -> u32 {
    1
}

/// Request for adding a product to the cart
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub img: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl Validate for AddToCartRequest {
    fn validate(&self) -> Result<(), String> {
        validate_product_id(&self.product_id)?;
        validate_price(self.price)?;
        validate_quantity(self.quantity)
    }
}

/// Request for setting the quantity of a cart line
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: u32,
}

impl Validate for UpdateQuantityRequest {
    fn validate(&self) -> Result<(), String> {
        validate_quantity(self.quantity)
    }
}

/// Request for adding a product to the wishlist
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToWishlistRequest {
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub img: String,
}

impl Validate for AddToWishlistRequest {
    fn validate(&self) -> Result<(), String> {
        validate_product_id(&self.product_id)?;
        validate_price(self.price)
    }
}

/// Query parameters of the cart summary
#[derive(Debug, Default, Deserialize)]
pub struct CartSummaryQuery {
    /// Optional discount code
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_to_cart_quantity_defaults_to_one() {
        let request: AddToCartRequest = serde_json::from_str(
            r#"{"productId":"P1","name":"Shoe","price":50,"img":"img"}"#,
        )
        .unwrap();

        assert_eq!(request.product_id, "P1");
        assert_eq!(request.quantity, 1);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_add_to_cart_rejects_negative_price() {
        let request: AddToCartRequest = serde_json::from_str(
            r#"{"productId":"P1","name":"Shoe","price":-5,"img":"img","quantity":2}"#,
        )
        .unwrap();

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_quantity_rejects_zero() {
        let request: UpdateQuantityRequest = serde_json::from_str(r#"{"quantity":0}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_register_requires_valid_email() {
        let request = RegisterRequest {
            name: "Ann".to_string(),
            email: "not-an-email".to_string(),
            password: "pw123".to_string(),
        };
        assert_eq!(request.validate(), Err("Invalid email format".to_string()));
    }
}
