//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

/// Validate display name
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name is required".to_string());
    }

    if name.chars().count() > 100 {
        return Err("Name must be at most 100 characters long".to_string());
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Canonical form used to store and look up emails
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.len() > 128 {
        return Err("Password must be at most 128 characters long".to_string());
    }

    Ok(())
}

/// Validate a product id taken from a body or a path
pub fn validate_product_id(product_id: &str) -> Result<(), String> {
    if product_id.trim().is_empty() {
        return Err("Product id is required".to_string());
    }

    if product_id.len() > 128 {
        return Err("Product id must be at most 128 characters long".to_string());
    }

    Ok(())
}

/// Highest accepted unit price
pub const MAX_PRICE: f64 = 1_000_000.0;

/// Validate a product price
pub fn validate_price(price: f64) -> Result<(), String> {
    if !price.is_finite() || price < 0.0 {
        return Err("Price must be a non-negative number".to_string());
    }

    if price > MAX_PRICE {
        return Err(format!("Price must be at most {}", MAX_PRICE));
    }

    Ok(())
}

/// Validate a cart quantity
pub fn validate_quantity(quantity: u32) -> Result<(), String> {
    if quantity < 1 {
        return Err("Quantity must be at least 1".to_string());
    }

    Ok(())
}
