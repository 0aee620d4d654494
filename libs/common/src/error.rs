//! Custom error types for the common library
//!
//! This module defines the errors raised while setting up the database and
//! while reading or writing user documents through a [`crate::store::UserStore`].

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for database setup
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Error occurred during database migration
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Errors returned by user store implementations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Another user already registered this email
    #[error("A user with this email already exists")]
    DuplicateEmail,

    /// The record changed since it was read
    #[error("User record was modified concurrently")]
    VersionConflict,

    /// Underlying database failure
    #[error("Store database error: {0}")]
    Database(#[from] SqlxError),
}

/// Type alias for Result with StoreError
pub type StoreResult<T> = Result<T, StoreError>;
