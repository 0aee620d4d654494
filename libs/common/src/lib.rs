//! Common library for the storefront
//!
//! This crate provides the pieces shared by the storefront service: database
//! connectivity and migrations, the user document model, and the user store
//! with its PostgreSQL and in-memory implementations.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};
//! use common::store::{PgUserStore, UserStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env()?;
//!     let pool = init_pool(&config).await?;
//!     run_migrations(&pool).await?;
//!     assert!(health_check(&pool).await?);
//!
//!     let store = PgUserStore::new(pool);
//!     let user = store.find_by_email("ann@x.com").await?;
//!     println!("Found user: {:?}", user.map(|u| u.summary()));
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
pub mod models;
pub mod store;
