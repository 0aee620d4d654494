//! PostgreSQL user store; cart and wishlist live in JSONB columns

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow, types::Json};
use tracing::info;
use uuid::Uuid;

use super::UserStore;
use crate::{
    error::{StoreError, StoreResult},
    models::{CartLine, NewUser, User, WishlistLine},
};

/// User store backed by the `users` table
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a new user store
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// A stored line that no longer decodes fails the read instead of the task.
fn user_from_row(row: &PgRow) -> StoreResult<User> {
    let cart: Json<Vec<CartLine>> = row.try_get("cart")?;
    let wishlist: Json<Vec<WishlistLine>> = row.try_get("wishlist")?;

    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        cart: cart.0,
        wishlist: wishlist.0,
        version: row.try_get("version")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, new_user: NewUser) -> StoreResult<User> {
        info!("Creating new user: {}", new_user.email);

        let result = sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, cart, wishlist, version, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => user_from_row(&row),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StoreError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password_hash, cart, wishlist, version, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password_hash, cart, wishlist, version, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn save(&self, user: &User) -> StoreResult<User> {
        let row = sqlx::query(
            r#"
            UPDATE users
            SET name = $2, cart = $3, wishlist = $4, version = version + 1, updated_at = NOW()
            WHERE id = $1 AND version = $5
            RETURNING id, name, email, password_hash, cart, wishlist, version, created_at, updated_at
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(Json(&user.cart))
        .bind(Json(&user.wishlist))
        .bind(user.version)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => user_from_row(&row),
            None => Err(StoreError::VersionConflict),
        }
    }
}
