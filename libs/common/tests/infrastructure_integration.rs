//! Integration tests for the PostgreSQL user store
//!
//! These tests need a reachable PostgreSQL instance (see `DATABASE_URL`) and
//! are ignored by default. Run them with `cargo test -- --ignored`.

use common::{
    database::{DatabaseConfig, health_check, init_pool, run_migrations},
    error::StoreError,
    models::{CartLine, NewUser, WishlistLine},
    store::{PgUserStore, UserStore},
};
use uuid::Uuid;

async fn store() -> Result<PgUserStore, Box<dyn std::error::Error>> {
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;
    assert!(health_check(&pool).await?, "Database health check failed");
    run_migrations(&pool).await?;
    Ok(PgUserStore::new(pool))
}

fn unique_email() -> String {
    format!("{}@integration.test", Uuid::new_v4())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_user_document_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let store = store().await?;
    let email = unique_email();

    let mut user = store
        .insert(NewUser {
            name: "Ann".to_string(),
            email: email.clone(),
            password_hash: "hash".to_string(),
        })
        .await?;
    assert!(user.cart.is_empty());
    assert!(user.wishlist.is_empty());

    user.cart.push(CartLine {
        product_id: "P1".to_string(),
        name: "Shoe".to_string(),
        price: 50.0,
        img: "img".to_string(),
        quantity: 2,
    });
    user.wishlist.push(WishlistLine {
        product_id: "P2".to_string(),
        name: "Hat".to_string(),
        price: 15.5,
        img: "img".to_string(),
    });
    let saved = store.save(&user).await?;
    assert_eq!(saved.version, user.version + 1);

    let found = store
        .find_by_email(&email)
        .await?
        .expect("user should exist");
    assert_eq!(found.cart, saved.cart);
    assert_eq!(found.wishlist, saved.wishlist);

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_duplicate_email_and_stale_writes() -> Result<(), Box<dyn std::error::Error>> {
    let store = store().await?;
    let email = unique_email();
    let new_user = NewUser {
        name: "Ann".to_string(),
        email,
        password_hash: "hash".to_string(),
    };

    let user = store.insert(new_user.clone()).await?;
    assert!(matches!(
        store.insert(new_user).await,
        Err(StoreError::DuplicateEmail)
    ));

    store.save(&user).await?;
    assert!(matches!(
        store.save(&user).await,
        Err(StoreError::VersionConflict)
    ));

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_malformed_stored_cart_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;
    run_migrations(&pool).await?;
    let store = PgUserStore::new(pool.clone());

    let user = store
        .insert(NewUser {
            name: "Ann".to_string(),
            email: unique_email(),
            password_hash: "hash".to_string(),
        })
        .await?;

    sqlx::query(
        r#"UPDATE users SET cart = '[{"productId":"P1","name":"Shoe","price":50,"img":"img","quantity":-1}]' WHERE id = $1"#,
    )
    .bind(user.id)
    .execute(&pool)
    .await?;

    assert!(matches!(
        store.find_by_id(user.id).await,
        Err(StoreError::Database(_))
    ));
    assert!(matches!(
        store.find_by_email(&user.email).await,
        Err(StoreError::Database(_))
    ));

    Ok(())
}
