//! Registration, login and request authentication

use std::sync::Arc;

use common::{
    error::StoreError,
    models::{NewUser, User, UserSummary},
    store::UserStore,
};
use tracing::{info, warn};

use crate::{
    error::{ApiError, ApiResult},
    jwt::TokenService,
    password::PasswordHasher,
    rate_limiter::RateLimiter,
    validation::normalize_email,
};

/// Credential and token service
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    tokens: TokenService,
    hasher: PasswordHasher,
    login_limiter: RateLimiter,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn UserStore>,
        tokens: TokenService,
        hasher: PasswordHasher,
        login_limiter: RateLimiter,
    ) -> Self {
        Self {
            store,
            tokens,
            hasher,
            login_limiter,
        }
    }

    /// Create an account with an empty cart and wishlist
    pub async fn register(&self, name: &str, email: &str, password: String) -> ApiResult<()> {
        let email = normalize_email(email);
        info!("Registering user: {}", email);

        if self.store.find_by_email(&email).await?.is_some() {
            return Err(ApiError::DuplicateEmail);
        }

        let password_hash = self.hasher.hash(password).await?;
        let new_user = NewUser {
            name: name.trim().to_string(),
            email,
            password_hash,
        };

        // The lookup above can race with another registration.
        match self.store.insert(new_user).await {
            Ok(user) => {
                info!("Registered user {}", user.id);
                Ok(())
            }
            Err(StoreError::DuplicateEmail) => Err(ApiError::DuplicateEmail),
            Err(e) => Err(e.into()),
        }
    }

    /// Check credentials and issue a token
    pub async fn login(&self, email: &str, password: String) -> ApiResult<(String, UserSummary)> {
        let email = normalize_email(email);

        // Counts this attempt; only a successful login gives it back.
        if !self.login_limiter.check(&email).await {
            warn!("Login for {} refused while locked out", email);
            return Err(ApiError::TooManyAttempts);
        }

        let Some(user) = self.store.find_by_email(&email).await? else {
            return Err(ApiError::UserNotFound);
        };

        if !self
            .hasher
            .verify(password, user.password_hash.clone())
            .await?
        {
            return Err(ApiError::InvalidCredentials);
        }

        self.login_limiter.reset(&email).await;
        let token = self.tokens.issue(user.id)?;
        info!("User {} logged in", user.id);

        Ok((token, user.summary()))
    }

    /// Resolve a bearer token to its user record
    ///
    /// `None` means the request carried no usable bearer token.
    pub async fn authenticate(&self, token: Option<&str>) -> ApiResult<User> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or(ApiError::Unauthenticated)?;
        let user_id = self.tokens.verify(token)?;

        self.store
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserGone)
    }
}
