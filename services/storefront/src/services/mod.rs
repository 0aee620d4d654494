//! Business logic over the user document
//!
//! Cart and wishlist mutations follow read-modify-write on the whole user
//! record. A write that loses the optimistic version race is re-applied to a
//! freshly read record, so concurrent requests for the same user never drop
//! each other's changes.

use std::sync::Arc;

use common::{
    error::StoreError,
    models::User,
    store::UserStore,
};
use tracing::debug;

use crate::error::{ApiError, ApiResult};

pub mod auth;
pub mod cart;
pub mod wishlist;

pub use auth::AuthService;
pub use cart::CartService;
pub use wishlist::WishlistService;

/// Upper bound on re-applying one mutation after version conflicts
const MAX_WRITE_ATTEMPTS: usize = 16;

/// Apply `mutation` to `user` and persist the record
///
/// On a version conflict the record is re-read and the mutation applied
/// again. A mutation error aborts without writing. Returns the stored record.
pub(crate) async fn mutate_user<F>(
    store: &Arc<dyn UserStore>,
    mut user: User,
    mut mutation: F,
) -> ApiResult<User>
where
    F: FnMut(&mut User) -> ApiResult<()>,
{
    for attempt in 1..=MAX_WRITE_ATTEMPTS {
        mutation(&mut user)?;

        match store.save(&user).await {
            Ok(saved) => return Ok(saved),
            Err(StoreError::VersionConflict) => {
                debug!(
                    "Version conflict for user {} on attempt {}, retrying",
                    user.id, attempt
                );
                tokio::task::yield_now().await;
                user = store
                    .find_by_id(user.id)
                    .await?
                    .ok_or(ApiError::UserGone)?;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(anyhow::anyhow!(
        "Gave up updating user {} after {} conflicting writes",
        user.id,
        MAX_WRITE_ATTEMPTS
    )
    .into())
}
