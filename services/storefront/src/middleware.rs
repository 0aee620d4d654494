//! Authentication middleware for bearer token validation

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use common::models::User;

use crate::{error::ApiError, state::AppState};

/// The user resolved from the request's bearer token
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Reject the request unless it carries a valid token for an existing user
///
/// A missing or non-bearer `Authorization` header is `Unauthenticated`, a
/// bad or expired token is `InvalidToken`, and a token whose user is gone is
/// `UserGone`. On success the user record is added to the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer
        .as_ref()
        .map(|TypedHeader(Authorization(bearer))| bearer.token());

    let user = state.auth.authenticate(token).await?;
    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}
