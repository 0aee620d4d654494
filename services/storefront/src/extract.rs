//! Request extractors

use axum::{
    Json, async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::{error::ApiError, models::Validate, validation::validate_product_id};

/// JSON body that is decoded and validated before the handler runs
///
/// Decoding and validation failures both answer 400 with a `{message}` body.
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate().map_err(ApiError::Validation)?;
        Ok(ValidJson(value))
    }
}

/// Product id taken from the `:id` path segment, validated like body ids
pub struct ProductId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for ProductId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(product_id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
        validate_product_id(&product_id).map_err(ApiError::Validation)?;
        Ok(ProductId(product_id))
    }
}
