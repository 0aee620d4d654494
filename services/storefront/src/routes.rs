//! Storefront routes

use axum::{
    Extension, Json, Router,
    extract::{Query, State},
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use common::models::{CartLine, WishlistLine};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    error::ApiResult,
    extract::{ProductId, ValidJson},
    middleware::{CurrentUser, auth_middleware},
    models::{
        AddToCartRequest, AddToWishlistRequest, CartSummaryQuery, LoginRequest, LoginResponse,
        MessageResponse, RegisterRequest, UpdateQuantityRequest,
    },
    pricing::CartSummary,
    state::AppState,
};

/// Create the router for the storefront service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/cart", get(get_cart).delete(clear_cart))
        .route("/cart/add", post(add_to_cart))
        .route("/cart/summary", get(cart_summary))
        .route("/cart/update/:id", put(update_quantity))
        .route("/cart/:id", delete(remove_from_cart))
        .route("/wishlist", get(get_wishlist))
        .route("/wishlist/add", post(add_to_wishlist))
        .route("/wishlist/:id", delete(remove_from_wishlist))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn root() -> &'static str {
    "Server running..."
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "storefront"
    }))
}

pub async fn register(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<RegisterRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .auth
        .register(&payload.name, &payload.email, payload.password)
        .await?;

    Ok(Json(MessageResponse {
        message: "User registered successfully".to_string(),
    }))
}

pub async fn login(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let (token, user) = state.auth.login(&payload.email, payload.password).await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        user,
    }))
}

pub async fn get_cart(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<Vec<CartLine>> {
    Json(state.cart.get(&user))
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ValidJson(payload): ValidJson<AddToCartRequest>,
) -> ApiResult<Json<Vec<CartLine>>> {
    let line = CartLine {
        product_id: payload.product_id,
        name: payload.name,
        price: payload.price,
        img: payload.img,
        quantity: payload.quantity,
    };

    Ok(Json(state.cart.add(user, line).await?))
}

pub async fn update_quantity(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ProductId(product_id): ProductId,
    ValidJson(payload): ValidJson<UpdateQuantityRequest>,
) -> ApiResult<Json<Vec<CartLine>>> {
    let cart = state
        .cart
        .update_quantity(user, &product_id, payload.quantity)
        .await?;
    Ok(Json(cart))
}

pub async fn remove_from_cart(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ProductId(product_id): ProductId,
) -> ApiResult<Json<Vec<CartLine>>> {
    Ok(Json(state.cart.remove(user, &product_id).await?))
}

pub async fn clear_cart(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<CartLine>>> {
    Ok(Json(state.cart.clear(user).await?))
}

/// Priced view of the cart with an optional `?code=` discount
pub async fn cart_summary(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<CartSummaryQuery>,
) -> ApiResult<Json<CartSummary>> {
    Ok(Json(state.cart.summary(&user, query.code.as_deref())?))
}

pub async fn get_wishlist(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<Vec<WishlistLine>> {
    Json(state.wishlist.get(&user))
}

pub async fn add_to_wishlist(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ValidJson(payload): ValidJson<AddToWishlistRequest>,
) -> ApiResult<Json<Vec<WishlistLine>>> {
    let line = WishlistLine {
        product_id: payload.product_id,
        name: payload.name,
        price: payload.price,
        img: payload.img,
    };

    Ok(Json(state.wishlist.add(user, line).await?))
}

pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ProductId(product_id): ProductId,
) -> ApiResult<Json<Vec<WishlistLine>>> {
    Ok(Json(state.wishlist.remove(user, &product_id).await?))
}
