//! Shop service routes

use std::time::Duration;

use auth::middleware::require_admin;
use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{
        Method, StatusCode,
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    },
    middleware,
    response::IntoResponse,
    routing::{get, patch, post, put},
};
use chrono::Utc;
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::{ApiError, ApiResult},
    models::{
        CreateOrderRequest, CreateProductRequest, OrderListQuery, ShipRequest,
        UpdateProductRequest,
    },
    state::AppState,
    validation::{
        validate_new_product, validate_order, validate_order_filter, validate_product_changes,
        validate_ship_flag,
    },
};

/// Create the router for the shop service, admin endpoints included
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/api/products", post(create_product))
        .route("/api/products/:id", put(update_product).delete(delete_product))
        .route("/api/orders", get(list_orders))
        .route("/api/orders/:id", get(get_order).delete(delete_order))
        .route("/api/orders/:id/ship", patch(ship_order))
        .route_layer(middleware::from_fn_with_state(
            state.auth_service.clone(),
            require_admin,
        ));

    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/api/products", get(list_products))
        .route("/api/products/:id", get(get_product))
        .route("/api/orders", post(create_order));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION, ACCEPT])
        .max_age(Duration::from_secs(60 * 60));

    let auth_routes = auth::routes::create_router(state.auth_service.clone());

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
        .merge(auth_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let healthy = common::database::health_check(&state.db_pool)
        .await
        .unwrap_or(false);

    let (status, label) = if healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };

    (
        status,
        Json(json!({
            "status": label,
            "service": "shop"
        })),
    )
}

/// List the catalog, ordered by name
pub async fn list_products(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let products = state.product_repository.get_all().await?;
    Ok(Json(products))
}

/// Get a product by ID
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let product = state
        .product_repository
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    Ok(Json(product))
}

/// Add a product to the catalog
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload?;
    let new_product = validate_new_product(request).map_err(ApiError::Validation)?;

    let product = state.product_repository.create(&new_product).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Partially update a product
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload?;
    let changes = validate_product_changes(request).map_err(ApiError::Validation)?;

    let product = state
        .product_repository
        .update(&id, changes)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    Ok(Json(product))
}

/// Remove a product from the catalog
///
/// Past orders keep their own copy of the product name and price.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    if !state.product_repository.delete(&id).await? {
        return Err(ApiError::NotFound("Product not found".to_string()));
    }

    Ok(Json(json!({"message": "Product deleted successfully"})))
}

/// Place an order
pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload?;
    let new_order = validate_order(request).map_err(ApiError::Validation)?;

    let order = state.order_repository.create(&new_order).await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// List orders, optionally filtered by shipped flag and email
pub async fn list_orders(
    State(state): State<AppState>,
    query: Result<Query<OrderListQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(query) = query?;
    let filter = validate_order_filter(query).map_err(ApiError::Validation)?;

    let orders = state.order_repository.get_all(&filter).await?;
    Ok(Json(orders))
}

/// Get an order with its items
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let order = state
        .order_repository
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))?;

    Ok(Json(order))
}

/// Mark an order as shipped (`postazva: 1`) or revert it (`postazva: 0`)
pub async fn ship_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ShipRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload?;
    let shipped = validate_ship_flag(request).map_err(ApiError::Validation)?;

    let status = state
        .order_repository
        .set_shipped(&id, shipped, Utc::now())
        .await?
        .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))?;

    Ok(Json(status))
}

/// Delete an order and its items
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    if !state.order_repository.delete(&id).await? {
        return Err(ApiError::NotFound("Order not found".to_string()));
    }

    Ok(Json(json!({"message": "Order deleted successfully"})))
}
