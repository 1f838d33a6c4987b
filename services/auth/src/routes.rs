//! Authentication service routes

use axum::{
    Extension, Json, Router,
    extract::{State, rejection::JsonRejection},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::{
    error::AuthError,
    middleware::require_admin,
    models::{Admin, AdminIdentity, LoginCredentials},
    service::AuthService,
};

/// Response for admin login
#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub admin: Admin,
}

/// Response for token verification
#[derive(Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub admin: AdminIdentity,
}

/// Create the router for the admin authentication endpoints
pub fn create_router(auth: AuthService) -> Router {
    let protected_routes = Router::new()
        .route("/api/admin/verify", get(verify))
        .route_layer(middleware::from_fn_with_state(auth.clone(), require_admin));

    Router::new()
        .route("/api/admin/login", post(login))
        .route("/api/admin/logout", post(logout))
        .merge(protected_routes)
        .with_state(auth)
}

/// Admin login endpoint
pub async fn login(
    State(auth): State<AuthService>,
    payload: Result<Json<LoginCredentials>, JsonRejection>,
) -> Result<impl IntoResponse, AuthError> {
    let Json(credentials) = payload?;
    let (username, password) = credentials.required().ok_or_else(|| {
        AuthError::BadRequest("Username and password are required".to_string())
    })?;

    let (admin, token) = auth.login(username, password).await?;

    Ok(Json(LoginResponse { token, admin }))
}

/// Logout endpoint
///
/// A valid bearer token is revoked. Without one, logout still succeeds
/// and the client simply discards whatever it held.
pub async fn logout(
    State(auth): State<AuthService>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<impl IntoResponse, AuthError> {
    if let Some(TypedHeader(Authorization(bearer))) = bearer {
        match auth.logout(bearer.token()).await {
            Ok(()) | Err(AuthError::InvalidToken) => {}
            Err(e) => return Err(e),
        }
    } else {
        info!("Logout without a bearer token");
    }

    Ok(Json(json!({"message": "Logged out successfully"})))
}

/// Token verification endpoint
pub async fn verify(Extension(identity): Extension<AdminIdentity>) -> impl IntoResponse {
    Json(VerifyResponse {
        valid: true,
        admin: identity,
    })
}
