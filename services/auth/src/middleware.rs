//! Middleware for bearer token validation

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use crate::{error::AuthError, service::AuthService};

/// Require a valid admin bearer token
///
/// The verified [`crate::models::AdminIdentity`] is inserted into the
/// request extensions for use in handlers.
pub async fn require_admin(
    State(auth): State<AuthService>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(AuthError::MissingToken)?;

    let identity = auth.verify(bearer.token()).await?;
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
