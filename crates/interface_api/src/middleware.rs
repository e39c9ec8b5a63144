//! API middleware

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, warn};

use crate::auth::{validate_token, AuthError, Claims, TokenKind, ACCESS_COOKIE};
use crate::error::ApiError;
use crate::AppState;

/// Authentication middleware
///
/// Takes the access token from the `token` cookie, or failing that from an
/// `Authorization: Bearer` header, and stores the claims in the request
/// extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = access_token(&request).ok_or_else(|| {
        warn!(uri = %request.uri(), "Missing session token");
        AuthError::MissingToken
    })?;

    match validate_token(&token, &state.config.jwt_secret, TokenKind::Access) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(e) => {
            warn!(error = %e, "Token validation failed");
            Err(e.into())
        }
    }
}

fn access_token(request: &Request<Body>) -> Option<String> {
    let from_cookie = CookieJar::from_headers(request.headers())
        .get(ACCESS_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty());

    from_cookie.or_else(|| {
        request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::to_string)
    })
}

/// Audit logging middleware
///
/// Runs inside `auth_middleware`, so the student is known. Server errors
/// are logged at `warn`.
pub async fn audit_middleware(
    State(_state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let student = request
        .extensions()
        .get::<Claims>()
        .map(|c| c.sub.clone())
        .unwrap_or_else(|| "anonymous".to_string());

    let started = Instant::now();
    let response = next.run(request).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    if response.status().is_server_error() {
        warn!(%method, %path, %student, status, elapsed_ms, "Student request failed");
    } else {
        info!(%method, %path, %student, status, elapsed_ms, "Student request");
    }

    response
}
