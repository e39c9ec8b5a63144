//! Session handlers: sign-up, login, token refresh and logout

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::CookieJar;
use domain_student::{LoginCredentials, RegisterStudent};
use tracing::{info, warn};

use crate::auth::{
    validate_token, with_access_cookie, with_session_cookies, without_session_cookies, AuthError,
    TokenKind, REFRESH_COOKIE,
};
use crate::dto::auth::AuthResponse;
use crate::dto::MessageResponse;
use crate::{error::ApiError, AppState};

/// Creates an account and opens a session
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<RegisterStudent>, JsonRejection>,
) -> Result<(StatusCode, CookieJar, Json<AuthResponse>), ApiError> {
    let Json(request) = payload?;
    let student = state.students.register(request).await?;
    let jar = with_session_cookies(jar, student.id, &student.email, &state.config)?;

    Ok((
        StatusCode::CREATED,
        jar,
        Json(AuthResponse {
            message: "Student registered successfully".to_string(),
            student: (&student).into(),
        }),
    ))
}

/// Checks credentials and opens a session
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginCredentials>, JsonRejection>,
) -> Result<(CookieJar, Json<AuthResponse>), ApiError> {
    let Json(credentials) = payload?;
    let student = state.students.authenticate(credentials).await?;
    let jar = with_session_cookies(jar, student.id, &student.email, &state.config)?;

    Ok((
        jar,
        Json(AuthResponse {
            message: "Login successful".to_string(),
            student: (&student).into(),
        }),
    ))
}

/// Issues a fresh access token from the refresh cookie
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageResponse>), ApiError> {
    let token = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(AuthError::MissingToken)?;

    let claims = validate_token(&token, &state.config.jwt_secret, TokenKind::Refresh).map_err(|e| {
        warn!(error = %e, "Refresh token rejected");
        e
    })?;
    let student_id = claims.student_id()?;

    let jar = with_access_cookie(jar, student_id, &claims.email, &state.config)?;
    info!(student_id = %student_id, "Access token refreshed");

    Ok((jar, Json(MessageResponse::new("Token refreshed successfully"))))
}

/// Clears both session cookies
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    (
        without_session_cookies(jar, &state.config),
        Json(MessageResponse::new("Logout successful")),
    )
}
