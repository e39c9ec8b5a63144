//! Session tokens and cookies
//!
//! A session is a pair of HS256 JWTs: a short-lived access token in the
//! `token` cookie and a long-lived refresh token in `refreshToken`. The
//! `kind` claim keeps the two from being used in each other's place.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Duration, Utc};
use core_kernel::StudentId;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ApiConfig;

/// Cookie carrying the access token
pub const ACCESS_COOKIE: &str = "token";
/// Cookie carrying the refresh token
pub const REFRESH_COOKIE: &str = "refreshToken";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (student ID)
    pub sub: String,
    pub email: String,
    pub kind: TokenKind,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

impl Claims {
    /// Parses the subject back into a student identifier
    pub fn student_id(&self) -> Result<StudentId, AuthError> {
        self.sub.parse().map_err(|_| AuthError::InvalidToken)
    }
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Token not found")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Wrong token type")]
    WrongTokenKind,
    #[error("Failed to sign token: {0}")]
    Encoding(String),
}

/// Creates a signed token for a student
pub fn create_token(
    student_id: StudentId,
    email: &str,
    kind: TokenKind,
    secret: &str,
    ttl_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(ttl_secs as i64);

    let claims = Claims {
        sub: student_id.as_uuid().to_string(),
        email: email.to_string(),
        kind,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::Encoding(e.to_string()))
}

/// Validates a token and checks that it is of the expected kind
pub fn validate_token(token: &str, secret: &str, expected: TokenKind) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;

    if token_data.claims.kind != expected {
        return Err(AuthError::WrongTokenKind);
    }

    Ok(token_data.claims)
}

/// Builds an HttpOnly, SameSite=Strict cookie living `max_age_secs`
pub fn session_cookie(name: &'static str, value: String, max_age_secs: u64, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(time::Duration::seconds(max_age_secs as i64))
        .build()
}

/// Builds a cookie that makes the browser drop `name`
pub fn expired_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    session_cookie(name, String::new(), 0, secure)
}

/// Sets the access cookie only
pub fn with_access_cookie(
    jar: CookieJar,
    student_id: StudentId,
    email: &str,
    config: &ApiConfig,
) -> Result<CookieJar, AuthError> {
    let access = create_token(
        student_id,
        email,
        TokenKind::Access,
        &config.jwt_secret,
        config.access_token_ttl_secs,
    )?;
    Ok(jar.add(session_cookie(
        ACCESS_COOKIE,
        access,
        config.access_token_ttl_secs,
        config.secure_cookies,
    )))
}

/// Sets both session cookies
pub fn with_session_cookies(
    jar: CookieJar,
    student_id: StudentId,
    email: &str,
    config: &ApiConfig,
) -> Result<CookieJar, AuthError> {
    let refresh = create_token(
        student_id,
        email,
        TokenKind::Refresh,
        &config.jwt_secret,
        config.refresh_token_ttl_secs,
    )?;
    let jar = with_access_cookie(jar, student_id, email, config)?;
    Ok(jar.add(session_cookie(
        REFRESH_COOKIE,
        refresh,
        config.refresh_token_ttl_secs,
        config.secure_cookies,
    )))
}

/// Clears both session cookies
pub fn without_session_cookies(jar: CookieJar, config: &ApiConfig) -> CookieJar {
    jar.add(expired_cookie(ACCESS_COOKIE, config.secure_cookies))
        .add(expired_cookie(REFRESH_COOKIE, config.secure_cookies))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_round_trip() {
        let id = StudentId::new();
        let token = create_token(id, "ana@example.com", TokenKind::Access, SECRET, 300).unwrap();
        let claims = validate_token(&token, SECRET, TokenKind::Access).unwrap();

        assert_eq!(claims.student_id().unwrap(), id);
        assert_eq!(claims.email, "ana@example.com");
        assert_eq!(claims.exp - claims.iat, 300);
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let token = create_token(StudentId::new(), "a@b.com", TokenKind::Refresh, SECRET, 300).unwrap();
        assert!(matches!(
            validate_token(&token, SECRET, TokenKind::Access),
            Err(AuthError::WrongTokenKind)
        ));
    }

    #[test]
    fn test_wrong_secret() {
        let token = create_token(StudentId::new(), "a@b.com", TokenKind::Access, SECRET, 300).unwrap();
        assert!(matches!(
            validate_token(&token, "other-secret", TokenKind::Access),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: StudentId::new().as_uuid().to_string(),
            email: "a@b.com".into(),
            kind: TokenKind::Access,
            exp: now - 3600,
            iat: now - 3900,
        };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap();

        assert!(matches!(
            validate_token(&token, SECRET, TokenKind::Access),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie(ACCESS_COOKIE, "abc".into(), 300, true);

        assert_eq!(cookie.name(), "token");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(300)));
    }
}
