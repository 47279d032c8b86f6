//! Session gates.
//!
//! Both gates resolve from request parts, so they run before any body is
//! read: a request that fails a gate never reaches field validation or
//! the domain model. Rejections are indistinguishable 403s on the wire.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use super::ApiError;
use crate::domain::SUPERUSER_LOGIN;

/// Session key holding the authenticated login claim.
pub const LOGIN_KEY: &str = "login";

/// Reads the login claim, if any, from the session.
pub async fn session_login(session: &Session) -> Result<Option<String>, ApiError> {
    session
        .get::<String>(LOGIN_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))
}

async fn extract_session<S: Send + Sync>(
    parts: &mut Parts,
    state: &S,
) -> Result<Session, ApiError> {
    Session::from_request_parts(parts, state)
        .await
        .map_err(|(_, msg)| ApiError::internal(msg))
}

/// Gate: the caller must carry a login claim.
pub struct Authenticated(pub String);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = extract_session(parts, state).await?;

        match session_login(&session).await? {
            Some(login) => Ok(Self(login)),
            None => Err(ApiError::Forbidden),
        }
    }
}

/// Gate: the caller's claim must be the fixed superuser login.
pub struct Superuser(pub String);

impl<S> FromRequestParts<S> for Superuser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = extract_session(parts, state).await?;

        match session_login(&session).await? {
            Some(login) if login == SUPERUSER_LOGIN => Ok(Self(login)),
            _ => Err(ApiError::Forbidden),
        }
    }
}
