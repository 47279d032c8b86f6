use axum::{Json, body::Bytes, extract::State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::{self, Authenticated, Superuser};
use super::validation::{self, FieldSpec, Schema};
use super::{ApiError, AppState};
use crate::domain::PasswordPolicy;
use crate::services::AccountError;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct CreateAccountRequest {
    pub login: String,
    pub password: Option<String>,
    pub is_external_account: bool,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct LoginListResponse {
    #[serde(rename = "loginList")]
    pub login_list: Vec<String>,
}

// ============================================================================
// Body Schemas
// ============================================================================

const CREATE_ACCOUNT_SCHEMA: Schema = Schema::new(&[
    ("login", FieldSpec::Str),
    ("password", FieldSpec::StrOrNull),
    ("is_external_account", FieldSpec::Bool),
]);

const LOGIN_SCHEMA: Schema = Schema::new(&[
    ("login", FieldSpec::Str),
    ("password", FieldSpec::StrOrNull),
]);

const POLICY_SCHEMA: Schema = Schema::new(&[
    ("length", FieldSpec::Int),
    ("numbers", FieldSpec::Bool),
    ("uppercase_letters", FieldSpec::Bool),
    ("lowercase_letters", FieldSpec::Bool),
    ("special_symbols", FieldSpec::Bool),
]);

const CHANGE_PASSWORD_SCHEMA: Schema = Schema::new(&[
    ("old_password", FieldSpec::Str),
    ("new_password", FieldSpec::Str),
]);

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/accounts
pub async fn list_accounts(
    _: Authenticated,
    State(state): State<Arc<AppState>>,
) -> Result<Json<LoginListResponse>, ApiError> {
    let login_list = state.accounts().list_logins().await?;

    Ok(Json(LoginListResponse { login_list }))
}

/// POST /api/accounts
pub async fn create_account(
    _: Superuser,
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<MessageResponse>, ApiError> {
    let req: CreateAccountRequest = validation::validate(&CREATE_ACCOUNT_SCHEMA, &body)?;

    let account = state
        .accounts()
        .create_account(&req.login, req.password.as_deref(), req.is_external_account)
        .await?;

    tracing::info!("Account created: {}", account.login);

    Ok(Json(MessageResponse {
        message: format!("Account for <{}> created", account.login),
    }))
}

/// POST /api/accounts/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    body: Bytes,
) -> Result<Json<MessageResponse>, ApiError> {
    let req: LoginRequest = validation::validate(&LOGIN_SCHEMA, &body)?;

    let account = state.accounts().find_by_login(&req.login).await?;

    match account {
        Some(account) if account.password_matches(req.password.as_deref()) => {
            session
                .insert(auth::LOGIN_KEY, &account.login)
                .await
                .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;

            Ok(Json(MessageResponse {
                message: "Welcome home!".to_string(),
            }))
        }
        // Unknown login and wrong password look identical on the wire.
        _ => Err(ApiError::Forbidden),
    }
}

/// POST /api/accounts/logout
pub async fn logout(session: Session) -> Result<Json<MessageResponse>, ApiError> {
    session
        .remove::<String>(auth::LOGIN_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?;

    Ok(Json(MessageResponse {
        message: "Good bye!".to_string(),
    }))
}

/// POST /api/accounts/password/policy
pub async fn set_policy(
    _: Superuser,
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<MessageResponse>, ApiError> {
    let policy: PasswordPolicy = validation::validate(&POLICY_SCHEMA, &body)?;

    state.accounts().set_policy(policy).await?;

    Ok(Json(MessageResponse {
        message: "New policy was set".to_string(),
    }))
}

/// PUT /api/accounts/id/password
pub async fn change_password(
    Authenticated(login): Authenticated,
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<MessageResponse>, ApiError> {
    let req: ChangePasswordRequest = validation::validate(&CHANGE_PASSWORD_SCHEMA, &body)?;

    // A stale cookie can outlive its account.
    let Some(account) = state.accounts().find_by_login(&login).await? else {
        return Err(ApiError::bad_request("We dont know you"));
    };

    if account.is_external_account {
        return Err(AccountError::ExternalAccountImmutable.into());
    }

    if !account.password_matches(Some(&req.old_password)) {
        return Err(ApiError::Forbidden);
    }

    state
        .accounts()
        .change_password(&account, &req.new_password)
        .await
        .map_err(|err| match err {
            AccountError::WeakPassword => ApiError::bad_request("New password is too weak"),
            other => other.into(),
        })?;

    tracing::info!("Password changed for account: {login}");

    Ok(Json(MessageResponse {
        message: "Password changed successfully".to_string(),
    }))
}

/// DELETE /api/accounts/id
pub async fn delete_account(
    Authenticated(login): Authenticated,
    State(state): State<Arc<AppState>>,
) -> Result<Json<MessageResponse>, ApiError> {
    if state.accounts().find_by_login(&login).await?.is_none() {
        return Err(ApiError::bad_request("We dont know you"));
    }

    state.accounts().delete_account(&login).await?;

    tracing::info!("Account deleted: {login}");

    Ok(Json(MessageResponse {
        message: "Account was deleted successfully".to_string(),
    }))
}
