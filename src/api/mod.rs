use axum::{
    Router,
    http::HeaderValue,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use time;

use crate::config::Config;
use crate::db::Store;
use crate::services::{AccountService, SeaOrmAccountService};

pub mod accounts;
pub mod auth;
mod error;
mod validation;

pub use error::ApiError;

pub struct AppState {
    pub config: Config,
    pub store: Store,
    accounts: Arc<dyn AccountService>,
}

impl AppState {
    #[must_use]
    pub fn accounts(&self) -> &Arc<dyn AccountService> {
        &self.accounts
    }
}

pub async fn create_app_state(config: Config) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    let accounts = Arc::new(SeaOrmAccountService::new(
        store.clone(),
        config.general.password_ttl_seconds,
    )) as Arc<dyn AccountService>;

    Ok(Arc::new(AppState {
        config,
        store,
        accounts,
    }))
}

pub fn router(state: Arc<AppState>) -> Router {
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(state.config.server.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            state.config.server.session_ttl_minutes,
        )));

    let api_router = Router::new()
        .route(
            "/",
            get(accounts::list_accounts).post(accounts::create_account),
        )
        .route("/login", post(accounts::login))
        .route("/logout", post(accounts::logout))
        .route("/password/policy", post(accounts::set_policy))
        .route("/id/password", put(accounts::change_password))
        .route("/id", delete(accounts::delete_account))
        .layer(session_layer)
        .with_state(state.clone());

    let cors_origins = &state.config.server.cors_allowed_origins;
    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = cors_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api/accounts", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
