use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::domain::{Account, PasswordPolicy};

pub mod migrator;
pub mod repositories;

/// Facade over the durable tables. Cheap to clone; every read goes to the
/// database fresh, there is no caching layer in front of it.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn account_repo(&self) -> repositories::account::AccountRepository {
        repositories::account::AccountRepository::new(self.conn.clone())
    }

    fn policy_repo(&self) -> repositories::policy::PolicyRepository {
        repositories::policy::PolicyRepository::new(self.conn.clone())
    }

    pub async fn get_account_by_login(&self, login: &str) -> Result<Option<Account>> {
        self.account_repo().get_by_login(login).await
    }

    pub async fn list_account_logins(&self) -> Result<Vec<String>> {
        self.account_repo().list_logins().await
    }

    pub async fn insert_account(
        &self,
        login: &str,
        password_fingerprint: Option<&str>,
        is_external_account: bool,
        expires: i64,
    ) -> Result<Account> {
        self.account_repo()
            .insert(login, password_fingerprint, is_external_account, expires)
            .await
    }

    pub async fn update_account_fingerprint(
        &self,
        login: &str,
        new_fingerprint: &str,
    ) -> Result<()> {
        self.account_repo()
            .update_fingerprint(login, new_fingerprint)
            .await
    }

    pub async fn delete_account(&self, login: &str) -> Result<()> {
        self.account_repo().delete_by_login(login).await
    }

    pub async fn get_policy(&self) -> Result<PasswordPolicy> {
        self.policy_repo().get().await
    }

    pub async fn set_policy(&self, policy: &PasswordPolicy) -> Result<()> {
        self.policy_repo().set(policy).await
    }
}
