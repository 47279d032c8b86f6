use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect, Set,
};

use crate::domain::Account;
use crate::entities::accounts;

impl From<accounts::Model> for Account {
    fn from(model: accounts::Model) -> Self {
        Self {
            id: model.id,
            login: model.login,
            password_fingerprint: model.password_fingerprint,
            is_external_account: model.is_external_account,
            expires: model.expires,
        }
    }
}

pub struct AccountRepository {
    conn: DatabaseConnection,
}

impl AccountRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get_by_login(&self, login: &str) -> Result<Option<Account>> {
        let account = accounts::Entity::find()
            .filter(accounts::Column::Login.eq(login))
            .one(&self.conn)
            .await
            .context("Failed to query account by login")?;

        Ok(account.map(Account::from))
    }

    /// Every stored login, in no guaranteed order.
    pub async fn list_logins(&self) -> Result<Vec<String>> {
        let logins: Vec<String> = accounts::Entity::find()
            .select_only()
            .column(accounts::Column::Login)
            .into_tuple()
            .all(&self.conn)
            .await
            .context("Failed to list account logins")?;

        Ok(logins)
    }

    pub async fn insert(
        &self,
        login: &str,
        password_fingerprint: Option<&str>,
        is_external_account: bool,
        expires: i64,
    ) -> Result<Account> {
        let row = accounts::ActiveModel {
            login: Set(login.to_string()),
            password_fingerprint: Set(password_fingerprint.map(ToString::to_string)),
            is_external_account: Set(is_external_account),
            expires: Set(expires),
            ..Default::default()
        };

        let model = row
            .insert(&self.conn)
            .await
            .context("Failed to insert account")?;

        Ok(Account::from(model))
    }

    pub async fn update_fingerprint(&self, login: &str, new_fingerprint: &str) -> Result<()> {
        let account = accounts::Entity::find()
            .filter(accounts::Column::Login.eq(login))
            .one(&self.conn)
            .await
            .context("Failed to query account for password update")?
            .ok_or_else(|| anyhow::anyhow!("Account not found: {login}"))?;

        let mut active: accounts::ActiveModel = account.into();
        active.password_fingerprint = Set(Some(new_fingerprint.to_string()));
        active.update(&self.conn).await?;

        Ok(())
    }

    /// Deleting an absent login is a no-op.
    pub async fn delete_by_login(&self, login: &str) -> Result<()> {
        accounts::Entity::delete_many()
            .filter(accounts::Column::Login.eq(login))
            .exec(&self.conn)
            .await
            .context("Failed to delete account")?;

        Ok(())
    }
}
