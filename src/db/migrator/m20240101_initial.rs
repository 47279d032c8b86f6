use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

use crate::domain::account::{DEFAULT_PASSWORD_TTL_SECS, SUPERUSER_LOGIN};
use crate::domain::fingerprint;
use crate::entities::{accounts, password_policy};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Initial password of the seeded superuser; expected to be changed on
/// first login.
const SUPERUSER_PASSWORD: &str = "root";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Accounts)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(PasswordPolicies)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Permissive starting policy; the superuser replaces it wholesale.
        let insert_policy = sea_orm_migration::sea_query::Query::insert()
            .into_table(PasswordPolicies)
            .columns([
                password_policy::Column::Length,
                password_policy::Column::Numbers,
                password_policy::Column::UppercaseLetters,
                password_policy::Column::LowercaseLetters,
                password_policy::Column::SpecialSymbols,
            ])
            .values_panic([
                0.into(),
                false.into(),
                false.into(),
                false.into(),
                false.into(),
            ])
            .to_owned();

        manager.exec_stmt(insert_policy).await?;

        let expires = chrono::Utc::now().timestamp() + DEFAULT_PASSWORD_TTL_SECS;

        let insert_root = sea_orm_migration::sea_query::Query::insert()
            .into_table(Accounts)
            .columns([
                accounts::Column::Login,
                accounts::Column::PasswordFingerprint,
                accounts::Column::IsExternalAccount,
                accounts::Column::Expires,
            ])
            .values_panic([
                SUPERUSER_LOGIN.into(),
                fingerprint(SUPERUSER_PASSWORD).into(),
                false.into(),
                expires.into(),
            ])
            .to_owned();

        manager.exec_stmt(insert_root).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Accounts).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(PasswordPolicies).to_owned())
            .await?;

        Ok(())
    }
}
