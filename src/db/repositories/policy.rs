use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::domain::PasswordPolicy;
use crate::entities::password_policy;

/// Fixed key of the singleton row, seeded by the initial migration.
const POLICY_ROW_ID: i32 = 1;

impl From<password_policy::Model> for PasswordPolicy {
    fn from(model: password_policy::Model) -> Self {
        Self {
            length: model.length,
            numbers: model.numbers,
            uppercase_letters: model.uppercase_letters,
            lowercase_letters: model.lowercase_letters,
            special_symbols: model.special_symbols,
        }
    }
}

pub struct PolicyRepository {
    conn: DatabaseConnection,
}

impl PolicyRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self) -> Result<PasswordPolicy> {
        let row = password_policy::Entity::find_by_id(POLICY_ROW_ID)
            .one(&self.conn)
            .await
            .context("Failed to query password policy")?
            .ok_or_else(|| anyhow::anyhow!("Password policy row is missing"))?;

        Ok(PasswordPolicy::from(row))
    }

    pub async fn set(&self, policy: &PasswordPolicy) -> Result<()> {
        let active = password_policy::ActiveModel {
            id: Set(POLICY_ROW_ID),
            length: Set(policy.length),
            numbers: Set(policy.numbers),
            uppercase_letters: Set(policy.uppercase_letters),
            lowercase_letters: Set(policy.lowercase_letters),
            special_symbols: Set(policy.special_symbols),
        };

        active
            .update(&self.conn)
            .await
            .context("Failed to update password policy")?;

        Ok(())
    }
}
