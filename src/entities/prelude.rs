pub use super::accounts::Entity as Accounts;
pub use super::password_policy::Entity as PasswordPolicies;
