pub mod account;
pub mod policy;

pub use account::{Account, SUPERUSER_LOGIN, fingerprint};
pub use policy::PasswordPolicy;
