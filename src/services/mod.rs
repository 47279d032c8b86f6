pub mod account_service;
pub mod account_service_impl;

pub use account_service::{AccountError, AccountService};
pub use account_service_impl::SeaOrmAccountService;
