pub mod create_customer;
pub mod get_balance;
pub mod new_customer;
pub mod provider;
