pub mod auth;
pub mod execution;
pub mod node;
pub mod oauth;
pub mod options;
pub mod pin;
pub mod polling;
pub mod variable;
