pub mod new_response;
pub mod provider;
