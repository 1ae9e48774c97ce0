pub mod list_forms;
pub mod new_response;
pub mod provider;
