pub mod list_channels;
pub mod provider;
pub mod send_message;
