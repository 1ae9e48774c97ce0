pub mod provider;
pub mod send_text_message;
