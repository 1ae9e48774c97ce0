pub mod cancel_event;
pub mod get_current_user;
pub mod list_scheduled_events;
pub mod provider;
