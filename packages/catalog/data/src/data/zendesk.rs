pub mod create_ticket;
pub mod provider;
pub mod ticket_created;
