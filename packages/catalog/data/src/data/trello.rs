pub mod create_card;
pub mod provider;
