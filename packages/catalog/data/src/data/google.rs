pub mod calendar;
pub mod docs;
pub mod provider;
