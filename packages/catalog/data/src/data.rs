pub mod asana;
pub mod calendly;
pub mod google;
pub mod jira;
pub mod slack;
pub mod stripe;
pub mod surveymonkey;
pub mod trello;
pub mod typeform;
pub mod whatsapp;
pub mod zendesk;
