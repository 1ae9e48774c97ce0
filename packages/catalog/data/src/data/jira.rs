pub mod create_issue;
pub mod issue_updated;
pub mod provider;
