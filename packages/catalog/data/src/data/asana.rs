pub mod create_task;
pub mod list_projects;
pub mod provider;
