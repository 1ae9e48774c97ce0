pub mod create_event;
pub mod event_changed;

use super::provider::GoogleProvider;
use linkflow::flow::{
    execution::context::ExecutionContext,
    options::{OptionItem, collect_options},
};

pub const CALENDAR_API_URL: &str = "https://www.googleapis.com/calendar/v3";

pub fn calendar_url(calendar_id: &str, path: &str) -> String {
    format!(
        "{}/calendars/{}{}",
        CALENDAR_API_URL,
        urlencoding::encode(calendar_id),
        path
    )
}

pub async fn calendar_options(
    context: &mut ExecutionContext,
) -> linkflow_types::Result<Vec<OptionItem>> {
    let provider = GoogleProvider::from_context(context)?;
    let body = context
        .send(provider.get(&format!("{}/users/me/calendarList", CALENDAR_API_URL)))
        .await?;
    Ok(collect_options(&body, "/items", "id", "summary"))
}
