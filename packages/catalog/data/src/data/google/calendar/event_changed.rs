use super::{calendar_options, calendar_url};
use crate::data::google::provider::GoogleProvider;
use chrono::SecondsFormat;
use linkflow::{
    ConnectorError,
    flow::{
        execution::context::ExecutionContext,
        node::{Node, NodeLogic},
        options::OptionItem,
        pin::PinOptions,
        polling::SincePoller,
        variable::VariableType,
    },
};
use linkflow_types::{async_trait, json::json};
use std::time::Duration;

#[crate::register_node]
#[derive(Default)]
pub struct CalendarEventChangedNode {}

impl CalendarEventChangedNode {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl NodeLogic for CalendarEventChangedNode {
    fn get_node(&self) -> Node {
        let mut node = Node::new(
            "data_google_calendar_event_changed",
            "Event Changed",
            "Triggers for events created, updated or cancelled since the last run",
            "Data/Google/Calendar",
        );
        node.add_icon("/flow/icons/google-calendar.svg");

        node.add_input_pin(
            "calendar_id",
            "Calendar",
            "Calendar to watch",
            VariableType::String,
        )
        .set_default_value(Some(json!("primary")))
        .set_options(PinOptions::new().set_dynamic_options(true).build());

        node.set_polling_trigger(Duration::from_secs(60 * 60));

        GoogleProvider::add_auth(
            &mut node,
            vec!["https://www.googleapis.com/auth/calendar.readonly"],
        );

        node
    }

    async fn run(&self, context: &mut ExecutionContext) -> linkflow_types::Result<()> {
        let provider = GoogleProvider::from_context(context)?;
        let calendar_id: String = context.evaluate_pin("calendar_id").await?;

        SincePoller::new("/items")
            .run(context, |since| {
                provider
                    .get(&calendar_url(&calendar_id, "/events"))
                    .query("updatedMin", since.to_rfc3339_opts(SecondsFormat::Secs, true))
                    .query("showDeleted", true)
                    .query("singleEvents", true)
                    .query("orderBy", "updated")
            })
            .await
    }

    async fn get_options(
        &self,
        pin: &str,
        context: &mut ExecutionContext,
    ) -> linkflow_types::Result<Vec<OptionItem>> {
        match pin {
            "calendar_id" => calendar_options(context).await,
            _ => Err(
                ConnectorError::no_dynamic_options("data_google_calendar_event_changed", pin)
                    .into(),
            ),
        }
    }
}
