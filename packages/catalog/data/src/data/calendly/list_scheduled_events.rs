use super::provider::CalendlyProvider;
use linkflow::{
    ConnectorError,
    flow::{
        execution::{LogLevel, context::ExecutionContext},
        node::{Node, NodeLogic},
        pin::{PinOptions, ValueType},
        polling::extract_records,
        variable::VariableType,
    },
};
use linkflow_types::{async_trait, json::json};

#[crate::register_node]
#[derive(Default)]
pub struct ListCalendlyEventsNode {}

impl ListCalendlyEventsNode {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl NodeLogic for ListCalendlyEventsNode {
    fn get_node(&self) -> Node {
        let mut node = Node::new(
            "data_calendly_list_scheduled_events",
            "List Scheduled Events",
            "Lists scheduled events of a user. Defaults to the authenticated user",
            "Data/Calendly",
        );
        node.add_icon("/flow/icons/calendly.svg");

        node.add_input_pin(
            "user_uri",
            "User URI",
            "User whose events to list, empty for the current user",
            VariableType::String,
        )
        .set_optional();

        node.add_input_pin("status", "Status", "Filter by status", VariableType::String)
            .set_optional()
            .set_options(
                PinOptions::new()
                    .set_valid_values(vec!["active".to_string(), "canceled".to_string()])
                    .build(),
            );

        node.add_input_pin(
            "min_start_time",
            "Min Start Time",
            "Only events starting at or after this time",
            VariableType::Date,
        )
        .set_optional();

        node.add_input_pin("count", "Count", "Maximum events to return", VariableType::Integer)
            .set_default_value(Some(json!(20)))
            .set_options(PinOptions::new().set_range((1.0, 100.0)).build());

        node.add_output_pin("events", "Events", "Scheduled events", VariableType::Struct)
            .set_value_type(ValueType::Array);

        CalendlyProvider::add_auth(&mut node);

        node
    }

    async fn run(&self, context: &mut ExecutionContext) -> linkflow_types::Result<()> {
        let provider = CalendlyProvider::from_context(context)?;
        let status: Option<String> = context.evaluate_optional_pin("status").await?;
        let min_start_time: Option<String> =
            context.evaluate_optional_pin("min_start_time").await?;
        let count: i64 = context.evaluate_pin("count").await?;

        let user_uri = match context.evaluate_optional_pin::<String>("user_uri").await? {
            Some(uri) => uri,
            None => {
                let me = context.send(provider.get("/users/me")).await?;
                me["resource"]["uri"]
                    .as_str()
                    .ok_or_else(|| ConnectorError::Decode("user resource has no uri".to_string()))?
                    .to_string()
            }
        };

        let body = context
            .send(
                provider
                    .get("/scheduled_events")
                    .query("user", &user_uri)
                    .query("count", count)
                    .query_opt("status", status)
                    .query_opt("min_start_time", min_start_time),
            )
            .await?;

        let events = extract_records(body, "/collection")?;
        context.log_message(
            &format!("Found {} scheduled events", events.len()),
            LogLevel::Debug,
        );
        context.set_pin_value("events", json!(events)).await?;
        Ok(())
    }
}
