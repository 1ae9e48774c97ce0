use super::provider::{CalendlyProvider, resource_uuid};
use linkflow::flow::{
    execution::{LogLevel, context::ExecutionContext},
    node::{Node, NodeLogic},
    variable::VariableType,
};
use linkflow_types::{async_trait, json::json};

#[crate::register_node]
#[derive(Default)]
pub struct CancelCalendlyEventNode {}

impl CancelCalendlyEventNode {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl NodeLogic for CancelCalendlyEventNode {
    fn get_node(&self) -> Node {
        let mut node = Node::new(
            "data_calendly_cancel_event",
            "Cancel Event",
            "Cancels a scheduled event and notifies the invitees",
            "Data/Calendly",
        );
        node.add_icon("/flow/icons/calendly.svg");

        node.add_input_pin(
            "event",
            "Event",
            "Scheduled event uuid or URI",
            VariableType::String,
        );

        node.add_input_pin(
            "reason",
            "Reason",
            "Cancellation reason shown to invitees",
            VariableType::String,
        )
        .set_optional();

        node.add_output_pin(
            "cancellation",
            "Cancellation",
            "Cancellation resource",
            VariableType::Struct,
        );

        CalendlyProvider::add_auth(&mut node);

        node
    }

    async fn run(&self, context: &mut ExecutionContext) -> linkflow_types::Result<()> {
        let provider = CalendlyProvider::from_context(context)?;
        let event: String = context.evaluate_pin("event").await?;
        let reason: Option<String> = context.evaluate_optional_pin("reason").await?;

        let uuid = resource_uuid(&event).to_string();
        let mut payload = json!({});
        if let Some(reason) = reason {
            payload["reason"] = json!(reason);
        }

        let body = context
            .send(
                provider
                    .post(&format!("/scheduled_events/{}/cancellation", uuid))
                    .json(payload),
            )
            .await?;

        context.log_message(&format!("Canceled Calendly event {}", uuid), LogLevel::Info);
        context
            .set_pin_value("cancellation", body["resource"].clone())
            .await?;
        Ok(())
    }
}
