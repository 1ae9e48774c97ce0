use super::provider::SlackProvider;
use linkflow::flow::{
    execution::{LogLevel, context::ExecutionContext},
    node::{Node, NodeLogic},
    pin::{PinOptions, ValueType},
    polling::extract_records,
    variable::VariableType,
};
use linkflow_types::{async_trait, json::json};

#[crate::register_node]
#[derive(Default)]
pub struct ListSlackChannelsNode {}

impl ListSlackChannelsNode {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl NodeLogic for ListSlackChannelsNode {
    fn get_node(&self) -> Node {
        let mut node = Node::new(
            "data_slack_list_channels",
            "List Channels",
            "Lists conversations the bot can see",
            "Data/Slack",
        );
        node.add_icon("/flow/icons/slack.svg");

        node.add_input_pin(
            "types",
            "Types",
            "Comma separated conversation types",
            VariableType::String,
        )
        .set_default_value(Some(json!("public_channel")));

        node.add_input_pin(
            "exclude_archived",
            "Exclude Archived",
            "Skip archived channels",
            VariableType::Boolean,
        )
        .set_default_value(Some(json!(true)));

        node.add_input_pin("limit", "Limit", "Maximum channels to return", VariableType::Integer)
            .set_default_value(Some(json!(100)))
            .set_options(PinOptions::new().set_range((1.0, 1000.0)).build());

        node.add_output_pin("channels", "Channels", "Conversation objects", VariableType::Struct)
            .set_value_type(ValueType::Array);

        SlackProvider::add_auth(&mut node, vec!["channels:read"]);

        node
    }

    async fn run(&self, context: &mut ExecutionContext) -> linkflow_types::Result<()> {
        let provider = SlackProvider::from_context(context)?;
        let types: String = context.evaluate_pin("types").await?;
        let exclude_archived: bool = context.evaluate_pin("exclude_archived").await?;
        let limit: i64 = context.evaluate_pin("limit").await?;

        let body = provider
            .call(
                context,
                provider
                    .get("conversations.list")
                    .query("types", types)
                    .query("exclude_archived", exclude_archived)
                    .query("limit", limit),
            )
            .await?;

        let channels = extract_records(body, "/channels")?;
        context.log_message(&format!("Found {} channels", channels.len()), LogLevel::Debug);
        context.set_pin_value("channels", json!(channels)).await?;
        Ok(())
    }
}
