use super::provider::{SlackProvider, channel_options};
use linkflow::{
    ConnectorError,
    flow::{
        execution::{LogLevel, context::ExecutionContext},
        node::{Node, NodeLogic},
        options::OptionItem,
        pin::PinOptions,
        variable::VariableType,
    },
};
use linkflow_types::{async_trait, json::json};

#[crate::register_node]
#[derive(Default)]
pub struct SendSlackMessageNode {}

impl SendSlackMessageNode {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl NodeLogic for SendSlackMessageNode {
    fn get_node(&self) -> Node {
        let mut node = Node::new(
            "data_slack_send_message",
            "Send Message",
            "Posts a message to a Slack channel",
            "Data/Slack",
        );
        node.add_icon("/flow/icons/slack.svg");

        node.add_input_pin("channel", "Channel", "Channel to post in", VariableType::String)
            .set_options(PinOptions::new().set_dynamic_options(true).build());

        node.add_input_pin("text", "Text", "Message text (mrkdwn)", VariableType::String);

        node.add_input_pin(
            "thread_ts",
            "Thread",
            "Timestamp of the parent message to reply in a thread",
            VariableType::String,
        )
        .set_optional();

        node.add_output_pin("ts", "Timestamp", "Timestamp of the message", VariableType::String);
        node.add_output_pin("channel", "Channel", "Channel id", VariableType::String);
        node.add_output_pin("message", "Message", "Posted message", VariableType::Struct);

        SlackProvider::add_auth(&mut node, vec!["chat:write"]);

        node
    }

    async fn run(&self, context: &mut ExecutionContext) -> linkflow_types::Result<()> {
        let provider = SlackProvider::from_context(context)?;
        let channel: String = context.evaluate_pin("channel").await?;
        let text: String = context.evaluate_pin("text").await?;
        let thread_ts: Option<String> = context.evaluate_optional_pin("thread_ts").await?;

        let mut payload = json!({ "channel": channel, "text": text });
        if let Some(thread_ts) = thread_ts {
            payload["thread_ts"] = json!(thread_ts);
        }

        let body = provider
            .call(context, provider.post("chat.postMessage").json(payload))
            .await?;

        context.log_message(
            &format!("Posted Slack message to {}", body["channel"]),
            LogLevel::Info,
        );
        context.set_pin_value("ts", body["ts"].clone()).await?;
        context.set_pin_value("channel", body["channel"].clone()).await?;
        context.set_pin_value("message", body["message"].clone()).await?;
        Ok(())
    }

    async fn get_options(
        &self,
        pin: &str,
        context: &mut ExecutionContext,
    ) -> linkflow_types::Result<Vec<OptionItem>> {
        match pin {
            "channel" => channel_options(context).await,
            _ => Err(ConnectorError::no_dynamic_options("data_slack_send_message", pin).into()),
        }
    }
}
