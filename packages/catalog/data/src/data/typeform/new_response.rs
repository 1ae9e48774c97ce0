use super::provider::{TypeformProvider, form_options};
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
use linkflow_types::async_trait;
use std::time::Duration;

#[crate::register_node]
#[derive(Default)]
pub struct NewTypeformResponseNode {}

impl NewTypeformResponseNode {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl NodeLogic for NewTypeformResponseNode {
    fn get_node(&self) -> Node {
        let mut node = Node::new(
            "data_typeform_new_response",
            "New Response",
            "Triggers for responses submitted since the last run",
            "Data/Typeform",
        );
        node.add_icon("/flow/icons/typeform.svg");

        node.add_input_pin("form_id", "Form", "Form to watch", VariableType::String)
            .set_options(PinOptions::new().set_dynamic_options(true).build());

        node.set_polling_trigger(Duration::from_secs(60 * 60));

        TypeformProvider::add_auth(&mut node);

        node
    }

    async fn run(&self, context: &mut ExecutionContext) -> linkflow_types::Result<()> {
        let provider = TypeformProvider::from_context(context)?;
        let form_id: String = context.evaluate_pin("form_id").await?;

        SincePoller::new("/items")
            .run(context, |since| {
                provider
                    .get(&format!("/forms/{}/responses", urlencoding::encode(&form_id)))
                    .query("since", since.to_rfc3339_opts(SecondsFormat::Secs, true))
                    .query("page_size", 1000)
            })
            .await
    }

    async fn get_options(
        &self,
        pin: &str,
        context: &mut ExecutionContext,
    ) -> linkflow_types::Result<Vec<OptionItem>> {
        match pin {
            "form_id" => form_options(context).await,
            _ => Err(ConnectorError::no_dynamic_options("data_typeform_new_response", pin).into()),
        }
    }
}
