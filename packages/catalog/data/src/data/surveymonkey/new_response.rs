use super::provider::{SurveyMonkeyProvider, survey_options};
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

/// SurveyMonkey expects `YYYY-MM-DDTHH:MM:SS` without an offset, read as UTC.
pub const MODIFIED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[crate::register_node]
#[derive(Default)]
pub struct NewSurveyMonkeyResponseNode {}

impl NewSurveyMonkeyResponseNode {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl NodeLogic for NewSurveyMonkeyResponseNode {
    fn get_node(&self) -> Node {
        let mut node = Node::new(
            "data_surveymonkey_new_response",
            "New Response",
            "Triggers for survey responses modified since the last run",
            "Data/SurveyMonkey",
        );
        node.add_icon("/flow/icons/surveymonkey.svg");

        node.add_input_pin("survey_id", "Survey", "Survey to watch", VariableType::String)
            .set_options(PinOptions::new().set_dynamic_options(true).build());

        node.set_polling_trigger(Duration::from_secs(60 * 60));

        SurveyMonkeyProvider::add_auth(&mut node);

        node
    }

    async fn run(&self, context: &mut ExecutionContext) -> linkflow_types::Result<()> {
        let provider = SurveyMonkeyProvider::from_context(context)?;
        let survey_id: String = context.evaluate_pin("survey_id").await?;

        SincePoller::new("/data")
            .run(context, |since| {
                provider
                    .get(&format!(
                        "/surveys/{}/responses/bulk",
                        urlencoding::encode(&survey_id)
                    ))
                    .query("start_modified_at", since.format(MODIFIED_AT_FORMAT))
                    .query("sort_order", "ASC")
                    .query("per_page", 100)
            })
            .await
    }

    async fn get_options(
        &self,
        pin: &str,
        context: &mut ExecutionContext,
    ) -> linkflow_types::Result<Vec<OptionItem>> {
        match pin {
            "survey_id" => survey_options(context).await,
            _ => Err(
                ConnectorError::no_dynamic_options("data_surveymonkey_new_response", pin).into(),
            ),
        }
    }
}
