use super::DOCS_API_URL;
use crate::data::google::provider::GoogleProvider;
use linkflow::flow::{
    execution::{LogLevel, context::ExecutionContext},
    node::{Node, NodeLogic},
    variable::VariableType,
};
use linkflow_types::{async_trait, json::json};

#[crate::register_node]
#[derive(Default)]
pub struct AppendGoogleDocTextNode {}

impl AppendGoogleDocTextNode {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl NodeLogic for AppendGoogleDocTextNode {
    fn get_node(&self) -> Node {
        let mut node = Node::new(
            "data_google_docs_append_text",
            "Append Text",
            "Appends text to the end of a Google Docs document",
            "Data/Google/Docs",
        );
        node.add_icon("/flow/icons/google-docs.svg");

        node.add_input_pin(
            "document_id",
            "Document ID",
            "Id from the document URL",
            VariableType::String,
        );
        node.add_input_pin("text", "Text", "Text to append", VariableType::String);

        node.add_output_pin("document_id", "Document ID", "Updated document", VariableType::String);
        node.add_output_pin("replies", "Replies", "batchUpdate replies", VariableType::Struct);

        GoogleProvider::add_auth(&mut node, vec!["https://www.googleapis.com/auth/documents"]);

        node
    }

    async fn run(&self, context: &mut ExecutionContext) -> linkflow_types::Result<()> {
        let provider = GoogleProvider::from_context(context)?;
        let document_id: String = context.evaluate_pin("document_id").await?;
        let text: String = context.evaluate_pin("text").await?;

        let body = context
            .send(
                provider
                    .post(&format!(
                        "{}/documents/{}:batchUpdate",
                        DOCS_API_URL,
                        urlencoding::encode(&document_id)
                    ))
                    .json(json!({
                        "requests": [{
                            "insertText": {
                                "endOfSegmentLocation": {},
                                "text": text,
                            }
                        }]
                    })),
            )
            .await?;

        context.log_message(
            &format!("Appended {} characters to {}", text.chars().count(), document_id),
            LogLevel::Debug,
        );
        context.set_pin_value("replies", body["replies"].clone()).await?;
        context.set_pin_value("document_id", json!(document_id)).await?;
        Ok(())
    }
}
