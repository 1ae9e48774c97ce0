use super::DOCS_API_URL;
use crate::data::google::provider::GoogleProvider;
use linkflow::{
    ConnectorError,
    flow::{
        execution::{LogLevel, context::ExecutionContext},
        node::{Node, NodeLogic},
        variable::VariableType,
    },
};
use linkflow_types::{async_trait, json::json};

#[crate::register_node]
#[derive(Default)]
pub struct CreateGoogleDocNode {}

impl CreateGoogleDocNode {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl NodeLogic for CreateGoogleDocNode {
    fn get_node(&self) -> Node {
        let mut node = Node::new(
            "data_google_docs_create_document",
            "Create Document",
            "Creates an empty Google Docs document",
            "Data/Google/Docs",
        );
        node.add_icon("/flow/icons/google-docs.svg");

        node.add_input_pin("title", "Title", "Document title", VariableType::String);

        node.add_output_pin("document", "Document", "Created document", VariableType::Struct);
        node.add_output_pin(
            "document_id",
            "Document ID",
            "Id of the new document",
            VariableType::String,
        );
        node.add_output_pin("url", "URL", "Link to edit the document", VariableType::String);

        GoogleProvider::add_auth(&mut node, vec!["https://www.googleapis.com/auth/documents"]);

        node
    }

    async fn run(&self, context: &mut ExecutionContext) -> linkflow_types::Result<()> {
        let provider = GoogleProvider::from_context(context)?;
        let title: String = context.evaluate_pin("title").await?;

        let document = context
            .send(
                provider
                    .post(&format!("{}/documents", DOCS_API_URL))
                    .json(json!({ "title": title })),
            )
            .await?;

        let document_id = document["documentId"]
            .as_str()
            .ok_or_else(|| ConnectorError::Decode("document response has no documentId".to_string()))?
            .to_string();

        context.log_message(&format!("Created document {}", document_id), LogLevel::Info);
        context
            .set_pin_value(
                "url",
                json!(format!("https://docs.google.com/document/d/{}/edit", document_id)),
            )
            .await?;
        context.set_pin_value("document_id", json!(document_id)).await?;
        context.set_pin_value("document", document).await?;
        Ok(())
    }
}
