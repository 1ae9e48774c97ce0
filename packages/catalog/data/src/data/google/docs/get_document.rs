use super::{DOCS_API_URL, plain_text};
use crate::data::google::provider::GoogleProvider;
use linkflow::flow::{
    execution::context::ExecutionContext,
    node::{Node, NodeLogic},
    variable::VariableType,
};
use linkflow_types::{async_trait, json::json};

#[crate::register_node]
#[derive(Default)]
pub struct GetGoogleDocNode {}

impl GetGoogleDocNode {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl NodeLogic for GetGoogleDocNode {
    fn get_node(&self) -> Node {
        let mut node = Node::new(
            "data_google_docs_get_document",
            "Get Document",
            "Fetches a Google Docs document and its plain text",
            "Data/Google/Docs",
        );
        node.add_icon("/flow/icons/google-docs.svg");

        node.add_input_pin(
            "document_id",
            "Document ID",
            "Id from the document URL",
            VariableType::String,
        );

        node.add_output_pin("document", "Document", "Full document resource", VariableType::Struct);
        node.add_output_pin("title", "Title", "Document title", VariableType::String);
        node.add_output_pin("text", "Text", "Plain text of the body", VariableType::String);

        GoogleProvider::add_auth(
            &mut node,
            vec!["https://www.googleapis.com/auth/documents.readonly"],
        );

        node
    }

    async fn run(&self, context: &mut ExecutionContext) -> linkflow_types::Result<()> {
        let provider = GoogleProvider::from_context(context)?;
        let document_id: String = context.evaluate_pin("document_id").await?;

        let document = context
            .send(provider.get(&format!(
                "{}/documents/{}",
                DOCS_API_URL,
                urlencoding::encode(&document_id)
            )))
            .await?;

        context.set_pin_value("text", json!(plain_text(&document))).await?;
        context.set_pin_value("title", document["title"].clone()).await?;
        context.set_pin_value("document", document).await?;
        Ok(())
    }
}
