use super::provider::{TrelloProvider, board_options, list_options};
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
pub struct CreateTrelloCardNode {}

impl CreateTrelloCardNode {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl NodeLogic for CreateTrelloCardNode {
    fn get_node(&self) -> Node {
        let mut node = Node::new(
            "data_trello_create_card",
            "Create Card",
            "Adds a card to a Trello list",
            "Data/Trello",
        );
        node.add_icon("/flow/icons/trello.svg");

        node.add_input_pin(
            "board_id",
            "Board",
            "Board holding the list, used to pick the list",
            VariableType::String,
        )
        .set_optional()
        .set_options(PinOptions::new().set_dynamic_options(true).build());

        node.add_input_pin("list_id", "List", "List to add the card to", VariableType::String)
            .set_options(
                PinOptions::new()
                    .set_dynamic_options(true)
                    .set_depends_on(vec!["board_id"])
                    .build(),
            );

        node.add_input_pin("name", "Name", "Card title", VariableType::String);

        node.add_input_pin("desc", "Description", "Card description", VariableType::String)
            .set_optional();

        node.add_input_pin("due", "Due", "Due date (RFC 3339)", VariableType::Date)
            .set_optional();

        node.add_input_pin("position", "Position", "Where to insert the card", VariableType::String)
            .set_default_value(Some(json!("bottom")))
            .set_options(
                PinOptions::new()
                    .set_valid_values(vec!["top".to_string(), "bottom".to_string()])
                    .build(),
            );

        node.add_output_pin("card", "Card", "Created card", VariableType::Struct);
        node.add_output_pin("card_id", "Card ID", "Id of the card", VariableType::String);
        node.add_output_pin("url", "URL", "Link to the card", VariableType::String);

        TrelloProvider::add_auth(&mut node);

        node
    }

    async fn run(&self, context: &mut ExecutionContext) -> linkflow_types::Result<()> {
        let provider = TrelloProvider::from_context(context)?;
        let list_id: String = context.evaluate_pin("list_id").await?;
        let name: String = context.evaluate_pin("name").await?;
        let position: String = context.evaluate_pin("position").await?;
        let desc: Option<String> = context.evaluate_optional_pin("desc").await?;
        let due: Option<String> = context.evaluate_optional_pin("due").await?;

        let card = context
            .send(
                provider
                    .post("/cards")
                    .query("idList", list_id)
                    .query("name", name)
                    .query("pos", position)
                    .query_opt("desc", desc)
                    .query_opt("due", due),
            )
            .await?;

        let card_id = card["id"]
            .as_str()
            .ok_or_else(|| ConnectorError::Decode("card response has no id".to_string()))?
            .to_string();

        context.log_message(&format!("Created Trello card {}", card_id), LogLevel::Info);
        context.set_pin_value("card_id", json!(card_id)).await?;
        context.set_pin_value("url", card["shortUrl"].clone()).await?;
        context.set_pin_value("card", card).await?;
        Ok(())
    }

    async fn get_options(
        &self,
        pin: &str,
        context: &mut ExecutionContext,
    ) -> linkflow_types::Result<Vec<OptionItem>> {
        match pin {
            "board_id" => board_options(context).await,
            "list_id" => list_options(context).await,
            _ => Err(ConnectorError::no_dynamic_options("data_trello_create_card", pin).into()),
        }
    }
}
