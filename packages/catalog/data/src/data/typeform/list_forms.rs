use super::provider::TypeformProvider;
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
pub struct ListTypeformFormsNode {}

impl ListTypeformFormsNode {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl NodeLogic for ListTypeformFormsNode {
    fn get_node(&self) -> Node {
        let mut node = Node::new(
            "data_typeform_list_forms",
            "List Forms",
            "Lists the forms of the account",
            "Data/Typeform",
        );
        node.add_icon("/flow/icons/typeform.svg");

        node.add_input_pin("search", "Search", "Filter by title", VariableType::String)
            .set_optional();

        node.add_input_pin("page_size", "Page Size", "Forms to return", VariableType::Integer)
            .set_default_value(Some(json!(10)))
            .set_options(PinOptions::new().set_range((1.0, 200.0)).build());

        node.add_output_pin("forms", "Forms", "Form summaries", VariableType::Struct)
            .set_value_type(ValueType::Array);
        node.add_output_pin(
            "total_items",
            "Total",
            "Total forms matching the filter",
            VariableType::Integer,
        );

        TypeformProvider::add_auth(&mut node);

        node
    }

    async fn run(&self, context: &mut ExecutionContext) -> linkflow_types::Result<()> {
        let provider = TypeformProvider::from_context(context)?;
        let search: Option<String> = context.evaluate_optional_pin("search").await?;
        let page_size: i64 = context.evaluate_pin("page_size").await?;

        let body = context
            .send(
                provider
                    .get("/forms")
                    .query("page_size", page_size)
                    .query_opt("search", search),
            )
            .await?;

        let total = body["total_items"].as_u64();
        let forms = extract_records(body, "/items")?;
        context.log_message(&format!("Found {} forms", forms.len()), LogLevel::Debug);

        context
            .set_pin_value("total_items", json!(total.unwrap_or(forms.len() as u64)))
            .await?;
        context.set_pin_value("forms", json!(forms)).await?;
        Ok(())
    }
}
