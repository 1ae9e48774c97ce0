use super::provider::CalendlyProvider;
use linkflow::{
    ConnectorError,
    flow::{
        execution::context::ExecutionContext,
        node::{Node, NodeLogic},
        variable::VariableType,
    },
};
use linkflow_types::{async_trait, json::json};

#[crate::register_node]
#[derive(Default)]
pub struct GetCalendlyUserNode {}

impl GetCalendlyUserNode {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl NodeLogic for GetCalendlyUserNode {
    fn get_node(&self) -> Node {
        let mut node = Node::new(
            "data_calendly_get_current_user",
            "Get Current User",
            "Returns the Calendly user the credentials belong to",
            "Data/Calendly",
        );
        node.add_icon("/flow/icons/calendly.svg");

        node.add_output_pin("user", "User", "User resource", VariableType::Struct);
        node.add_output_pin(
            "user_uri",
            "User URI",
            "URI identifying the user in other Calendly calls",
            VariableType::String,
        );
        node.add_output_pin(
            "organization_uri",
            "Organization URI",
            "URI of the user's current organization",
            VariableType::String,
        );

        CalendlyProvider::add_auth(&mut node);

        node
    }

    async fn run(&self, context: &mut ExecutionContext) -> linkflow_types::Result<()> {
        let provider = CalendlyProvider::from_context(context)?;
        let body = context.send(provider.get("/users/me")).await?;

        let user = body["resource"].clone();
        let uri = user["uri"]
            .as_str()
            .ok_or_else(|| ConnectorError::Decode("user resource has no uri".to_string()))?
            .to_string();

        context.set_pin_value("user_uri", json!(uri)).await?;
        context
            .set_pin_value("organization_uri", user["current_organization"].clone())
            .await?;
        context.set_pin_value("user", user).await?;
        Ok(())
    }
}
