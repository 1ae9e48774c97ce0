use super::provider::StripeProvider;
use linkflow::flow::{
    execution::context::ExecutionContext,
    node::{Node, NodeLogic},
    pin::ValueType,
    variable::VariableType,
};
use linkflow_types::{Value, async_trait, json::json};

#[crate::register_node]
#[derive(Default)]
pub struct GetStripeBalanceNode {}

impl GetStripeBalanceNode {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl NodeLogic for GetStripeBalanceNode {
    fn get_node(&self) -> Node {
        let mut node = Node::new(
            "data_stripe_get_balance",
            "Get Balance",
            "Retrieves the current account balance",
            "Data/Stripe",
        );
        node.add_icon("/flow/icons/stripe.svg");

        node.add_output_pin("balance", "Balance", "Balance object", VariableType::Struct);
        node.add_output_pin(
            "available",
            "Available",
            "Funds available for payout, per currency",
            VariableType::Struct,
        )
        .set_value_type(ValueType::Array);
        node.add_output_pin(
            "pending",
            "Pending",
            "Funds not yet available, per currency",
            VariableType::Struct,
        )
        .set_value_type(ValueType::Array);

        StripeProvider::add_auth(&mut node);

        node
    }

    async fn run(&self, context: &mut ExecutionContext) -> linkflow_types::Result<()> {
        let provider = StripeProvider::from_context(context)?;
        let balance = context.send(provider.get("/balance")).await?;

        let available = balance.get("available").cloned().unwrap_or(json!([]));
        let pending = balance.get("pending").cloned().unwrap_or(json!([]));

        context.set_pin_value("available", non_null(available)).await?;
        context.set_pin_value("pending", non_null(pending)).await?;
        context.set_pin_value("balance", balance).await?;
        Ok(())
    }
}

fn non_null(value: Value) -> Value {
    if value.is_null() { json!([]) } else { value }
}
