use super::provider::StripeProvider;
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
pub struct CreateStripeCustomerNode {}

impl CreateStripeCustomerNode {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl NodeLogic for CreateStripeCustomerNode {
    fn get_node(&self) -> Node {
        let mut node = Node::new(
            "data_stripe_create_customer",
            "Create Customer",
            "Creates a customer in Stripe",
            "Data/Stripe",
        );
        node.add_icon("/flow/icons/stripe.svg");

        node.add_input_pin("email", "Email", "Customer email", VariableType::String);

        node.add_input_pin("name", "Name", "Full name or business name", VariableType::String)
            .set_optional();

        node.add_input_pin(
            "description",
            "Description",
            "Internal description",
            VariableType::String,
        )
        .set_optional();

        node.add_input_pin("phone", "Phone", "Phone number", VariableType::String)
            .set_optional();

        node.add_output_pin("customer", "Customer", "Customer object", VariableType::Struct);
        node.add_output_pin(
            "customer_id",
            "Customer ID",
            "Id of the new customer (cus_...)",
            VariableType::String,
        );

        StripeProvider::add_auth(&mut node);

        node
    }

    async fn run(&self, context: &mut ExecutionContext) -> linkflow_types::Result<()> {
        let provider = StripeProvider::from_context(context)?;
        let email: String = context.evaluate_pin("email").await?;

        let mut form = vec![("email".to_string(), email)];
        for field in ["name", "description", "phone"] {
            if let Some(value) = context.evaluate_optional_pin::<String>(field).await? {
                form.push((field.to_string(), value));
            }
        }

        let customer = context.send(provider.post("/customers").form(form)).await?;
        let customer_id = customer["id"]
            .as_str()
            .ok_or_else(|| ConnectorError::Decode("customer response has no id".to_string()))?
            .to_string();

        context.log_message(
            &format!("Created Stripe customer {}", customer_id),
            LogLevel::Info,
        );
        context.set_pin_value("customer_id", json!(customer_id)).await?;
        context.set_pin_value("customer", customer).await?;
        Ok(())
    }
}
