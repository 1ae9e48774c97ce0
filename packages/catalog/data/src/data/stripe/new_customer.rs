use super::provider::StripeProvider;
use linkflow::flow::{
    execution::context::ExecutionContext,
    node::{Node, NodeLogic},
    polling::SincePoller,
};
use linkflow_types::async_trait;
use std::time::Duration;

#[crate::register_node]
#[derive(Default)]
pub struct NewStripeCustomerNode {}

impl NewStripeCustomerNode {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl NodeLogic for NewStripeCustomerNode {
    fn get_node(&self) -> Node {
        let mut node = Node::new(
            "data_stripe_new_customer",
            "New Customer",
            "Triggers for customers created since the last run",
            "Data/Stripe",
        );
        node.add_icon("/flow/icons/stripe.svg");
        node.set_polling_trigger(Duration::from_secs(60 * 60));

        StripeProvider::add_auth(&mut node);

        node
    }

    async fn run(&self, context: &mut ExecutionContext) -> linkflow_types::Result<()> {
        let provider = StripeProvider::from_context(context)?;

        SincePoller::new("/data")
            .run(context, |since| {
                provider
                    .get("/customers")
                    .query("created[gte]", since.timestamp())
                    .query("limit", 100)
            })
            .await
    }
}
