use super::provider::ZendeskProvider;
use chrono::SecondsFormat;
use linkflow::flow::{
    execution::context::ExecutionContext,
    node::{Node, NodeLogic},
    polling::SincePoller,
};
use linkflow_types::async_trait;
use std::time::Duration;

#[crate::register_node]
#[derive(Default)]
pub struct ZendeskTicketCreatedNode {}

impl ZendeskTicketCreatedNode {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl NodeLogic for ZendeskTicketCreatedNode {
    fn get_node(&self) -> Node {
        let mut node = Node::new(
            "data_zendesk_ticket_created",
            "Ticket Created",
            "Triggers for tickets created since the last run",
            "Data/Zendesk",
        );
        node.add_icon("/flow/icons/zendesk.svg");
        node.set_polling_trigger(Duration::from_secs(60 * 60));

        ZendeskProvider::add_auth(&mut node);

        node
    }

    async fn run(&self, context: &mut ExecutionContext) -> linkflow_types::Result<()> {
        let provider = ZendeskProvider::from_context(context)?;

        SincePoller::new("/results")
            .run(context, |since| {
                provider
                    .get("/search.json")
                    .query(
                        "query",
                        format!(
                            "type:ticket created>={}",
                            since.to_rfc3339_opts(SecondsFormat::Secs, true)
                        ),
                    )
                    .query("sort_by", "created_at")
                    .query("sort_order", "asc")
            })
            .await
    }
}
