use super::provider::ZendeskProvider;
use linkflow::{
    ConnectorError,
    flow::{
        execution::{LogLevel, context::ExecutionContext},
        node::{Node, NodeLogic},
        pin::PinOptions,
        variable::VariableType,
    },
};
use linkflow_types::{async_trait, json::json};

#[crate::register_node]
#[derive(Default)]
pub struct CreateZendeskTicketNode {}

impl CreateZendeskTicketNode {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl NodeLogic for CreateZendeskTicketNode {
    fn get_node(&self) -> Node {
        let mut node = Node::new(
            "data_zendesk_create_ticket",
            "Create Ticket",
            "Opens a new Zendesk Support ticket",
            "Data/Zendesk",
        );
        node.add_icon("/flow/icons/zendesk.svg");

        node.add_input_pin("subject", "Subject", "Ticket subject", VariableType::String);
        node.add_input_pin(
            "comment",
            "Comment",
            "First comment, the ticket description",
            VariableType::String,
        );

        node.add_input_pin("priority", "Priority", "Ticket priority", VariableType::String)
            .set_optional()
            .set_options(
                PinOptions::new()
                    .set_valid_values(
                        ["low", "normal", "high", "urgent"]
                            .iter()
                            .map(|p| p.to_string())
                            .collect(),
                    )
                    .build(),
            );

        node.add_input_pin(
            "requester_email",
            "Requester Email",
            "Requester, created if unknown",
            VariableType::String,
        )
        .set_optional();

        node.add_output_pin("ticket", "Ticket", "Created ticket", VariableType::Struct);
        node.add_output_pin("ticket_id", "Ticket ID", "Id of the ticket", VariableType::Integer);

        ZendeskProvider::add_auth(&mut node);

        node
    }

    async fn run(&self, context: &mut ExecutionContext) -> linkflow_types::Result<()> {
        let provider = ZendeskProvider::from_context(context)?;
        let subject: String = context.evaluate_pin("subject").await?;
        let comment: String = context.evaluate_pin("comment").await?;
        let priority: Option<String> = context.evaluate_optional_pin("priority").await?;
        let requester: Option<String> = context.evaluate_optional_pin("requester_email").await?;

        let mut ticket = json!({
            "subject": subject,
            "comment": { "body": comment },
        });
        if let Some(priority) = priority {
            ticket["priority"] = json!(priority);
        }
        if let Some(email) = requester {
            ticket["requester"] = json!({ "email": email });
        }

        let body = context
            .send(provider.post("/tickets.json").json(json!({ "ticket": ticket })))
            .await?;

        let ticket = body["ticket"].clone();
        let id = ticket["id"]
            .as_u64()
            .ok_or_else(|| ConnectorError::Decode("ticket response has no id".to_string()))?;

        context.log_message(&format!("Created Zendesk ticket #{}", id), LogLevel::Info);
        context.set_pin_value("ticket_id", json!(id)).await?;
        context.set_pin_value("ticket", ticket).await?;
        Ok(())
    }
}
