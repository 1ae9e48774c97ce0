use super::provider::WhatsAppProvider;
use linkflow::{
    ConnectorError,
    flow::{
        execution::{LogLevel, context::ExecutionContext},
        node::{Node, NodeLogic},
        variable::VariableType,
    },
};
use linkflow_types::{async_trait, json::json};

/// Cloud API recipients are digits only, country code first.
pub fn normalize_recipient(to: &str) -> Result<String, ConnectorError> {
    let digits: String = to
        .chars()
        .filter(|c| !matches!(c, '+' | ' ' | '-' | '(' | ')'))
        .collect();

    if digits.len() < 7 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConnectorError::invalid_input(
            "to",
            format!("'{}' is not a phone number in international format", to),
        ));
    }
    Ok(digits)
}

#[crate::register_node]
#[derive(Default)]
pub struct SendWhatsAppTextNode {}

impl SendWhatsAppTextNode {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl NodeLogic for SendWhatsAppTextNode {
    fn get_node(&self) -> Node {
        let mut node = Node::new(
            "data_whatsapp_send_text_message",
            "Send Text Message",
            "Sends a text message through the WhatsApp Cloud API",
            "Data/WhatsApp",
        );
        node.add_icon("/flow/icons/whatsapp.svg");

        node.add_input_pin(
            "to",
            "To",
            "Recipient phone number with country code",
            VariableType::String,
        );
        node.add_input_pin("body", "Body", "Message text", VariableType::String);
        node.add_input_pin(
            "preview_url",
            "Preview URL",
            "Render a preview for the first link",
            VariableType::Boolean,
        )
        .set_default_value(Some(json!(false)));

        node.add_output_pin(
            "message_id",
            "Message ID",
            "WhatsApp message id (wamid...)",
            VariableType::String,
        );
        node.add_output_pin("response", "Response", "Raw API response", VariableType::Struct);

        WhatsAppProvider::add_auth(&mut node);

        node
    }

    async fn run(&self, context: &mut ExecutionContext) -> linkflow_types::Result<()> {
        let provider = WhatsAppProvider::from_context(context)?;
        let to: String = context.evaluate_pin("to").await?;
        let body: String = context.evaluate_pin("body").await?;
        let preview_url: bool = context.evaluate_pin("preview_url").await?;

        let to = normalize_recipient(&to)?;

        let response = context
            .send(provider.messages().json(json!({
                "messaging_product": "whatsapp",
                "recipient_type": "individual",
                "to": to,
                "type": "text",
                "text": { "preview_url": preview_url, "body": body },
            })))
            .await?;

        let message_id = response
            .pointer("/messages/0/id")
            .and_then(|id| id.as_str())
            .ok_or_else(|| ConnectorError::Decode("response has no message id".to_string()))?
            .to_string();

        context.log_message(&format!("Sent WhatsApp message {}", message_id), LogLevel::Info);
        context.set_pin_value("message_id", json!(message_id)).await?;
        context.set_pin_value("response", response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_recipient;

    #[test]
    fn strips_formatting() {
        assert_eq!(normalize_recipient("+49 (151) 234-5678").unwrap(), "491512345678");
    }

    #[test]
    fn rejects_letters_and_short_numbers() {
        assert!(normalize_recipient("call me").is_err());
        assert!(normalize_recipient("+12").is_err());
    }
}
