use super::{calendar_options, calendar_url};
use crate::data::google::provider::GoogleProvider;
use linkflow::{
    ConnectorError,
    flow::{
        execution::{LogLevel, context::ExecutionContext},
        node::{Node, NodeLogic},
        options::OptionItem,
        pin::{PinOptions, ValueType},
        variable::VariableType,
    },
};
use linkflow_types::{async_trait, json::json};

#[crate::register_node]
#[derive(Default)]
pub struct CreateCalendarEventNode {}

impl CreateCalendarEventNode {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl NodeLogic for CreateCalendarEventNode {
    fn get_node(&self) -> Node {
        let mut node = Node::new(
            "data_google_calendar_create_event",
            "Create Event",
            "Creates an event in a Google Calendar",
            "Data/Google/Calendar",
        );
        node.add_icon("/flow/icons/google-calendar.svg");

        node.add_input_pin(
            "calendar_id",
            "Calendar",
            "Calendar to create the event in",
            VariableType::String,
        )
        .set_default_value(Some(json!("primary")))
        .set_options(PinOptions::new().set_dynamic_options(true).build());

        node.add_input_pin("summary", "Title", "Event title", VariableType::String);

        node.add_input_pin(
            "description",
            "Description",
            "Event description",
            VariableType::String,
        )
        .set_optional();

        node.add_input_pin("start", "Start", "Start time (RFC 3339)", VariableType::Date);
        node.add_input_pin("end", "End", "End time (RFC 3339)", VariableType::Date);

        node.add_input_pin(
            "time_zone",
            "Time Zone",
            "IANA time zone, e.g. Europe/Berlin",
            VariableType::String,
        )
        .set_optional();

        node.add_input_pin(
            "attendees",
            "Attendees",
            "Attendee email addresses",
            VariableType::String,
        )
        .set_optional()
        .set_value_type(ValueType::Array);

        node.add_output_pin("event", "Event", "Created event", VariableType::Struct);
        node.add_output_pin("event_id", "Event ID", "Id of the event", VariableType::String);
        node.add_output_pin(
            "html_link",
            "Link",
            "Link to the event in Google Calendar",
            VariableType::String,
        );

        GoogleProvider::add_auth(
            &mut node,
            vec!["https://www.googleapis.com/auth/calendar.events"],
        );

        node
    }

    async fn run(&self, context: &mut ExecutionContext) -> linkflow_types::Result<()> {
        let provider = GoogleProvider::from_context(context)?;
        let calendar_id: String = context.evaluate_pin("calendar_id").await?;
        let summary: String = context.evaluate_pin("summary").await?;
        let start: String = context.evaluate_pin("start").await?;
        let end: String = context.evaluate_pin("end").await?;
        let description: Option<String> = context.evaluate_optional_pin("description").await?;
        let time_zone: Option<String> = context.evaluate_optional_pin("time_zone").await?;
        let attendees: Option<Vec<String>> = context.evaluate_optional_pin("attendees").await?;

        let starts = chrono::DateTime::parse_from_rfc3339(&start)
            .map_err(|e| ConnectorError::invalid_input("start", e.to_string()))?;
        let ends = chrono::DateTime::parse_from_rfc3339(&end)
            .map_err(|e| ConnectorError::invalid_input("end", e.to_string()))?;
        if ends <= starts {
            return Err(ConnectorError::invalid_input("end", "end must be after start").into());
        }

        let mut event = json!({
            "summary": summary,
            "start": { "dateTime": start },
            "end": { "dateTime": end },
        });
        if let Some(time_zone) = time_zone {
            event["start"]["timeZone"] = json!(time_zone);
            event["end"]["timeZone"] = json!(time_zone);
        }
        if let Some(description) = description {
            event["description"] = json!(description);
        }
        if let Some(attendees) = attendees {
            event["attendees"] = attendees
                .into_iter()
                .map(|email| json!({ "email": email }))
                .collect();
        }

        let created = context
            .send(provider.post(&calendar_url(&calendar_id, "/events")).json(event))
            .await?;

        let event_id = created["id"]
            .as_str()
            .ok_or_else(|| ConnectorError::Decode("event response has no id".to_string()))?
            .to_string();

        context.log_message(&format!("Created calendar event {}", event_id), LogLevel::Info);
        context.set_pin_value("event_id", json!(event_id)).await?;
        context
            .set_pin_value("html_link", created["htmlLink"].clone())
            .await?;
        context.set_pin_value("event", created).await?;
        Ok(())
    }

    async fn get_options(
        &self,
        pin: &str,
        context: &mut ExecutionContext,
    ) -> linkflow_types::Result<Vec<OptionItem>> {
        match pin {
            "calendar_id" => calendar_options(context).await,
            _ => Err(ConnectorError::no_dynamic_options("data_google_calendar_create_event", pin).into()),
        }
    }
}
