use super::provider::{JiraProvider, project_options};
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
use linkflow_types::{JsonSchema, Value, async_trait, json::json};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct JiraIssueRef {
    pub id: String,
    pub key: String,
    #[serde(rename = "self")]
    pub url: String,
}

/// Wraps plain text as an Atlassian Document Format document, one paragraph per line.
pub fn adf_document(text: &str) -> Value {
    let paragraphs: Vec<Value> = text
        .lines()
        .map(|line| {
            if line.is_empty() {
                json!({ "type": "paragraph", "content": [] })
            } else {
                json!({ "type": "paragraph", "content": [{ "type": "text", "text": line }] })
            }
        })
        .collect();

    json!({ "type": "doc", "version": 1, "content": paragraphs })
}

#[crate::register_node]
#[derive(Default)]
pub struct CreateJiraIssueNode {}

impl CreateJiraIssueNode {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl NodeLogic for CreateJiraIssueNode {
    fn get_node(&self) -> Node {
        let mut node = Node::new(
            "data_jira_create_issue",
            "Create Issue",
            "Creates an issue in a Jira project",
            "Data/Jira",
        );
        node.add_icon("/flow/icons/jira.svg");

        node.add_input_pin("project_key", "Project", "Project key", VariableType::String)
            .set_options(PinOptions::new().set_dynamic_options(true).build());

        node.add_input_pin("summary", "Summary", "Issue summary", VariableType::String);

        node.add_input_pin("issue_type", "Issue Type", "Issue type name", VariableType::String)
            .set_default_value(Some(json!("Task")));

        node.add_input_pin(
            "description",
            "Description",
            "Plain text description",
            VariableType::String,
        )
        .set_optional();

        node.add_input_pin("labels", "Labels", "Labels to add", VariableType::String)
            .set_optional()
            .set_value_type(ValueType::Array);

        node.add_input_pin("priority", "Priority", "Priority name, e.g. High", VariableType::String)
            .set_optional();

        node.add_output_pin("issue", "Issue", "Created issue reference", VariableType::Struct)
            .set_schema::<JiraIssueRef>();
        node.add_output_pin("issue_key", "Issue Key", "Key such as PROJ-123", VariableType::String);

        JiraProvider::add_auth(&mut node);

        node
    }

    async fn run(&self, context: &mut ExecutionContext) -> linkflow_types::Result<()> {
        let provider = JiraProvider::from_context(context)?;
        let project_key: String = context.evaluate_pin("project_key").await?;
        let summary: String = context.evaluate_pin("summary").await?;
        let issue_type: String = context.evaluate_pin("issue_type").await?;
        let description: Option<String> = context.evaluate_optional_pin("description").await?;
        let labels: Option<Vec<String>> = context.evaluate_optional_pin("labels").await?;
        let priority: Option<String> = context.evaluate_optional_pin("priority").await?;

        let mut fields = json!({
            "project": { "key": project_key },
            "summary": summary,
            "issuetype": { "name": issue_type },
        });
        if let Some(description) = description {
            fields["description"] = adf_document(&description);
        }
        if let Some(labels) = labels {
            fields["labels"] = json!(labels);
        }
        if let Some(priority) = priority {
            fields["priority"] = json!({ "name": priority });
        }

        let body = context
            .send(provider.post("/issue").json(json!({ "fields": fields })))
            .await?;

        let issue: JiraIssueRef = linkflow_types::json::from_value(body)
            .map_err(|e| ConnectorError::Decode(e.to_string()))?;

        context.log_message(&format!("Created Jira issue {}", issue.key), LogLevel::Info);
        context.set_pin_value("issue_key", json!(issue.key)).await?;
        context.set_pin_value("issue", json!(issue)).await?;
        Ok(())
    }

    async fn get_options(
        &self,
        pin: &str,
        context: &mut ExecutionContext,
    ) -> linkflow_types::Result<Vec<OptionItem>> {
        match pin {
            "project_key" => project_options(context).await,
            _ => Err(ConnectorError::no_dynamic_options("data_jira_create_issue", pin).into()),
        }
    }
}
