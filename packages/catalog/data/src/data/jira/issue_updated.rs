use super::provider::{JiraProvider, project_options};
use chrono::{DateTime, Utc};
use linkflow::{
    ConnectorError,
    flow::{
        execution::context::ExecutionContext,
        node::{Node, NodeLogic},
        options::OptionItem,
        pin::PinOptions,
        polling::SincePoller,
        variable::VariableType,
    },
};
use linkflow_types::async_trait;
use std::time::Duration;

/// JQL date literals have minute precision.
pub const JQL_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn updated_since_jql(project_key: Option<&str>, since: DateTime<Utc>) -> String {
    let updated = format!("updated >= \"{}\"", since.format(JQL_DATE_FORMAT));
    match project_key {
        Some(key) => format!(
            "project = \"{}\" AND {} ORDER BY updated ASC",
            key.replace('"', "\\\""),
            updated
        ),
        None => format!("{} ORDER BY updated ASC", updated),
    }
}

#[crate::register_node]
#[derive(Default)]
pub struct JiraIssueUpdatedNode {}

impl JiraIssueUpdatedNode {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl NodeLogic for JiraIssueUpdatedNode {
    fn get_node(&self) -> Node {
        let mut node = Node::new(
            "data_jira_issue_updated",
            "Issue Updated",
            "Triggers for issues created or updated since the last run",
            "Data/Jira",
        );
        node.add_icon("/flow/icons/jira.svg");

        node.add_input_pin(
            "project_key",
            "Project",
            "Limit to one project, empty for all",
            VariableType::String,
        )
        .set_optional()
        .set_options(PinOptions::new().set_dynamic_options(true).build());

        node.set_polling_trigger(Duration::from_secs(60 * 60));

        JiraProvider::add_auth(&mut node);

        node
    }

    async fn run(&self, context: &mut ExecutionContext) -> linkflow_types::Result<()> {
        let provider = JiraProvider::from_context(context)?;
        let project_key: Option<String> = context.evaluate_optional_pin("project_key").await?;

        SincePoller::new("/issues")
            .run(context, |since| {
                provider
                    .get("/search/jql")
                    .query("jql", updated_since_jql(project_key.as_deref(), since))
                    .query("maxResults", 100)
                    .query("fields", "*navigable")
            })
            .await
    }

    async fn get_options(
        &self,
        pin: &str,
        context: &mut ExecutionContext,
    ) -> linkflow_types::Result<Vec<OptionItem>> {
        match pin {
            "project_key" => project_options(context).await,
            _ => Err(ConnectorError::no_dynamic_options("data_jira_issue_updated", pin).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::updated_since_jql;
    use chrono::{TimeZone, Utc};

    #[test]
    fn jql_uses_minute_precision() {
        let since = Utc.with_ymd_and_hms(2024, 3, 5, 7, 8, 59).unwrap();
        assert_eq!(
            updated_since_jql(Some("OPS"), since),
            "project = \"OPS\" AND updated >= \"2024-03-05 07:08\" ORDER BY updated ASC"
        );
        assert_eq!(
            updated_since_jql(None, since),
            "updated >= \"2024-03-05 07:08\" ORDER BY updated ASC"
        );
    }
}
