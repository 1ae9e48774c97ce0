use super::provider::{AsanaProvider, workspace_options};
use linkflow::{
    ConnectorError,
    flow::{
        execution::{LogLevel, context::ExecutionContext},
        node::{Node, NodeLogic},
        options::OptionItem,
        pin::{PinOptions, ValueType},
        polling::extract_records,
        variable::VariableType,
    },
};
use linkflow_types::{async_trait, json::json};

#[crate::register_node]
#[derive(Default)]
pub struct ListAsanaProjectsNode {}

impl ListAsanaProjectsNode {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl NodeLogic for ListAsanaProjectsNode {
    fn get_node(&self) -> Node {
        let mut node = Node::new(
            "data_asana_list_projects",
            "List Projects",
            "Lists the projects of an Asana workspace",
            "Data/Asana",
        );
        node.add_icon("/flow/icons/asana.svg");

        node.add_input_pin(
            "workspace",
            "Workspace",
            "Workspace to list projects from",
            VariableType::String,
        )
        .set_options(PinOptions::new().set_dynamic_options(true).build());

        node.add_input_pin(
            "archived",
            "Archived",
            "List archived projects instead of active ones",
            VariableType::Boolean,
        )
        .set_default_value(Some(json!(false)));

        node.add_output_pin("projects", "Projects", "Compact project records", VariableType::Struct)
            .set_value_type(ValueType::Array);

        node.add_output_pin("count", "Count", "Number of projects", VariableType::Integer);

        AsanaProvider::add_auth(&mut node);

        node
    }

    async fn run(&self, context: &mut ExecutionContext) -> linkflow_types::Result<()> {
        let provider = AsanaProvider::from_context(context)?;
        let workspace: String = context.evaluate_pin("workspace").await?;
        let archived: bool = context.evaluate_pin("archived").await?;

        let body = context
            .send(
                provider
                    .get("/projects")
                    .query("workspace", &workspace)
                    .query("archived", archived)
                    .query("opt_fields", "name,permalink_url,archived"),
            )
            .await?;

        let projects = extract_records(body, "/data")?;
        context.log_message(
            &format!("Found {} projects in workspace {}", projects.len(), workspace),
            LogLevel::Debug,
        );

        context.set_pin_value("count", json!(projects.len())).await?;
        context.set_pin_value("projects", json!(projects)).await?;
        Ok(())
    }

    async fn get_options(
        &self,
        pin: &str,
        context: &mut ExecutionContext,
    ) -> linkflow_types::Result<Vec<OptionItem>> {
        match pin {
            "workspace" => workspace_options(context).await,
            _ => Err(ConnectorError::no_dynamic_options("data_asana_list_projects", pin).into()),
        }
    }
}
