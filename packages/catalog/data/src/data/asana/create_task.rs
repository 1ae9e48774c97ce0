use super::provider::{AsanaProvider, project_options, workspace_options};
use linkflow::{
    ConnectorError,
    flow::{
        execution::{LogLevel, context::ExecutionContext},
        node::{Node, NodeLogic},
        options::OptionItem,
        pin::PinOptions,
        variable::VariableType,
    },
};
use linkflow_types::{JsonSchema, Map, Value, async_trait, json::json};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct AsanaTask {
    pub gid: String,
    pub name: String,
    pub permalink_url: Option<String>,
    pub completed: bool,
}

pub(crate) fn parse_task(task: &Value) -> Option<AsanaTask> {
    Some(AsanaTask {
        gid: task["gid"].as_str()?.to_string(),
        name: task["name"].as_str().unwrap_or_default().to_string(),
        permalink_url: task["permalink_url"].as_str().map(String::from),
        completed: task["completed"].as_bool().unwrap_or(false),
    })
}

#[crate::register_node]
#[derive(Default)]
pub struct CreateAsanaTaskNode {}

impl CreateAsanaTaskNode {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl NodeLogic for CreateAsanaTaskNode {
    fn get_node(&self) -> Node {
        let mut node = Node::new(
            "data_asana_create_task",
            "Create Task",
            "Creates a task in an Asana workspace, optionally inside a project",
            "Data/Asana",
        );
        node.add_icon("/flow/icons/asana.svg");

        node.add_input_pin(
            "workspace",
            "Workspace",
            "Workspace the task belongs to",
            VariableType::String,
        )
        .set_options(PinOptions::new().set_dynamic_options(true).build());

        node.add_input_pin(
            "project",
            "Project",
            "Project to add the task to",
            VariableType::String,
        )
        .set_optional()
        .set_options(
            PinOptions::new()
                .set_dynamic_options(true)
                .set_depends_on(vec!["workspace"])
                .build(),
        );

        node.add_input_pin("name", "Name", "Task name", VariableType::String);

        node.add_input_pin("notes", "Notes", "Task description", VariableType::String)
            .set_optional();

        node.add_input_pin(
            "due_on",
            "Due On",
            "Due date as YYYY-MM-DD",
            VariableType::String,
        )
        .set_optional();

        node.add_input_pin(
            "assignee",
            "Assignee",
            "Assignee gid or email, 'me' for the authenticated user",
            VariableType::String,
        )
        .set_optional();

        node.add_output_pin("task", "Task", "The created task", VariableType::Struct)
            .set_schema::<AsanaTask>();

        node.add_output_pin("task_id", "Task ID", "Gid of the task", VariableType::String);

        AsanaProvider::add_auth(&mut node);

        node
    }

    async fn run(&self, context: &mut ExecutionContext) -> linkflow_types::Result<()> {
        let provider = AsanaProvider::from_context(context)?;
        let workspace: String = context.evaluate_pin("workspace").await?;
        let name: String = context.evaluate_pin("name").await?;
        let project: Option<String> = context.evaluate_optional_pin("project").await?;
        let notes: Option<String> = context.evaluate_optional_pin("notes").await?;
        let due_on: Option<String> = context.evaluate_optional_pin("due_on").await?;
        let assignee: Option<String> = context.evaluate_optional_pin("assignee").await?;

        if let Some(due_on) = &due_on {
            chrono::NaiveDate::parse_from_str(due_on, "%Y-%m-%d").map_err(|_| {
                ConnectorError::invalid_input("due_on", format!("'{}' is not YYYY-MM-DD", due_on))
            })?;
        }

        let mut data = Map::new();
        data.insert("workspace".into(), json!(workspace));
        data.insert("name".into(), json!(name));
        if let Some(project) = project {
            data.insert("projects".into(), json!([project]));
        }
        if let Some(notes) = notes {
            data.insert("notes".into(), json!(notes));
        }
        if let Some(due_on) = due_on {
            data.insert("due_on".into(), json!(due_on));
        }
        if let Some(assignee) = assignee {
            data.insert("assignee".into(), json!(assignee));
        }

        let body = context
            .send(provider.post("/tasks").json(json!({ "data": data })))
            .await?;

        let task = parse_task(&body["data"])
            .ok_or_else(|| ConnectorError::Decode("task response has no gid".to_string()))?;

        context.log_message(&format!("Created Asana task {}", task.gid), LogLevel::Info);
        context.set_pin_value("task_id", json!(task.gid)).await?;
        context.set_pin_value("task", json!(task)).await?;
        Ok(())
    }

    async fn get_options(
        &self,
        pin: &str,
        context: &mut ExecutionContext,
    ) -> linkflow_types::Result<Vec<OptionItem>> {
        match pin {
            "workspace" => workspace_options(context).await,
            "project" => project_options(context).await,
            _ => Err(ConnectorError::no_dynamic_options("data_asana_create_task", pin).into()),
        }
    }
}
