use ahash::AHashMap;
use std::sync::Arc;
use tracing::Instrument;

use linkflow::{
    ConnectorError,
    flow::{
        execution::{LogLevel, context::ExecutionContext},
        node::{Node, NodeLogic, is_blank},
        options::OptionItem,
        pin::PinType,
    },
};
use linkflow_types::Value;

struct CatalogEntry {
    logic: Arc<dyn NodeLogic>,
    node: Arc<Node>,
}

/// Explicit registry mapping node ids to their implementations
pub struct Catalog {
    entries: AHashMap<String, CatalogEntry>,
}

impl Catalog {
    /// Collects every node submitted through `#[register_node]` in the linked crates.
    pub fn from_inventory() -> Result<Self, ConnectorError> {
        Self::from_nodes(crate::get_catalog())
    }

    pub fn from_nodes(nodes: Vec<Arc<dyn NodeLogic>>) -> Result<Self, ConnectorError> {
        let mut entries = AHashMap::with_capacity(nodes.len());

        for logic in nodes {
            let node = Arc::new(logic.get_node());
            let name = node.name.clone();
            if entries.contains_key(&name) {
                return Err(ConnectorError::DuplicateNode(name));
            }
            entries.insert(name, CatalogEntry { logic, node });
        }

        tracing::debug!(nodes = entries.len(), "catalog built");
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn get(&self, id: &str) -> Option<&Arc<dyn NodeLogic>> {
        self.entries.get(id).map(|entry| &entry.logic)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.entries.get(id).map(|entry| entry.node.as_ref())
    }

    /// Node descriptors sorted by id, as served to the host's form builder.
    pub fn descriptors(&self) -> Vec<Node> {
        let mut nodes: Vec<Node> = self
            .entries
            .values()
            .map(|entry| entry.node.as_ref().clone())
            .collect();
        nodes.sort_by(|a, b| a.name.cmp(&b.name));
        nodes
    }

    fn entry(&self, id: &str) -> Result<&CatalogEntry, ConnectorError> {
        self.entries
            .get(id)
            .ok_or_else(|| ConnectorError::UnknownNode(id.to_string()))
    }

    /// Runs one node and returns its outputs as a JSON object.
    ///
    /// Credentials are checked before inputs, and both before `run`, so a
    /// rejected invocation never reaches the network.
    pub async fn execute(
        &self,
        id: &str,
        context: &mut ExecutionContext,
    ) -> linkflow_types::Result<Value> {
        let entry = self.entry(id)?;
        let span = tracing::info_span!("execute", node = id);

        async move {
            context.attach_node(entry.node.clone());
            context.validate_credentials()?;
            context.validate_inputs()?;

            if let Err(err) = entry.logic.run(context).await {
                context.log_message(&format!("{:#}", err), LogLevel::Error);
                return Err(err);
            }

            Ok::<Value, linkflow_types::Error>(context.take_outputs())
        }
        .instrument(span)
        .await
    }

    /// Resolves the dropdown values of a `dynamic_options` input.
    pub async fn resolve_options(
        &self,
        id: &str,
        pin: &str,
        context: &mut ExecutionContext,
    ) -> linkflow_types::Result<Vec<OptionItem>> {
        let entry = self.entry(id)?;
        let span = tracing::info_span!("resolve_options", node = id, pin);

        async move {
            let declared = entry
                .node
                .get_pin(pin, PinType::Input)
                .filter(|declared| declared.has_dynamic_options())
                .ok_or_else(|| ConnectorError::NoDynamicOptions {
                    node: id.to_string(),
                    pin: pin.to_string(),
                })?;

            context.attach_node(entry.node.clone());
            context.validate_credentials()?;

            for dependency in declared.depends_on() {
                let filled = context
                    .inputs()
                    .get(dependency)
                    .is_some_and(|value| !is_blank(value));
                if !filled {
                    return Err(ConnectorError::MissingInput(dependency.clone()).into());
                }
            }

            entry.logic.get_options(pin, context).await
        }
        .instrument(span)
        .await
    }

    pub async fn start(&self, id: &str) -> linkflow_types::Result<()> {
        self.entry(id)?.logic.on_start().await
    }

    pub async fn stop(&self, id: &str) -> linkflow_types::Result<()> {
        self.entry(id)?.logic.on_stop().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkflow::flow::{
        auth::{AuthField, Credentials},
        pin::PinOptions,
        variable::VariableType,
    };
    use linkflow::utils::http::{HttpRequest, MockTransport};
    use linkflow_types::{async_trait, json::json};

    #[derive(Default)]
    struct EchoNode {}

    #[async_trait]
    impl NodeLogic for EchoNode {
        fn get_node(&self) -> Node {
            let mut node = Node::new("test_echo", "Echo", "Echoes its input", "Test");
            node.add_auth_field("echo", AuthField::new("api_key", "API Key", "").sensitive());
            node.add_input_pin("text", "Text", "", VariableType::String);
            node.add_input_pin("board", "Board", "", VariableType::String)
                .set_optional()
                .set_options(PinOptions::new().set_dynamic_options(true).build());
            node.add_input_pin("list", "List", "", VariableType::String)
                .set_optional()
                .set_options(
                    PinOptions::new()
                        .set_dynamic_options(true)
                        .set_depends_on(vec!["board"])
                        .build(),
                );
            node.add_output_pin("echo", "Echo", "", VariableType::String);
            node
        }

        async fn run(&self, context: &mut ExecutionContext) -> linkflow_types::Result<()> {
            let text: String = context.evaluate_pin("text").await?;
            context
                .send(HttpRequest::post("https://echo.test").json(json!({ "text": text })))
                .await?;
            context.set_pin_value("echo", json!(text)).await?;
            Ok(())
        }

        async fn get_options(
            &self,
            pin: &str,
            _context: &mut ExecutionContext,
        ) -> linkflow_types::Result<Vec<OptionItem>> {
            Ok(vec![OptionItem::new(pin, pin)])
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_nodes(vec![Arc::new(EchoNode::default())]).unwrap()
    }

    fn context(mock: &Arc<MockTransport>) -> ExecutionContext {
        ExecutionContext::new(mock.clone())
    }

    fn creds() -> Credentials {
        Credentials::new().with_field("api_key", "k")
    }

    #[test]
    fn duplicates_are_rejected() {
        let result = Catalog::from_nodes(vec![
            Arc::new(EchoNode::default()),
            Arc::new(EchoNode::default()),
        ]);
        assert!(matches!(result, Err(ConnectorError::DuplicateNode(id)) if id == "test_echo"));
    }

    #[test]
    fn lookup_and_descriptors() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.ids(), vec!["test_echo"]);
        assert!(catalog.get("test_echo").is_some());
        assert_eq!(catalog.descriptors()[0].friendly_name, "Echo");
        assert!(catalog.node("missing").is_none());
    }

    #[tokio::test]
    async fn execute_returns_outputs() {
        let mock = Arc::new(MockTransport::new());
        let mut ctx = context(&mock)
            .with_credentials(creds())
            .with_input("text", json!("hi"));

        let outputs = catalog().execute("test_echo", &mut ctx).await.unwrap();
        assert_eq!(outputs, json!({"echo": "hi"}));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn credentials_are_checked_before_inputs_and_network() {
        let mock = Arc::new(MockTransport::new());
        let mut ctx = context(&mock);

        let err = catalog().execute("test_echo", &mut ctx).await.unwrap_err();
        assert!(matches!(
            ConnectorError::find(&err),
            Some(ConnectorError::MissingCredentials { .. })
        ));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_input_never_reaches_run() {
        let mock = Arc::new(MockTransport::new());
        let mut ctx = context(&mock).with_credentials(creds());

        let err = catalog().execute("test_echo", &mut ctx).await.unwrap_err();
        assert!(matches!(
            ConnectorError::find(&err),
            Some(ConnectorError::MissingInput(pin)) if pin == "text"
        ));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn run_failures_are_logged() {
        let mock = Arc::new(MockTransport::new());
        mock.respond_raw(500, "down");
        let mut ctx = context(&mock)
            .with_credentials(creds())
            .with_input("text", json!("hi"));

        assert!(catalog().execute("test_echo", &mut ctx).await.is_err());
        assert!(
            ctx.logs()
                .iter()
                .any(|log| log.log_level == LogLevel::Error && log.message.contains("500"))
        );
    }

    #[tokio::test]
    async fn unknown_node() {
        let mock = Arc::new(MockTransport::new());
        let err = catalog()
            .execute("nope", &mut context(&mock))
            .await
            .unwrap_err();
        assert!(matches!(
            ConnectorError::find(&err),
            Some(ConnectorError::UnknownNode(_))
        ));
        assert!(catalog().start("nope").await.is_err());
    }

    #[tokio::test]
    async fn options_respect_declaration_and_dependencies() {
        let catalog = catalog();
        let mock = Arc::new(MockTransport::new());

        let options = catalog
            .resolve_options("test_echo", "board", &mut context(&mock).with_credentials(creds()))
            .await
            .unwrap();
        assert_eq!(options, vec![OptionItem::new("board", "board")]);

        let err = catalog
            .resolve_options("test_echo", "list", &mut context(&mock).with_credentials(creds()))
            .await
            .unwrap_err();
        assert!(matches!(
            ConnectorError::find(&err),
            Some(ConnectorError::MissingInput(pin)) if pin == "board"
        ));

        let err = catalog
            .resolve_options("test_echo", "text", &mut context(&mock).with_credentials(creds()))
            .await
            .unwrap_err();
        assert!(matches!(
            ConnectorError::find(&err),
            Some(ConnectorError::NoDynamicOptions { .. })
        ));

        let err = catalog
            .resolve_options("test_echo", "board", &mut context(&mock))
            .await
            .unwrap_err();
        assert!(matches!(
            ConnectorError::find(&err),
            Some(ConnectorError::MissingCredentials { .. })
        ));
    }

    #[tokio::test]
    async fn lifecycle_hooks_default_to_noop() {
        let catalog = catalog();
        catalog.start("test_echo").await.unwrap();
        catalog.stop("test_echo").await.unwrap();
    }
}
