use std::sync::Arc;

use linkflow::{
    ConnectorError,
    flow::execution::context::ExecutionContext,
    utils::http::MockTransport,
};
use linkflow_catalog_core::Catalog;
use linkflow_catalog_std::utils::{
    math::calculator::CalculatorNode,
    string::{hash::HashTextNode, random_text::RandomTextNode},
};
use linkflow_types::json::json;

fn catalog() -> Catalog {
    Catalog::from_nodes(vec![
        Arc::new(CalculatorNode::new()),
        Arc::new(HashTextNode::new()),
        Arc::new(RandomTextNode::new()),
    ])
    .unwrap()
}

fn context(mock: &Arc<MockTransport>) -> ExecutionContext {
    ExecutionContext::new(mock.clone())
}

#[tokio::test]
async fn hash_text_node_outputs_hex() {
    let mock = Arc::new(MockTransport::new());
    let mut ctx = context(&mock)
        .with_input("text", json!("Banana is yellow"))
        .with_input("algorithm", json!("MD5"));

    let outputs = catalog().execute("hash_text", &mut ctx).await.unwrap();
    assert_eq!(outputs["hash"], json!("d588a672b7cd11af0fbc97d392caa1e2"));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn hash_text_defaults_to_sha256() {
    let mock = Arc::new(MockTransport::new());
    let mut ctx = context(&mock).with_input("text", json!("Banana is yellow"));

    let outputs = catalog().execute("hash_text", &mut ctx).await.unwrap();
    assert_eq!(
        outputs["hash"],
        json!("965eea67cf759c3a3c851b3046303d5ad2a47c831c0ca157e1e4250b18b5e087")
    );
}

#[tokio::test]
async fn selector_values_must_use_canonical_names() {
    let mock = Arc::new(MockTransport::new());
    let mut hash_ctx = context(&mock)
        .with_input("text", json!("Banana is yellow"))
        .with_input("algorithm", json!("md5"));
    let mut calc_ctx = context(&mock)
        .with_input("a", json!(1))
        .with_input("b", json!(2))
        .with_input("operation", json!("Divide"));

    let catalog = catalog();
    let hash_err = catalog.execute("hash_text", &mut hash_ctx).await.unwrap_err();
    let calc_err = catalog
        .execute("math_calculator", &mut calc_ctx)
        .await
        .unwrap_err();

    for err in [&hash_err, &calc_err] {
        assert!(matches!(
            ConnectorError::find(err),
            Some(ConnectorError::InvalidInput { .. })
        ));
    }
}

#[tokio::test]
async fn calculator_division_by_zero_is_unknown() {
    let mock = Arc::new(MockTransport::new());
    let mut ctx = context(&mock)
        .with_input("a", json!(329))
        .with_input("b", json!(0))
        .with_input("operation", json!("divide"));

    let outputs = catalog().execute("math_calculator", &mut ctx).await.unwrap();
    assert_eq!(outputs["result"], json!("Unknown"));
    assert_eq!(outputs["is_defined"], json!(false));
}

#[tokio::test]
async fn calculator_modulo_by_zero_is_zero() {
    let mock = Arc::new(MockTransport::new());
    let mut ctx = context(&mock)
        .with_input("a", json!(2))
        .with_input("b", json!(0))
        .with_input("operation", json!("modulo"));

    let outputs = catalog().execute("math_calculator", &mut ctx).await.unwrap();
    assert_eq!(outputs["result"].as_f64(), Some(0.0));
    assert_eq!(outputs["is_defined"], json!(true));
}

#[tokio::test]
async fn calculator_requires_operands() {
    let mock = Arc::new(MockTransport::new());
    let mut ctx = context(&mock).with_input("a", json!(1));

    let err = catalog()
        .execute("math_calculator", &mut ctx)
        .await
        .unwrap_err();
    assert!(matches!(
        ConnectorError::find(&err),
        Some(ConnectorError::MissingInput(pin)) if pin == "b"
    ));
}

#[tokio::test]
async fn random_text_honours_length() {
    let mock = Arc::new(MockTransport::new());
    let mut ctx = context(&mock).with_input("length", json!(42));

    let outputs = catalog().execute("random_text", &mut ctx).await.unwrap();
    assert_eq!(outputs["text"].as_str().unwrap().chars().count(), 42);
}

#[tokio::test]
async fn random_text_rejects_bad_length() {
    let mock = Arc::new(MockTransport::new());
    let mut ctx = context(&mock).with_input("length", json!(500));

    let err = catalog().execute("random_text", &mut ctx).await.unwrap_err();
    assert!(matches!(
        ConnectorError::find(&err),
        Some(ConnectorError::InvalidInput { .. })
    ));
}

#[tokio::test]
async fn random_text_rejects_empty_charset() {
    let mock = Arc::new(MockTransport::new());
    let mut ctx = context(&mock)
        .with_input("uppercase", json!(false))
        .with_input("lowercase", json!(false))
        .with_input("numbers", json!(false))
        .with_input("symbols", json!(false));

    let err = catalog().execute("random_text", &mut ctx).await.unwrap_err();
    assert!(matches!(
        ConnectorError::find(&err),
        Some(ConnectorError::InvalidInput { .. })
    ));
}
