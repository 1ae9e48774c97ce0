use linkflow::{
    ConnectorError,
    flow::{
        execution::context::ExecutionContext,
        node::{Node, NodeLogic},
        pin::PinOptions,
        variable::VariableType,
    },
};
use linkflow_types::{async_trait, json::json};
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

pub const ALGORITHMS: [&str; 4] = ["MD5", "SHA1", "SHA256", "SHA512"];

fn digest_hex<D: Digest>(text: &str) -> String {
    hex::encode(D::digest(text.as_bytes()))
}

/// Lowercase hex digest of `text`. `algorithm` must be one of [`ALGORITHMS`] as spelled there.
pub fn hash_text(algorithm: &str, text: &str) -> Result<String, ConnectorError> {
    match algorithm {
        "MD5" => Ok(digest_hex::<Md5>(text)),
        "SHA1" => Ok(digest_hex::<Sha1>(text)),
        "SHA256" => Ok(digest_hex::<Sha256>(text)),
        "SHA512" => Ok(digest_hex::<Sha512>(text)),
        other => Err(ConnectorError::invalid_input(
            "algorithm",
            format!("unsupported hash algorithm '{}'", other),
        )),
    }
}

#[crate::register_node]
#[derive(Default)]
pub struct HashTextNode {}

impl HashTextNode {
    pub fn new() -> Self {
        HashTextNode {}
    }
}

#[async_trait]
impl NodeLogic for HashTextNode {
    fn get_node(&self) -> Node {
        let mut node = Node::new(
            "hash_text",
            "Hash Text",
            "Computes the hex digest of a string",
            "Utils/String",
        );
        node.add_icon("/flow/icons/string.svg");

        node.add_input_pin("text", "Text", "Text to hash", VariableType::String);

        node.add_input_pin(
            "algorithm",
            "Algorithm",
            "Hash algorithm",
            VariableType::String,
        )
        .set_default_value(Some(json!("SHA256")))
        .set_options(
            PinOptions::new()
                .set_valid_values(ALGORITHMS.iter().map(|a| a.to_string()).collect())
                .build(),
        );

        node.add_output_pin(
            "hash",
            "Hash",
            "Lowercase hex digest",
            VariableType::String,
        );

        node
    }

    async fn run(&self, context: &mut ExecutionContext) -> linkflow_types::Result<()> {
        let text: String = context.evaluate_pin("text").await?;
        let algorithm: String = context.evaluate_pin("algorithm").await?;

        let hash = hash_text(&algorithm, &text)?;

        context.set_pin_value("hash", json!(hash)).await?;
        Ok(())
    }
}
