use linkflow::{
    ConnectorError,
    flow::{
        execution::context::ExecutionContext,
        node::{Node, NodeLogic},
        pin::PinOptions,
        variable::VariableType,
    },
};
use linkflow_types::{
    async_trait,
    json::json,
    rand::{self, Rng},
};

pub const MIN_LENGTH: i64 = 1;
pub const MAX_LENGTH: i64 = 128;

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const NUMBERS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()-_=+[]{};:,.<>?/";

#[derive(Debug, Clone, Copy, Default)]
pub struct Charset {
    pub uppercase: bool,
    pub lowercase: bool,
    pub numbers: bool,
    pub symbols: bool,
}

impl Charset {
    fn alphabet(&self) -> Vec<char> {
        let mut chars = Vec::new();
        for (enabled, set) in [
            (self.uppercase, UPPERCASE),
            (self.lowercase, LOWERCASE),
            (self.numbers, NUMBERS),
            (self.symbols, SYMBOLS),
        ] {
            if enabled {
                chars.extend(set.chars());
            }
        }
        chars
    }
}

pub fn generate(length: i64, charset: Charset) -> Result<String, ConnectorError> {
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
        return Err(ConnectorError::invalid_input(
            "length",
            format!(
                "length must be between {} and {}, got {}",
                MIN_LENGTH, MAX_LENGTH, length
            ),
        ));
    }

    let alphabet = charset.alphabet();
    if alphabet.is_empty() {
        return Err(ConnectorError::invalid_input(
            "uppercase",
            "at least one of uppercase, lowercase, numbers or symbols must be enabled",
        ));
    }

    let mut rng = rand::rng();
    Ok((0..length)
        .map(|_| alphabet[rng.random_range(0..alphabet.len())])
        .collect())
}

#[crate::register_node]
#[derive(Default)]
pub struct RandomTextNode {}

impl RandomTextNode {
    pub fn new() -> Self {
        RandomTextNode {}
    }
}

#[async_trait]
impl NodeLogic for RandomTextNode {
    fn get_node(&self) -> Node {
        let mut node = Node::new(
            "random_text",
            "Random Text",
            "Generates a random string from the selected character sets",
            "Utils/String",
        );
        node.add_icon("/flow/icons/random.svg");

        node.add_input_pin(
            "length",
            "Length",
            "Number of characters (1-128)",
            VariableType::Integer,
        )
        .set_default_value(Some(json!(16)))
        .set_options(
            PinOptions::new()
                .set_range((MIN_LENGTH as f64, MAX_LENGTH as f64))
                .build(),
        );

        for (name, friendly, default) in [
            ("uppercase", "Uppercase", true),
            ("lowercase", "Lowercase", true),
            ("numbers", "Numbers", true),
            ("symbols", "Symbols", false),
        ] {
            node.add_input_pin(
                name,
                friendly,
                &format!("Include {} characters", name),
                VariableType::Boolean,
            )
            .set_default_value(Some(json!(default)));
        }

        node.add_output_pin("text", "Text", "Generated text", VariableType::String);

        node
    }

    async fn run(&self, context: &mut ExecutionContext) -> linkflow_types::Result<()> {
        let length: i64 = context.evaluate_pin("length").await?;
        let charset = Charset {
            uppercase: context.evaluate_pin("uppercase").await?,
            lowercase: context.evaluate_pin("lowercase").await?,
            numbers: context.evaluate_pin("numbers").await?,
            symbols: context.evaluate_pin("symbols").await?,
        };

        let text = generate(length, charset)?;

        context.set_pin_value("text", json!(text)).await?;
        Ok(())
    }
}
