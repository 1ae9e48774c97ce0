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
use serde::{Serialize, Serializer};
use std::str::FromStr;

/// Text emitted for results that have no numeric value
pub const UNDEFINED_SENTINEL: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
        Operation::Modulo,
        Operation::Power,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
            Operation::Modulo => "modulo",
            Operation::Power => "power",
        }
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("unknown operation '{}'", s))
    }
}

/// Outcome of a calculation. Division by zero is `Undefined` rather than an
/// error so a workflow keeps going; it is emitted as [`UNDEFINED_SENTINEL`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quantity {
    Value(f64),
    Undefined,
}

impl Quantity {
    pub fn value(&self) -> Option<f64> {
        match self {
            Quantity::Value(value) => Some(*value),
            Quantity::Undefined => None,
        }
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Quantity::Value(value) => serializer.serialize_f64(*value),
            Quantity::Undefined => serializer.serialize_str(UNDEFINED_SENTINEL),
        }
    }
}

pub fn calculate(operation: Operation, a: f64, b: f64) -> Quantity {
    let raw = match operation {
        Operation::Add => a + b,
        Operation::Subtract => a - b,
        Operation::Multiply => a * b,
        Operation::Divide if b == 0.0 => return Quantity::Undefined,
        Operation::Divide => a / b,
        Operation::Modulo => a % b,
        Operation::Power => a.powf(b),
    };

    // NaN (e.g. x % 0) maps to zero; overflow has no JSON number
    if raw.is_nan() {
        Quantity::Value(0.0)
    } else if raw.is_infinite() {
        Quantity::Undefined
    } else {
        Quantity::Value(raw)
    }
}

#[crate::register_node]
#[derive(Default)]
pub struct CalculatorNode {}

impl CalculatorNode {
    pub fn new() -> Self {
        CalculatorNode {}
    }
}

#[async_trait]
impl NodeLogic for CalculatorNode {
    fn get_node(&self) -> Node {
        let mut node = Node::new(
            "math_calculator",
            "Calculator",
            "Applies a basic arithmetic operation to two numbers",
            "Utils/Math",
        );
        node.add_icon("/flow/icons/calculator.svg");

        node.add_input_pin("a", "A", "Left operand", VariableType::Float);
        node.add_input_pin("b", "B", "Right operand", VariableType::Float);

        node.add_input_pin(
            "operation",
            "Operation",
            "Operation to apply",
            VariableType::String,
        )
        .set_default_value(Some(json!("add")))
        .set_options(
            PinOptions::new()
                .set_valid_values(
                    Operation::ALL
                        .iter()
                        .map(|op| op.as_str().to_string())
                        .collect(),
                )
                .build(),
        );

        node.add_output_pin(
            "result",
            "Result",
            "Numeric result, or \"Unknown\" when undefined (division by zero)",
            VariableType::Generic,
        );

        node.add_output_pin(
            "is_defined",
            "Is Defined",
            "False when the result is undefined",
            VariableType::Boolean,
        );

        node
    }

    async fn run(&self, context: &mut ExecutionContext) -> linkflow_types::Result<()> {
        let a: f64 = context.evaluate_pin("a").await?;
        let b: f64 = context.evaluate_pin("b").await?;
        let operation: String = context.evaluate_pin("operation").await?;
        let operation = Operation::from_str(&operation)
            .map_err(|reason| ConnectorError::invalid_input("operation", reason))?;

        let result = calculate(operation, a, b);

        context.set_pin_value("result", json!(result)).await?;
        context
            .set_pin_value("is_defined", json!(result.value().is_some()))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divide_by_zero_is_undefined() {
        let result = calculate(Operation::Divide, 329.0, 0.0);
        assert_eq!(result, Quantity::Undefined);
        assert_eq!(json!(result), json!("Unknown"));
    }

    #[test]
    fn modulo_by_zero_is_zero() {
        let result = calculate(Operation::Modulo, 2.0, 0.0);
        assert_eq!(result, Quantity::Value(0.0));
        assert_eq!(json!(result).as_f64(), Some(0.0));
    }

    #[test]
    fn regular_arithmetic() {
        assert_eq!(calculate(Operation::Add, 2.0, 3.5).value(), Some(5.5));
        assert_eq!(calculate(Operation::Subtract, 2.0, 3.0).value(), Some(-1.0));
        assert_eq!(calculate(Operation::Multiply, 4.0, 2.5).value(), Some(10.0));
        assert_eq!(calculate(Operation::Divide, 9.0, 3.0).value(), Some(3.0));
        assert_eq!(calculate(Operation::Modulo, 7.0, 4.0).value(), Some(3.0));
        assert_eq!(calculate(Operation::Power, 2.0, 10.0).value(), Some(1024.0));
    }

    #[test]
    fn overflow_and_nan_guards() {
        assert_eq!(calculate(Operation::Power, 10.0, 400.0), Quantity::Undefined);
        assert_eq!(calculate(Operation::Power, -8.0, 0.5), Quantity::Value(0.0));
    }

    #[test]
    fn operations_use_canonical_names() {
        assert_eq!(Operation::from_str("divide"), Ok(Operation::Divide));
        assert_eq!(Operation::from_str("modulo"), Ok(Operation::Modulo));
        assert!(Operation::from_str("Divide").is_err());
        assert!(Operation::from_str("sqrt").is_err());
    }
}
