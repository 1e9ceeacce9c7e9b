//! Calculator tool - validated binary arithmetic

use crate::error::Result;
use crate::outcome::{ToolFailure, ToolOutcome};
use crate::registry::{Tool, ToolCategory, ToolDefinition, ToolResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Instant;

/// Supported arithmetic operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `a + b`
    Add,
    /// `a - b`
    Subtract,
    /// `a * b`
    Multiply,
    /// `a / b`, rejected when `b == 0`
    Divide,
}

impl Operation {
    /// Returns the string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }

    /// Apply the operation
    #[must_use]
    pub fn apply(self, a: f64, b: f64) -> ToolOutcome<Calculation> {
        let result = match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide if b == 0.0 => return ToolOutcome::error("Cannot divide by zero."),
            Self::Divide => a / b,
        };
        ToolOutcome::success(Calculation { result })
    }
}

impl FromStr for Operation {
    type Err = ToolFailure;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "add" => Ok(Self::Add),
            "subtract" => Ok(Self::Subtract),
            "multiply" => Ok(Self::Multiply),
            "divide" => Ok(Self::Divide),
            other => Err(ToolFailure::new(format!(
                "Invalid operation '{other}'. Supported operations: add, subtract, multiply, divide"
            ))),
        }
    }
}

/// Success payload
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Calculation {
    /// Numeric result
    pub result: f64,
}

/// Evaluate `a <operation> b`
#[must_use]
pub fn evaluate(operation: &str, a: f64, b: f64) -> ToolOutcome<Calculation> {
    match operation.parse::<Operation>() {
        Ok(op) => op.apply(a, b),
        Err(failure) => failure.into(),
    }
}

#[derive(Debug, Deserialize)]
struct CalculatorInput {
    operation: String,
    #[serde(alias = "num1")]
    a: f64,
    #[serde(alias = "num2")]
    b: f64,
}

/// Four-function calculator exposed to the maths specialist
pub struct CalculatorTool {
    definition: ToolDefinition,
}

impl CalculatorTool {
    /// Create a new calculator tool
    #[must_use]
    pub fn new() -> Self {
        let definition = ToolDefinition::new(
            "calculator",
            "Perform one arithmetic operation on two numbers. \
             Use this for every numeric computation instead of calculating mentally.",
            ToolCategory::Math,
        )
        .with_parameters(serde_json::json!({
            "type": "object",
            "properties": {
                "operation": {
                    "type": "string",
                    "enum": ["add", "subtract", "multiply", "divide"],
                    "description": "Arithmetic operation to perform"
                },
                "a": {
                    "type": "number",
                    "description": "First operand"
                },
                "b": {
                    "type": "number",
                    "description": "Second operand"
                }
            },
            "required": ["operation", "a", "b"]
        }));

        Self { definition }
    }
}

impl Default for CalculatorTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for CalculatorTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolResult> {
        let start = Instant::now();

        let outcome = match serde_json::from_value::<CalculatorInput>(input) {
            Ok(args) => evaluate(&args.operation, args.a, args.b),
            Err(e) => ToolOutcome::error(format!("Invalid calculator arguments: {e}")),
        };

        Ok(ToolResult::from_outcome(
            &outcome,
            start.elapsed().as_millis() as u64,
        ))
    }
}
