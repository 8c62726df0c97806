//! Tool declarations for function calling
//!
//! Tools travel inside the `tools` option, already in the target vendor's
//! shape. Payload builders forward them untouched, and tool calls come back
//! only through `raw_response`. The renderers below produce the three
//! declaration shapes the supported vendors accept.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Tool definition for LLM provider
///
/// This describes a tool that the LLM can use, including its name,
/// description, and input schema in JSON Schema format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON schema for the tool's input parameters
    pub input_schema: Value,
}

impl ToolDefinition {
    /// Create a new tool definition
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }

    /// OpenAI, DeepSeek and xAI function declaration
    pub fn to_openai(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.input_schema,
            }
        })
    }

    /// Anthropic tool declaration
    pub fn to_anthropic(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "input_schema": self.input_schema,
        })
    }

    /// Google function declaration (one entry of `function_declarations`)
    pub fn to_google(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "parameters": self.input_schema,
        })
    }
}

/// `tools` value for OpenAI-shaped vendors
pub fn openai_tools(tools: &[ToolDefinition]) -> Value {
    Value::Array(tools.iter().map(ToolDefinition::to_openai).collect())
}

/// `tools` value for Anthropic
pub fn anthropic_tools(tools: &[ToolDefinition]) -> Value {
    Value::Array(tools.iter().map(ToolDefinition::to_anthropic).collect())
}

/// `tools` value for Google
pub fn google_tools(tools: &[ToolDefinition]) -> Value {
    let declarations: Vec<Value> = tools.iter().map(ToolDefinition::to_google).collect();
    json!([{ "function_declarations": declarations }])
}

/// JSON Schema fragments for tool parameters
pub mod schema {
    use serde_json::{Map, Value, json};

    /// Object schema assembled one property at a time
    ///
    /// ```
    /// use prism_llm::tools::schema::{self, ObjectSchema};
    ///
    /// let params = ObjectSchema::new()
    ///     .required("ticker", schema::string("Stock ticker symbol"))
    ///     .optional("days", schema::integer("Lookback window"))
    ///     .build();
    /// assert_eq!(params["required"], serde_json::json!(["ticker"]));
    /// ```
    #[derive(Debug, Clone, Default)]
    pub struct ObjectSchema {
        properties: Map<String, Value>,
        required: Vec<String>,
    }

    impl ObjectSchema {
        pub fn new() -> Self {
            Self::default()
        }

        /// Add a property the model must always fill
        pub fn required(mut self, name: impl Into<String>, schema: Value) -> Self {
            let name = name.into();
            self.required.push(name.clone());
            self.properties.insert(name, schema);
            self
        }

        /// Add a property the model may omit
        pub fn optional(mut self, name: impl Into<String>, schema: Value) -> Self {
            self.properties.insert(name.into(), schema);
            self
        }

        pub fn build(self) -> Value {
            json!({
                "type": "object",
                "properties": self.properties,
                "required": self.required,
            })
        }
    }

    impl From<ObjectSchema> for Value {
        fn from(schema: ObjectSchema) -> Self {
            schema.build()
        }
    }

    /// Scalar property of JSON Schema type `kind`
    pub fn scalar(kind: &str, description: &str) -> Value {
        json!({ "type": kind, "description": description })
    }

    pub fn string(description: &str) -> Value {
        scalar("string", description)
    }

    pub fn number(description: &str) -> Value {
        scalar("number", description)
    }

    pub fn integer(description: &str) -> Value {
        scalar("integer", description)
    }

    pub fn boolean(description: &str) -> Value {
        scalar("boolean", description)
    }
}
