//! # Tool Registry
//!
//! An explicit capability interface: tool names map to typed handlers, and
//! every registration is validated up front (unique non-empty name, object
//! parameter schema). Dispatch then only ever sees names that were checked at
//! registration time.

use crate::Result;
use invoicecraft_doc::{generate_invoice_message, PdfRenderer};
use invoicecraft_error::Error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

/// A tool the model can call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON schema of the arguments object.
    pub parameters: serde_json::Value,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }

    pub fn with_parameters(mut self, parameters: serde_json::Value) -> Self {
        self.parameters = parameters;
        self
    }
}

/// A tool call requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    /// JSON-encoded arguments object.
    pub arguments: String,
}

impl ToolCall {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    /// Parse arguments as JSON
    pub fn parse_arguments<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.arguments).map_err(|e| {
            Error::parse_failed("tool call arguments are not valid JSON")
                .with_operation("tool_call::parse_arguments")
                .with_context("tool", self.name.clone())
                .set_source(e)
        })
    }
}

/// A registered handler: arguments object in, JSON result out.
pub type ToolHandler = Box<dyn Fn(&serde_json::Value) -> Result<serde_json::Value> + Send + Sync>;

struct RegisteredTool {
    definition: ToolDefinition,
    handler: ToolHandler,
}

/// Registry mapping tool names to typed handlers.
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, RegisteredTool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Validation happens here, not at call time:
    /// - the name must be non-empty
    /// - the name must not already be registered
    /// - `parameters` must be an object schema (`"type": "object"`)
    pub fn register(&mut self, definition: ToolDefinition, handler: ToolHandler) -> Result<()> {
        let name = definition.name.trim();
        if name.is_empty() {
            return Err(Error::tool_rejected(
                definition.name.clone(),
                "tool name must be non-empty",
            )
            .with_operation("registry::register"));
        }
        if self.tools.contains_key(name) {
            return Err(Error::tool_rejected(name, "tool name already registered")
                .with_operation("registry::register"));
        }
        let is_object_schema = definition
            .parameters
            .get("type")
            .and_then(|t| t.as_str())
            .map_or(false, |t| t == "object");
        if !is_object_schema {
            return Err(Error::tool_rejected(
                name,
                "tool parameters must be an object schema",
            )
            .with_operation("registry::register"));
        }

        debug!(tool = name, "registered tool");
        let name = name.to_string();
        self.tools.insert(
            name,
            RegisteredTool {
                definition,
                handler,
            },
        );
        Ok(())
    }

    /// Invoke a registered tool by name with an arguments object.
    pub fn invoke(&self, name: &str, arguments: &serde_json::Value) -> Result<serde_json::Value> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| Error::tool_unknown(name).with_operation("registry::invoke"))?;
        (tool.handler)(arguments)
    }

    /// Whether a tool with the given name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Registered definitions in name order.
    pub fn definitions(&self) -> Vec<&ToolDefinition> {
        self.tools.values().map(|t| &t.definition).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Definition of the shipped invoice generation tool.
pub fn invoice_tool_definition() -> ToolDefinition {
    ToolDefinition::new(
        "generate_invoice_pdf",
        "Generates an invoice PDF from the provided invoice data and returns \
         a message with the output path.",
    )
    .with_parameters(serde_json::json!({
        "type": "object",
        "properties": {
            "invoice_data": {
                "type": "string",
                "description": "JSON string containing invoice information"
            }
        },
        "required": ["invoice_data"]
    }))
}

/// Build the registry shipped with this workspace: the single
/// `generate_invoice_pdf` tool, writing PDFs into `out_dir`.
///
/// The handler itself never fails on bad invoice data - it reports parse and
/// render problems as descriptive text, exactly as the tool surface promises.
/// Only a malformed arguments envelope (missing `invoice_data`) is an error.
pub fn builtin_registry(out_dir: PathBuf) -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();

    registry.register(
        invoice_tool_definition(),
        Box::new(move |arguments| {
            let invoice_data = arguments
                .get("invoice_data")
                .and_then(|v| v.as_str())
                .ok_or_else(|| {
                    Error::invalid_argument("missing string argument 'invoice_data'")
                        .with_operation("tool::generate_invoice_pdf")
                })?;

            let renderer = PdfRenderer::new();
            let message = generate_invoice_message(invoice_data, &renderer, &out_dir);
            Ok(serde_json::Value::String(message))
        }),
    )?;

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use invoicecraft_error::ErrorKind;
    use serde_json::json;

    fn echo_tool() -> (ToolDefinition, ToolHandler) {
        let definition = ToolDefinition::new("echo", "Echoes its arguments back");
        let handler: ToolHandler = Box::new(|args| Ok(args.clone()));
        (definition, handler)
    }

    #[test]
    fn test_register_and_invoke() {
        let mut registry = ToolRegistry::new();
        let (definition, handler) = echo_tool();
        registry.register(definition, handler).unwrap();

        assert!(registry.contains("echo"));
        let result = registry.invoke("echo", &json!({"x": 1})).unwrap();
        assert_eq!(result, json!({"x": 1}));
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut registry = ToolRegistry::new();
        let definition = ToolDefinition::new("  ", "blank name");
        let err = registry
            .register(definition, Box::new(|args| Ok(args.clone())))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ToolRejected);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = ToolRegistry::new();
        let (definition, handler) = echo_tool();
        registry.register(definition, handler).unwrap();

        let (definition, handler) = echo_tool();
        let err = registry.register(definition, handler).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ToolRejected);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_non_object_schema_rejected() {
        let mut registry = ToolRegistry::new();
        let definition =
            ToolDefinition::new("bad", "schema is a string").with_parameters(json!({
                "type": "string"
            }));
        let err = registry
            .register(definition, Box::new(|args| Ok(args.clone())))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ToolRejected);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unknown_tool() {
        let registry = ToolRegistry::new();
        let err = registry.invoke("missing", &json!({})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ToolUnknown);
    }

    #[test]
    fn test_definitions_in_name_order() {
        let mut registry = ToolRegistry::new();
        registry
            .register(
                ToolDefinition::new("zeta", "last"),
                Box::new(|args| Ok(args.clone())),
            )
            .unwrap();
        registry
            .register(
                ToolDefinition::new("alpha", "first"),
                Box::new(|args| Ok(args.clone())),
            )
            .unwrap();

        let names: Vec<&str> = registry
            .definitions()
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_tool_call_parse_arguments() {
        #[derive(serde::Deserialize, Debug)]
        struct Args {
            invoice_data: String,
        }

        let call = ToolCall::new("c1", "generate_invoice_pdf", r#"{"invoice_data": "{}"}"#);
        let args: Args = call.parse_arguments().unwrap();
        assert_eq!(args.invoice_data, "{}");

        let call = ToolCall::new("c2", "generate_invoice_pdf", "not json");
        let err = call.parse_arguments::<Args>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseFailed);
    }

    #[test]
    fn test_builtin_registry_missing_argument() {
        let registry = builtin_registry(std::env::temp_dir()).unwrap();
        let err = registry
            .invoke("generate_invoice_pdf", &json!({}))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_builtin_registry_generates_pdf() {
        let dir = tempfile::TempDir::new().unwrap();
        let registry = builtin_registry(dir.path().to_path_buf()).unwrap();

        let arguments = json!({
            "invoice_data": r#"{"items": [{"description": "Design", "quantity": 3, "rate": 50.0}]}"#
        });
        let result = registry.invoke("generate_invoice_pdf", &arguments).unwrap();
        let message = result.as_str().unwrap();

        assert!(message.starts_with("Invoice PDF generated successfully: "));
        let path = message.trim_start_matches("Invoice PDF generated successfully: ");
        assert!(std::path::Path::new(path).exists());
    }

    #[test]
    fn test_builtin_registry_flattens_bad_invoice_data() {
        let dir = tempfile::TempDir::new().unwrap();
        let registry = builtin_registry(dir.path().to_path_buf()).unwrap();

        let arguments = json!({"invoice_data": "{not json"});
        let result = registry.invoke("generate_invoice_pdf", &arguments).unwrap();
        let message = result.as_str().unwrap();

        assert!(message.starts_with("Error generating invoice PDF: "));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
