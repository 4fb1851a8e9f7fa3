//! # Tool Dispatch
//!
//! The single turn-handling entry point: validate a requested tool call
//! against the registry, invoke the handler, and append both the call and its
//! result to the session transcript. The session comes in by reference; there
//! is no global state to consult or mutate.

use crate::registry::{ToolCall, ToolRegistry};
use crate::session::Session;
use crate::Result;
use tracing::debug;

/// Dispatch one tool call against the registry within a session.
///
/// On success the transcript gains two turns, the call before the result.
/// On any failure (unknown tool, malformed arguments, handler error) the
/// transcript is left untouched and the error is returned to the caller.
pub fn dispatch_tool(
    registry: &ToolRegistry,
    session: &mut Session,
    call: &ToolCall,
) -> Result<serde_json::Value> {
    let arguments: serde_json::Value = call.parse_arguments()?;
    let result = registry.invoke(&call.name, &arguments)?;

    debug!(tool = %call.name, call_id = %call.id, "dispatched tool call");

    session.record_tool(call.name.clone(), call.arguments.clone());
    let rendered = match &result {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    session.record_tool(call.name.clone(), rendered);

    Ok(result)
}
