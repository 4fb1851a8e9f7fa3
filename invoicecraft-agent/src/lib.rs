//! # invoicecraft-agent
//!
//! The agent surface, modeled as explicit typed objects:
//! 1. An `AgentDefinition` is pure configuration - a name, a model identifier,
//!    an instruction string, and the tool names it may use. No computation.
//! 2. A `ToolRegistry` maps tool names to typed handlers; registrations are
//!    validated up front, so dispatch never resolves names dynamically against
//!    unchecked state.
//! 3. A `Session` is an explicit transcript object passed by reference into
//!    each dispatch call - never ambient global state.
//!
//! Model invocation and conversational turn-taking live outside this
//! workspace; this crate only covers what happens when a tool call arrives.

pub mod definition;
pub mod dispatch;
pub mod registry;
pub mod session;

pub use definition::{builtin_agents, invoice_generator, name_story, AgentDefinition};
pub use dispatch::dispatch_tool;
pub use registry::{
    builtin_registry, invoice_tool_definition, ToolCall, ToolDefinition, ToolHandler, ToolRegistry,
};
pub use session::{InMemorySessionStore, Role, Session, SessionStore, Turn};

pub use invoicecraft_error::{Error, ErrorKind, ErrorStatus, Result};
