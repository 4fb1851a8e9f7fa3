//! # Agent Definitions
//!
//! An agent here is a named configuration interpreted by an external LLM
//! runner: model identifier, natural-language instruction, and the names of
//! the tools it may call. Definitions carry no behavior of their own.

use serde::{Deserialize, Serialize};

/// A named agent configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDefinition {
    pub name: String,
    pub model: String,
    pub description: String,
    pub instruction: String,
    /// Names of registry tools this agent may call.
    #[serde(default)]
    pub tools: Vec<String>,
}

impl AgentDefinition {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            description: String::new(),
            instruction: String::new(),
            tools: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tools.push(tool.into());
        self
    }

    /// One-paragraph summary for CLI display.
    pub fn summary(&self) -> String {
        let tools = if self.tools.is_empty() {
            "(none)".to_string()
        } else {
            self.tools.join(", ")
        };
        format!(
            "{} [model: {}]\n  {}\n  tools: {}",
            self.name, self.model, self.description, tools
        )
    }
}

/// The invoice generator agent: collects billing details and line items in
/// conversation, then calls the PDF generation tool with a JSON record.
pub fn invoice_generator() -> AgentDefinition {
    AgentDefinition::new("invoice_generator_agent", "gemini-2.0-flash")
        .with_description(
            "Generates professional PDF invoices from billing information and \
             line items collected in conversation.",
        )
        .with_instruction(
            "You are an invoice generator agent. When a user asks for an invoice, \
             collect: (1) billing information (customer name and address), (2) the \
             items or services with description, quantity, and rate, and (3) any \
             additional notes. Email is optional; include it only if the user \
             volunteers it. Never ask for an invoice number, date, or due date: the \
             invoice number and date are filled in automatically and there is no due \
             date. Once you have billing and item information, encode it as a JSON \
             object with fields bill_to {name, address, city, state, zip, email?}, \
             items [{description, quantity, rate}], and notes, and call the \
             generate_invoice_pdf tool with that JSON as the invoice_data argument. \
             If details are missing, ask for them or fall back to reasonable \
             defaults.",
        )
        .with_tool("generate_invoice_pdf")
}

/// The name-story agent: asks for the user's name and tells a short story
/// built around its meaning. Pure conversation; no tools.
pub fn name_story() -> AgentDefinition {
    AgentDefinition::new("name_story_agent", "gemini-2.0-flash")
        .with_description(
            "Asks for the user's name and creates a personalized story from the \
             meaning and origin of that name.",
        )
        .with_instruction(
            "You are a friendly storytelling agent. Greet the user warmly and ask \
             for their name. When you have it, share what the name means or where it \
             comes from, then tell a short, positive story of two to three \
             paragraphs with the user as the protagonist, woven around that meaning. \
             If the meaning is unknown to you, build the story from how the name \
             sounds instead. Keep the tone warm and encouraging so the user feels \
             good about their name.",
        )
}

/// All agent definitions shipped with this workspace.
pub fn builtin_agents() -> Vec<AgentDefinition> {
    vec![invoice_generator(), name_story()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let agent = AgentDefinition::new("echo", "test-model")
            .with_description("Echoes input")
            .with_instruction("Repeat the user message.")
            .with_tool("echo_tool");

        assert_eq!(agent.name, "echo");
        assert_eq!(agent.model, "test-model");
        assert_eq!(agent.tools, vec!["echo_tool"]);
    }

    #[test]
    fn test_invoice_generator_definition() {
        let agent = invoice_generator();
        assert_eq!(agent.name, "invoice_generator_agent");
        assert_eq!(agent.tools, vec!["generate_invoice_pdf"]);
        assert!(agent.instruction.contains("invoice_data"));
    }

    #[test]
    fn test_name_story_has_no_tools() {
        let agent = name_story();
        assert!(agent.tools.is_empty());
        assert!(!agent.instruction.is_empty());
    }

    #[test]
    fn test_summary_lists_tools() {
        let summary = invoice_generator().summary();
        assert!(summary.contains("invoice_generator_agent"));
        assert!(summary.contains("generate_invoice_pdf"));

        let summary = name_story().summary();
        assert!(summary.contains("(none)"));
    }
}
