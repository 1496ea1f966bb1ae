use crate::agent::AgentError;
use crate::traits::{Tool, ToolCall, ToolResult, ToolSpec};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Immutable name-to-tool dispatch table.
///
/// Built once at startup. Each entry carries both the executor and its
/// declaration, so the specs sent to the model always match what can run.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    specs: Vec<ToolSpec>,
}

impl ToolRegistry {
    pub fn new(tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Result<Self, AgentError> {
        let mut by_name = HashMap::new();
        let mut specs = Vec::new();

        for tool in tools {
            let spec = tool.spec();
            if by_name.insert(spec.name.clone(), tool).is_some() {
                return Err(AgentError::DuplicateTool(spec.name));
            }
            specs.push(spec);
        }

        Ok(Self {
            tools: by_name,
            specs,
        })
    }

    pub fn builtin() -> Result<Self, AgentError> {
        Self::new(crate::tools::builtin_tools())
    }

    /// Declarations in registration order.
    pub fn specs(&self) -> &[ToolSpec] {
        &self.specs
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub async fn execute(&self, call: &ToolCall) -> Result<ToolResult, AgentError> {
        let tool = self
            .get(&call.name)
            .ok_or_else(|| AgentError::UnknownTool(call.name.clone()))?;

        check_arguments(&tool.spec(), &call.arguments)?;

        debug!(tool = %call.name, args = %call.arguments, "executing tool");
        let result = tool
            .execute(call.arguments.clone())
            .await
            .map_err(|error| AgentError::ToolFailed {
                tool: call.name.clone(),
                error,
            })?;
        debug!(tool = %call.name, kind = result.kind(), "tool finished");

        Ok(result)
    }
}

fn check_arguments(spec: &ToolSpec, args: &serde_json::Value) -> Result<(), AgentError> {
    let invalid = |reason: String| AgentError::InvalidArguments {
        tool: spec.name.clone(),
        reason,
    };

    let object = args
        .as_object()
        .ok_or_else(|| invalid(format!("expected a JSON object, got {}", args)))?;

    for param in spec.required_params() {
        match object.get(param) {
            Some(value) if !value.is_null() => {}
            _ => return Err(invalid(format!("missing required parameter '{}'", param))),
        }
    }

    Ok(())
}
