use crate::traits::ToolResult;

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("tool '{0}' is not registered")]
    UnknownTool(String),

    #[error("invalid arguments for tool '{tool}': {reason}")]
    InvalidArguments { tool: String, reason: String },

    #[error("tool '{tool}' failed: {error:#}")]
    ToolFailed { tool: String, error: anyhow::Error },

    #[error("model backend call failed: {0:#}")]
    Backend(anyhow::Error),

    #[error("tool '{0}' is registered more than once")]
    DuplicateTool(String),

    #[error("failed to serialize tool result: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AgentError {
    /// The result the model sees when tool errors are reported instead of
    /// aborting. `None` for errors that always abort the session.
    pub fn as_tool_result(&self) -> Option<ToolResult> {
        match self {
            Self::UnknownTool(name) => Some(ToolResult::NotFound(format!(
                "Tool '{}' does not exist",
                name
            ))),
            Self::InvalidArguments { reason, .. } => {
                Some(ToolResult::ValidationError(reason.clone()))
            }
            Self::ToolFailed { error, .. } => Some(ToolResult::BackendError(format!("{:#}", error))),
            Self::Backend(_) | Self::DuplicateTool(_) | Self::Serialization(_) => None,
        }
    }
}
