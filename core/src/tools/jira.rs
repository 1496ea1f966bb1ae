use crate::tools::extract_string_arg;
use crate::traits::{Tool, ToolResult};
use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

/// Escalates an unresolved issue to a team queue.
pub struct CreateJiraTicketTool;

#[async_trait]
impl Tool for CreateJiraTicketTool {
    fn name(&self) -> &str {
        "create_jira_ticket"
    }

    fn description(&self) -> &str {
        "Create a Jira ticket for a customer issue."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "description": {
                    "type": "string",
                    "description": "Detailed description of the user issue and context."
                },
                "queue": {
                    "type": "string",
                    "description": "The queue or team name the ticket should be assigned to."
                }
            },
            "required": ["description", "queue"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let description = extract_string_arg(&args, "description")?;
        let queue = extract_string_arg(&args, "queue")?;
        debug!(%queue, %description, "creating jira ticket");

        Ok(ToolResult::success("Jira ticket created successfully"))
    }
}
