use crate::tools::extract_string_arg;
use crate::traits::{Tool, ToolResult};
use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

pub struct SendResetPasswordEmailTool;

#[async_trait]
impl Tool for SendResetPasswordEmailTool {
    fn name(&self) -> &str {
        "send_reset_password_email"
    }

    fn description(&self) -> &str {
        "Send a password reset email to the user based on their identity ID."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "identity_id": {
                    "type": "string",
                    "description": "The identity ID of the user."
                }
            },
            "required": ["identity_id"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let identity_id = extract_string_arg(&args, "identity_id")?;
        debug!(%identity_id, "sending reset password email");

        Ok(ToolResult::success("Email sent"))
    }
}
