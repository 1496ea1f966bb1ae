use crate::tools::extract_string_arg;
use crate::traits::{Tool, ToolResult};
use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

const STUB_IDENTITY_ID: &str = "111111";

/// Resolves a user's identity id from their email address.
///
/// Stand-in for the identity service: every email maps to the same id.
pub struct GetIdentityIdTool;

#[async_trait]
impl Tool for GetIdentityIdTool {
    fn name(&self) -> &str {
        "get_identity_id"
    }

    fn description(&self) -> &str {
        "Retrieve a user's identity_id based on their email address."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "email": {
                    "type": "string",
                    "description": "The email address of the user."
                }
            },
            "required": ["email"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let email = extract_string_arg(&args, "email")?;
        debug!(%email, "getting identity by email");

        Ok(ToolResult::success(json!({ "identityId": STUB_IDENTITY_ID })))
    }
}
