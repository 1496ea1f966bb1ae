use crate::traits::Tool;
use serde_json::Value;
use std::sync::Arc;

pub mod identity;
pub mod jira;
pub mod reset_password;

pub use identity::GetIdentityIdTool;
pub use jira::CreateJiraTicketTool;
pub use reset_password::SendResetPasswordEmailTool;

/// The customer-care tool set, in declaration order.
pub fn builtin_tools() -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(GetIdentityIdTool),
        Arc::new(SendResetPasswordEmailTool),
        Arc::new(CreateJiraTicketTool),
    ]
}

pub fn extract_string_arg(args: &Value, key: &str) -> anyhow::Result<String> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| anyhow::anyhow!("Missing '{}' parameter", key))
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builtin_tool_names() {
        let names: Vec<String> = builtin_tools()
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "get_identity_id",
                "send_reset_password_email",
                "create_jira_ticket"
            ]
        );
    }

    #[test]
    fn every_declared_parameter_is_a_required_string() {
        for tool in builtin_tools() {
            let spec = tool.spec();
            let properties = spec.parameters["properties"].as_object().unwrap();
            let required: Vec<&str> = spec.required_params().collect();
            assert_eq!(properties.len(), required.len(), "{}", spec.name);
            for (name, schema) in properties {
                assert!(required.contains(&name.as_str()));
                assert_eq!(schema["type"], "string");
            }
        }
    }

    #[test]
    fn extract_string_arg_rejects_non_strings() {
        let args = json!({"email": 42});
        assert!(extract_string_arg(&args, "email").is_err());
        assert!(extract_string_arg(&json!({}), "email").is_err());
        assert_eq!(
            extract_string_arg(&json!({"email": "a@b.c"}), "email").unwrap(),
            "a@b.c"
        );
    }
}
