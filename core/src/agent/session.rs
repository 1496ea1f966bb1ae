use crate::agent::{AgentError, AgentLoop, ContextBuilder, Conversation, LoopOutcome};
use crate::traits::ChatMessage;

/// One customer-care conversation: the opening issue plus follow-ups.
pub struct Session<'a> {
    agent: &'a AgentLoop,
    conversation: Conversation,
}

impl<'a> Session<'a> {
    pub fn open(agent: &'a AgentLoop, context: &ContextBuilder, issue: &str) -> Self {
        Self {
            agent,
            conversation: context.build_conversation(issue),
        }
    }

    /// Gets the model's answer to everything said so far.
    pub async fn respond(&mut self) -> Result<LoopOutcome, AgentError> {
        self.agent.process(&mut self.conversation).await
    }

    pub async fn follow_up(&mut self, message: &str) -> Result<LoopOutcome, AgentError> {
        self.conversation.push(ChatMessage::user(message));
        self.respond().await
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{ChatInvoker, ToolRegistry};
    use crate::testing::{ScriptedProvider, calls, text};
    use crate::traits::{Role, ToolCall, ToolResult};
    use serde_json::json;
    use std::sync::Arc;

    fn agent(provider: Arc<ScriptedProvider>) -> AgentLoop {
        AgentLoop::new(
            ChatInvoker::new(provider, "test-model"),
            Arc::new(ToolRegistry::builtin().unwrap()),
        )
    }

    fn tool_results(conversation: &Conversation) -> Vec<(String, ToolResult)> {
        conversation
            .messages()
            .iter()
            .filter(|m| m.role == Role::Tool)
            .map(|m| {
                (
                    m.name.clone().unwrap_or_default(),
                    ToolResult::from_json(&m.content).unwrap(),
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn password_reset_flow() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            calls(vec![ToolCall::new(
                "get_identity_id",
                json!({"email": "test@email.com"}),
            )]),
            calls(vec![ToolCall::new(
                "send_reset_password_email",
                json!({"identity_id": "111111"}),
            )]),
            text("I've sent a password reset email to test@email.com."),
        ]));
        let agent = agent(provider.clone());
        let context = ContextBuilder::default();

        let mut session = Session::open(
            &agent,
            &context,
            "email: test@email.com; I forgot my password.",
        );
        let outcome = session.respond().await.unwrap();

        assert!(outcome.reply.content.contains("password reset email"));
        assert!(!outcome.reply.has_tool_calls());
        assert_eq!(outcome.rounds, 2);
        assert_eq!(
            tool_results(session.conversation()),
            vec![
                (
                    "get_identity_id".to_string(),
                    ToolResult::success(json!({"identityId": "111111"}))
                ),
                (
                    "send_reset_password_email".to_string(),
                    ToolResult::success("Email sent")
                ),
            ]
        );
        assert_eq!(provider.remaining(), 0);
    }

    #[tokio::test]
    async fn unresolved_issue_is_escalated() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            calls(vec![ToolCall::new(
                "get_identity_id",
                json!({"email": "jane@corp.com"}),
            )]),
            calls(vec![ToolCall::new(
                "create_jira_ticket",
                json!({
                    "description": "User 111111 cannot access the admin console after role change.",
                    "queue": "IAM"
                }),
            )]),
            text("I couldn't resolve this, so I've escalated it to the IAM team."),
        ]));
        let agent = agent(provider);
        let context = ContextBuilder::default();

        let mut session = Session::open(
            &agent,
            &context,
            "email: jane@corp.com; I lost admin access.",
        );
        let outcome = session.respond().await.unwrap();

        assert!(outcome.reply.content.contains("escalated"));
        let results = tool_results(session.conversation());
        assert_eq!(results.last().unwrap().0, "create_jira_ticket");
        assert_eq!(
            results.last().unwrap().1,
            ToolResult::success("Jira ticket created successfully")
        );
    }

    #[tokio::test]
    async fn follow_up_is_appended_to_the_same_conversation() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            text("Could you share your email address?"),
            calls(vec![ToolCall::new(
                "get_identity_id",
                json!({"email": "test@email.com"}),
            )]),
            text("Thanks, I found your account."),
        ]));
        let agent = agent(provider.clone());
        let context = ContextBuilder::default();

        let mut session = Session::open(&agent, &context, "I forgot my password.");
        let first = session.respond().await.unwrap();
        assert_eq!(first.rounds, 0);

        let second = session.follow_up("test@email.com").await.unwrap();
        assert_eq!(second.reply.content, "Thanks, I found your account.");

        let roles: Vec<Role> = session
            .conversation()
            .messages()
            .iter()
            .map(|m| m.role)
            .collect();
        assert_eq!(
            roles,
            vec![
                Role::System,
                Role::User,
                Role::Assistant,
                Role::User,
                Role::Assistant,
                Role::Tool,
                Role::Assistant,
            ]
        );
        assert_eq!(session.conversation().messages()[3].content, "test@email.com");
        // The follow-up request saw the whole history.
        assert_eq!(provider.requests()[1].message_count, 4);
    }

    #[tokio::test]
    async fn hard_cap_then_follow_up_keeps_tool_calls_answered() {
        let lookup = || {
            calls(vec![ToolCall::new(
                "get_identity_id",
                json!({"email": "test@email.com"}),
            )])
        };
        let provider = Arc::new(ScriptedProvider::new(vec![
            lookup(),
            lookup(),
            lookup(),
            lookup(),
            text("I looked you up but ran out of steps."),
            text("Let me try again."),
        ]));
        let agent = agent(provider.clone()).with_max_iterations(3);
        let context = ContextBuilder::default();

        let mut session = Session::open(&agent, &context, "email: test@email.com; locked out.");
        let first = session.respond().await.unwrap();
        assert!(first.budget_exhausted);
        assert!(!first.reply.has_tool_calls());

        let second = session.follow_up("hello?").await.unwrap();
        assert_eq!(second.reply.content, "Let me try again.");
        assert_eq!(provider.remaining(), 0);

        let messages = session.conversation().messages();
        for (i, message) in messages.iter().enumerate() {
            if !message.has_tool_calls() {
                continue;
            }
            assert_eq!(messages[i + 1].role, Role::Tool, "message {i} left unanswered");
            for call in message.tool_calls() {
                assert!(
                    messages[i + 1..]
                        .iter()
                        .any(|m| m.tool_call_id.as_deref() == Some(call.id.as_str())),
                    "tool call {} has no result",
                    call.id
                );
            }
        }
    }

    #[tokio::test]
    async fn backend_failure_ends_the_session() {
        let provider = Arc::new(ScriptedProvider::new(vec![]));
        let agent = agent(provider);
        let context = ContextBuilder::default();

        let mut session = Session::open(&agent, &context, "help");
        let err = session.respond().await.unwrap_err();
        assert!(matches!(err, AgentError::Backend(_)));
    }
}
