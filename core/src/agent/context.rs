use crate::agent::Conversation;
use crate::traits::ChatMessage;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

const CARE_AGENT_INSTRUCTIONS: &str = "You are a customer care agent. A user will describe an issue including their email address. Investigate the issue and try to resolve it using only predefined tools or by providing general, factual advice. \
You must first retrieve the user's identity_id to perform any actions. \
Do not speculate, assume causes, or invent functionality. Do not hallucinate any tools or actions. \
If you can resolve the issue with advice or available tools, inform the user clearly and confirm if their issue is resolved. \
If the issue persists or cannot be resolved with available tools or advice, notify the user that the issue will be escalated, then create a Jira ticket with relevant details and assign it to the appropriate team queue. ";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamQueue {
    pub code: String,
    pub description: String,
}

impl TeamQueue {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }
}

/// Escalation queues, kept in declaration order.
///
/// Serializes as a JSON object `{code: description, ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamQueueCatalog {
    queues: Vec<TeamQueue>,
}

impl TeamQueueCatalog {
    pub fn new(queues: Vec<TeamQueue>) -> Self {
        Self { queues }
    }

    pub fn queues(&self) -> &[TeamQueue] {
        &self.queues
    }

    pub fn contains(&self, code: &str) -> bool {
        self.queues.iter().any(|q| q.code == code)
    }

    pub fn default_queues() -> Vec<TeamQueue> {
        vec![
            TeamQueue::new("IAM", "Identity access management"),
            TeamQueue::new("CRM", "Customer relationship management"),
            TeamQueue::new("Payments", "Payments"),
            TeamQueue::new("MARKETING", "Marketing"),
        ]
    }
}

impl Default for TeamQueueCatalog {
    fn default() -> Self {
        Self::new(Self::default_queues())
    }
}

impl Serialize for TeamQueueCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.queues.len()))?;
        for queue in &self.queues {
            map.serialize_entry(&queue.code, &queue.description)?;
        }
        map.end()
    }
}

pub struct ContextBuilder {
    pub team_queues: TeamQueueCatalog,
}

impl ContextBuilder {
    pub fn new(team_queues: TeamQueueCatalog) -> Self {
        Self { team_queues }
    }

    pub fn build_system_prompt(&self) -> String {
        let catalog = serde_json::to_string(&self.team_queues).unwrap_or_else(|_| "{}".into());
        format!(
            "{}List of team queues and description {}",
            CARE_AGENT_INSTRUCTIONS, catalog
        )
    }

    pub fn build_conversation(&self, issue: &str) -> Conversation {
        Conversation::from(vec![
            ChatMessage::system(self.build_system_prompt()),
            ChatMessage::user(issue),
        ])
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new(TeamQueueCatalog::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Role;

    #[test]
    fn catalog_serializes_in_declaration_order() {
        let json = serde_json::to_string(&TeamQueueCatalog::default()).unwrap();
        assert_eq!(
            json,
            r#"{"IAM":"Identity access management","CRM":"Customer relationship management","Payments":"Payments","MARKETING":"Marketing"}"#
        );
    }

    #[test]
    fn system_prompt_embeds_catalog() {
        let prompt = ContextBuilder::default().build_system_prompt();
        assert!(prompt.starts_with("You are a customer care agent."));
        assert!(prompt.contains("first retrieve the user's identity_id"));
        assert!(prompt.contains("Do not hallucinate any tools"));
        assert!(prompt.ends_with(
            r#"List of team queues and description {"IAM":"Identity access management","CRM":"Customer relationship management","Payments":"Payments","MARKETING":"Marketing"}"#
        ));
    }

    #[test]
    fn custom_queues_replace_defaults() {
        let builder = ContextBuilder::new(TeamQueueCatalog::new(vec![TeamQueue::new(
            "SEC",
            "Security",
        )]));
        let prompt = builder.build_system_prompt();
        assert!(prompt.ends_with(r#"{"SEC":"Security"}"#));
        assert!(!builder.team_queues.contains("IAM"));
    }

    #[test]
    fn conversation_is_seeded_with_system_and_issue() {
        let conversation = ContextBuilder::default()
            .build_conversation("email: test@email.com; I forgot my password.");
        let roles: Vec<Role> = conversation.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User]);
        assert_eq!(
            conversation.last().unwrap().content,
            "email: test@email.com; I forgot my password."
        );
    }
}
