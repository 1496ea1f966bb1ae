use crate::agent::{AgentError, Conversation};
use crate::traits::{ChatMessage, ChatRequest, ChatResponse, Provider, ToolSpec};
use std::sync::Arc;
use tracing::debug;

/// One request/response round trip against the model backend.
pub struct ChatInvoker {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: Option<f64>,
}

impl ChatInvoker {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: Option<f64>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sends the conversation, appends the assistant reply and returns it.
    pub async fn chat_and_append(
        &self,
        conversation: &mut Conversation,
        tools: &[ToolSpec],
    ) -> Result<ChatMessage, AgentError> {
        let request = ChatRequest {
            model: &self.model,
            messages: conversation.messages(),
            tools: if tools.is_empty() { None } else { Some(tools) },
            temperature: self.temperature,
        };

        let reply = self.send(request).await?.into_message();
        debug!(
            provider = self.provider.name(),
            tool_calls = reply.tool_calls().len(),
            "model replied"
        );
        conversation.push(reply.clone());

        Ok(reply)
    }

    /// Like `chat_and_append` but declares no tools, and keeps only the text
    /// of the reply so the conversation ends on a plain answer.
    pub async fn final_answer(
        &self,
        conversation: &mut Conversation,
    ) -> Result<ChatMessage, AgentError> {
        let request = ChatRequest {
            model: &self.model,
            messages: conversation.messages(),
            tools: None,
            temperature: self.temperature,
        };

        let response = self.send(request).await?;
        if !response.tool_calls.is_empty() {
            debug!(
                ignored = response.tool_calls.len(),
                "tool calls in final answer ignored"
            );
        }

        let reply = ChatMessage::assistant(response.text.unwrap_or_default());
        conversation.push(reply.clone());

        Ok(reply)
    }

    async fn send(&self, request: ChatRequest<'_>) -> Result<ChatResponse, AgentError> {
        self.provider.chat(request).await.map_err(AgentError::Backend)
    }
}
