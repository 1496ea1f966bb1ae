//! Test doubles shared by the agent tests.

use crate::traits::{ChatRequest, ChatResponse, Provider, ToolCall};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub model: String,
    pub message_count: usize,
    pub tool_names: Vec<String>,
    pub temperature: Option<f64>,
}

/// Replays canned responses in order and records what it was asked.
/// Errors once the script runs out.
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<ChatResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<ChatResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn chat(&self, request: ChatRequest<'_>) -> anyhow::Result<ChatResponse> {
        self.requests.lock().unwrap().push(RecordedRequest {
            model: request.model.to_string(),
            message_count: request.messages.len(),
            tool_names: request
                .tools
                .unwrap_or_default()
                .iter()
                .map(|t| t.name.clone())
                .collect(),
            temperature: request.temperature,
        });

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("script exhausted"))
    }
}

pub fn text(content: &str) -> ChatResponse {
    ChatResponse {
        text: Some(content.to_string()),
        tool_calls: vec![],
    }
}

pub fn calls(tool_calls: Vec<ToolCall>) -> ChatResponse {
    ChatResponse {
        text: None,
        tool_calls,
    }
}
