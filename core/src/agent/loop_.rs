use crate::agent::{AgentError, ChatInvoker, Conversation, ToolRegistry};
use crate::config::{BudgetMode, DEFAULT_MAX_ITERATIONS, ToolErrorPolicy};
use crate::traits::{ChatMessage, ToolCall, ToolResult};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct LoopOutcome {
    /// Last assistant reply.
    pub reply: ChatMessage,
    /// Number of tool-execution rounds performed.
    pub rounds: usize,
    /// Set when the hard cap stopped the loop with tool calls still pending.
    /// `reply` is then the model's tool-free answer to the skipped calls.
    pub budget_exhausted: bool,
}

pub struct AgentLoop {
    invoker: ChatInvoker,
    tool_registry: Arc<ToolRegistry>,
    max_iterations: usize,
    budget_mode: BudgetMode,
    tool_errors: ToolErrorPolicy,
}

impl AgentLoop {
    pub fn new(invoker: ChatInvoker, tool_registry: Arc<ToolRegistry>) -> Self {
        Self {
            invoker,
            tool_registry,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            budget_mode: BudgetMode::default(),
            tool_errors: ToolErrorPolicy::default(),
        }
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_budget_mode(mut self, mode: BudgetMode) -> Self {
        self.budget_mode = mode;
        self
    }

    pub fn with_tool_errors(mut self, policy: ToolErrorPolicy) -> Self {
        self.tool_errors = policy;
        self
    }

    /// Asks the model for a reply to the conversation as it stands, then
    /// runs any tool calls it makes.
    pub async fn process(&self, conversation: &mut Conversation) -> Result<LoopOutcome, AgentError> {
        let reply = self
            .invoker
            .chat_and_append(conversation, self.tool_registry.specs())
            .await?;
        self.execute_tools(conversation, reply).await
    }

    /// Executes the tool calls carried by `reply`, feeding each result back to
    /// the model, until a reply without tool calls arrives or the budget runs
    /// out.
    ///
    /// Every tool call gets its own model turn: a reply with N calls produces
    /// N tool messages, each followed by one assistant reply. The last of
    /// those replies decides the next round.
    pub async fn execute_tools(
        &self,
        conversation: &mut Conversation,
        mut reply: ChatMessage,
    ) -> Result<LoopOutcome, AgentError> {
        let specs = self.tool_registry.specs();
        // Signed: in legacy mode the countdown keeps going below zero.
        let mut iterations_to_end = self.max_iterations as i64;
        let mut rounds = 0;

        loop {
            let has_calls = reply.has_tool_calls();

            if self.budget_mode == BudgetMode::HardCap && iterations_to_end <= 0 {
                if has_calls {
                    warn!(
                        pending = reply.tool_calls().len(),
                        rounds, "tool budget exhausted; pending tool calls dropped"
                    );
                    reply = self.close_out(conversation, &reply).await?;
                }
                return Ok(LoopOutcome {
                    reply,
                    rounds,
                    budget_exhausted: has_calls,
                });
            }

            // Legacy mode runs one extra, empty round when the budget hits zero
            // on a reply without tool calls.
            if !has_calls && iterations_to_end != 0 {
                info!(rounds, "model produced a final answer");
                return Ok(LoopOutcome {
                    reply,
                    rounds,
                    budget_exhausted: false,
                });
            }

            if has_calls && iterations_to_end <= 0 {
                warn!(
                    iterations_to_end,
                    "tool budget exceeded; legacy mode keeps executing tool calls"
                );
            }

            rounds += 1;
            info!(
                round = rounds,
                iterations_to_end,
                tool_calls = reply.tool_calls().len(),
                "executing tool round"
            );

            let tool_calls = reply.tool_calls().to_vec();
            for call in &tool_calls {
                let result = self.run_tool(call).await?;
                conversation.push(ChatMessage::tool_result(call, result.to_json()?));
                reply = self.invoker.chat_and_append(conversation, specs).await?;
            }

            iterations_to_end -= 1;
        }
    }

    /// Answers every pending call with a "not executed" result, then asks the
    /// model for a plain-text answer with no tools on offer. Leaves no
    /// unanswered tool call in the conversation.
    async fn close_out(
        &self,
        conversation: &mut Conversation,
        reply: &ChatMessage,
    ) -> Result<ChatMessage, AgentError> {
        for call in reply.tool_calls() {
            let skipped = ToolResult::BackendError(
                "Tool budget exhausted; this call was not executed.".to_string(),
            );
            conversation.push(ChatMessage::tool_result(call, skipped.to_json()?));
        }
        self.invoker.final_answer(conversation).await
    }

    async fn run_tool(&self, call: &ToolCall) -> Result<ToolResult, AgentError> {
        let err = match self.tool_registry.execute(call).await {
            Ok(result) => return Ok(result),
            Err(err) => err,
        };

        match (self.tool_errors, err.as_tool_result()) {
            (ToolErrorPolicy::Report, Some(result)) => {
                warn!(tool = %call.name, error = %err, "reporting tool error to the model");
                Ok(result)
            }
            _ => Err(err),
        }
    }
}
