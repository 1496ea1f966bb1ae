pub mod agent;
pub mod config;
pub mod providers;
pub mod tools;
pub mod traits;

#[cfg(test)]
mod testing;

pub use agent::{
    AgentError, AgentLoop, ChatInvoker, ContextBuilder, Conversation, LoopOutcome, Session,
    ToolRegistry,
};
pub use config::*;
pub use providers::*;
pub use tools::*;
pub use traits::*;
