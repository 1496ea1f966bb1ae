pub mod context;
pub mod conversation;
pub mod error;
pub mod invoker;
pub mod loop_;
pub mod registry;
pub mod session;

pub use context::{ContextBuilder, TeamQueue, TeamQueueCatalog};
pub use conversation::Conversation;
pub use error::AgentError;
pub use invoker::ChatInvoker;
pub use loop_::{AgentLoop, LoopOutcome};
pub use registry::ToolRegistry;
pub use session::Session;
