// Chainflow - multi-agent supply chain and financial analysis workflow

pub mod agents;
pub mod knowledge;
pub mod llm;
pub mod message;
pub mod tools;
pub mod workflow;

pub use message::{Message, MessageType};
pub use workflow::{Orchestrator, RoutePreview, WorkflowState};
