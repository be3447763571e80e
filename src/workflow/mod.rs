// Workflow graph: shared state, intent classification, step logic, and
// the orchestrator that wires them together

pub mod classifier;
pub mod nodes;
pub mod orchestrator;
pub mod state;

pub use orchestrator::Orchestrator;
pub use state::{RoutePreview, RouteTarget, RoutingDecision, WorkflowState};
