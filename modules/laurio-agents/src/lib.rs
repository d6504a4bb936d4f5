pub mod fixtures;
pub mod flow;
pub mod generator;
pub mod interpreter;
pub mod prompts;
pub mod search;
pub mod stages;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use flow::FlowOrchestrator;
pub use generator::{FixtureGenerator, LiveGenerator, StageRequest, TextGenerator};
pub use search::{MockSearch, SearchProvider, SearchTool, TavilySearch};
pub use stages::{AgentStage, Pipeline, PipelineFactory, StageKind};
