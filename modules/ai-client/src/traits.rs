use crate::error::Result;
use crate::tool::{DynTool, Tool};
use async_trait::async_trait;
use std::sync::Arc;

// =============================================================================
// Agent Trait
// =============================================================================

pub trait Agent: Clone + Send + Sync {
    type PromptBuilder: PromptBuilder;

    fn tool<T: Tool + 'static>(self, tool: T) -> Self;
    fn dyn_tool(self, tool: Arc<dyn DynTool>) -> Self;
    fn prompt(&self, input: impl Into<String>) -> Self::PromptBuilder;
}

// =============================================================================
// PromptBuilder Trait
// =============================================================================

#[async_trait]
pub trait PromptBuilder: Send + Sized {
    fn preamble(self, preamble: impl Into<String>) -> Self;
    fn temperature(self, temperature: f32) -> Self;
    fn multi_turn(self, max_turns: usize) -> Self;
    async fn send(self) -> Result<String>;
}
