mod client;
pub mod prompt_builder;
pub(crate) mod types;

pub use prompt_builder::OpenAiPromptBuilder;

use crate::tool::{DynTool, Tool, ToolWrapper};
use crate::traits::Agent;
use std::sync::Arc;

use client::OpenAiClient;

pub const OPENAI_API_URL: &str = "https://api.openai.com/v1";

// =============================================================================
// OpenAi Agent
// =============================================================================

/// Agent speaking the OpenAI chat-completions protocol. Any compatible
/// endpoint works through [`OpenAi::with_base_url`].
#[derive(Clone)]
pub struct OpenAi {
    api_key: String,
    pub(crate) model: String,
    pub(crate) tools: Vec<Arc<dyn DynTool>>,
    base_url: String,
}

impl OpenAi {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            tools: Vec::new(),
            base_url: OPENAI_API_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub(crate) fn client(&self) -> OpenAiClient {
        OpenAiClient::new(&self.api_key, &self.base_url)
    }
}

// =============================================================================
// Agent Implementation
// =============================================================================

impl Agent for OpenAi {
    type PromptBuilder = OpenAiPromptBuilder;

    fn tool<T: Tool + 'static>(mut self, tool: T) -> Self {
        self.tools.push(Arc::new(ToolWrapper(tool)));
        self
    }

    fn dyn_tool(mut self, tool: Arc<dyn DynTool>) -> Self {
        self.tools.push(tool);
        self
    }

    fn prompt(&self, input: impl Into<String>) -> OpenAiPromptBuilder {
        OpenAiPromptBuilder::new(self.clone(), input.into())
    }
}
