// Text generation behind the stages.
//
// TextGenerator is the seam between a stage and the model service. Two
// implementations, chosen from config when the pipeline is built:
// - LiveGenerator: OpenAI-compatible chat completions (Gemini by default),
//   running the tool-call loop for stages that carry tools
// - FixtureGenerator: canned per-stage output, no network

use std::sync::Arc;

use ai_client::{Agent, DynTool, OpenAi, PromptBuilder};
use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use laurio_common::Config;

use crate::fixtures;
use crate::stages::StageKind;

/// Everything a generator needs to answer one stage call.
pub struct StageRequest<'a> {
    pub kind: StageKind,
    pub model: &'a str,
    pub instruction: &'a str,
    pub prompt: &'a str,
    pub tools: &'a [Arc<dyn DynTool>],
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: StageRequest<'_>) -> Result<String>;
}

/// Live generator when an LLM key is configured, fixtures otherwise.
pub fn from_config(config: &Config) -> Arc<dyn TextGenerator> {
    match config.llm_api_key {
        Some(ref key) => Arc::new(LiveGenerator::new(
            key.clone(),
            config.llm_base_url.clone(),
            config.llm_max_turns,
        )),
        None => Arc::new(FixtureGenerator),
    }
}

// --- Live ---

pub struct LiveGenerator {
    api_key: String,
    base_url: String,
    max_turns: usize,
}

impl LiveGenerator {
    pub fn new(api_key: String, base_url: String, max_turns: usize) -> Self {
        Self {
            api_key,
            base_url,
            max_turns: max_turns.max(1),
        }
    }
}

#[async_trait]
impl TextGenerator for LiveGenerator {
    async fn generate(&self, request: StageRequest<'_>) -> Result<String> {
        let agent = request.tools.iter().fold(
            OpenAi::new(&self.api_key, request.model).with_base_url(&self.base_url),
            |agent, tool| agent.dyn_tool(tool.clone()),
        );

        let text = agent
            .prompt(request.prompt)
            .preamble(request.instruction)
            .multi_turn(self.max_turns)
            .send()
            .await?;
        Ok(text)
    }
}

// --- Fixture ---

pub struct FixtureGenerator;

#[async_trait]
impl TextGenerator for FixtureGenerator {
    async fn generate(&self, request: StageRequest<'_>) -> Result<String> {
        debug!(stage = %request.kind, "Returning fixture output");
        let text = match request.kind {
            StageKind::Scout => fixtures::SCOUT,
            StageKind::Curator => fixtures::CURATOR,
            StageKind::Editor => fixtures::EDITOR,
            StageKind::Visual => fixtures::VISUAL,
        };
        Ok(text.to_string())
    }
}
