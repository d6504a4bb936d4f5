use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use ai_client::{DynTool, ToolWrapper};
use anyhow::{Context, Result};
use tracing::{debug, info};

use laurio_common::Config;

use crate::generator::{self, StageRequest, TextGenerator};
use crate::prompts;
use crate::search::{self, SearchProvider, SearchTool};

/// The four steps of the content pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Scout,
    Curator,
    Editor,
    Visual,
}

impl StageKind {
    pub fn agent_name(self) -> &'static str {
        match self {
            Self::Scout => "ScoutAgent",
            Self::Curator => "CuratorAgent",
            Self::Editor => "EditorAgent",
            Self::Visual => "VisualAgent",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Scout => "Researches topics and provides insights.",
            Self::Curator => "Selects insights and proposes post ideas.",
            Self::Editor => "Drafts the content for posts.",
            Self::Visual => "Generates image prompts.",
        }
    }

    pub fn instruction(self) -> &'static str {
        match self {
            Self::Scout => prompts::SCOUT_INSTRUCTIONS,
            Self::Curator => prompts::CURATOR_INSTRUCTIONS,
            Self::Editor => prompts::EDITOR_INSTRUCTIONS,
            Self::Visual => prompts::VISUAL_INSTRUCTIONS,
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scout => write!(f, "scout"),
            Self::Curator => write!(f, "curator"),
            Self::Editor => write!(f, "editor"),
            Self::Visual => write!(f, "visual"),
        }
    }
}

/// One pipeline step: a fixed role instruction bound to a generator.
pub struct AgentStage {
    kind: StageKind,
    model: String,
    tools: Vec<Arc<dyn DynTool>>,
    generator: Arc<dyn TextGenerator>,
}

impl AgentStage {
    pub fn new(kind: StageKind, model: impl Into<String>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            kind,
            model: model.into(),
            tools: Vec::new(),
            generator,
        }
    }

    pub fn with_tool(mut self, tool: Arc<dyn DynTool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn kind(&self) -> StageKind {
        self.kind
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// One prompt in, one text blob out. No retries.
    pub async fn run(&self, prompt: &str) -> Result<String> {
        debug!(stage = %self.kind, prompt_chars = prompt.len(), "Running stage");
        let started = Instant::now();

        let text = self
            .generator
            .generate(StageRequest {
                kind: self.kind,
                model: &self.model,
                instruction: self.kind.instruction(),
                prompt,
                tools: &self.tools,
            })
            .await
            .with_context(|| format!("{} failed", self.kind.agent_name()))?;

        info!(
            stage = %self.kind,
            response_chars = text.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Stage complete"
        );
        Ok(text)
    }
}

/// The four stages of one request. Built fresh per request.
pub struct Pipeline {
    pub scout: AgentStage,
    pub curator: AgentStage,
    pub editor: AgentStage,
    pub visual: AgentStage,
}

impl Pipeline {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        search: Arc<dyn SearchProvider>,
        model: &str,
    ) -> Self {
        let search_tool: Arc<dyn DynTool> = Arc::new(ToolWrapper(SearchTool::new(search)));
        Self {
            scout: AgentStage::new(StageKind::Scout, model, generator.clone()).with_tool(search_tool),
            curator: AgentStage::new(StageKind::Curator, model, generator.clone()),
            editor: AgentStage::new(StageKind::Editor, model, generator.clone()),
            visual: AgentStage::new(StageKind::Visual, model, generator),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            generator::from_config(config),
            search::from_config(config),
            &config.llm_model,
        )
    }
}

/// Builds a fresh [`Pipeline`] for each request.
pub trait PipelineFactory: Send + Sync {
    fn build(&self) -> Pipeline;
}

impl<F> PipelineFactory for F
where
    F: Fn() -> Pipeline + Send + Sync,
{
    fn build(&self) -> Pipeline {
        self()
    }
}
