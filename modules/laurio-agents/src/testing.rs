// Test doubles for the pipeline.
//
// - ScriptedGenerator (TextGenerator): per-stage canned replies, optional
//   failure when a prompt contains a marker, records every call
// - FailingGenerator (TextGenerator): every call fails with one message
// - StaticSearch (SearchProvider): fixed text for every query

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::generator::{StageRequest, TextGenerator};
use crate::search::SearchProvider;
use crate::stages::{Pipeline, StageKind};

// ---------------------------------------------------------------------------
// ScriptedGenerator
// ---------------------------------------------------------------------------

/// A stage call as the generator saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub kind: StageKind,
    pub prompt: String,
    pub tools: Vec<&'static str>,
}

/// Builder pattern: `.on()`, `.fail_on()`, `.fail_stage()`.
/// Stages without a scripted reply answer with an empty string.
#[derive(Default)]
pub struct ScriptedGenerator {
    replies: HashMap<StageKind, String>,
    failures: Vec<(StageKind, String)>,
    failing_stages: Vec<StageKind>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, kind: StageKind, reply: impl Into<String>) -> Self {
        self.replies.insert(kind, reply.into());
        self
    }

    /// Fail `kind` whenever its prompt contains `marker`.
    pub fn fail_on(mut self, kind: StageKind, marker: impl Into<String>) -> Self {
        self.failures.push((kind, marker.into()));
        self
    }

    /// Fail every call to `kind`.
    pub fn fail_stage(mut self, kind: StageKind) -> Self {
        self.failing_stages.push(kind);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn prompts_for(&self, kind: StageKind) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.kind == kind)
            .map(|c| c.prompt)
            .collect()
    }

    /// Wrap in an `Arc` and build a pipeline around it with [`StaticSearch`].
    pub fn into_pipeline(self) -> (Arc<Self>, Pipeline) {
        let generator = Arc::new(self);
        let pipeline = Pipeline::new(
            generator.clone(),
            Arc::new(StaticSearch::new("- Static: result (https://static.example)")),
            "test-model",
        );
        (generator, pipeline)
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, request: StageRequest<'_>) -> Result<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                kind: request.kind,
                prompt: request.prompt.to_string(),
                tools: request.tools.iter().map(|t| t.name()).collect(),
            });
        }

        if self.failing_stages.contains(&request.kind) {
            bail!("{} unavailable", request.kind);
        }
        if let Some((_, marker)) = self
            .failures
            .iter()
            .find(|(kind, marker)| *kind == request.kind && request.prompt.contains(marker.as_str()))
        {
            bail!("scripted failure on '{marker}'");
        }

        Ok(self.replies.get(&request.kind).cloned().unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// FailingGenerator
// ---------------------------------------------------------------------------

pub struct FailingGenerator {
    message: String,
}

impl FailingGenerator {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _request: StageRequest<'_>) -> Result<String> {
        bail!("{}", self.message)
    }
}

// ---------------------------------------------------------------------------
// StaticSearch
// ---------------------------------------------------------------------------

pub struct StaticSearch {
    text: String,
}

impl StaticSearch {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl SearchProvider for StaticSearch {
    async fn search(&self, _query: &str) -> String {
        self.text.clone()
    }
}
