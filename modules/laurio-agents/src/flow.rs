//! Sequences the four stages for the ad-hoc and daily flows.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use tracing::{info, warn};

use laurio_common::{Idea, PostResult, PostStatus, PostType, TopicOutcome};

use crate::interpreter;
use crate::prompts;
use crate::stages::Pipeline;

/// Ideas drafted per daily run.
pub const DAILY_IDEAS: usize = 3;

pub struct FlowOrchestrator {
    pipeline: Pipeline,
}

impl FlowOrchestrator {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    // --- Ad-hoc flow ---

    /// Run every topic in order. A failing topic is reported inline and the
    /// rest still run.
    pub async fn run_topics(&self, topics: &[String], context: Option<&str>) -> Vec<TopicOutcome> {
        let mut outcomes = Vec::with_capacity(topics.len());
        for topic in topics {
            info!(topic = topic.as_str(), "Processing topic");
            match self.run_topic(topic, context).await {
                Ok(post) => outcomes.push(TopicOutcome::Post(Box::new(post))),
                Err(e) => {
                    warn!(topic = topic.as_str(), error = %format!("{e:#}"), "Topic failed");
                    outcomes.push(TopicOutcome::Failed {
                        topic: topic.clone(),
                        error: format!("{e:#}"),
                    });
                }
            }
        }
        outcomes
    }

    pub async fn run_topic(&self, topic: &str, context: Option<&str>) -> Result<PostResult> {
        let insights = self.pipeline.scout.run(&prompts::research(topic)).await?;
        let ideas_json = self
            .pipeline
            .curator
            .run(&prompts::curate(context, &insights))
            .await?;
        let draft = self
            .pipeline
            .editor
            .run(&prompts::draft_ideas(&ideas_json))
            .await?;
        let visuals_json = self.pipeline.visual.run(&prompts::visualize(&draft)).await?;

        let idea = interpreter::parse_ideas(&ideas_json)
            .into_iter()
            .next()
            .unwrap_or_else(adhoc_fallback_idea);
        let visuals = interpreter::parse_visuals(&visuals_json);

        Ok(PostResult {
            topic: topic.to_string(),
            post_type: idea.post_type.unwrap_or(PostType::IgCarousel),
            main_message: idea.main_message.unwrap_or_default(),
            objective: idea.objective.unwrap_or_else(|| ADHOC_OBJECTIVE.to_string()),
            target_audience: idea.target_audience.unwrap_or_else(|| "youth".to_string()),
            source_insights: interpreter::extract_source_insights(&insights),
            structure: interpreter::parse_structure(&draft),
            visual_prompts: visuals.prompts,
            visual_mock: visuals.ascii_art,
            planned_date: None,
            status: None,
        })
    }

    // --- Daily flow ---

    /// One shared Scout and Curator call, then up to three drafted ideas.
    /// Scout and Curator failures abort the run; a failing idea is skipped.
    pub async fn run_daily(&self) -> Result<Vec<PostResult>> {
        let today = Utc::now().format("%Y-%m-%d").to_string();

        info!(date = today.as_str(), "Scouting daily news");
        let insights = self.pipeline.scout.run(&prompts::daily_news(&today)).await?;

        info!("Curating daily stories");
        let ideas_json = self
            .pipeline
            .curator
            .run(&prompts::daily_curate(&today, &insights))
            .await?;

        let ideas = interpreter::try_parse_ideas(&ideas_json).unwrap_or_else(|| {
            warn!("Curator output is not JSON, nothing to draft");
            Vec::new()
        });

        let mut posts = Vec::new();
        for (index, idea) in ideas.into_iter().take(DAILY_IDEAS).enumerate() {
            info!(
                index,
                main_message = idea.main_message.as_deref().unwrap_or("Untitled"),
                "Processing daily idea"
            );
            match self.draft_daily(index, idea).await {
                Ok(post) => posts.push(post),
                Err(e) => warn!(index, error = %format!("{e:#}"), "Daily idea failed, skipping"),
            }
        }

        info!(count = posts.len(), "Daily run complete");
        Ok(posts)
    }

    async fn draft_daily(&self, index: usize, idea: Idea) -> Result<PostResult> {
        let prompt = prompts::draft_idea(&idea).context("Failed to serialize idea")?;
        let draft = self.pipeline.editor.run(&prompt).await?;
        let visuals_json = self.pipeline.visual.run(&prompts::visualize(&draft)).await?;

        let visuals = interpreter::parse_visuals(&visuals_json);
        let main_message = idea.main_message.unwrap_or_default();
        let topic = if main_message.is_empty() {
            "Daily News".to_string()
        } else {
            main_message.clone()
        };

        Ok(PostResult {
            topic,
            post_type: idea.post_type.unwrap_or(PostType::IgPost),
            main_message,
            objective: idea.objective.unwrap_or_else(|| "News Update".to_string()),
            target_audience: idea.target_audience.unwrap_or_else(|| "General".to_string()),
            source_insights: Vec::new(),
            structure: interpreter::parse_structure(&draft),
            visual_prompts: visuals.prompts,
            visual_mock: visuals.ascii_art,
            planned_date: Some(planned_date(index)),
            status: Some(PostStatus::Drafting),
        })
    }
}

const ADHOC_OBJECTIVE: &str = "Generated via ADK";

fn adhoc_fallback_idea() -> Idea {
    Idea {
        post_type: Some(PostType::IgCarousel),
        main_message: Some(String::new()),
        objective: Some(ADHOC_OBJECTIVE.to_string()),
        target_audience: Some("youth".to_string()),
        ..Idea::default()
    }
}

/// Publishing slot for the `index`th daily idea: 2h from now, then every 3h.
pub fn planned_date(index: usize) -> chrono::DateTime<Utc> {
    Utc::now() + Duration::hours(2 + 3 * index as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planned_dates_step_by_three_hours() {
        let before = Utc::now();
        let slots: Vec<_> = (0..3).map(planned_date).collect();
        let after = Utc::now();

        for (i, slot) in slots.iter().enumerate() {
            let hours = Duration::hours(2 + 3 * i as i64);
            assert!(*slot >= before + hours && *slot <= after + hours);
        }
    }

    #[test]
    fn adhoc_fallback_defaults() {
        let idea = adhoc_fallback_idea();
        assert_eq!(idea.objective.as_deref(), Some("Generated via ADK"));
        assert_eq!(idea.main_message.as_deref(), Some(""));
    }
}
