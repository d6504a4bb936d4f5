//! Defensive readers for raw stage output.
//!
//! Every function here is total: malformed JSON, the wrong root shape or
//! missing keys all resolve to typed defaults instead of errors.

use std::sync::LazyLock;

use ai_client::{strip_code_blocks, truncate_chars};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use laurio_common::{ContentStructure, Idea, PostType, SourceInsight, VisualPrompt};

const MAX_TITLE_CHARS: usize = 120;
const MAX_SUMMARY_CHARS: usize = 240;

static SOURCE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((https?://[^)]+)\)").expect("valid regex"));

/// A value the model may send either bare or inside a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

fn decode<T: DeserializeOwned>(text: &str) -> Option<T> {
    match serde_json::from_str(strip_code_blocks(text)) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(error = %e, "Stage output is not the expected JSON");
            None
        }
    }
}

// --- Ideas ---

/// The idea used when Curator output yields nothing usable.
pub fn fallback_idea() -> Idea {
    Idea {
        post_type: Some(PostType::IgCarousel),
        main_message: Some("Consejos clave para el primer empleo".to_string()),
        objective: Some("Educar".to_string()),
        target_audience: Some("youth".to_string()),
        ..Idea::default()
    }
}

/// Decode a list of ideas, wrapping a lone value. Elements that are not
/// idea objects are dropped one by one. `None` only when the text is not JSON.
pub fn try_parse_ideas(text: &str) -> Option<Vec<Idea>> {
    let values = decode::<OneOrMany<Value>>(text)?.into_vec();
    Some(
        values
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(idea) => Some(idea),
                Err(e) => {
                    debug!(index, error = %e, "Skipping curator element that is not an idea");
                    None
                }
            })
            .collect(),
    )
}

/// Like [`try_parse_ideas`] but never empty.
pub fn parse_ideas(text: &str) -> Vec<Idea> {
    match try_parse_ideas(text) {
        Some(ideas) if !ideas.is_empty() => ideas,
        _ => vec![fallback_idea()],
    }
}

// --- Structure ---

pub fn parse_structure(text: &str) -> ContentStructure {
    decode(text).map(ContentStructure).unwrap_or_default()
}

// --- Visuals ---

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Visuals {
    pub prompts: Vec<VisualPrompt>,
    pub ascii_art: String,
}

/// List root: every element is a prompt. Object root: `prompts` and
/// `asciiArt` are read independently. Unusable prompt elements are skipped.
pub fn parse_visuals(text: &str) -> Visuals {
    match decode::<Value>(text) {
        Some(Value::Array(items)) => Visuals {
            prompts: visual_prompts(items),
            ascii_art: String::new(),
        },
        Some(Value::Object(mut fields)) => {
            let prompts = match fields.remove("prompts") {
                Some(Value::Array(items)) => visual_prompts(items),
                _ => Vec::new(),
            };
            let ascii_art = match fields.remove("asciiArt") {
                Some(Value::String(art)) => art,
                _ => String::new(),
            };
            Visuals { prompts, ascii_art }
        }
        _ => Visuals::default(),
    }
}

fn visual_prompts(items: Vec<Value>) -> Vec<VisualPrompt> {
    items.into_iter().filter_map(VisualPrompt::from_value).collect()
}

// --- Source insights ---

/// One insight per non-blank line of Scout output, in order.
pub fn extract_source_insights(raw: &str) -> Vec<SourceInsight> {
    raw.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let body = line.trim_start_matches(['-', ' ']);
            let title = body.split(':').next().unwrap_or_default();
            let source_url = SOURCE_URL
                .captures(line)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();

            SourceInsight {
                source_url,
                source_title: truncate_chars(title, MAX_TITLE_CHARS).to_string(),
                summary: truncate_chars(line, MAX_SUMMARY_CHARS).to_string(),
            }
        })
        .collect()
}
