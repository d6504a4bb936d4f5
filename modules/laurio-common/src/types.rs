use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

// --- Post vocabulary ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostType {
    IgCarousel,
    IgPost,
    StorySnippet,
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IgCarousel => write!(f, "ig_carousel"),
            Self::IgPost => write!(f, "ig_post"),
            Self::StorySnippet => write!(f, "story_snippet"),
        }
    }
}

impl FromStr for PostType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ig_carousel" => Ok(Self::IgCarousel),
            "ig_post" => Ok(Self::IgPost),
            "story_snippet" => Ok(Self::StorySnippet),
            other => Err(format!("unknown post type: {other}")),
        }
    }
}

/// Editorial lifecycle of a backlog post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Idea,
    Drafting,
    ReadyForReview,
    Approved,
    Posted,
}

// --- Idea ---

/// A post concept proposed by the Curator stage.
///
/// Every field is optional because model output is; each flow applies its
/// own defaults. Keys outside the known set, and known keys whose value has
/// an unusable shape, are kept in `extra` so the idea can be handed back to
/// a later stage unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Map<String, Value>")]
pub struct Idea {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_type: Option<PostType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Map<String, Value>> for Idea {
    fn from(mut fields: Map<String, Value>) -> Self {
        let post_type = take_field(&mut fields, "postType", |v| match v {
            Value::String(s) => s.parse::<PostType>().ok(),
            _ => None,
        });
        let main_message = take_field(&mut fields, "mainMessage", scalar_string);
        let objective = take_field(&mut fields, "objective", scalar_string);
        let target_audience = take_field(&mut fields, "targetAudience", scalar_string);

        Self {
            post_type,
            main_message,
            objective,
            target_audience,
            extra: fields,
        }
    }
}

/// Remove `key` and convert it. A non-null value that does not convert goes
/// back into `fields` verbatim.
fn take_field<T>(
    fields: &mut Map<String, Value>,
    key: &str,
    convert: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    let value = fields.remove(key)?;
    if value.is_null() {
        return None;
    }
    match convert(&value) {
        Some(converted) => Some(converted),
        None => {
            debug!(key, value = %value, "Keeping unrecognised idea field verbatim");
            fields.insert(key.to_string(), value);
            None
        }
    }
}

/// Strings pass through, numbers and booleans are stringified.
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// --- Source insights ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInsight {
    pub source_url: String,
    pub source_title: String,
    pub summary: String,
}

// --- Content structure ---

/// Editor output, passed through as JSON. Typically
/// `{slides: [{id, role, text}], caption?, storySnippets?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentStructure(pub Value);

impl Default for ContentStructure {
    fn default() -> Self {
        Self(serde_json::json!({ "slides": [] }))
    }
}

impl ContentStructure {
    pub fn slides(&self) -> &[Value] {
        self.0
            .get("slides")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn caption(&self) -> Option<&str> {
        self.0.get("caption").and_then(Value::as_str)
    }
}

// --- Visual prompts ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "Value")]
pub struct VisualPrompt {
    pub for_slide: Option<i64>,
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VisualPrompt {
    /// Read one prompt element as models emit it: a full object, or a bare
    /// description string or number. Other shapes yield `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(description) => Some(Self {
                description,
                ..Self::default()
            }),
            Value::Number(n) => Some(Self {
                description: n.to_string(),
                ..Self::default()
            }),
            Value::Object(mut fields) => {
                // Both keys always serialize, so unusable values are dropped
                // rather than kept in `extra`.
                let for_slide = fields.remove("forSlide").and_then(|v| match v {
                    Value::Number(n) => n
                        .as_i64()
                        .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
                    Value::String(s) => s.trim().parse::<i64>().ok(),
                    _ => None,
                });
                let description = fields
                    .remove("description")
                    .as_ref()
                    .and_then(scalar_string)
                    .unwrap_or_default();
                Some(Self {
                    for_slide,
                    description,
                    extra: fields,
                })
            }
            _ => None,
        }
    }
}

impl TryFrom<Value> for VisualPrompt {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value).ok_or_else(|| "visual prompt must be an object or a string".to_string())
    }
}

// --- Results ---

/// The record returned for one topic (ad-hoc flow) or one curated idea
/// (daily flow).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResult {
    pub topic: String,
    pub post_type: PostType,
    pub main_message: String,
    pub objective: String,
    pub target_audience: String,
    pub source_insights: Vec<SourceInsight>,
    pub structure: ContentStructure,
    pub visual_prompts: Vec<VisualPrompt>,
    pub visual_mock: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
}

/// Per-topic outcome of the ad-hoc flow. A failed topic is reported inline
/// and never aborts the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TopicOutcome {
    Failed { topic: String, error: String },
    Post(Box<PostResult>),
}

impl TopicOutcome {
    pub fn topic(&self) -> &str {
        match self {
            Self::Post(post) => &post.topic,
            Self::Failed { topic, .. } => topic,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idea_keeps_unknown_keys() {
        let json = serde_json::json!({
            "postType": "story_snippet",
            "mainMessage": "Tu primer CV",
            "objective": "Educar",
            "targetAudience": "youth",
            "hook": "¿Sabías que...?"
        });
        let idea: Idea = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(idea.post_type, Some(PostType::StorySnippet));
        assert_eq!(idea.extra.get("hook"), Some(&serde_json::json!("¿Sabías que...?")));
        assert_eq!(serde_json::to_value(&idea).unwrap(), json);
    }

    #[test]
    fn idea_tolerates_odd_field_values() {
        let idea: Idea = serde_json::from_value(serde_json::json!({
            "postType": "ig_reel",
            "mainMessage": 42,
            "objective": null,
            "targetAudience": ["youth"]
        }))
        .unwrap();
        assert_eq!(idea.post_type, None);
        assert_eq!(idea.main_message.as_deref(), Some("42"));
        assert_eq!(idea.objective, None);
        assert_eq!(idea.target_audience, None);
        assert_eq!(idea.extra.get("targetAudience"), Some(&serde_json::json!(["youth"])));
        assert!(!idea.extra.contains_key("objective"));
    }

    #[test]
    fn unknown_post_type_survives_round_trip() {
        let json = serde_json::json!({ "postType": "ig_reel", "mainMessage": "Hola" });
        let idea: Idea = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(idea.post_type, None);
        assert_eq!(serde_json::to_value(&idea).unwrap(), json);
    }

    #[test]
    fn idea_requires_an_object() {
        assert!(serde_json::from_value::<Idea>(serde_json::json!("note")).is_err());
        assert!(serde_json::from_value::<Idea>(serde_json::json!(7)).is_err());
    }

    #[test]
    fn visual_prompt_fields_are_read_leniently() {
        let prompt = VisualPrompt::from_value(serde_json::json!({
            "forSlide": "2", "description": null
        }))
        .unwrap();
        assert_eq!(prompt.for_slide, Some(2));
        assert_eq!(prompt.description, "");

        let prompt = VisualPrompt::from_value(serde_json::json!({ "slide": 1, "prompt": "desk" })).unwrap();
        assert_eq!(prompt.for_slide, None);
        assert_eq!(prompt.extra.get("prompt"), Some(&serde_json::json!("desk")));

        let prompt = VisualPrompt::from_value(serde_json::json!({ "forSlide": 3.0, "description": 9 })).unwrap();
        assert_eq!(prompt.for_slide, Some(3));
        assert_eq!(prompt.description, "9");

        assert_eq!(VisualPrompt::from_value(serde_json::json!(7)).unwrap().description, "7");
        let prompt = VisualPrompt::from_value(serde_json::json!({ "forSlide": "first", "description": {} })).unwrap();
        assert_eq!(
            serde_json::to_value(&prompt).unwrap(),
            serde_json::json!({ "forSlide": null, "description": "" })
        );

        assert!(VisualPrompt::from_value(serde_json::json!(null)).is_none());
        assert!(VisualPrompt::from_value(serde_json::json!([1])).is_none());
    }

    #[test]
    fn visual_prompt_accepts_bare_strings() {
        let prompts: Vec<VisualPrompt> = serde_json::from_value(serde_json::json!([
            { "forSlide": 2, "description": "Student at a laptop" },
            "Abstract gradient"
        ]))
        .unwrap();
        assert_eq!(prompts[0].for_slide, Some(2));
        assert_eq!(prompts[1].for_slide, None);
        assert_eq!(prompts[1].description, "Abstract gradient");
    }

    #[test]
    fn content_structure_accessors() {
        let structure = ContentStructure(serde_json::json!({
            "slides": [{ "id": 1, "role": "hook", "text": "Hola" }],
            "caption": "Guarda este post"
        }));
        assert_eq!(structure.slides().len(), 1);
        assert_eq!(structure.caption(), Some("Guarda este post"));
        assert!(ContentStructure::default().slides().is_empty());
        assert!(ContentStructure(serde_json::json!("text")).slides().is_empty());
    }

    #[test]
    fn failed_outcome_serializes_flat() {
        let outcome = TopicOutcome::Failed {
            topic: "AI".into(),
            error: "boom".into(),
        };
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            serde_json::json!({ "topic": "AI", "error": "boom" })
        );
        assert!(outcome.is_failed());
        assert_eq!(outcome.topic(), "AI");
    }

    #[test]
    fn post_type_round_trips_through_strings() {
        for pt in [PostType::IgCarousel, PostType::IgPost, PostType::StorySnippet] {
            assert_eq!(pt.to_string().parse::<PostType>().unwrap(), pt);
        }
        assert!("reel".parse::<PostType>().is_err());
    }
}
