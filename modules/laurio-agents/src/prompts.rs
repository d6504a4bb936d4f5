//! Stage instructions and the prompt text each flow hands to a stage.

use laurio_common::Idea;

pub const SCOUT_INSTRUCTIONS: &str = "\
You are the ScoutAgent for Laurio, an EdTech startup.
Your goal is to research topics related to the future of work, AI, and youth employability.
Given a topic, use the search_tool to find relevant, up-to-date information.
Return a summary of insights and a list of sources, one per line, formatted as
'- Title: insight (https://source.url)'.";

pub const CURATOR_INSTRUCTIONS: &str = "\
You are the CuratorAgent.
Your input is a set of insights provided by the ScoutAgent.
Your goal is to select the most relevant insights for Laurio's audience (youth 14-22, teachers).
Propose 1 or more post ideas.
For each idea, specify:
- postType (ig_carousel, ig_post, story_snippet)
- mainMessage
- objective
- targetAudience
Output MUST be a JSON list of ideas.";

pub const EDITOR_INSTRUCTIONS: &str = "\
You are the EditorAgent.
Your input is a post idea from the CuratorAgent.
Your goal is to draft the content.
- For ig_carousel: Create 5-7 slides (hook, context, insight, example, cta).
- For ig_post: Create a headline and a caption.
- For story_snippet: Create short, punchy text.
Tone: Approachable, practical, inspiring.
Output MUST be a JSON object with the structure, e.g.
{\"slides\": [{\"id\": 1, \"role\": \"hook\", \"text\": \"...\"}], \"caption\": \"...\"}.";

pub const VISUAL_INSTRUCTIONS: &str = "\
You are the VisualAgent.
Your input is the drafted content from the EditorAgent.
Your goal is to generate image prompts for an AI image generator.
Style: Clean, modern, suitable for an EdTech startup.
For carousels, provide a prompt for each slide that needs a visual.
Output MUST be a JSON object: {\"prompts\": [{\"forSlide\": 1, \"description\": \"...\"}], \
\"asciiArt\": \"a small ASCII mock of the layout\"}.";

const DEFAULT_CONTEXT: &str = "General";

// --- Ad-hoc flow ---

pub fn research(topic: &str) -> String {
    format!("Research this topic: {topic}")
}

pub fn curate(context: Option<&str>, insights: &str) -> String {
    let context = context
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CONTEXT);
    format!("Context: {context}\nInsights: {insights}")
}

pub fn draft_ideas(ideas_json: &str) -> String {
    format!("Draft content for these ideas: {ideas_json}")
}

pub fn visualize(draft: &str) -> String {
    format!("Generate visual prompts for this draft: {draft}")
}

// --- Daily flow ---

pub fn daily_news(date: &str) -> String {
    format!(
        "Find top 5 trending news today ({date}) related to AI, Tech, and Future of Work. \
         Focus on substantial stories."
    )
}

pub fn daily_curate(date: &str, insights: &str) -> String {
    format!(
        "Context: Daily News Mix {date}\nInsights: {insights}\n\
         Requirement: Select exactly 3 distinct stories. Create one post idea for each."
    )
}

pub fn draft_idea(idea: &Idea) -> serde_json::Result<String> {
    Ok(format!(
        "Draft content for this idea: {}",
        serde_json::to_string(idea)?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curate_defaults_context() {
        assert_eq!(curate(None, "x"), "Context: General\nInsights: x");
        assert_eq!(curate(Some("  "), "x"), "Context: General\nInsights: x");
        assert_eq!(
            curate(Some("Audiencia joven"), "x"),
            "Context: Audiencia joven\nInsights: x"
        );
    }

    #[test]
    fn daily_prompts_embed_date() {
        assert!(daily_news("2026-10-16").contains("today (2026-10-16)"));
        let prompt = daily_curate("2026-10-16", "- story");
        assert!(prompt.starts_with("Context: Daily News Mix 2026-10-16\nInsights: - story\n"));
        assert!(prompt.ends_with("Create one post idea for each."));
    }

    #[test]
    fn draft_idea_embeds_json() {
        let idea = Idea {
            main_message: Some("AI copilots".into()),
            ..Idea::default()
        };
        assert_eq!(
            draft_idea(&idea).unwrap(),
            "Draft content for this idea: {\"mainMessage\":\"AI copilots\"}"
        );
    }
}
