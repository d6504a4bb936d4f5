use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{AiError, Result};
use crate::traits::PromptBuilder;

use super::types::*;
use super::OpenAi;

pub struct OpenAiPromptBuilder {
    agent: OpenAi,
    input: String,
    preamble: Option<String>,
    temperature: Option<f32>,
    max_turns: usize,
}

impl OpenAiPromptBuilder {
    pub(crate) fn new(agent: OpenAi, input: String) -> Self {
        Self {
            agent,
            input,
            preamble: None,
            temperature: None,
            max_turns: 1,
        }
    }

    fn initial_messages(&self) -> Vec<WireMessage> {
        let mut messages = Vec::new();

        if let Some(ref preamble) = self.preamble {
            messages.push(WireMessage::system(preamble));
        }

        if !self.input.is_empty() {
            messages.push(WireMessage::user(&self.input));
        }

        messages
    }
}

#[async_trait]
impl PromptBuilder for OpenAiPromptBuilder {
    fn preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = Some(preamble.into());
        self
    }

    fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn multi_turn(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    async fn send(self) -> Result<String> {
        let client = self.agent.client();

        let mut request = ChatRequest::new(&self.agent.model)
            .messages(self.initial_messages())
            .max_tokens(4096);

        if let Some(temp) = self.temperature {
            request = request.temperature(temp);
        }

        for tool in &self.agent.tools {
            let def = tool.definition().await;
            request = request.tool(ToolDefinitionWire::function(
                &def.name,
                &def.description,
                def.parameters,
            ));
        }

        if request.tools.is_some() {
            request.tool_choice = Some(serde_json::json!("auto"));
        }

        // Tool loop: every turn with tool calls feeds results back until the
        // model answers in plain text.
        for turn in 1..=self.max_turns {
            let response = client.chat(&request).await?;
            let choice = response
                .choices
                .into_iter()
                .next()
                .ok_or(AiError::EmptyResponse)?;

            let tool_calls = choice.message.tool_calls.unwrap_or_default();
            if tool_calls.is_empty() {
                debug!(turn, finish_reason = ?choice.finish_reason, "Model answered");
                return choice.message.content.ok_or(AiError::EmptyResponse);
            }

            request.messages.push(WireMessage::assistant_tool_calls(
                choice.message.content,
                tool_calls.clone(),
            ));

            for tc in &tool_calls {
                let tool = self
                    .agent
                    .tools
                    .iter()
                    .find(|t| t.name() == tc.function.name)
                    .ok_or_else(|| AiError::ToolNotFound(tc.function.name.clone()))?;

                let args: serde_json::Value = if tc.function.arguments.trim().is_empty() {
                    serde_json::json!({})
                } else {
                    serde_json::from_str(&tc.function.arguments).unwrap_or_default()
                };

                debug!(tool = %tc.function.name, turn, "Executing tool call");

                let result = match tool.call_json(args).await {
                    Ok(serde_json::Value::String(s)) => s,
                    Ok(v) => serde_json::to_string(&v)?,
                    Err(e) => {
                        warn!(tool = %tc.function.name, error = %e, "Tool call failed");
                        format!("Error: {e}")
                    }
                };

                request.messages.push(WireMessage::tool(&tc.id, result));
            }
        }

        Err(AiError::MaxTurns(self.max_turns))
    }
}
