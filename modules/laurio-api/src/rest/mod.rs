use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use laurio_agents::FlowOrchestrator;
use laurio_common::{PostResult, TopicOutcome};

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct FlowRequest {
    pub topics: Vec<String>,
    #[serde(default)]
    pub context: Option<String>,
}

/// Response envelope shared by both endpoints.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RunResponse<T> {
    Success { results: Vec<T> },
    Error { message: String },
}

pub async fn run_flow(
    State(state): State<Arc<AppState>>,
    Json(body): Json<FlowRequest>,
) -> impl IntoResponse {
    info!(
        topics = body.topics.len(),
        model = state.config.llm_model.as_str(),
        "run-flow requested"
    );
    let flow = FlowOrchestrator::new(state.pipelines.build());
    let results: Vec<TopicOutcome> = flow
        .run_topics(&body.topics, body.context.as_deref())
        .await;
    Json(RunResponse::Success { results })
}

pub async fn run_daily(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    info!(model = state.config.llm_model.as_str(), "run-daily requested");
    let flow = FlowOrchestrator::new(state.pipelines.build());
    let response: RunResponse<PostResult> = match flow.run_daily().await {
        Ok(results) => RunResponse::Success { results },
        Err(e) => {
            warn!(error = %format!("{e:#}"), "Daily run aborted");
            RunResponse::Error {
                message: format!("{e:#}"),
            }
        }
    };
    Json(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_shapes() {
        let ok: RunResponse<u8> = RunResponse::Success { results: vec![1] };
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            serde_json::json!({ "status": "success", "results": [1] })
        );

        let err: RunResponse<u8> = RunResponse::Error {
            message: "boom".into(),
        };
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            serde_json::json!({ "status": "error", "message": "boom" })
        );
    }

    #[test]
    fn context_is_optional() {
        let req: FlowRequest = serde_json::from_str(r#"{"topics": ["IA"]}"#).unwrap();
        assert_eq!(req.topics, vec!["IA"]);
        assert!(req.context.is_none());
    }
}
