use std::env;

use crate::error::LaurioError;

pub const DEFAULT_LLM_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_LLM_MODEL: &str = "gemini-1.5-flash";

/// Application configuration loaded from environment variables.
///
/// Nothing is required: a missing LLM key switches the stages to fixture
/// output and a missing Tavily key switches search to canned results.
#[derive(Debug, Clone)]
pub struct Config {
    // Generation
    pub llm_api_key: Option<String>,
    pub llm_base_url: String,
    pub llm_model: String,
    pub llm_max_turns: usize,

    // Search
    pub tavily_api_key: Option<String>,

    // Web server
    pub api_host: String,
    pub api_port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: None,
            llm_base_url: DEFAULT_LLM_BASE_URL.to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            llm_max_turns: 5,
            tavily_api_key: None,
            api_host: "0.0.0.0".to_string(),
            api_port: 8000,
        }
    }
}

impl Config {
    /// Load configuration from `.env` (if present) and the process environment.
    pub fn from_env() -> Result<Self, LaurioError> {
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        config.log_keys();
        Ok(config)
    }

    /// Build a config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LaurioError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        Ok(Self {
            llm_api_key: get("LLM_API_KEY").or_else(|| get("GEMINI_API_KEY")),
            llm_base_url: get("LLM_BASE_URL").unwrap_or(defaults.llm_base_url),
            llm_model: get("LLM_MODEL").unwrap_or(defaults.llm_model),
            llm_max_turns: match get("LLM_MAX_TURNS") {
                Some(raw) => parse_number("LLM_MAX_TURNS", &raw)?,
                None => defaults.llm_max_turns,
            },
            tavily_api_key: get("TAVILY_API_KEY"),
            api_host: get("API_HOST").unwrap_or(defaults.api_host),
            api_port: match get("API_PORT") {
                Some(raw) => parse_number("API_PORT", &raw)?,
                None => defaults.api_port,
            },
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }

    fn log_keys(&self) {
        fn preview_opt(val: &Option<String>) -> String {
            match val {
                Some(v) => {
                    let head: String = v.chars().take(5).collect();
                    format!("{head}...({} chars)", v.chars().count())
                }
                None => "<not set>".to_string(),
            }
        }

        tracing::info!("Config loaded:");
        tracing::info!("  LLM_API_KEY: {}", preview_opt(&self.llm_api_key));
        tracing::info!("  LLM_BASE_URL: {}", self.llm_base_url);
        tracing::info!("  LLM_MODEL: {}", self.llm_model);
        tracing::info!("  TAVILY_API_KEY: {}", preview_opt(&self.tavily_api_key));
        if self.llm_api_key.is_none() {
            tracing::warn!("No LLM key configured; stages will return fixture output");
        }
        if self.tavily_api_key.is_none() {
            tracing::warn!("No TAVILY_API_KEY configured; search returns mock results");
        }
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, LaurioError> {
    raw.parse()
        .map_err(|_| LaurioError::Config(format!("{key} must be a number, got '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert!(config.llm_api_key.is_none());
        assert!(config.tavily_api_key.is_none());
        assert_eq!(config.llm_model, "gemini-1.5-flash");
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn gemini_key_is_a_fallback_for_llm_key() {
        let config = Config::from_lookup(lookup(&[("GEMINI_API_KEY", "g-key")])).unwrap();
        assert_eq!(config.llm_api_key.as_deref(), Some("g-key"));

        let config = Config::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "g-key"),
            ("LLM_API_KEY", "primary"),
        ]))
        .unwrap();
        assert_eq!(config.llm_api_key.as_deref(), Some("primary"));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = Config::from_lookup(lookup(&[("TAVILY_API_KEY", "  "), ("API_HOST", "")]))
            .unwrap();
        assert!(config.tavily_api_key.is_none());
        assert_eq!(config.api_host, "0.0.0.0");
    }

    #[test]
    fn bad_port_is_a_config_error() {
        let err = Config::from_lookup(lookup(&[("API_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, LaurioError::Config(_)));
        assert!(err.to_string().contains("API_PORT"));
    }
}
