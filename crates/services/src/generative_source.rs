use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::PairSourceError;
use crate::pair_source::{PairSource, RawPair};

const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Clone, Debug)]
pub struct GenerativeSourceConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

impl GenerativeSourceConfig {
    /// Read the config from `PERCENT_AI_*` variables.
    ///
    /// Returns `None` when no API key is set.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("PERCENT_AI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url =
            env::var("PERCENT_AI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
        let model = env::var("PERCENT_AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
        let timeout = env::var("PERCENT_AI_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .map_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS), Duration::from_secs);
        Some(Self {
            base_url,
            api_key,
            model,
            timeout,
        })
    }
}

/// Asks an OpenAI-compatible chat endpoint for practice fractions.
#[derive(Clone)]
pub struct GenerativePairSource {
    client: Client,
    config: Option<GenerativeSourceConfig>,
}

impl GenerativePairSource {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(GenerativeSourceConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<GenerativeSourceConfig>) -> Self {
        let timeout = config
            .as_ref()
            .map_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS), |c| c.timeout);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, config }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }
}

#[async_trait]
impl PairSource for GenerativePairSource {
    async fn request_pairs(&self, count: usize) -> Result<Vec<RawPair>, PairSourceError> {
        let config = self.config.as_ref().ok_or(PairSourceError::Disabled)?;

        let url = format!(
            "{}/chat/completions",
            config.base_url.trim_end_matches('/')
        );
        let payload = ChatRequest {
            model: config.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: build_prompt(count),
            }],
            temperature: 0.7,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        log::debug!("requesting {count} fraction pairs from {}", config.model);
        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PairSourceError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(PairSourceError::EmptyResponse)?;

        parse_problems(&content)
    }
}

fn build_prompt(count: usize) -> String {
    format!(
        "Generate {count} distinct fraction problems for mental math practice.\n\
         Rules:\n\
         1. Denominators between 7 and 25 (e.g. 13, 17, 19, 23).\n\
         2. Numerators should be greater than 1 (no unit fractions like 1/13).\n\
         3. Return ONLY a JSON object of the form {{\"problems\": [{{\"num\": 3, \"den\": 17}}]}}."
    )
}

/// Decode the model's reply, tolerating a surrounding markdown fence.
fn parse_problems(content: &str) -> Result<Vec<RawPair>, PairSourceError> {
    let trimmed = content.trim();
    let json = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);

    let payload: ProblemsPayload = serde_json::from_str(json.trim())?;
    Ok(payload.problems)
}

#[derive(Debug, Deserialize)]
struct ProblemsPayload {
    problems: Vec<RawPair>,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_fenced_json() {
        let plain = r#"{"problems": [{"num": 3, "den": 17}, {"num": 5, "den": 23}]}"#;
        assert_eq!(
            parse_problems(plain).unwrap(),
            vec![RawPair::new(3, 17), RawPair::new(5, 23)]
        );

        let fenced = "```json\n{\"problems\": [{\"num\": 2, \"den\": 9}]}\n```";
        assert_eq!(parse_problems(fenced).unwrap(), vec![RawPair::new(2, 9)]);
    }

    #[test]
    fn wrong_shape_is_a_decode_error() {
        assert!(matches!(
            parse_problems(r#"[{"num": 3, "den": 17}]"#),
            Err(PairSourceError::Decode(_))
        ));
        assert!(matches!(
            parse_problems("not json"),
            Err(PairSourceError::Decode(_))
        ));
    }

    #[test]
    fn prompt_mentions_count_and_bounds() {
        let prompt = build_prompt(10);
        assert!(prompt.starts_with("Generate 10 distinct"));
        assert!(prompt.contains("between 7 and 25"));
    }

    #[tokio::test]
    async fn unconfigured_source_is_disabled() {
        let source = GenerativePairSource::new(None);
        assert!(!source.enabled());
        assert!(matches!(
            source.request_pairs(5).await,
            Err(PairSourceError::Disabled)
        ));
    }
}
