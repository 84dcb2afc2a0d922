//! Blocking client for the move-suggestion service (OpenAI or Anthropic).

use std::fmt;
use std::time::Duration;

use log::{debug, error, info};
use serde::{Deserialize, Serialize};

use crate::error::{OracleFailure, Result};

/// A text-in, text-out suggestion service.
pub trait Suggest {
    /// Sends one request and returns the raw completion text.
    fn suggest(&self, system_prompt: &str, user_message: &str) -> Result<String>;
}

impl<S: Suggest + ?Sized> Suggest for &S {
    fn suggest(&self, system_prompt: &str, user_message: &str) -> Result<String> {
        (**self).suggest(system_prompt, user_message)
    }
}

/// LLM provider selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum LlmProvider {
    /// OpenAI chat completions.
    #[value(name = "openai")]
    OpenAI,
    /// Anthropic messages.
    Anthropic,
}

impl LlmProvider {
    pub fn default_base_url(self) -> &'static str {
        match self {
            LlmProvider::OpenAI => "https://api.openai.com",
            LlmProvider::Anthropic => "https://api.anthropic.com",
        }
    }

    /// Environment variable conventionally holding this provider's key.
    pub fn api_key_var(self) -> &'static str {
        match self {
            LlmProvider::OpenAI => "OPENAI_API_KEY",
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

/// Configuration for [`LlmClient`].
#[derive(Clone)]
pub struct LlmConfig {
    provider: LlmProvider,
    api_key: String,
    model: String,
    max_tokens: u32,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

// Keeps the key out of logs.
impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl LlmConfig {
    pub fn new(provider: LlmProvider, api_key: String, model: String, max_tokens: u32) -> Self {
        Self { provider, api_key, model, max_tokens, base_url: None, timeout: None }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.provider.default_base_url())
            .trim_end_matches('/')
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

/// Extracts the first choice's text from a chat-completions body.
fn parse_openai_reply(body: &str) -> Result<String> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|e| OracleFailure::Malformed(e.to_string()))?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or(OracleFailure::Empty)
}

/// Extracts the first text block from a messages body.
fn parse_anthropic_reply(body: &str) -> Result<String> {
    let parsed: MessagesResponse =
        serde_json::from_str(body).map_err(|e| OracleFailure::Malformed(e.to_string()))?;
    parsed
        .content
        .into_iter()
        .find_map(|b| b.text)
        .ok_or(OracleFailure::Empty)
}

fn transport_error(e: reqwest::Error) -> OracleFailure {
    if e.is_timeout() {
        OracleFailure::Timeout
    } else {
        OracleFailure::Transport(e.to_string())
    }
}

/// LLM client that abstracts over the supported providers.
#[derive(Debug, Clone)]
pub struct LlmClient {
    config: LlmConfig,
    http: reqwest::blocking::Client,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        info!("creating {:?} client for model {}", config.provider, config.model);
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(transport_error)?;
        Ok(Self { config, http })
    }

    fn send(&self, request: reqwest::blocking::RequestBuilder) -> Result<String> {
        let response = request.send().map_err(|e| {
            error!("suggestion request failed: {e}");
            transport_error(e)
        })?;
        let status = response.status();
        let body = response.text().map_err(transport_error)?;
        if !status.is_success() {
            error!("suggestion service returned {status}");
            return Err(OracleFailure::Status { status: status.as_u16(), body });
        }
        debug!("response body: {} bytes", body.len());
        Ok(body)
    }

    fn generate_openai(&self, system_prompt: &str, user_message: &str) -> Result<String> {
        let url = format!("{}/v1/chat/completions", self.config.base_url());
        let body = ChatRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            messages: vec![
                ChatMessage { role: "system", content: system_prompt },
                ChatMessage { role: "user", content: user_message },
            ],
        };
        let request = self.http.post(url).bearer_auth(&self.config.api_key).json(&body);
        parse_openai_reply(&self.send(request)?)
    }

    fn generate_anthropic(&self, system_prompt: &str, user_message: &str) -> Result<String> {
        let url = format!("{}/v1/messages", self.config.base_url());
        let body = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            system: system_prompt,
            messages: vec![ChatMessage { role: "user", content: user_message }],
        };
        let request = self
            .http
            .post(url)
            .header("x-api-key", self.config.api_key.as_str())
            .header("anthropic-version", "2023-06-01")
            .json(&body);
        parse_anthropic_reply(&self.send(request)?)
    }
}

impl Suggest for LlmClient {
    fn suggest(&self, system_prompt: &str, user_message: &str) -> Result<String> {
        debug!("prompt: {user_message}");
        let reply = match self.config.provider {
            LlmProvider::OpenAI => self.generate_openai(system_prompt, user_message),
            LlmProvider::Anthropic => self.generate_anthropic(system_prompt, user_message),
        }?;
        debug!("reply: {reply:?}");
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openai_reply_takes_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":" e7e5\n"}}]}"#;
        assert_eq!(parse_openai_reply(body).unwrap(), " e7e5\n");
    }

    #[test]
    fn openai_reply_without_choices_is_empty() {
        assert_eq!(parse_openai_reply(r#"{"choices":[]}"#), Err(OracleFailure::Empty));
        let null_content = r#"{"choices":[{"message":{"content":null}}]}"#;
        assert_eq!(parse_openai_reply(null_content), Err(OracleFailure::Empty));
    }

    #[test]
    fn anthropic_reply_skips_non_text_blocks() {
        let body = r#"{"content":[{"type":"thinking"},{"type":"text","text":"g8f6"}]}"#;
        assert_eq!(parse_anthropic_reply(body).unwrap(), "g8f6");
    }

    #[test]
    fn garbage_body_is_malformed() {
        assert!(matches!(parse_openai_reply("<html>"), Err(OracleFailure::Malformed(_))));
        assert!(matches!(parse_anthropic_reply("{}"), Err(OracleFailure::Malformed(_))));
    }

    #[test]
    fn base_url_override_and_redacted_debug() {
        let cfg = LlmConfig::new(LlmProvider::OpenAI, "sk-secret".into(), "gpt-4".into(), 16)
            .with_base_url("http://localhost:8080/");
        assert_eq!(cfg.base_url(), "http://localhost:8080");
        assert!(!format!("{cfg:?}").contains("sk-secret"));
        let cfg = LlmConfig::new(LlmProvider::Anthropic, String::new(), "m".into(), 16);
        assert_eq!(cfg.base_url(), "https://api.anthropic.com");
    }
}
