// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Translation capability and its OpenAI-compatible chat-completions client.

use std::time::Duration;

use honyaku_core::config::TranslatorConfig;
use honyaku_core::error::{HonyakuError, Result};
use honyaku_core::types::TargetLanguage;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Translates text into a target language.
///
/// One call is one attempt; callers decide what a failure means.
pub trait Translator: Send + Sync {
    fn translate(&self, text: &str, target: TargetLanguage) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Instruction sent to the model for one hop.
fn build_prompt(text: &str, target: TargetLanguage) -> String {
    format!(
        "Translate the following text into {}. Reply with the translation only.\n\n{}",
        target.label(),
        text
    )
}

/// First choice's message content, trimmed.
fn extract_content(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|err| HonyakuError::Translation(format!("malformed response: {}", err)))?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_owned())
        .ok_or_else(|| HonyakuError::Translation("response has no message content".into()))
}

/// Blocking client for any `/chat/completions` endpoint.
pub struct ChatTranslator {
    client: Client,
    url: String,
    model: String,
    api_key: Option<String>,
}

impl ChatTranslator {
    /// Build the client; the API key is read from the environment variable
    /// named in `config`. Without one, requests go out unauthenticated (local
    /// servers accept that).
    pub fn new(config: &TranslatorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| HonyakuError::Config(format!("HTTP client: {}", err)))?;

        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            warn!(env = %config.api_key_env, "No API key in environment; sending unauthenticated requests");
        }

        Ok(Self {
            client,
            url: format!("{}/chat/completions", config.endpoint.trim_end_matches('/')),
            model: config.model.clone(),
            api_key,
        })
    }
}

impl Translator for ChatTranslator {
    #[instrument(skip(self, text), fields(target = target.code(), text_len = text.len()))]
    fn translate(&self, text: &str, target: TargetLanguage) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user".into(),
                content: Some(build_prompt(text, target)),
            }],
        };

        let mut builder = self.client.post(&self.url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .map_err(|err| HonyakuError::Translation(format!("request failed: {}", err)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|err| HonyakuError::Translation(format!("reading response: {}", err)))?;
        if !status.is_success() {
            return Err(HonyakuError::Translation(format!(
                "backend returned {}: {}",
                status, body
            )));
        }

        let translated = extract_content(&body)?;
        debug!(translated_len = translated.len(), "Translation received");
        Ok(translated)
    }
}
