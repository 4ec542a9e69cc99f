// Summarizer: profile-tailored summaries via the chat-completion API

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::DigestError;
use crate::models::ReaderProfile;

pub struct Summarizer {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl Summarizer {
    pub fn new(http: Client, base_url: String, api_key: String, model: String) -> Self {
        Self {
            http,
            base_url,
            api_key,
            model,
        }
    }

    /// Single request, first completion choice returned verbatim.
    pub async fn summarize(
        &self,
        title: &str,
        abstract_text: &str,
        profile: ReaderProfile,
    ) -> Result<String, DigestError> {
        info!(profile = profile.label(), "Summarizing record: {}", title);

        let prompt = build_prompt(title, abstract_text, profile);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(DigestError::Network)?;

        if !response.status().is_success() {
            return Err(DigestError::Service(format!(
                "completion endpoint returned {}",
                response.status()
            )));
        }

        let completion: ChatResponse = response.json().await.map_err(|e| {
            DigestError::Service(format!("malformed completion response: {e}"))
        })?;

        let choice = completion.choices.into_iter().next().ok_or_else(|| {
            DigestError::Service("completion response contained no choices".to_string())
        })?;

        Ok(choice.message.content)
    }
}

/// Instruction for the selected profile, a blank line, then the record.
pub fn build_prompt(title: &str, abstract_text: &str, profile: ReaderProfile) -> String {
    format!(
        "{}\n\nTítulo: {title}\nResumen: {abstract_text}",
        profile.instruction()
    )
}
