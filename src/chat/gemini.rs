//! Gemini `generateContent` client.

use futures::future::BoxFuture;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::types::{ChatError, Message, Role};
use super::{CompletionService, SYSTEM_INSTRUCTION};
use crate::config::ChatConfig;

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: ChatConfig) -> Result<Self, ChatError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ChatError::HttpClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            api_key: config.api_key,
            base_url: config.base_url,
            model: config.model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Send `history` plus `prompt` under the fixed system instruction
    pub async fn generate(&self, history: &[Message], prompt: &str) -> Result<String, ChatError> {
        let body = build_request(SYSTEM_INSTRUCTION, history, prompt);
        log::debug!("Sending {} turns to {}", body.contents.len(), self.model);

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ChatError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(ChatError::ApiResponse { status, body: text });
        }

        parse_response(&text)
    }
}

impl CompletionService for GeminiClient {
    fn complete<'a>(&'a self, history: &'a [Message], prompt: &'a str) -> BoxFuture<'a, Result<String, ChatError>> {
        self.generate(history, prompt).boxed()
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateRequest<'a> {
    system_instruction: SystemInstruction<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

pub(crate) fn build_request<'a>(system: &'a str, history: &'a [Message], prompt: &'a str) -> GenerateRequest<'a> {
    let turn = |role: Role, text: &'a str| Content {
        role: role.as_str(),
        parts: [Part { text }],
    };

    let mut contents: Vec<Content<'a>> = history.iter().map(|m| turn(m.role, &m.text)).collect();
    contents.push(turn(Role::User, prompt));

    GenerateRequest {
        system_instruction: SystemInstruction { parts: [Part { text: system }] },
        contents,
    }
}

/// Concatenate the text parts of the first candidate
pub(crate) fn parse_response(body: &str) -> Result<String, ChatError> {
    let response: GenerateResponse = serde_json::from_str(body).map_err(|e| ChatError::ApiParse(e.to_string()))?;

    let candidate = response.candidates.into_iter().next().ok_or(ChatError::EmptyReply)?;
    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ChatError::EmptyReply);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let history = vec![Message::model("Greetings."), Message::user("Hi")];
        let body = serde_json::to_value(build_request("be brief", &history, "What is minimalism?")).unwrap();

        assert_eq!(
            body,
            json!({
                "systemInstruction": { "parts": [{ "text": "be brief" }] },
                "contents": [
                    { "role": "model", "parts": [{ "text": "Greetings." }] },
                    { "role": "user", "parts": [{ "text": "Hi" }] },
                    { "role": "user", "parts": [{ "text": "What is minimalism?" }] },
                ]
            })
        );
    }

    #[test]
    fn test_parse_joins_parts_of_first_candidate() {
        let body = json!({
            "candidates": [
                { "content": { "role": "model", "parts": [{ "text": "Less, " }, { "text": "but better." }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        })
        .to_string();

        assert_eq!(parse_response(&body).unwrap(), "Less, but better.");
    }

    #[test]
    fn test_parse_empty_candidates() {
        let err = parse_response(r#"{"candidates": []}"#).unwrap_err();
        assert!(matches!(err, ChatError::EmptyReply));

        let err = parse_response(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap_err();
        assert!(matches!(err, ChatError::EmptyReply));
    }

    #[test]
    fn test_parse_candidate_without_content() {
        let err = parse_response(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap_err();
        assert!(matches!(err, ChatError::EmptyReply));
    }

    #[test]
    fn test_parse_malformed_json() {
        let err = parse_response("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, ChatError::ApiParse(_)));
    }

    #[test]
    fn test_endpoint_uses_model() {
        let config = ChatConfig {
            api_key: "k".into(),
            model: "gemini-2.5-flash".into(),
            base_url: "http://localhost:9999/v1beta".into(),
            timeouts: Default::default(),
        };
        let client = GeminiClient::new(config).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:9999/v1beta/models/gemini-2.5-flash:generateContent");
    }
}
