//! Info-gather client - Gemini generateContent
//!
//! Collects and organizes technical background information. The
//! provider reports neither confidence nor citations.

use super::{classify_status, classify_transport};
use crate::config::ProviderConfig;
use helpdesk_domain::{InvocationError, ModelOutput, ModelRequest};
use serde_json::{Value, json};
use std::time::Duration;

const GENERATE_URL_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct InfoGatherClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl InfoGatherClient {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    pub async fn send(
        &self,
        request: &ModelRequest,
        timeout: Duration,
    ) -> Result<ModelOutput, InvocationError> {
        let Some(api_key) = &self.api_key else {
            return Err(InvocationError::auth(
                "no API key configured (GEMINI_API_KEY)",
            ));
        };

        let url = format!(
            "{GENERATE_URL_BASE}/{}:generateContent?key={api_key}",
            self.model
        );

        let body = json!({
            "contents": [{ "parts": [{ "text": request.prompt }] }],
            "generationConfig": {
                "temperature": self.temperature,
                "maxOutputTokens": self.max_tokens,
            },
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &detail));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| InvocationError::upstream(format!("invalid response body: {e}")))?;

        parse_response(&payload)
    }
}

fn parse_response(payload: &Value) -> Result<ModelOutput, InvocationError> {
    let answer = payload["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .ok_or_else(|| InvocationError::upstream("response carried no candidate text"))?;
    Ok(ModelOutput::new(answer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response_extracts_candidate_text() {
        let payload = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Exchange Online limits attachments to 25 MB" }] }
            }]
        });
        let output = parse_response(&payload).unwrap();
        assert_eq!(output.answer, "Exchange Online limits attachments to 25 MB");
        assert!(output.confidence.is_none());
    }

    #[test]
    fn test_parse_response_missing_candidates() {
        let payload = json!({ "candidates": [] });
        assert!(parse_response(&payload).is_err());
    }
}
