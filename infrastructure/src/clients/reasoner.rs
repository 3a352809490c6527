//! Reasoner client - Anthropic Messages API
//!
//! The primary reasoning backend: query judgement and the main answer
//! text. The provider reports neither confidence nor source
//! references, so the normalized output carries neither.

use super::{classify_status, classify_transport};
use crate::config::ProviderConfig;
use helpdesk_domain::{InvocationError, ModelOutput, ModelRequest, TurnRole};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

pub struct ReasonerClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl ReasonerClient {
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
                "no API key configured (CLAUDE_API_KEY)",
            ));
        };

        let body = build_body(
            &self.model,
            request,
            self.max_tokens,
            self.temperature,
        );

        let response = self
            .http
            .post(MESSAGES_URL)
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
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

        if let Some(usage) = payload.get("usage") {
            debug!(
                input_tokens = usage["input_tokens"].as_u64(),
                output_tokens = usage["output_tokens"].as_u64(),
                "reasoner token usage"
            );
        }

        parse_response(&payload)
    }
}

fn build_body(model: &str, request: &ModelRequest, max_tokens: u32, temperature: f32) -> Value {
    let mut messages: Vec<Value> = request
        .history
        .iter()
        .map(|turn| {
            let role = match turn.role {
                TurnRole::User => "user",
                TurnRole::Assistant => "assistant",
            };
            json!({ "role": role, "content": turn.text })
        })
        .collect();
    messages.push(json!({ "role": "user", "content": request.prompt }));

    let mut body = json!({
        "model": model,
        "max_tokens": max_tokens,
        "temperature": temperature,
        "messages": messages,
    });
    if let Some(system) = &request.system_prompt {
        body["system"] = json!(system);
    }
    body
}

fn parse_response(payload: &Value) -> Result<ModelOutput, InvocationError> {
    let answer = payload["content"][0]["text"]
        .as_str()
        .ok_or_else(|| InvocationError::upstream("response carried no text content"))?;
    Ok(ModelOutput::new(answer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_body_includes_history_and_system() {
        use helpdesk_domain::ConversationTurn;
        let request = ModelRequest::new("still broken")
            .with_system_prompt("you are a helpdesk")
            .with_history(vec![ConversationTurn::new(TurnRole::User, "VPN drops")]);

        let body = build_body("claude-sonnet-4-5", &request, 4096, 0.3);

        assert_eq!(body["system"], "you are a helpdesk");
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["content"], "VPN drops");
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["content"], "still broken");
    }

    #[test]
    fn test_parse_response_extracts_text() {
        let payload = json!({
            "content": [{ "type": "text", "text": "restart the Outlook client" }],
            "usage": { "input_tokens": 12, "output_tokens": 40 }
        });
        let output = parse_response(&payload).unwrap();
        assert_eq!(output.answer, "restart the Outlook client");
        assert!(output.confidence.is_none());
        assert!(output.sources.is_empty());
    }

    #[test]
    fn test_parse_response_rejects_empty_content() {
        let payload = json!({ "content": [] });
        assert!(parse_response(&payload).is_err());
    }
}
