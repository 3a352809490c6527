//! Evidence-search client - Perplexity chat completions
//!
//! Web search with citations. Citations come back as bare URLs; they
//! are normalized into source references with the URL doubling as the
//! title.

use super::{classify_status, classify_transport};
use crate::config::ProviderConfig;
use helpdesk_domain::{InvocationError, ModelOutput, ModelRequest, SourceRef};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

const CHAT_COMPLETIONS_URL: &str = "https://api.perplexity.ai/chat/completions";

pub struct EvidenceClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl EvidenceClient {
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
                "no API key configured (PERPLEXITY_API_KEY)",
            ));
        };

        let mut messages: Vec<Value> = Vec::new();
        if let Some(system) = &request.system_prompt {
            messages.push(json!({ "role": "system", "content": system }));
        }
        messages.push(json!({ "role": "user", "content": request.prompt }));

        let body = json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
            "return_citations": true,
            "return_images": false,
        });

        let response = self
            .http
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(api_key)
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

        let output = parse_response(&payload)?;
        debug!(sources = output.sources.len(), "evidence search returned");
        Ok(output)
    }
}

fn parse_response(payload: &Value) -> Result<ModelOutput, InvocationError> {
    let answer = payload["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| InvocationError::upstream("response carried no message content"))?;

    let sources = payload["citations"]
        .as_array()
        .map(|citations| {
            citations
                .iter()
                .filter_map(Value::as_str)
                .map(|url| SourceRef::new(url, url))
                .collect()
        })
        .unwrap_or_default();

    Ok(ModelOutput::new(answer).with_sources(sources))
}
