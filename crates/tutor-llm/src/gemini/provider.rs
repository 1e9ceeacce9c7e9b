//! Gemini provider implementation

use super::config::{gcloud_access_token, GeminiAuth, GeminiConfig, MODELS};
use super::convert::{convert_messages, convert_tool_choice, convert_tools};
use super::security::{is_auth_error, sanitize_api_error};
use super::types::*;
use crate::completion::{
    CompletionRequest, CompletionResponse, TokenUsage, ToolCompletionRequest,
    ToolCompletionResponse,
};
use crate::error::{Error, Result};
use crate::provider::LlmProvider;
use crate::tools::ToolCall;
use reqwest::Client;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

const MAX_RETRIES: u32 = 2;

const EMPTY_RESPONSE: &str = "(empty response)";

/// Google Gemini provider
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
    /// Vertex AI token obtained after the configured one expired
    refreshed_token: Mutex<Option<String>>,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Network(e.without_url().to_string()))?;

        Ok(Self {
            client,
            config,
            refreshed_token: Mutex::new(None),
        })
    }

    /// Create from environment
    pub async fn from_env() -> Result<Self> {
        Self::new(GeminiConfig::from_env().await?)
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn bearer_token(&self) -> Option<String> {
        let GeminiAuth::VertexAi { access_token, .. } = &self.config.auth else {
            return None;
        };
        let refreshed = self
            .refreshed_token
            .lock()
            .ok()
            .and_then(|guard| guard.clone());
        Some(refreshed.unwrap_or_else(|| access_token.clone()))
    }

    /// Fetch a new Vertex AI token. Returns true if one was stored.
    async fn try_refresh_token(&self) -> bool {
        if !matches!(self.config.auth, GeminiAuth::VertexAi { .. }) {
            return false;
        }
        match gcloud_access_token().await {
            Ok(token) => {
                if let Ok(mut guard) = self.refreshed_token.lock() {
                    *guard = Some(token);
                }
                info!("Vertex AI access token refreshed");
                true
            }
            Err(e) => {
                warn!(error = %e, "Vertex AI token refresh failed");
                false
            }
        }
    }

    /// Send with retries on rate limits and server errors.
    async fn send_request(&self, model: &str, request: &GeminiRequest) -> Result<GeminiResponse> {
        let mut refreshed = false;
        let mut attempt = 0;

        loop {
            match self.send_request_once(model, request).await {
                Ok(resp) => return Ok(resp),
                Err(Error::RateLimit) if attempt < MAX_RETRIES => {
                    let delay_secs = 2 + u64::from(attempt) * 2; // 2, 4
                    info!(
                        attempt = attempt + 1,
                        model = %model,
                        delay_secs,
                        "Gemini rate limited, retrying"
                    );
                    tokio::time::sleep(Duration::from_secs(delay_secs)).await;
                }
                Err(Error::ServerError(ref msg)) if attempt < MAX_RETRIES => {
                    let delay_secs = 2 + u64::from(attempt) * 3; // 2, 5
                    warn!(
                        attempt = attempt + 1,
                        model = %model,
                        delay_secs,
                        error = %msg,
                        "Gemini server error, retrying"
                    );
                    tokio::time::sleep(Duration::from_secs(delay_secs)).await;
                }
                Err(Error::Api(ref msg)) if is_auth_error(msg) && !refreshed => {
                    refreshed = true;
                    if self.try_refresh_token().await {
                        info!("Retrying after token refresh");
                        continue;
                    }
                    return Err(Error::Api(msg.clone()));
                }
                Err(e) => return Err(e),
            }
            attempt += 1;
        }
    }

    /// Single attempt to send a request
    async fn send_request_once(&self, model: &str, request: &GeminiRequest) -> Result<GeminiResponse> {
        // SECURITY: the URL is logged without credentials
        let url = self.config.endpoint(model);
        debug!(model = %model, auth = self.config.auth.kind(), "Sending request to Gemini");

        let mut builder = self
            .client
            .post(&url)
            .header("content-type", "application/json");
        builder = match &self.config.auth {
            GeminiAuth::ApiKey(key) => builder.header("x-goog-api-key", key.as_str()),
            GeminiAuth::VertexAi { .. } => match self.bearer_token() {
                Some(token) => builder.bearer_auth(token),
                None => builder,
            },
        };

        let timeout_ms = self.config.timeout.as_millis() as u64;
        let response = builder.json(request).send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout(timeout_ms)
            } else {
                Error::Network(e.without_url().to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.without_url().to_string()))?;

        if !status.is_success() {
            warn!(status = %status, "Gemini API error response");
            let detail = serde_json::from_str::<GeminiError>(&body)
                .map(|e| format!("{}: {}", e.error.status, e.error.message))
                .unwrap_or_else(|_| format!("HTTP {status}"));

            if status.as_u16() == 429 {
                return Err(Error::RateLimit);
            }
            if status.is_server_error() {
                return Err(Error::ServerError(sanitize_api_error(&detail)));
            }
            if matches!(status.as_u16(), 401 | 403) {
                return Err(Error::Api(sanitize_api_error("authentication failed")));
            }
            return Err(Error::Api(sanitize_api_error(&detail)));
        }

        parse_response(&body)
    }

    fn resolve_model<'a>(&'a self, requested: &'a str) -> &'a str {
        if requested.is_empty() {
            &self.config.default_model
        } else {
            requested
        }
    }

    fn generation_config(&self, request: &CompletionRequest) -> GenerationConfig {
        GenerationConfig {
            temperature: request.temperature,
            max_output_tokens: request.max_tokens.or(Some(self.config.default_max_tokens)),
        }
    }
}

pub(crate) fn parse_response(body: &str) -> Result<GeminiResponse> {
    serde_json::from_str(body).map_err(|e| {
        Error::InvalidResponse(format!("{}: {}", e, crate::util::truncate_safe(body, 200)))
    })
}

fn usage_of(response: &GeminiResponse) -> Option<TokenUsage> {
    response.usage_metadata.as_ref().map(|u| TokenUsage {
        prompt_tokens: u.prompt_token_count,
        completion_tokens: u.candidates_token_count.unwrap_or(0),
        total_tokens: u.total_token_count,
    })
}

/// Split a candidate into text and tool calls; Gemini supplies no call ids.
pub(crate) fn extract_candidate(response: &GeminiResponse) -> Result<(Option<String>, Vec<ToolCall>, Option<String>)> {
    let candidate = response
        .candidates
        .first()
        .ok_or_else(|| Error::InvalidResponse("No candidates in response".to_string()))?;

    let mut text = String::new();
    let mut tool_calls = Vec::new();

    for part in &candidate.content.parts {
        match part {
            GeminiPart::Text { text: t } => text.push_str(t),
            GeminiPart::FunctionCall {
                function_call,
                thought_signature,
            } => tool_calls.push(ToolCall {
                id: uuid::Uuid::new_v4().to_string(),
                name: function_call.name.clone(),
                arguments: serde_json::to_string(&function_call.args)
                    .unwrap_or_else(|_| "{}".to_string()),
                thought_signature: thought_signature.clone(),
            }),
            GeminiPart::FunctionResponse { .. } => {}
        }
    }

    let content = (!text.is_empty()).then_some(text);
    Ok((content, tool_calls, candidate.finish_reason.clone()))
}

#[async_trait::async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn supports_tools(&self) -> bool {
        true
    }

    fn available_models(&self) -> Vec<String> {
        MODELS.iter().map(|s| (*s).to_string()).collect()
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let model = self.resolve_model(&request.model).to_string();
        let (system_instruction, contents) = convert_messages(&request.messages);

        let gemini_request = GeminiRequest {
            contents,
            system_instruction,
            generation_config: Some(self.generation_config(&request)),
            tools: None,
            tool_config: None,
        };

        let response = self.send_request(&model, &gemini_request).await?;
        let (content, _, finish_reason) = extract_candidate(&response)?;

        Ok(CompletionResponse {
            content: content.unwrap_or_else(|| EMPTY_RESPONSE.to_string()),
            usage: usage_of(&response),
            finish_reason,
            model,
        })
    }

    #[instrument(skip(self, request), fields(model = %request.request.model, tools = request.tools.len()))]
    async fn complete_with_tools(
        &self,
        request: ToolCompletionRequest,
    ) -> Result<ToolCompletionResponse> {
        let model = self.resolve_model(&request.request.model).to_string();
        let (system_instruction, contents) = convert_messages(&request.request.messages);

        let (tools, tool_config) = if request.tools.is_empty() {
            (None, None)
        } else {
            (
                Some(convert_tools(&request.tools)),
                Some(convert_tool_choice(&request.tool_choice)),
            )
        };

        let gemini_request = GeminiRequest {
            contents,
            system_instruction,
            generation_config: Some(self.generation_config(&request.request)),
            tools,
            tool_config,
        };

        let response = self.send_request(&model, &gemini_request).await?;
        let (content, tool_calls, finish_reason) = extract_candidate(&response)?;

        if content.is_none() && tool_calls.is_empty() {
            debug!(finish_reason = ?finish_reason, "Gemini returned an empty candidate");
        }

        Ok(ToolCompletionResponse {
            content,
            tool_calls,
            usage: usage_of(&response),
            finish_reason,
            model,
        })
    }
}
