//! Gemini API client for structured text generation.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::GeminiConfig;

use super::error::{ApiErrorResponse, GeminiError};
use super::types::{GenerateContentRequest, GenerateContentResponse};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini API client.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct GeminiClient {
    inner: Arc<GeminiClientInner>,
}

struct GeminiClientInner {
    client: reqwest::Client,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// # Errors
    ///
    /// Returns `GeminiError::MissingApiKey` when no key is configured,
    /// `GeminiError::Unauthorized` if the key cannot be sent as a header, or
    /// `GeminiError::Http` if the HTTP client cannot be built.
    pub fn new(config: &GeminiConfig) -> Result<Self, GeminiError> {
        let api_key = config
            .api_key
            .as_ref()
            .ok_or(GeminiError::MissingApiKey)?
            .expose_secret();

        let mut key_value = HeaderValue::from_str(api_key).map_err(|_| {
            GeminiError::Unauthorized("API key contains invalid header characters".to_string())
        })?;
        key_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(API_KEY_HEADER, key_value);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(GeminiClientInner {
                client,
                model: config.model.clone(),
                endpoint: generate_content_url(config),
            }),
        })
    }

    /// The model this client talks to.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.inner.model
    }

    /// Ask the model for JSON output conforming to `schema`.
    ///
    /// Returns the raw response text; parsing it is the caller's business.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers with an error,
    /// or the response carries no text.
    #[instrument(skip(self, prompt, schema), fields(model = %self.inner.model))]
    pub async fn generate_json(
        &self,
        prompt: &str,
        schema: serde_json::Value,
    ) -> Result<String, GeminiError> {
        let request = GenerateContentRequest::structured(prompt, schema);

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .json(&request)
            .send()
            .await?;

        let parsed = Self::handle_response(response).await?;
        if let Some(usage) = parsed.usage_metadata {
            tracing::debug!(
                prompt_tokens = usage.prompt_token_count,
                output_tokens = usage.candidates_token_count,
                "Gemini usage"
            );
        }

        parsed.text().ok_or(GeminiError::EmptyResponse)
    }

    /// Handle a response, parsing the body on success.
    async fn handle_response(
        response: reqwest::Response,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body)
                .map_err(|e| GeminiError::Parse(format!("Failed to parse response: {e}")))
        } else {
            Err(Self::handle_error_status(status, response).await)
        }
    }

    /// Handle an error status code.
    async fn handle_error_status(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> GeminiError {
        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return GeminiError::RateLimited(retry_after);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return GeminiError::Unauthorized("API key rejected".to_string());
        }

        // Try to parse API error response
        match response.text().await {
            Ok(body) => parse_error_body(status, body),
            Err(e) => GeminiError::Http(e),
        }
    }
}

/// Build `{api_base}/models/{model}:generateContent`.
fn generate_content_url(config: &GeminiConfig) -> String {
    format!(
        "{}/models/{}:generateContent",
        config.api_base.as_str().trim_end_matches('/'),
        config.model
    )
}

/// Turn a non-success body into the most specific error available.
fn parse_error_body(status: reqwest::StatusCode, body: String) -> GeminiError {
    serde_json::from_str::<ApiErrorResponse>(&body).map_or_else(
        |_| GeminiError::Api {
            status: status.to_string(),
            message: body,
        },
        |api_error| GeminiError::Api {
            status: api_error.error.status,
            message: api_error.error.message,
        },
    )
}
