//! Amazon Translate client speaking the `TranslateText` JSON 1.1 protocol.

use crate::error::{LexTranslateError, Result};
use crate::translate::sigv4::{Credentials, Signer, SigningRequest};
use crate::translate::{TranslationRequest, TranslationResponse, TranslationService};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Signing name of the service.
const SERVICE_NAME: &str = "translate";

/// JSON 1.1 operation selector for `TranslateText`.
const TRANSLATE_TEXT_TARGET: &str = "AWSShineFrontendService_20170701.TranslateText";

const CONTENT_TYPE: &str = "application/x-amz-json-1.1";

/// Amazon Translate API client.
pub struct AmazonTranslateClient {
    client: Client,
    region: String,
    endpoint: String,
    credentials: Credentials,
}

impl AmazonTranslateClient {
    /// Create a client for the regional endpoint of `region`.
    pub fn new(region: String, credentials: Credentials) -> Self {
        let endpoint = format!("https://translate.{}.amazonaws.com", region);
        Self {
            client: Client::new(),
            region,
            endpoint,
            credentials,
        }
    }

    /// Send requests to a different endpoint (VPC endpoint, local mock).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    async fn call_api(&self, body: Vec<u8>) -> Result<TranslateTextResponse> {
        let url = Url::parse(&self.endpoint).map_err(|e| {
            LexTranslateError::Config(format!("Invalid endpoint {}: {}", self.endpoint, e))
        })?;
        let host = host_header(&url)?;

        let signer = Signer {
            credentials: &self.credentials,
            region: &self.region,
            service: SERVICE_NAME,
        };
        let signature = signer.sign(
            &SigningRequest {
                method: "POST",
                host: &host,
                path: url.path(),
                headers: &[
                    ("content-type", CONTENT_TYPE),
                    ("x-amz-target", TRANSLATE_TEXT_TARGET),
                ],
                payload: &body,
            },
            Utc::now(),
        );

        let mut request = self
            .client
            .post(url)
            .header("Content-Type", CONTENT_TYPE)
            .header("X-Amz-Target", TRANSLATE_TEXT_TARGET)
            .header("X-Amz-Date", signature.amz_date)
            .header("Authorization", signature.authorization);
        if let Some(ref token) = self.credentials.session_token {
            request = request.header("X-Amz-Security-Token", token);
        }

        let response = request.body(body).send().await.map_err(|e| {
            LexTranslateError::TranslationService(format!("Translation request failed: {}", e))
        })?;

        let status = response.status();
        debug!("Amazon Translate response status: {}", status);

        let body = response.text().await.map_err(|e| {
            LexTranslateError::TranslationService(format!("Failed to read response: {}", e))
        })?;

        if !status.is_success() {
            if let Ok(service_error) = serde_json::from_str::<ServiceErrorResponse>(&body) {
                return Err(LexTranslateError::TranslationService(
                    service_error.describe(status.as_u16()),
                ));
            }
            return Err(LexTranslateError::TranslationService(format!(
                "Amazon Translate error ({}): {}",
                status, body
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            LexTranslateError::TranslationService(format!(
                "Failed to parse translation response: {}",
                e
            ))
        })
    }
}

#[async_trait]
impl TranslationService for AmazonTranslateClient {
    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResponse> {
        debug!(
            "Translating {} chars from {} to {}",
            request.text.chars().count(),
            request.source_language_code,
            request.target_language_code
        );

        let body = serde_json::to_vec(&TranslateTextRequest {
            text: &request.text,
            source_language_code: &request.source_language_code,
            target_language_code: &request.target_language_code,
        })?;

        let response = self.call_api(body).await?;

        Ok(TranslationResponse {
            translated_text: response.translated_text,
            source_language_code: response.source_language_code,
            target_language_code: response.target_language_code,
        })
    }

    fn name(&self) -> &'static str {
        "Amazon Translate"
    }
}

/// `Host` header value as reqwest will send it: the port only appears when it is not the
/// scheme's default.
fn host_header(url: &Url) -> Result<String> {
    let host = url.host_str().ok_or_else(|| {
        LexTranslateError::Config(format!("Endpoint has no host: {}", url))
    })?;
    Ok(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

// API request/response types

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct TranslateTextRequest<'a> {
    text: &'a str,
    source_language_code: &'a str,
    target_language_code: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TranslateTextResponse {
    #[serde(default)]
    translated_text: Option<String>,
    #[serde(default)]
    source_language_code: Option<String>,
    #[serde(default)]
    target_language_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ServiceErrorResponse {
    #[serde(rename = "__type", default)]
    error_type: Option<String>,
    #[serde(alias = "Message", default)]
    message: Option<String>,
}

impl ServiceErrorResponse {
    fn describe(&self, status: u16) -> String {
        // "__type" may be namespaced, e.g. "com.amazonaws.translate#TextSizeLimitExceededException"
        let code = self
            .error_type
            .as_deref()
            .map(|t| t.rsplit('#').next().unwrap_or(t))
            .unwrap_or("UnknownError");
        match self.message {
            Some(ref message) => format!("{} ({}): {}", code, status, message),
            None => format!("{} ({})", code, status),
        }
    }
}
