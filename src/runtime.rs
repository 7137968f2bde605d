//! Client for the Lambda Runtime API.
//!
//! The execution environment hands out one invocation at a time: the function polls
//! `invocation/next`, handles the event and posts the result back under the request id.

use crate::error::{LexTranslateError, Result};
use crate::handler::DialogTranslationHandler;
use crate::lex::DialogResponse;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

const RUNTIME_API_VERSION: &str = "2018-06-01";

const REQUEST_ID_HEADER: &str = "Lambda-Runtime-Aws-Request-Id";
const TRACE_ID_HEADER: &str = "Lambda-Runtime-Trace-Id";
const FUNCTION_ERROR_TYPE_HEADER: &str = "Lambda-Runtime-Function-Error-Type";

/// An event received from the runtime.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub request_id: String,
    pub trace_id: Option<String>,
    pub event: Value,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorRequest<'a> {
    error_message: &'a str,
    error_type: &'a str,
}

pub struct LambdaRuntime {
    client: Client,
    base_url: String,
    handler: DialogTranslationHandler,
}

impl LambdaRuntime {
    /// `runtime_api` is the `host:port` from `AWS_LAMBDA_RUNTIME_API`.
    pub fn new(runtime_api: &str, handler: DialogTranslationHandler) -> Self {
        Self {
            client: Client::new(),
            base_url: runtime_base_url(runtime_api),
            handler,
        }
    }

    /// Poll, handle and answer invocations until the Runtime API fails.
    pub async fn run(&self) -> Result<()> {
        info!("Waiting for invocations on {}", self.base_url);
        loop {
            if let Err(e) = self.process_next().await {
                error!("Runtime API failure: {}", e);
                return Err(e);
            }
        }
    }

    /// Handle exactly one invocation and return its request id.
    pub async fn process_next(&self) -> Result<String> {
        let invocation = self.next_invocation().await?;
        debug!(
            request_id = %invocation.request_id,
            trace_id = invocation.trace_id.as_deref().unwrap_or("-"),
            "Received invocation"
        );

        let response = self.handler.handle(&invocation.event).await;
        self.send_response(&invocation.request_id, &response).await?;

        Ok(invocation.request_id)
    }

    pub async fn next_invocation(&self) -> Result<Invocation> {
        let response = self
            .client
            .get(format!("{}/invocation/next", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LexTranslateError::Runtime(format!(
                "next invocation failed ({}): {}",
                status, body
            )));
        }

        let request_id = header_value(&response, REQUEST_ID_HEADER).ok_or_else(|| {
            LexTranslateError::Runtime(format!("response has no {} header", REQUEST_ID_HEADER))
        })?;
        let trace_id = header_value(&response, TRACE_ID_HEADER);

        let body = response.bytes().await?;
        let event = match serde_json::from_slice(&body) {
            Ok(event) => event,
            Err(e) => {
                // The handler rejects non-object events, so this still gets a Lex answer.
                warn!("Invocation {} carried a non-JSON event: {}", request_id, e);
                Value::String(String::from_utf8_lossy(&body).into_owned())
            }
        };

        Ok(Invocation {
            request_id,
            trace_id,
            event,
        })
    }

    pub async fn send_response(&self, request_id: &str, response: &DialogResponse) -> Result<()> {
        let url = format!("{}/invocation/{}/response", self.base_url, request_id);
        let result = self.client.post(url).json(response).send().await?;

        let status = result.status();
        if !status.is_success() {
            let body = result.text().await.unwrap_or_default();
            return Err(LexTranslateError::Runtime(format!(
                "posting response for {} failed ({}): {}",
                request_id, status, body
            )));
        }

        debug!("Answered invocation {}", request_id);
        Ok(())
    }
}

/// Tell the runtime the function could not start.
pub async fn report_init_error(runtime_api: &str, message: &str) -> Result<()> {
    let error_type = "Runtime.InitError";
    let url = format!("{}/init/error", runtime_base_url(runtime_api));

    let response = Client::new()
        .post(url)
        .header(FUNCTION_ERROR_TYPE_HEADER, error_type)
        .json(&ErrorRequest {
            error_message: message,
            error_type,
        })
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(LexTranslateError::Runtime(format!(
            "reporting init error failed ({})",
            status
        )));
    }
    Ok(())
}

fn runtime_base_url(runtime_api: &str) -> String {
    format!("http://{}/{}/runtime", runtime_api, RUNTIME_API_VERSION)
}

fn header_value(response: &reqwest::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
