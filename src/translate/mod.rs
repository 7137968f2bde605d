pub mod amazon;
pub mod sigv4;

pub use amazon::AmazonTranslateClient;
pub use sigv4::Credentials;

use crate::config::Config;
use crate::error::Result;
use async_trait::async_trait;

/// One text to translate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub source_language_code: String,
    pub target_language_code: String,
}

impl TranslationRequest {
    pub fn new(
        text: impl Into<String>,
        source_language_code: impl Into<String>,
        target_language_code: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_language_code: source_language_code.into(),
            target_language_code: target_language_code.into(),
        }
    }
}

/// What the service returned. `translated_text` is optional because the service contract
/// does not guarantee it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationResponse {
    pub translated_text: Option<String>,
    pub source_language_code: Option<String>,
    pub target_language_code: Option<String>,
}

#[async_trait]
pub trait TranslationService: Send + Sync {
    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResponse>;
    fn name(&self) -> &'static str;
}

/// Build the translation service described by `config`.
pub fn create_translation_service(config: &Config) -> Result<Box<dyn TranslationService>> {
    let credentials = config.credentials()?;
    let mut client = AmazonTranslateClient::new(config.region.clone(), credentials);
    if let Some(ref endpoint) = config.endpoint {
        client = client.with_endpoint(endpoint.clone());
    }
    Ok(Box::new(client))
}
