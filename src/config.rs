use crate::error::{LexTranslateError, Result};
use crate::translate::Credentials;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Region used when neither the config file nor the environment names one.
pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub region: String,
    /// Overrides the regional Amazon Translate endpoint.
    pub endpoint: Option<String>,
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub aws_session_token: Option<String>,
    /// `host:port` of the Lambda Runtime API; only set inside Lambda.
    pub runtime_api: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            endpoint: None,
            aws_access_key_id: None,
            aws_secret_access_key: None,
            aws_session_token: None,
            runtime_api: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_file_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok());

        Ok(config)
    }

    /// Read a TOML config file. A file that does not parse is ignored.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        match toml::from_str::<Config>(&contents) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!("Ignoring unreadable config file {}: {}", path.display(), e);
                Ok(Self::default())
            }
        }
    }

    /// Override fields from environment variables, as resolved by `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(region) = get("AWS_REGION").or_else(|| get("AWS_DEFAULT_REGION")) {
            self.region = region;
        }
        if let Some(endpoint) = get("LEX_TRANSLATE_ENDPOINT") {
            self.endpoint = Some(endpoint);
        }
        if let Some(key) = get("AWS_ACCESS_KEY_ID") {
            self.aws_access_key_id = Some(key);
        }
        if let Some(secret) = get("AWS_SECRET_ACCESS_KEY") {
            self.aws_secret_access_key = Some(secret);
        }
        if let Some(token) = get("AWS_SESSION_TOKEN") {
            self.aws_session_token = Some(token);
        }
        if let Some(api) = get("AWS_LAMBDA_RUNTIME_API") {
            self.runtime_api = Some(api);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.region.trim().is_empty() {
            return Err(LexTranslateError::Config(
                "AWS region not set. Export it with: export AWS_REGION=us-east-1".to_string(),
            ));
        }

        self.credentials()?;

        Ok(())
    }

    /// Credentials for signing Amazon Translate requests.
    pub fn credentials(&self) -> Result<Credentials> {
        match (&self.aws_access_key_id, &self.aws_secret_access_key) {
            (Some(access_key_id), Some(secret_access_key)) => Ok(Credentials {
                access_key_id: access_key_id.clone(),
                secret_access_key: secret_access_key.clone(),
                session_token: self.aws_session_token.clone(),
            }),
            _ => Err(LexTranslateError::Config(
                "AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY must both be set".to_string(),
            )),
        }
    }

    /// Whether the process runs inside the Lambda execution environment.
    pub fn in_lambda(&self) -> bool {
        self.runtime_api.is_some()
    }

    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lex-translate").join("config.toml"))
    }
}
