use thiserror::Error;

#[derive(Error, Debug)]
pub enum LexTranslateError {
    #[error("Invalid event format")]
    InvalidEventFormat,

    #[error("Missing sessionState in event")]
    MissingSessionState,

    #[error("Input text is empty.")]
    EmptyInputText,

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Translation service error: {0}")]
    TranslationService(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),

    #[error("Runtime API error: {0}")]
    Runtime(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LexTranslateError>;
