pub mod config;
pub mod error;
pub mod handler;
pub mod language;
pub mod lex;
pub mod runtime;
pub mod translate;

pub use config::Config;
pub use error::{LexTranslateError, Result};
pub use handler::{decide, DialogOutcome, DialogTranslationHandler, NextStep};
pub use language::TargetLanguage;
pub use lex::{DialogResponse, SlotName, TurnInput};
pub use runtime::LambdaRuntime;
