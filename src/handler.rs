//! Single-turn dialog handler for the translation intent.
//!
//! [`decide`] picks the next dialog step from an extracted [`TurnInput`] without touching
//! the network. [`DialogTranslationHandler::fulfill`] runs that decision and, when the turn
//! is complete, calls the translation service. [`DialogTranslationHandler::handle`] is the
//! boundary that turns every outcome, error, or panic into a [`DialogResponse`].

use crate::error::{LexTranslateError, Result};
use crate::language::{TargetLanguage, AUTO_DETECT_SOURCE};
use crate::lex::{DialogResponse, SlotName, TurnInput};
use crate::translate::{TranslationRequest, TranslationService};
use futures::FutureExt;
use serde_json::Value;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Returned to the user when the service answers without a translated text.
pub const TRANSLATION_FAILED_FALLBACK: &str = "Translation failed";

/// What the dialog should do next, before any external call is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextStep<'a> {
    Elicit(SlotName),
    Translate {
        text: &'a str,
        language: TargetLanguage,
    },
}

/// Decide the next step. The order of checks is part of the bot's contract: the language is
/// asked for before the text, and input is validated only once both are present.
pub fn decide(input: &TurnInput) -> Result<NextStep<'_>> {
    let Some(language) = input.language.as_deref().filter(|l| !l.is_empty()) else {
        return Ok(NextStep::Elicit(SlotName::Language));
    };

    let Some(text) = input.text.as_deref().filter(|t| !t.is_empty()) else {
        return Ok(NextStep::Elicit(SlotName::Text));
    };

    if text.trim().is_empty() {
        return Err(LexTranslateError::EmptyInputText);
    }

    let language = TargetLanguage::from_name(language)
        .ok_or_else(|| LexTranslateError::UnsupportedLanguage(language.to_string()))?;

    Ok(NextStep::Translate { text, language })
}

/// Successful result of a turn.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogOutcome {
    Elicit { slot: SlotName, slots: Value },
    Fulfilled { slots: Value, translated_text: String },
}

impl DialogOutcome {
    pub fn into_response(self) -> DialogResponse {
        match self {
            DialogOutcome::Elicit { slot, slots } => DialogResponse::elicit_slot(slot, slots),
            DialogOutcome::Fulfilled {
                slots,
                translated_text,
            } => DialogResponse::fulfilled(slots, translated_text),
        }
    }
}

/// Answers Lex code hook invocations for the translation intent.
#[derive(Clone)]
pub struct DialogTranslationHandler {
    translator: Arc<dyn TranslationService>,
}

impl DialogTranslationHandler {
    pub fn new(translator: Box<dyn TranslationService>) -> Self {
        Self {
            translator: Arc::from(translator),
        }
    }

    pub fn from_arc(translator: Arc<dyn TranslationService>) -> Self {
        Self { translator }
    }

    /// Handle one event. Never fails: errors become a `Failed` response.
    pub async fn handle(&self, event: &Value) -> DialogResponse {
        let result = AssertUnwindSafe(self.fulfill(event))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(LexTranslateError::Unexpected(panic_message(&*panic))));

        match result {
            Ok(outcome) => outcome.into_response(),
            Err(e) => {
                let response = DialogResponse::failed(&e.to_string());
                error!("{}", response.content().unwrap_or_default());
                response
            }
        }
    }

    /// Run the decision and, if the turn is complete, the translation.
    pub async fn fulfill(&self, event: &Value) -> Result<DialogOutcome> {
        let input = TurnInput::extract(event)?;
        debug!(
            session_id = input.session_id.as_deref().unwrap_or("-"),
            invocation_source = input.invocation_source.as_deref().unwrap_or("-"),
            has_text = input.text.is_some(),
            language = input.language.as_deref().unwrap_or("-"),
            "Handling translation turn"
        );

        match decide(&input)? {
            NextStep::Elicit(slot) => {
                debug!("Eliciting slot {}", slot);
                Ok(DialogOutcome::Elicit {
                    slot,
                    slots: input.slots.clone(),
                })
            }
            NextStep::Translate { text, language } => {
                let request = TranslationRequest::new(text, AUTO_DETECT_SOURCE, language.code());
                let response = self.translator.translate(&request).await?;

                let translated_text = response.translated_text.unwrap_or_else(|| {
                    warn!(
                        "{} returned no translated text for {}",
                        self.translator.name(),
                        language
                    );
                    TRANSLATION_FAILED_FALLBACK.to_string()
                });

                Ok(DialogOutcome::Fulfilled {
                    slots: input.slots.clone(),
                    translated_text,
                })
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}
