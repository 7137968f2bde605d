pub mod event;
pub mod response;

pub use event::TurnInput;
pub use response::{
    ContentType, DialogAction, DialogResponse, IntentResponse, IntentState, Message,
    SessionStateResponse, ERROR_PREFIX, INTENT_NAME,
};

use serde::{Deserialize, Serialize};

/// Slots of the translation intent that the bot may have to ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotName {
    Text,
    Language,
}

impl SlotName {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotName::Text => "text",
            SlotName::Language => "language",
        }
    }

    /// Question put to the user when the slot is still empty.
    pub fn prompt(&self) -> &'static str {
        match self {
            SlotName::Text => "Please input the text you want to translate",
            SlotName::Language => "In which language would you like to translate the text?",
        }
    }
}

impl std::fmt::Display for SlotName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
