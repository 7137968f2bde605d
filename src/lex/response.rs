// Lex V2 code hook response format
use super::SlotName;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Intent name reported back to Lex on every response.
pub const INTENT_NAME: &str = "TranslationIntent";

/// Prefix of the message shown to the user when the turn fails.
pub const ERROR_PREFIX: &str = "Lambda execution error: ";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogResponse {
    pub session_state: SessionStateResponse,
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStateResponse {
    pub dialog_action: DialogAction,
    pub intent: IntentResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DialogAction {
    #[serde(rename_all = "camelCase")]
    ElicitSlot { slot_to_elicit: SlotName },
    Close,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentResponse {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slots: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<IntentState>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentState {
    Fulfilled,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub content_type: ContentType,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    PlainText,
}

impl Message {
    pub fn plain_text(content: impl Into<String>) -> Self {
        Self {
            content_type: ContentType::PlainText,
            content: content.into(),
        }
    }
}

impl DialogResponse {
    /// Ask Lex to prompt the user for `slot`, keeping whatever slots are already filled.
    pub fn elicit_slot(slot: SlotName, slots: Value) -> Self {
        Self {
            session_state: SessionStateResponse {
                dialog_action: DialogAction::ElicitSlot {
                    slot_to_elicit: slot,
                },
                intent: IntentResponse {
                    name: INTENT_NAME.to_string(),
                    slots: Some(slots),
                    state: None,
                },
            },
            messages: vec![Message::plain_text(slot.prompt())],
        }
    }

    /// Close the intent as fulfilled with `content` as the bot's answer.
    pub fn fulfilled(slots: Value, content: impl Into<String>) -> Self {
        Self {
            session_state: SessionStateResponse {
                dialog_action: DialogAction::Close,
                intent: IntentResponse {
                    name: INTENT_NAME.to_string(),
                    slots: Some(slots),
                    state: Some(IntentState::Fulfilled),
                },
            },
            messages: vec![Message::plain_text(content)],
        }
    }

    /// Close the intent as failed. Slots are not echoed.
    pub fn failed(detail: &str) -> Self {
        Self {
            session_state: SessionStateResponse {
                dialog_action: DialogAction::Close,
                intent: IntentResponse {
                    name: INTENT_NAME.to_string(),
                    slots: None,
                    state: Some(IntentState::Failed),
                },
            },
            messages: vec![Message::plain_text(format!("{}{}", ERROR_PREFIX, detail))],
        }
    }

    /// Content of the first message, if any.
    pub fn content(&self) -> Option<&str> {
        self.messages.first().map(|m| m.content.as_str())
    }
}
