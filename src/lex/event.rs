//! Extraction of the translation intent from a Lex V2 code hook event.
//!
//! Events arrive as loosely shaped JSON. Everything the decision logic needs is pulled out
//! here into [`TurnInput`], so that a missing slot is always `None` and only a malformed
//! envelope is an error. Empty values are passed through for the decision logic to judge.

use crate::error::{LexTranslateError, Result};
use crate::lex::SlotName;
use serde_json::{Map, Value};

/// Fields of one dialog turn, with every optional level already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnInput {
    /// Slots as received, echoed back to Lex on elicitation and fulfillment.
    pub slots: Value,
    pub text: Option<String>,
    pub language: Option<String>,
    pub session_id: Option<String>,
    pub invocation_source: Option<String>,
}

impl TurnInput {
    /// Validate the event envelope and pull out the slot values.
    pub fn extract(event: &Value) -> Result<Self> {
        let event = event
            .as_object()
            .ok_or(LexTranslateError::InvalidEventFormat)?;

        let session_state = match event.get("sessionState") {
            Some(Value::Object(state)) if !state.is_empty() => state,
            Some(other) if !is_blank(other) => return Err(LexTranslateError::InvalidEventFormat),
            _ => return Err(LexTranslateError::MissingSessionState),
        };

        let slots = session_state
            .get("intent")
            .and_then(|intent| intent.get("slots"))
            .filter(|slots| slots.is_object())
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()));

        Ok(Self {
            text: interpreted_value(&slots, SlotName::Text),
            language: interpreted_value(&slots, SlotName::Language),
            session_id: string_field(event.get("sessionId")),
            invocation_source: string_field(event.get("invocationSource")),
            slots,
        })
    }
}

/// `slots.<name>.value.interpretedValue`, or `None` if any level is missing or not a string.
fn interpreted_value(slots: &Value, slot: SlotName) -> Option<String> {
    slots
        .get(slot.as_str())?
        .get("value")?
        .get("interpretedValue")?
        .as_str()
        .map(str::to_string)
}

fn string_field(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

/// Null, false, zero and empty containers count as "not provided".
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
