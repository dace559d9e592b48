use serde_json::{Map, Value};

use crate::engine::error::TurnError;
use crate::model::turn::{AdventureTurn, CHOICE_COUNT};

/// Parse raw storyteller output into a turn.
///
/// Every required field is checked explicitly so a missing or mistyped
/// field becomes a `Validation` error instead of an empty value.
pub fn parse_turn(text: &str) -> Result<AdventureTurn, TurnError> {
    let value: Value =
        serde_json::from_str(text.trim()).map_err(|e| TurnError::Parse(e.to_string()))?;

    let Value::Object(fields) = value else {
        return Err(TurnError::Validation {
            field: "<root>",
            expected: "a JSON object",
        });
    };

    let choices = require_string_list(&fields, "choices")?;
    if choices.len() != CHOICE_COUNT {
        return Err(TurnError::Validation {
            field: "choices",
            expected: "an array of exactly three strings",
        });
    }

    Ok(AdventureTurn {
        story: require_string(&fields, "story")?,
        image_prompt: require_string(&fields, "imagePrompt")?,
        choices,
        inventory: require_string_list(&fields, "inventory")?,
        quest: require_string(&fields, "quest")?,
    })
}

fn require_string(fields: &Map<String, Value>, field: &'static str) -> Result<String, TurnError> {
    fields
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(TurnError::Validation {
            field,
            expected: "a string",
        })
}

fn require_string_list(
    fields: &Map<String, Value>,
    field: &'static str,
) -> Result<Vec<String>, TurnError> {
    let invalid = TurnError::Validation {
        field,
        expected: "an array of strings",
    };

    let Some(Value::Array(items)) = fields.get(field) else {
        return Err(invalid);
    };

    items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .ok_or(invalid)
}
