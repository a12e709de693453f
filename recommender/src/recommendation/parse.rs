use serde_json::{Map, Value};

use crate::error::{RecommenderError, Result};

/// Parse model output into a JSON object.
///
/// When the text is not valid JSON, the span from the first `{` to the last
/// `}` is parsed instead, which recovers objects wrapped in prose or code
/// fences. If that also fails, the recovery error is reported; if there is
/// no such span, the original error is.
pub fn parse_json_object(text: &str) -> Result<Map<String, Value>> {
    let value = match serde_json::from_str::<Value>(text) {
        Ok(value) => value,
        Err(original) => {
            let span = text
                .find('{')
                .zip(text.rfind('}'))
                .filter(|(start, end)| end > start);

            let Some((start, end)) = span else {
                return Err(RecommenderError::Parse(original.to_string()));
            };

            tracing::debug!(
                start,
                end,
                text_len = text.len(),
                "Direct JSON parse failed, retrying on brace-delimited span"
            );

            serde_json::from_str::<Value>(&text[start..=end])
                .map_err(|e| RecommenderError::Parse(e.to_string()))?
        }
    };

    match value {
        Value::Object(map) => Ok(map),
        other => Err(RecommenderError::Parse(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
