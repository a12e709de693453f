use serde_json::Value;

/// Top-level keys some hosting layers use for the generated text, in
/// lookup order.
pub const FALLBACK_TEXT_KEYS: [&str; 4] = ["outputText", "completion", "generation", "text"];

/// Pull the model-generated text out of a raw response payload.
///
/// Anthropic-style `content` blocks win: every `{"type": "text", "text": ..}`
/// entry is concatenated in order and trimmed. Otherwise the first
/// non-blank string under one of [`FALLBACK_TEXT_KEYS`] is returned, trimmed.
/// Returns an empty string when nothing usable is present.
pub fn extract_text(response: &Value) -> String {
    if let Some(blocks) = response.get("content").and_then(Value::as_array) {
        let chunks: Vec<&str> = blocks
            .iter()
            .filter(|block| block.get("type").and_then(Value::as_str) == Some("text"))
            .filter_map(|block| block.get("text").and_then(Value::as_str))
            .collect();

        if !chunks.is_empty() {
            return chunks.concat().trim().to_string();
        }
    }

    FALLBACK_TEXT_KEYS
        .iter()
        .filter_map(|key| response.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|text| !text.is_empty())
        .unwrap_or_default()
        .to_string()
}
