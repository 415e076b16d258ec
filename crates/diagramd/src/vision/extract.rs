//! Tolerant extraction of trio programs from a model response.
//!
//! The upstream API's response schema is not guaranteed, so the answer text
//! is located by an ordered chain of typed strategies; the first strategy
//! returning non-empty text wins. Models also wrap JSON in code fences
//! despite instructions not to, so a fenced retry precedes giving up.

use serde_json::Value;

use crate::schema::generate::TrioPrograms;

type Strategy = fn(&Value) -> Option<String>;

/// Strategies in priority order; the final one always yields something.
const STRATEGIES: &[Strategy] = &[
    chat_content_string,
    chat_content_parts,
    output_text_field,
    raw_response,
];

/// Locates the model's answer text inside a response of unknown shape.
pub fn response_text(response: &Value) -> String {
    STRATEGIES
        .iter()
        .filter_map(|strategy| strategy(response))
        .find(|text| !text.trim().is_empty())
        .unwrap_or_default()
}

/// `choices[0].message.content` as a plain string.
fn chat_content_string(response: &Value) -> Option<String> {
    response["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
}

/// `choices[0].message.content` as an array of content parts; text parts are
/// concatenated.
fn chat_content_parts(response: &Value) -> Option<String> {
    let parts = response["choices"][0]["message"]["content"].as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect();
    Some(text)
}

/// Top-level `output_text`, used by newer response shapes.
fn output_text_field(response: &Value) -> Option<String> {
    response["output_text"].as_str().map(str::to_string)
}

/// Last resort: the whole response serialized back to a string.
fn raw_response(response: &Value) -> Option<String> {
    Some(match response {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    })
}

/// Parses answer text into a complete program set.
///
/// Tries a direct JSON-object parse, retries after stripping code fences,
/// and otherwise treats the answer as an empty object. Returns `None` unless
/// all three fields are present and non-empty after trimming.
pub fn programs_from_text(text: &str) -> Option<TrioPrograms> {
    let object = parse_object(text)
        .or_else(|| parse_object(&strip_code_fences(text)))
        .unwrap_or_else(|| Value::Object(serde_json::Map::new()));

    Some(TrioPrograms {
        domain: program_field(&object, "domain")?,
        substance: program_field(&object, "substance")?,
        style: program_field(&object, "style")?,
    })
}

fn parse_object(text: &str) -> Option<Value> {
    serde_json::from_str::<Value>(text.trim())
        .ok()
        .filter(Value::is_object)
}

fn program_field(object: &Value, key: &str) -> Option<String> {
    let trimmed = object[key].as_str()?.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

/// Removes a leading fence line (``` with an optional language tag) and a
/// trailing line that is solely ```.
pub fn strip_code_fences(text: &str) -> String {
    let mut lines: Vec<&str> = text.trim().lines().collect();
    if lines.first().is_some_and(|line| is_opening_fence(line)) {
        lines.remove(0);
    }
    if lines.last().is_some_and(|line| line.trim() == "```") {
        lines.pop();
    }
    lines.join("\n")
}

fn is_opening_fence(line: &str) -> bool {
    let line = line.trim();
    line.strip_prefix("```")
        .is_some_and(|tag| tag.chars().all(|c| c.is_ascii_alphanumeric()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_content_wins_first() {
        let response = json!({
            "choices": [{ "message": { "content": "{\"a\": 1}" } }],
            "output_text": "ignored"
        });
        assert_eq!(response_text(&response), "{\"a\": 1}");
    }

    #[test]
    fn content_parts_are_concatenated() {
        let response = json!({
            "choices": [{ "message": { "content": [
                { "type": "text", "text": "{\"domain\":" },
                { "type": "text", "text": " \"t\"}" }
            ] } }]
        });
        assert_eq!(response_text(&response), "{\"domain\": \"t\"}");
    }

    #[test]
    fn output_text_is_a_fallback() {
        let response = json!({ "output_text": "hello" });
        assert_eq!(response_text(&response), "hello");
    }

    #[test]
    fn unknown_shape_falls_back_to_raw() {
        let response = json!({ "surprise": true });
        assert_eq!(response_text(&response), "{\"surprise\":true}");
    }

    #[test]
    fn fences_with_language_tag_are_stripped() {
        let fenced = "```json\n{\"domain\": \"d\"}\n```";
        assert_eq!(strip_code_fences(fenced), "{\"domain\": \"d\"}");
    }

    #[test]
    fn unfenced_text_is_untouched() {
        assert_eq!(strip_code_fences("{\"a\": 1}"), "{\"a\": 1}");
    }

    #[test]
    fn complete_object_parses_to_programs() {
        let programs = programs_from_text(
            "{\"domain\": \"type A\", \"substance\": \"A x\", \"style\": \"canvas {}\"}",
        )
        .unwrap();
        assert_eq!(programs.domain, "type A");
        assert_eq!(programs.substance, "A x");
        assert_eq!(programs.style, "canvas {}");
    }

    #[test]
    fn fenced_object_parses_after_sanitization() {
        let fenced = "```json\n{\"domain\": \"d\", \"substance\": \"s\", \"style\": \"y\"}\n```";
        assert!(programs_from_text(fenced).is_some());
    }

    #[test]
    fn missing_or_blank_field_is_rejected() {
        assert!(programs_from_text("{\"domain\": \"d\", \"substance\": \"s\"}").is_none());
        assert!(programs_from_text(
            "{\"domain\": \"d\", \"substance\": \"s\", \"style\": \"  \"}"
        )
        .is_none());
        assert!(programs_from_text("not json at all").is_none());
    }
}
