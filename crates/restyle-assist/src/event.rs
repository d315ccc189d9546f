//! Decoding of server-sent event lines into text deltas.

use serde_json::Value;

/// One decoded event of an assist stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A fragment of the response text.
    Delta(String),
    /// The relay signalled the end of the response.
    Done,
}

/// Turns framed lines into [`StreamEvent`]s.
///
/// Only `data:` fields matter. `data: [DONE]` ends the stream; any other data
/// payload is parsed as JSON and the text is taken from the first of
/// `content`, `delta.content` or `choices[0].delta.content` that is a string.
/// Comments (`: keep-alive`), blank lines, `event:`/`id:`/`retry:` fields,
/// empty deltas and payloads that are not JSON yield nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct EventDecoder;

impl EventDecoder {
    pub fn new() -> Self {
        Self
    }

    pub fn decode(&self, line: &str) -> Option<StreamEvent> {
        let data = line.strip_prefix("data:")?;
        let data = data.strip_prefix(' ').unwrap_or(data).trim_end();
        if data == "[DONE]" {
            return Some(StreamEvent::Done);
        }
        if data.is_empty() {
            return None;
        }

        let payload: Value = match serde_json::from_str(data) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unparseable stream event");
                return None;
            }
        };
        let text = delta_text(&payload)?;
        (!text.is_empty()).then(|| StreamEvent::Delta(text.to_string()))
    }
}

fn delta_text(payload: &Value) -> Option<&str> {
    payload
        .get("content")
        .and_then(Value::as_str)
        .or_else(|| payload.pointer("/delta/content").and_then(Value::as_str))
        .or_else(|| {
            payload
                .pointer("/choices/0/delta/content")
                .and_then(Value::as_str)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(line: &str) -> Option<StreamEvent> {
        EventDecoder::new().decode(line)
    }

    fn delta(text: &str) -> Option<StreamEvent> {
        Some(StreamEvent::Delta(text.to_string()))
    }

    #[test]
    fn test_done_marker() {
        assert_eq!(decode("data: [DONE]"), Some(StreamEvent::Done));
        assert_eq!(decode("data:[DONE]"), Some(StreamEvent::Done));
    }

    #[test]
    fn test_payload_shapes() {
        assert_eq!(decode(r#"data: {"content":"flex"}"#), delta("flex"));
        assert_eq!(decode(r#"data: {"delta":{"content":" gap"}}"#), delta(" gap"));
        assert_eq!(
            decode(r#"data: {"choices":[{"delta":{"content":"-4"},"index":0}]}"#),
            delta("-4")
        );
    }

    #[test]
    fn test_whitespace_inside_delta_is_kept() {
        assert_eq!(decode(r#"data: {"content":"  "}"#), delta("  "));
    }

    #[test]
    fn test_ignored_lines() {
        for line in [
            "",
            ": keep-alive",
            "event: message",
            "id: 7",
            "retry: 1000",
            "data:",
            "data: not json",
            r#"data: {"role":"assistant"}"#,
            r#"data: {"choices":[{"delta":{}}]}"#,
            r#"data: {"content":""}"#,
            r#"data: {"content":12}"#,
        ] {
            assert_eq!(decode(line), None, "line {:?}", line);
        }
    }
}
