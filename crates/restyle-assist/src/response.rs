//! Interpretation of a completed assist response.

use serde_json::Value;

/// Fields the assistant proposes to change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suggestion {
    pub tailwind_classes: Option<String>,
    pub text_content: Option<String>,
}

impl Suggestion {
    pub fn is_empty(&self) -> bool {
        self.tailwind_classes.is_none() && self.text_content.is_none()
    }
}

/// What a completed response turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistOutcome {
    /// A JSON object carrying at least one applicable field.
    Suggestion(Suggestion),
    /// Anything else: shown to the user, never applied.
    Informational(String),
}

/// Parses the concatenated response text.
///
/// The text may be wrapped in a Markdown code fence. It becomes a
/// [`Suggestion`] only if it is a JSON object with a string `tailwindClasses`
/// or `textContent`; every other response is informational.
///
/// ```rust
/// use restyle_assist::{parse_suggestion, AssistOutcome};
///
/// let outcome = parse_suggestion("```json\n{\"tailwindClasses\": \"p-4 rounded-lg\"}\n```");
/// match outcome {
///     AssistOutcome::Suggestion(s) => {
///         assert_eq!(s.tailwind_classes.as_deref(), Some("p-4 rounded-lg"))
///     }
///     other => panic!("unexpected {:?}", other),
/// }
///
/// assert!(matches!(parse_suggestion("Try a softer shadow."), AssistOutcome::Informational(_)));
/// ```
pub fn parse_suggestion(text: &str) -> AssistOutcome {
    let body = strip_code_fence(text);
    let suggestion = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(fields)) => Suggestion {
            tailwind_classes: string_field(&fields, "tailwindClasses"),
            text_content: string_field(&fields, "textContent"),
        },
        _ => return AssistOutcome::Informational(text.trim().to_string()),
    };

    if suggestion.is_empty() {
        AssistOutcome::Informational(text.trim().to_string())
    } else {
        AssistOutcome::Suggestion(suggestion)
    }
}

fn string_field(fields: &serde_json::Map<String, Value>, name: &str) -> Option<String> {
    fields.get(name).and_then(Value::as_str).map(str::to_string)
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string (`json`) on the opening fence line.
    match body.find('\n') {
        Some(newline) => body[newline + 1..].trim(),
        None => body.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(classes: Option<&str>, text: Option<&str>) -> AssistOutcome {
        AssistOutcome::Suggestion(Suggestion {
            tailwind_classes: classes.map(str::to_string),
            text_content: text.map(str::to_string),
        })
    }

    #[test]
    fn test_plain_json_object() {
        assert_eq!(
            parse_suggestion(r#" {"tailwindClasses":"flex","textContent":"Hi"} "#),
            suggestion(Some("flex"), Some("Hi"))
        );
        assert_eq!(
            parse_suggestion(r#"{"textContent":"Only text"}"#),
            suggestion(None, Some("Only text"))
        );
    }

    #[test]
    fn test_fenced_json() {
        assert_eq!(
            parse_suggestion("```\n{\"tailwindClasses\":\"gap-2\"}\n```"),
            suggestion(Some("gap-2"), None)
        );
        assert_eq!(
            parse_suggestion("```json {\"tailwindClasses\":\"gap-2\"}```"),
            AssistOutcome::Informational("```json {\"tailwindClasses\":\"gap-2\"}```".into())
        );
    }

    #[test]
    fn test_non_suggestions_are_informational() {
        for text in [
            "Use more contrast.",
            "[1, 2]",
            r#"{"other": true}"#,
            r#"{"tailwindClasses": 5}"#,
            "{ broken",
            "",
        ] {
            assert!(
                matches!(parse_suggestion(text), AssistOutcome::Informational(_)),
                "{:?}",
                text
            );
        }
    }
}
