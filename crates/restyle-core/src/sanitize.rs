//! Sanitization of generated markup and user-supplied class lists.
//!
//! Generators emit user content verbatim; these helpers are what a renderer
//! runs before the output reaches a live document.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::format::{delimiters_balanced, is_class_char};

static SCRIPT_ELEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<script\b[^>]*>|</script\s*>")
        .expect("valid script regex")
});

static EVENT_HANDLER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\s+on[a-z]+\s*=\s*("[^"]*"|'[^']*'|[^\s>]+)"#).expect("valid handler regex")
});

static UNSAFE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)\b(href|src|action|formaction|xlink:href)\s*=\s*("\s*(?:javascript|data|vbscript):[^"]*"|'\s*(?:javascript|data|vbscript):[^']*'|(?:javascript|data|vbscript):[^\s>]*)"#,
    )
    .expect("valid url regex")
});

/// Strips script elements, inline event handlers and script-capable URLs.
///
/// ```rust
/// use restyle_core::sanitize::sanitize_markup;
///
/// let dirty = r#"<a href="javascript:alert(1)" onclick="x()">hi<script>evil()</script></a>"#;
/// assert_eq!(sanitize_markup(dirty), r##"<a href="#">hi</a>"##);
/// ```
pub fn sanitize_markup(markup: &str) -> String {
    let without_scripts = SCRIPT_ELEMENT.replace_all(markup, "");
    let without_handlers = EVENT_HANDLER.replace_all(&without_scripts, "");
    UNSAFE_URL
        .replace_all(&without_handlers, "$1=\"#\"")
        .into_owned()
}

/// True if `token` only uses characters valid in a utility class.
///
/// Allowed: ASCII alphanumerics and `- _ : / . [ ] # % ( ) , ! + *`, with
/// brackets and parentheses properly paired.
pub fn is_valid_class_token(token: &str) -> bool {
    !token.is_empty()
        && token.len() <= 256
        && token.chars().all(is_class_char)
        && delimiters_balanced(token)
}

/// Keeps only the valid tokens of a whitespace-separated class list.
pub fn sanitize_classes(classes: &str) -> String {
    classes
        .split_whitespace()
        .filter(|t| is_valid_class_token(t))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_script_blocks() {
        assert_eq!(
            sanitize_markup("<div>a<SCRIPT type=\"x\">\nb()\n</script >c</div>"),
            "<div>ac</div>"
        );
        assert_eq!(sanitize_markup("<div><script src=x></div>"), "<div></div>");
    }

    #[test]
    fn test_strips_event_handlers() {
        assert_eq!(
            sanitize_markup("<img src=\"a.png\" onerror=alert(1) OnLoad='x'>"),
            "<img src=\"a.png\">"
        );
    }

    #[test]
    fn test_neutralizes_data_urls() {
        assert_eq!(
            sanitize_markup("<a href='data:text/html,hi'>x</a>"),
            "<a href=\"#\">x</a>"
        );
    }

    #[test]
    fn test_leaves_safe_markup_alone() {
        let markup = "<a href=\"https://example.com\"><div class=\"p-4\">Hello</div></a>";
        assert_eq!(sanitize_markup(markup), markup);
    }

    #[test]
    fn test_class_tokens() {
        assert!(is_valid_class_token("md:bg-[#ff0000]"));
        assert!(is_valid_class_token("w-1/2"));
        assert!(is_valid_class_token("!p-0"));
        assert!(!is_valid_class_token("a\"b"));
        assert!(!is_valid_class_token("<script>"));
        assert!(!is_valid_class_token(""));
        assert_eq!(sanitize_classes("flex  x<y  gap-2"), "flex gap-2");
    }

    #[test]
    fn test_unpaired_delimiters_rejected() {
        assert!(is_valid_class_token("[transform:rotateX(10deg)]"));
        assert!(is_valid_class_token("bg-[linear-gradient(90deg,#fff_0%,#000_100%)]"));
        for token in ["w-[10px", "p-4]", "][", "w-[calc(100%]", "w-[calc(1)]]", "[(])"] {
            assert!(!is_valid_class_token(token), "{}", token);
        }
        assert_eq!(sanitize_classes("w-[10px p-4] gap-2"), "gap-2");
    }
}
