//! Value formatting shared by the generators.

/// Formats a number in shortest round-trip form (`10`, `0.5`, `1.1`).
///
/// Non-finite values render as `0` and negative zero loses its sign, so the
/// result is always a valid CSS number.
pub(crate) fn fmt_num(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

/// Normalizes a string-encoded dimension.
///
/// Empty values and the `auto` sentinel are unset. Bare numbers gain a `px`
/// unit; anything else (`50%`, `2rem`, `calc(...)`) passes through trimmed.
pub(crate) fn length(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value == "auto" {
        return None;
    }
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(format!("{}px", fmt_num(n))),
        Ok(_) => None,
        Err(_) => Some(value.to_string()),
    }
}

/// A trimmed, non-empty string value.
pub(crate) fn plain(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Encodes a CSS value for use inside a `[...]` utility token.
///
/// Only characters accepted by [`is_class_char`] survive, separators after
/// commas are dropped and remaining whitespace becomes `_`. Parentheses are
/// dropped altogether when they do not pair up. Returns `None` if nothing
/// survives.
pub(crate) fn arbitrary(value: &str) -> Option<String> {
    let mut out = String::with_capacity(value.len());
    let mut pending_space = false;
    for ch in value.trim().chars() {
        match ch {
            c if c.is_whitespace() => pending_space = true,
            '[' | ']' => {}
            c if !is_class_char(c) => {}
            c => {
                if pending_space && !out.is_empty() && !out.ends_with(',') {
                    out.push('_');
                }
                pending_space = false;
                out.push(c);
            }
        }
    }
    if !delimiters_balanced(&out) {
        out.retain(|c| c != '(' && c != ')');
    }
    (!out.is_empty()).then_some(out)
}

/// True if every `[` and `(` is closed, in order, by its matching delimiter.
pub(crate) fn delimiters_balanced(token: &str) -> bool {
    let mut open = Vec::new();
    for c in token.chars() {
        match c {
            '[' | '(' => open.push(c),
            ']' if open.pop() != Some('[') => return false,
            ')' if open.pop() != Some('(') => return false,
            _ => {}
        }
    }
    open.is_empty()
}

/// Characters allowed inside a utility class token.
pub(crate) fn is_class_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '-' | '_' | ':' | '/' | '.' | '[' | ']' | '#' | '%' | '(' | ')' | ',' | '!' | '+' | '*'
        )
}

/// True if a string-encoded dimension is unset or numerically zero.
pub(crate) fn is_zero_width(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.parse::<f64>().map(|n| n == 0.0).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(10.0), "10");
        assert_eq!(fmt_num(0.5), "0.5");
        assert_eq!(fmt_num(110.0 / 100.0), "1.1");
        assert_eq!(fmt_num(-0.0), "0");
        assert_eq!(fmt_num(-12.5), "-12.5");
        assert_eq!(fmt_num(f64::NAN), "0");
        assert_eq!(fmt_num(f64::INFINITY), "0");
    }

    #[test]
    fn test_length() {
        assert_eq!(length("16").as_deref(), Some("16px"));
        assert_eq!(length(" 2.5 ").as_deref(), Some("2.5px"));
        assert_eq!(length("50%").as_deref(), Some("50%"));
        assert_eq!(length("auto"), None);
        assert_eq!(length(""), None);
        assert_eq!(length("inf"), None);
    }

    #[test]
    fn test_arbitrary() {
        assert_eq!(arbitrary("Open Sans").as_deref(), Some("Open_Sans"));
        assert_eq!(
            arbitrary("linear-gradient(90deg, #f00 0%, #00f 100%)").as_deref(),
            Some("linear-gradient(90deg,#f00_0%,#00f_100%)")
        );
        assert_eq!(arbitrary("a]b[c").as_deref(), Some("abc"));
        assert_eq!(arbitrary("  "), None);
        assert_eq!(arbitrary("\"]"), None);
        assert_eq!(arbitrary("calc(100% - 2rem)").as_deref(), Some("calc(100%_-_2rem)"));
        assert_eq!(arbitrary("été;").as_deref(), Some("t"));
    }

    #[test]
    fn test_is_zero_width() {
        assert!(is_zero_width("0"));
        assert!(is_zero_width(""));
        assert!(is_zero_width("0.0"));
        assert!(!is_zero_width("2"));
        assert!(!is_zero_width("thin"));
    }
}
