//! Markup generation.
//!
//! User content is emitted verbatim. Run the result through
//! [`sanitize_markup`](crate::sanitize::sanitize_markup) before injecting it
//! into a live document.

use crate::state::{StyleState, Tag};

/// Builds `<tag id=".." class="classes" style="..">text</tag>`.
///
/// `id`, `class` and `style` are only written when non-empty; `style` carries
/// the user's raw `inlineCss`. A non-empty `link` wraps the element in an
/// anchor, or becomes the element's own `href` when the tag already is `a`.
pub fn generate_markup(state: &StyleState, classes: &str) -> String {
    let tag = state.tag.as_str();
    let link = state.link.trim();
    let mut attrs = String::new();

    if state.tag == Tag::A && !link.is_empty() {
        push_attr(&mut attrs, "href", link);
    }
    push_attr(&mut attrs, "id", state.element_id.trim());
    push_attr(&mut attrs, "class", classes.trim());
    push_attr(&mut attrs, "style", state.inline_css.trim());

    let element = format!("<{tag}{attrs}>{}</{tag}>", state.text_content);
    if link.is_empty() || state.tag == Tag::A {
        element
    } else {
        format!("<a href=\"{}\">{}</a>", link, element)
    }
}

fn push_attr(attrs: &mut String, name: &str, value: &str) {
    if !value.is_empty() {
        attrs.push_str(&format!(" {}=\"{}\"", name, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_element() {
        let state = StyleState::default();
        assert_eq!(
            generate_markup(&state, "p-4 text-[16px]"),
            "<div class=\"p-4 text-[16px]\">Edit me</div>"
        );
    }

    #[test]
    fn test_empty_classes_omit_attribute() {
        let mut state = StyleState::default();
        state.tag = Tag::Span;
        state.text_content = String::new();
        assert_eq!(generate_markup(&state, ""), "<span></span>");
    }

    #[test]
    fn test_link_wraps_element() {
        let mut state = StyleState::default();
        state.tag = Tag::H2;
        state.link = "https://example.com".into();
        state.element_id = "title".into();
        assert_eq!(
            generate_markup(&state, "font-serif"),
            "<a href=\"https://example.com\"><h2 id=\"title\" class=\"font-serif\">Edit me</h2></a>"
        );
    }

    #[test]
    fn test_anchor_tag_takes_href_directly() {
        let mut state = StyleState::default();
        state.tag = Tag::A;
        state.link = "/docs".into();
        state.inline_css = "color: red".into();
        assert_eq!(
            generate_markup(&state, "underline"),
            "<a href=\"/docs\" class=\"underline\" style=\"color: red\">Edit me</a>"
        );
    }

    #[test]
    fn test_user_content_is_verbatim() {
        let mut state = StyleState::default();
        state.text_content = "<b>bold</b>".into();
        assert!(generate_markup(&state, "").contains("<b>bold</b>"));
    }
}
