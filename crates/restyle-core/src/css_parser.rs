//! Parsing of user-authored inline CSS.
//!
//! The editor lets users type raw declarations (`color: red; padding: 4px 8px`)
//! that are layered over the generated inline styles. This module turns such a
//! declaration list into `(property, value)` pairs.
//!
//! The parser is built on `cssparser`, so comments, escapes, nested function
//! values and `!important` are handled the way a browser tokenizer would.
//! Values are kept as their source text; only the property name is normalized
//! to lowercase.
//!
//! Declarations are dropped when:
//!
//! - the property name is not a plain identifier (`color`, `--brand`)
//! - the value is empty
//! - the value smuggles script: `javascript:`, `expression(`, or a `data:` URL
//!
//! ```rust
//! use restyle_core::css_parser::parse_declarations;
//!
//! let decls = parse_declarations("COLOR: red; /* note */ background: url(javascript:alert(1)); margin: 0 auto");
//! assert_eq!(decls, vec![
//!     ("color".to_string(), "red".to_string()),
//!     ("margin".to_string(), "0 auto".to_string()),
//! ]);
//! ```

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser,
};

/// Parses a declaration list, skipping anything malformed or unsafe.
pub fn parse_declarations(css: &str) -> Vec<(String, String)> {
    if css.trim().is_empty() {
        return Vec::new();
    }

    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut decl_parser = InlineDeclarationParser;

    RuleBodyParser::new(&mut parser, &mut decl_parser)
        .flatten()
        .filter(|(name, value)| is_property_name(name) && is_safe_value(value))
        .collect()
}

fn is_property_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn is_safe_value(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '"' && *c != '\'')
        .collect::<String>()
        .to_ascii_lowercase();
    !compact.is_empty()
        && !compact.contains("javascript:")
        && !compact.contains("expression(")
        && !compact.contains("url(data:")
}

struct InlineDeclarationParser;

impl<'i> DeclarationParser<'i> for InlineDeclarationParser {
    type Declaration = (String, String);
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let start = input.position();
        while input.next_including_whitespace_and_comments().is_ok() {}
        let value = input.slice_from(start).trim().to_string();
        Ok((name.as_ref().to_ascii_lowercase(), value))
    }
}

impl<'i> AtRuleParser<'i> for InlineDeclarationParser {
    type Prelude = ();
    type AtRule = (String, String);
    type Error = ();
}

impl<'i> QualifiedRuleParser<'i> for InlineDeclarationParser {
    type Prelude = ();
    type QualifiedRule = (String, String);
    type Error = ();
}

impl<'i> RuleBodyItemParser<'i, (String, String), ()> for InlineDeclarationParser {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}
