//! A small scanner over the subset of `strings.xml` markup the adapter
//! understands: comments and `<string>`/`<color>` elements with a `name`
//! attribute and literal text content. Everything else is reported as
//! opaque [`Token::Markup`].

use lazy_static::lazy_static;
use regex::Regex;

use crate::store::ResourceKind;

lazy_static! {
    static ref OPEN_TAG_REGEX: Regex =
        Regex::new(r#"^<(string|color)\s(?:[^>]*\s)?name="([A-Za-z0-9_]+)"[^>]*>$"#).unwrap();
}

const ROOT_OPEN: &str = "<resources";
const ROOT_CLOSE: &str = "</resources>";

/// One lexical unit of the `<resources>` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// `<!-- text -->`, with surrounding whitespace trimmed from `text`.
    Comment(&'a str),
    /// A recognized element with literal content.
    Entry {
        kind: ResourceKind,
        key: &'a str,
        raw_value: &'a str,
    },
    /// Any other tag, including elements with nested markup.
    Markup,
}

/// Returns the content between the first `<resources ...>` open tag and the
/// last `</resources>` close tag.
pub fn resources_block(text: &str) -> Option<&str> {
    let open = text.find(ROOT_OPEN)?;
    let attrs_start = open + ROOT_OPEN.len();
    let body_start = attrs_start + text[attrs_start..].find('>')? + 1;
    let close = text.rfind(ROOT_CLOSE)?;
    (close >= body_start).then(|| &text[body_start..close])
}

/// Replaces every carriage return or line feed, together with the
/// whitespace run following it, by a single space.
pub fn collapse_line_breaks(block: &str) -> String {
    let mut out = String::with_capacity(block.len());
    let mut chars = block.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' || c == '\n' {
            while chars.next_if(char::is_ascii_whitespace).is_some() {}
            out.push(' ');
        } else {
            out.push(c);
        }
    }
    out
}

/// Splits a (collapsed) `<resources>` body into tokens, in document order.
///
/// Text outside of recognized elements is skipped. An unterminated comment
/// or tag ends the scan.
pub fn tokenize(block: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = block;

    while let Some(lt) = rest.find('<') {
        let tail = &rest[lt..];

        if let Some(body) = tail.strip_prefix("<!--") {
            let Some(end) = body.find("-->") else { break };
            tokens.push(Token::Comment(body[..end].trim()));
            rest = &body[end + 3..];
            continue;
        }

        let Some(gt) = tail.find('>') else { break };
        let tag = &tail[..=gt];
        let after = &tail[gt + 1..];

        if let Some((kind, key)) = parse_open_tag(tag) {
            if let Some((raw_value, remainder)) = literal_content(after, kind) {
                tokens.push(Token::Entry {
                    kind,
                    key,
                    raw_value,
                });
                rest = remainder;
                continue;
            }
        }

        tokens.push(Token::Markup);
        rest = after;
    }

    tokens
}

fn parse_open_tag(tag: &str) -> Option<(ResourceKind, &str)> {
    if tag.ends_with("/>") {
        return None;
    }
    let caps = OPEN_TAG_REGEX.captures(tag)?;
    let kind = match caps.get(1)?.as_str() {
        "color" => ResourceKind::Color,
        _ => ResourceKind::String,
    };
    Some((kind, caps.get(2)?.as_str()))
}

/// Content up to the next `<`, provided that `<` opens the matching close tag.
fn literal_content(after: &str, kind: ResourceKind) -> Option<(&str, &str)> {
    let lt = after.find('<')?;
    let remainder = after[lt..]
        .strip_prefix("</")?
        .strip_prefix(kind.tag_name())?
        .strip_prefix('>')?;
    Some((&after[..lt], remainder))
}
