//! String transforms applied to resource values on their way in and out.
//!
//! Each step is a pure function returning a new `String`; [`unescape_value`]
//! and [`escape_value`] compose them in the order Android expects:
//!
//! | write (store -> file)             | read (file -> store)               |
//! |-----------------------------------|------------------------------------|
//! | backslash-escape `'` and `"`      | decode character entities          |
//! | encode character entities         | drop backslashes before `'`, `"`   |
//! | canonical -> Android placeholders | Android -> canonical placeholders  |
//! | boundary spaces -> `\u0020`       | boundary `\u0020` -> spaces        |

use quick_xml::escape::{escape, unescape};

use crate::placeholder::{to_android_placeholders, to_canonical_placeholders};

/// Escape unit Android needs for spaces it would otherwise trim.
pub const SPACE_ESCAPE: &str = r"\u0020";

/// Full read-side pipeline for a literal (non-reference) resource value.
pub fn unescape_value(raw: &str) -> String {
    let value = decode_entities(raw);
    let value = unescape_quotes(&value);
    let value = to_canonical_placeholders(&value);
    expand_boundary_space_escapes(&value)
}

/// Full write-side pipeline for a value taken from the store.
pub fn escape_value(value: &str) -> String {
    let value = escape_quotes(value);
    let value = encode_entities(&value);
    let value = to_android_placeholders(&value);
    escape_boundary_spaces(&value)
}

/// Decodes character entities (`&amp;`, `&#39;`, `&#x41;`, ...).
///
/// Entities that do not resolve are copied through untouched.
pub fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let candidate = &rest[amp..];
        let decoded = candidate
            .find(';')
            .map(|semi| &candidate[..=semi])
            .filter(|entity| !entity[1..].contains(['&', ' ', '\t', '\n', '\r']))
            .and_then(|entity| unescape(entity).ok().map(|d| (entity.len(), d)));

        match decoded {
            Some((len, text)) => {
                out.push_str(&text);
                rest = &candidate[len..];
            }
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Encodes `&`, `<`, `>`, `'` and `"` as character entities.
pub fn encode_entities(value: &str) -> String {
    escape(value).into_owned()
}

/// `\'` -> `'` and `\"` -> `"`.
pub fn unescape_quotes(value: &str) -> String {
    value.replace("\\'", "'").replace("\\\"", "\"")
}

/// `'` -> `\'` and `"` -> `\"`.
pub fn escape_quotes(value: &str) -> String {
    value.replace('\'', "\\'").replace('"', "\\\"")
}

/// Replaces each leading and trailing space with one [`SPACE_ESCAPE`] unit.
///
/// Interior spaces are kept literal. A value made only of spaces is escaped
/// entirely.
pub fn escape_boundary_spaces(value: &str) -> String {
    let body = value.trim_start_matches(' ');
    let leading = value.len() - body.len();
    let core = body.trim_end_matches(' ');
    let trailing = body.len() - core.len();

    if leading == 0 && trailing == 0 {
        return value.to_string();
    }

    let mut out = String::with_capacity(core.len() + (leading + trailing) * SPACE_ESCAPE.len());
    out.push_str(&SPACE_ESCAPE.repeat(leading));
    out.push_str(core);
    out.push_str(&SPACE_ESCAPE.repeat(trailing));
    out
}

/// Turns runs of [`SPACE_ESCAPE`] at the very start or end of the value back
/// into literal spaces, one space per unit.
///
/// Units anywhere else in the value stay as written.
pub fn expand_boundary_space_escapes(value: &str) -> String {
    let mut body = value;
    let mut leading = 0usize;
    while let Some(rest) = body.strip_prefix(SPACE_ESCAPE) {
        body = rest;
        leading += 1;
    }
    let mut trailing = 0usize;
    while let Some(rest) = body.strip_suffix(SPACE_ESCAPE) {
        body = rest;
        trailing += 1;
    }

    if leading == 0 && trailing == 0 {
        return value.to_string();
    }

    let mut out = String::with_capacity(body.len() + leading + trailing);
    out.push_str(&" ".repeat(leading));
    out.push_str(body);
    out.push_str(&" ".repeat(trailing));
    out
}
