//! Placeholder conversion between Android and canonical substitution syntax.
//!
//! Android formats strings with Java-style `%s`; the canonical store keeps
//! Apple-style `%@`. Only string specifiers differ between the two, so the
//! conversion rewrites the conversion character and copies everything else,
//! including positional indices (`%1$s`) and widths (`%5s`), unchanged.
//!
//! - `%s`   <-> `%@`
//! - `%1$s` <-> `%1$@`
//! - `%d`, `%u`, `%f` and escaped `%%` are left alone.

/// Convert Android placeholders to the canonical syntax (`%s` -> `%@`).
pub fn to_canonical_placeholders(input: &str) -> String {
    rewrite_specifiers(input, b's', '@')
}

/// Convert canonical placeholders to the Android syntax (`%@` -> `%s`).
pub fn to_android_placeholders(input: &str) -> String {
    rewrite_specifiers(input, b'@', 's')
}

/// Rewrites every `%[0-9$]*{from}` specifier to end in `to` instead.
///
/// Only ASCII positions are inspected, so slicing between them always lands
/// on a char boundary and multi-byte text is copied through verbatim.
fn rewrite_specifiers(input: &str, from: u8, to: char) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut copied = 0usize;
    let mut i = 0usize;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        // Escaped percent
        if i + 1 < bytes.len() && bytes[i + 1] == b'%' {
            i += 2;
            continue;
        }

        // Optional positional index / width made of digits and '$'
        let mut j = i + 1;
        while j < bytes.len() && (bytes[j].is_ascii_digit() || bytes[j] == b'$') {
            j += 1;
        }

        if j < bytes.len() && bytes[j] == from {
            out.push_str(&input[copied..j]);
            out.push(to);
            i = j + 1;
            copied = i;
            continue;
        }

        i += 1;
    }

    out.push_str(&input[copied..]);
    out
}
