//! Support for Android `strings.xml` resource files.
//!
//! Only `<string>` and `<color>` elements with a `name` attribute and literal
//! content are understood; plurals, arrays and elements with nested markup
//! are skipped silently. Reading never fails on content, only on I/O.

use std::{
    fs::File,
    io::{BufRead, Read, Write},
    path::Path,
};

use lazy_static::lazy_static;
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use regex::Regex;

use crate::{
    error::Error,
    escape::{escape_value, unescape_value},
    formats::{Formatter, WriteOptions},
    language::{can_handle_directory, default_fallback_language, resolve_language},
    store::{Row, StringsStore},
    tokenizer::{Token, collapse_line_breaks, resources_block, tokenize},
};

pub const FORMAT_NAME: &str = "android";
pub const EXTENSION: &str = ".xml";
pub const DEFAULT_FILE_NAME: &str = "strings.xml";

/// Comments starting with this marker delimit sections and are never
/// attached to a key.
pub const SECTION_MARKER: &str = "SECTION:";

lazy_static! {
    static ref REFERENCE_REGEX: Regex =
        Regex::new(r"^@[A-Za-z0-9_]+/([A-Za-z0-9_]+)$").unwrap();
}

/// The Android `strings.xml` adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct AndroidStrings;

impl Formatter for AndroidStrings {
    fn format_name(&self) -> &'static str {
        FORMAT_NAME
    }

    fn extension(&self) -> &'static str {
        EXTENSION
    }

    fn default_file_name(&self) -> &'static str {
        DEFAULT_FILE_NAME
    }

    fn can_handle_directory(&self, dir: &Path) -> bool {
        can_handle_directory(dir).unwrap_or(false)
    }

    fn determine_language_given_path(&self, path: &Path, store: &StringsStore) -> Option<String> {
        resolve_language(path, store.primary_language())
    }

    fn read_from_reader<R: BufRead>(
        &self,
        mut reader: R,
        lang: &str,
        store: &mut StringsStore,
    ) -> Result<(), Error> {
        let mut content = String::new();
        reader.read_to_string(&mut content).map_err(Error::Io)?;
        read_content(&content, lang, store);
        Ok(())
    }

    fn write_to_writer<W: Write>(
        &self,
        writer: W,
        lang: &str,
        store: &StringsStore,
        options: &WriteOptions,
    ) -> Result<(), Error> {
        let fallback = default_fallback_language(lang);
        let mut xml = Writer::new(writer);

        xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        write_raw(&mut xml, "\n")?;
        write_comment(&mut xml, "Android Strings File")?;
        write_raw(&mut xml, "\n")?;
        write_comment(
            &mut xml,
            &format!("Generated by droidl10n {}", env!("CARGO_PKG_VERSION")),
        )?;
        write_raw(&mut xml, "\n")?;
        write_comment(&mut xml, &format!("Language: {lang}"))?;
        write_raw(&mut xml, "\n")?;
        xml.write_event(Event::Start(BytesStart::new("resources")))?;

        for section in &store.sections {
            let mut printed_section = false;
            for row in &section.rows {
                if !row.matches_tags(&options.tags, options.include_untagged) {
                    continue;
                }

                if !printed_section {
                    write_raw(&mut xml, "\n")?;
                    if !section.name.is_empty() {
                        write_raw(&mut xml, "\t")?;
                        write_comment(
                            &mut xml,
                            &format!("{SECTION_MARKER} {}", sanitize_comment(&section.name)),
                        )?;
                        write_raw(&mut xml, "\n")?;
                    }
                    printed_section = true;
                }

                let Some(value) = value_for_row(row, lang, fallback, store, options) else {
                    tracing::trace!(key = %row.key, lang, "no translation, leaving to Android");
                    continue;
                };

                if let Some(comment) = row.comment.as_deref().map(sanitize_comment) {
                    if !comment.is_empty() {
                        write_raw(&mut xml, "\t")?;
                        write_comment(&mut xml, &comment)?;
                        write_raw(&mut xml, "\n")?;
                    }
                }

                let tag = row.kind.tag_name();
                let mut start = BytesStart::new(tag);
                start.push_attribute(("name", row.key.as_str()));

                write_raw(&mut xml, "\t")?;
                xml.write_event(Event::Start(start))?;
                xml.write_event(Event::Text(BytesText::from_escaped(escape_value(value))))?;
                xml.write_event(Event::End(BytesEnd::new(tag)))?;
                write_raw(&mut xml, "\n")?;
            }
        }

        xml.write_event(Event::End(BytesEnd::new("resources")))?;
        write_raw(&mut xml, "\n")?;
        Ok(())
    }

    /// Override default file reading to decode a byte-order mark if present.
    fn read_file<P: AsRef<Path>>(
        &self,
        path: P,
        lang: &str,
        store: &mut StringsStore,
    ) -> Result<(), Error> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), lang, "reading Android strings file");

        let file = File::open(path).map_err(Error::Io)?;
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);

        let mut content = String::new();
        decoder.read_to_string(&mut content).map_err(Error::Io)?;
        read_content(&content, lang, store);
        Ok(())
    }
}

/// Applies every recognized entry of a `strings.xml` document to the store.
///
/// References such as `@string/other` are resolved against what the store
/// holds for `lang` at the moment the entry is read. A reference to a key
/// that only appears later (in this file or another) resolves to `""`.
pub fn read_content(content: &str, lang: &str, store: &mut StringsStore) {
    let Some(block) = resources_block(content) else {
        tracing::debug!(lang, "no <resources> block, nothing to read");
        return;
    };
    let block = collapse_line_breaks(block);

    let mut comment: Option<&str> = None;
    for token in tokenize(&block) {
        match token {
            Token::Comment(text) => comment = Some(text),
            Token::Markup => comment = None,
            Token::Entry {
                kind,
                key,
                raw_value,
            } => {
                let value = match reference_target(raw_value) {
                    Some(target) => {
                        let resolved = store.translation(target, lang).unwrap_or_default();
                        tracing::trace!(key, target, resolved, "resolved reference");
                        resolved.to_string()
                    }
                    None => unescape_value(raw_value),
                };

                store.set_translation(key, lang, value);
                store.set_kind(key, kind);

                if let Some(text) = comment.take() {
                    if !text.is_empty() && !text.starts_with(SECTION_MARKER) {
                        store.set_comment(key, text);
                    }
                }
            }
        }
    }
}

/// The key a value points at when it is exactly `@type/key`.
fn reference_target(raw_value: &str) -> Option<&str> {
    REFERENCE_REGEX
        .captures(raw_value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn value_for_row<'a>(
    row: &'a Row,
    lang: &str,
    fallback: Option<&str>,
    store: &StringsStore,
    options: &WriteOptions,
) -> Option<&'a str> {
    row.translated_string_for_lang(lang, fallback).or_else(|| {
        if options.include_untranslated {
            store
                .primary_language()
                .and_then(|primary| row.translated_string_for_lang(primary, None))
        } else {
            None
        }
    })
}

/// `--` would end a comment early, so it becomes an em dash.
fn sanitize_comment(text: &str) -> String {
    text.replace("--", "—")
}

fn write_comment<W: Write>(xml: &mut Writer<W>, text: &str) -> Result<(), Error> {
    xml.write_event(Event::Comment(BytesText::from_escaped(format!(" {text} "))))?;
    Ok(())
}

fn write_raw<W: Write>(xml: &mut Writer<W>, text: &str) -> Result<(), Error> {
    xml.write_event(Event::Text(BytesText::from_escaped(text)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ResourceKind, Section};
    use indoc::indoc;

    fn read(xml: &str, lang: &str, store: &mut StringsStore) {
        AndroidStrings.read_from_str(xml, lang, store).unwrap();
    }

    fn write(lang: &str, store: &StringsStore, options: &WriteOptions) -> String {
        AndroidStrings.write_to_string(lang, store, options).unwrap()
    }

    #[test]
    fn test_read_decodes_entities() {
        let mut store = StringsStore::new(["en"]);
        read(
            r#"<resources><string name="greeting">Hello &amp; welcome</string></resources>"#,
            "en",
            &mut store,
        );
        assert_eq!(store.translation("greeting", "en"), Some("Hello & welcome"));
    }

    #[test]
    fn test_read_without_resources_is_noop() {
        let mut store = StringsStore::new(["en"]);
        read(r#"<string name="a">A</string>"#, "en", &mut store);
        read("", "en", &mut store);
        assert!(store.sections.is_empty());
    }

    #[test]
    fn test_read_collapses_multiline_values() {
        let mut store = StringsStore::new(["en"]);
        read(
            indoc! {r#"
                <resources>
                    <string name="long">First line
                        second line</string>
                </resources>
            "#},
            "en",
            &mut store,
        );
        assert_eq!(store.translation("long", "en"), Some("First line second line"));
    }

    #[test]
    fn test_read_unescapes_quotes_placeholders_and_spaces() {
        let mut store = StringsStore::new(["en"]);
        read(
            r#"<resources><string name="a"> Don\'t say \"%1$s\"  </string></resources>"#,
            "en",
            &mut store,
        );
        assert_eq!(store.translation("a", "en"), Some(" Don't say \"%1$@\"  "));
    }

    #[test]
    fn test_read_missing_reference_is_empty() {
        let mut store = StringsStore::new(["en"]);
        read(
            r#"<resources><string name="a">@string/missing</string></resources>"#,
            "en",
            &mut store,
        );
        assert_eq!(store.translation("a", "en"), Some(""));
    }

    #[test]
    fn test_read_reference_is_order_dependent() {
        let mut store = StringsStore::new(["en"]);
        read(
            indoc! {r#"
                <resources>
                    <string name="app">MyApp</string>
                    <string name="title">@string/app</string>
                    <string name="early">@string/late</string>
                    <string name="late">Late</string>
                </resources>
            "#},
            "en",
            &mut store,
        );
        assert_eq!(store.translation("title", "en"), Some("MyApp"));
        // Forward references are not resolved
        assert_eq!(store.translation("early", "en"), Some(""));
    }

    #[test]
    fn test_read_reference_uses_same_language() {
        let mut store = StringsStore::new(["en", "fr"]);
        store.set_translation("app", "en", "MyApp");
        read(
            r#"<resources><string name="title">@string/app</string></resources>"#,
            "fr",
            &mut store,
        );
        assert_eq!(store.translation("title", "fr"), Some(""));
    }

    #[test]
    fn test_read_reference_must_be_whole_value() {
        let mut store = StringsStore::new(["en"]);
        read(
            r#"<resources><string name="a">See @string/b here</string></resources>"#,
            "en",
            &mut store,
        );
        assert_eq!(store.translation("a", "en"), Some("See @string/b here"));
    }

    #[test]
    fn test_read_comments() {
        let mut store = StringsStore::new(["en"]);
        read(
            indoc! {r#"
                <resources>
                    <!-- SECTION: General -->
                    <string name="a">A</string>
                    <!-- Shown on the home screen -->
                    <string name="b">B</string>
                    <string name="c">C</string>
                    <!-- Dropped before plurals -->
                    <plurals name="p"><item quantity="one">x</item></plurals>
                    <string name="d">D</string>
                </resources>
            "#},
            "en",
            &mut store,
        );
        assert_eq!(store.find_row("a").unwrap().comment, None);
        assert_eq!(
            store.find_row("b").unwrap().comment.as_deref(),
            Some("Shown on the home screen")
        );
        assert_eq!(store.find_row("c").unwrap().comment, None);
        assert_eq!(store.find_row("d").unwrap().comment, None);
        assert!(!store.contains_key("p"));
    }

    #[test]
    fn test_read_colors_and_duplicates() {
        let mut store = StringsStore::new(["en"]);
        read(
            indoc! {r#"
                <resources>
                    <color name="accent">#FF4081</color>
                    <string name="dup">first</string>
                    <string name="dup">second</string>
                </resources>
            "#},
            "en",
            &mut store,
        );
        let accent = store.find_row("accent").unwrap();
        assert_eq!(accent.kind, ResourceKind::Color);
        assert_eq!(store.translation("accent", "en"), Some("#FF4081"));
        assert_eq!(store.translation("dup", "en"), Some("second"));
    }

    #[test]
    fn test_write_full_document() {
        let mut store = StringsStore::new(["en"]);
        store.add_section(
            Section::new("General")
                .with_row(Row::new("hello").with_translation("en", "Hello").with_comment("Greeting -- short"))
                .with_row(Row::new("quote").with_translation("en", "Say \"hi\"")),
        );
        store.add_section(
            Section::new("Colors")
                .with_row(Row::new("accent").with_translation("en", "#FF4081").with_kind(ResourceKind::Color)),
        );

        let out = write("en", &store, &WriteOptions::default());
        let expected = format!(
            concat!(
                "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n",
                "<!-- Android Strings File -->\n",
                "<!-- Generated by droidl10n {} -->\n",
                "<!-- Language: en -->\n",
                "<resources>\n",
                "\t<!-- SECTION: General -->\n",
                "\t<!-- Greeting — short -->\n",
                "\t<string name=\"hello\">Hello</string>\n",
                "\t<string name=\"quote\">Say \\&quot;hi\\&quot;</string>\n",
                "\n",
                "\t<!-- SECTION: Colors -->\n",
                "\t<color name=\"accent\">#FF4081</color>\n",
                "</resources>\n",
            ),
            env!("CARGO_PKG_VERSION")
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_write_boundary_spaces() {
        let mut store = StringsStore::new(["en"]);
        store.add_section(Section::new("").with_row(Row::new("k").with_translation("en", "  hi  ")));

        let out = write("en", &store, &WriteOptions::default());
        assert!(out.contains(r#"<string name="k">\u0020\u0020hi\u0020\u0020</string>"#));
    }

    #[test]
    fn test_write_section_name_em_dash() {
        let mut store = StringsStore::new(["en"]);
        store.add_section(Section::new("Section A--B").with_row(Row::new("k").with_translation("en", "v")));

        let out = write("en", &store, &WriteOptions::default());
        assert!(out.contains("<!-- SECTION: Section A—B -->"));
        assert!(!out.contains("A--B"));
    }

    #[test]
    fn test_write_suppresses_filtered_section() {
        let mut store = StringsStore::new(["en"]);
        store.add_section(
            Section::new("Web only").with_row(Row::new("w").with_translation("en", "W").with_tags(["web"])),
        );
        store.add_section(
            Section::new("Mobile").with_row(Row::new("m").with_translation("en", "M").with_tags(["android"])),
        );

        let options = WriteOptions::new().with_tags(["android"]);
        let out = write("en", &store, &options);
        assert!(!out.contains("Web only"));
        assert!(out.contains("<resources>\n\t<!-- SECTION: Mobile -->\n"));
        assert!(!out.contains("\n\n"));
    }

    #[test]
    fn test_write_no_rows() {
        let store = StringsStore::new(["en"]);
        let out = write("en", &store, &WriteOptions::default());
        assert!(out.ends_with("<!-- Language: en -->\n<resources></resources>\n"));
    }

    #[test]
    fn test_write_fallbacks() {
        let mut store = StringsStore::new(["en", "zh-Hant", "zh-TW", "fr"]);
        store.add_section(
            Section::new("")
                .with_row(Row::new("both").with_translation("en", "Both").with_translation("zh-Hant", "兩者"))
                .with_row(Row::new("primary").with_translation("en", "Primary")),
        );

        let out = write("zh-TW", &store, &WriteOptions::default());
        assert!(out.contains(r#"<string name="both">兩者</string>"#));
        assert!(!out.contains("primary"));

        let out = write("fr", &store, &WriteOptions::new().with_untranslated(true));
        assert!(out.contains(r#"<string name="both">Both</string>"#));
        assert!(out.contains(r#"<string name="primary">Primary</string>"#));
    }

    #[test]
    fn test_write_does_not_mutate_store() {
        let mut store = StringsStore::new(["en"]);
        store.add_section(Section::new("").with_row(Row::new("k").with_translation("en", " it's %@ ")));
        let before = store.clone();

        let out = write("en", &store, &WriteOptions::default());
        assert!(out.contains(r#"<string name="k">\u0020it\&apos;s %s\u0020</string>"#));
        assert_eq!(store, before);
    }

    #[test]
    fn test_formatter_constants() {
        assert_eq!(AndroidStrings.format_name(), "android");
        assert_eq!(AndroidStrings.extension(), ".xml");
        assert_eq!(AndroidStrings.default_file_name(), "strings.xml");
    }
}
