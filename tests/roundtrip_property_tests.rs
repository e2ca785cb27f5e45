use droidl10n::escape::{escape_value, unescape_value};
use droidl10n::placeholder::{to_android_placeholders, to_canonical_placeholders};
use droidl10n::{AndroidStrings, Formatter, Row, Section, StringsStore, WriteOptions};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn key_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,15}").expect("valid key regex")
}

/// Literal text: markup-significant characters are fine, backslashes, line
/// breaks and placeholders are not.
fn literal_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 _\\-\\.,!\\?'\"&<>éß日]{0,30}")
        .expect("valid value regex")
}

fn padded_strategy() -> impl Strategy<Value = (usize, String, usize)> {
    (
        0usize..5,
        proptest::string::string_regex("[A-Za-z]([A-Za-z ]{0,10}[A-Za-z])?").expect("valid core regex"),
        0usize..5,
    )
}

fn canonical_placeholder_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("%@"),
            Just("%1$@"),
            Just("%2$@"),
            Just("%d"),
            Just("%%"),
            Just("word"),
            Just(" "),
        ],
        0..8,
    )
    .prop_map(|parts| parts.concat())
}

fn android_placeholder_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("%s"),
            Just("%1$s"),
            Just("%2$s"),
            Just("%d"),
            Just("%%"),
            Just("word"),
            Just(" "),
        ],
        0..8,
    )
    .prop_map(|parts| parts.concat())
}

fn write_then_read(values: &BTreeMap<String, String>) -> StringsStore {
    let mut section = Section::new("Generated");
    for (key, value) in values {
        section = section.with_row(Row::new(key.clone()).with_translation("en", value.clone()));
    }
    let mut source = StringsStore::new(["en"]);
    source.add_section(section);

    let xml = AndroidStrings
        .write_to_string("en", &source, &WriteOptions::default())
        .expect("write succeeds");

    let mut target = StringsStore::new(["en"]);
    AndroidStrings
        .read_from_str(&xml, "en", &mut target)
        .expect("read succeeds");
    target
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn escape_unescape_round_trip(value in literal_strategy()) {
        prop_assert_eq!(unescape_value(&escape_value(&value)), value);
    }

    #[test]
    fn boundary_spaces_survive_write_and_read((leading, core, trailing) in padded_strategy()) {
        let value = format!("{}{}{}", " ".repeat(leading), core, " ".repeat(trailing));
        let mut values = BTreeMap::new();
        values.insert("padded".to_string(), value.clone());

        let store = write_then_read(&values);
        let read = store.translation("padded", "en").expect("key present");

        prop_assert_eq!(read.len() - read.trim_start_matches(' ').len(), leading);
        prop_assert_eq!(read.len() - read.trim_end_matches(' ').len(), trailing);
        prop_assert_eq!(read, value.as_str());
    }

    #[test]
    fn write_read_cycle_preserves_every_entry(
        values in prop::collection::btree_map(key_strategy(), literal_strategy(), 1..8)
    ) {
        let store = write_then_read(&values);
        for (key, value) in &values {
            prop_assert_eq!(store.translation(key, "en"), Some(value.as_str()));
        }
    }

    #[test]
    fn canonical_placeholders_round_trip(text in canonical_placeholder_text()) {
        prop_assert_eq!(to_canonical_placeholders(&to_android_placeholders(&text)), text);
    }

    #[test]
    fn android_placeholders_round_trip(text in android_placeholder_text()) {
        prop_assert_eq!(to_android_placeholders(&to_canonical_placeholders(&text)), text);
    }

    #[test]
    fn forward_references_resolve_to_empty(target in key_strategy(), value in "[A-Za-z]{1,10}") {
        let referrer = format!("{target}_ref");
        let xml = format!(
            "<resources>\n  <string name=\"{referrer}\">@string/{target}</string>\n  <string name=\"{target}\">{value}</string>\n</resources>"
        );
        let mut store = StringsStore::new(["en"]);
        AndroidStrings.read_from_str(&xml, "en", &mut store).expect("read succeeds");

        prop_assert_eq!(store.translation(&referrer, "en"), Some(""));
        prop_assert_eq!(store.translation(&target, "en"), Some(value.as_str()));
    }
}
