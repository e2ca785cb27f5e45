//! The canonical translation store the adapter reads from and writes into.
//!
//! Languages are ordered (index 0 is the primary language), and rows are
//! grouped into ordered sections. Formatters only go through the accessors
//! here; the store is always passed explicitly, never held as ambient state.

use std::{collections::BTreeMap, fmt::Display, fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Section that receives keys first seen while consuming a resource file.
pub const UNCATEGORIZED_SECTION: &str = "Uncategorized";

/// Element family a key is emitted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    #[default]
    String,
    Color,
}

impl ResourceKind {
    pub fn tag_name(&self) -> &'static str {
        match self {
            ResourceKind::String => "string",
            ResourceKind::Color => "color",
        }
    }

    fn is_default(&self) -> bool {
        *self == ResourceKind::String
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag_name())
    }
}

/// The whole translation database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StringsStore {
    /// Configured languages; the first one is the primary language.
    pub language_codes: Vec<String>,

    /// Ordered sections of rows.
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl StringsStore {
    pub fn new<I, S>(language_codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            language_codes: language_codes.into_iter().map(Into::into).collect(),
            sections: Vec::new(),
        }
    }

    /// The implicit default locale, if any language is configured.
    pub fn primary_language(&self) -> Option<&str> {
        self.language_codes.first().map(String::as_str)
    }

    pub fn add_language_code(&mut self, lang: &str) {
        if !self.language_codes.iter().any(|l| l == lang) {
            self.language_codes.push(lang.to_string());
        }
    }

    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.sections.iter().flat_map(|s| s.rows.iter())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find_row(key).is_some()
    }

    pub fn find_row(&self, key: &str) -> Option<&Row> {
        self.rows().find(|r| r.key == key)
    }

    pub fn find_row_mut(&mut self, key: &str) -> Option<&mut Row> {
        self.sections
            .iter_mut()
            .flat_map(|s| s.rows.iter_mut())
            .find(|r| r.key == key)
    }

    /// The stored value for `(key, lang)`, without any fallback.
    pub fn translation(&self, key: &str, lang: &str) -> Option<&str> {
        self.find_row(key)?.translations.get(lang).map(String::as_str)
    }

    /// Records `value` for `(key, lang)`; the last write wins.
    ///
    /// Unknown keys are appended to the [`UNCATEGORIZED_SECTION`] and unknown
    /// languages to the end of the language list.
    pub fn set_translation(&mut self, key: &str, lang: &str, value: impl Into<String>) {
        let value = value.into();
        match self.find_row_mut(key) {
            Some(row) => {
                row.translations.insert(lang.to_string(), value);
            }
            None => {
                tracing::debug!(key, "adding new key to the store");
                self.uncategorized_section()
                    .rows
                    .push(Row::new(key).with_translation(lang, value));
            }
        }
        self.add_language_code(lang);
    }

    /// Attaches a translator comment to an existing key.
    pub fn set_comment(&mut self, key: &str, comment: impl Into<String>) {
        if let Some(row) = self.find_row_mut(key) {
            row.comment = Some(comment.into());
        }
    }

    pub fn set_kind(&mut self, key: &str, kind: ResourceKind) {
        if let Some(row) = self.find_row_mut(key) {
            row.kind = kind;
        }
    }

    fn uncategorized_section(&mut self) -> &mut Section {
        let index = match self
            .sections
            .iter()
            .position(|s| s.name == UNCATEGORIZED_SECTION)
        {
            Some(index) => index,
            None => {
                self.sections.push(Section::new(UNCATEGORIZED_SECTION));
                self.sections.len() - 1
            }
        };
        &mut self.sections[index]
    }

    /// Loads a store previously written by [`StringsStore::save_to_file`].
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let reader = BufReader::new(File::open(path).map_err(Error::Io)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Persists the store as pretty-printed JSON, creating parent directories.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(Error::Io)?;
        }
        let writer = File::create(path).map_err(Error::Io)?;
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

/// A named, ordered group of rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Section {
    pub name: String,
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn with_row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }
}

/// One key with its per-language values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Row {
    pub key: String,

    #[serde(default, skip_serializing_if = "ResourceKind::is_default")]
    pub kind: ResourceKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Language code -> value.
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
}

impl Row {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn with_translation(mut self, lang: impl Into<String>, value: impl Into<String>) -> Self {
        self.translations.insert(lang.into(), value.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_kind(mut self, kind: ResourceKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether the row passes a tag filter.
    ///
    /// - No required tags: tagged rows pass, untagged rows pass only when
    ///   `include_untagged` is set.
    /// - Required tags: untagged rows follow `include_untagged`, tagged rows
    ///   must carry every required tag.
    pub fn matches_tags(&self, required: &[String], include_untagged: bool) -> bool {
        if self.tags.is_empty() {
            return include_untagged;
        }
        required.iter().all(|tag| self.tags.contains(tag))
    }

    /// The value for `lang`, else for `fallback` when one is given.
    pub fn translated_string_for_lang(&self, lang: &str, fallback: Option<&str>) -> Option<&str> {
        self.translations
            .get(lang)
            .or_else(|| fallback.and_then(|f| self.translations.get(f)))
            .map(String::as_str)
    }
}
