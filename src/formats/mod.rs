//! Format adapters that move translations between files and the store.
//!
//! Each adapter implements [`Formatter`]; the provided `read_file` and
//! `write_file` methods own the file handle so implementations only deal
//! with readers and writers.

pub mod android_strings;

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Cursor, Write},
    path::Path,
};

pub use android_strings::AndroidStrings;

use crate::{error::Error, store::StringsStore};

/// Options controlling which rows an adapter writes and how gaps are filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Tags a row must all carry to be written. Empty means no tag filter.
    pub tags: Vec<String>,
    /// Whether rows without any tag are written.
    pub include_untagged: bool,
    /// Whether rows missing a translation fall back to the primary language.
    pub include_untranslated: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            tags: Vec::new(),
            include_untagged: true,
            include_untranslated: false,
        }
    }
}

impl WriteOptions {
    /// Creates default write options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the required tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Enables/disables writing untagged rows.
    pub fn with_untagged(mut self, include_untagged: bool) -> Self {
        self.include_untagged = include_untagged;
        self
    }

    /// Enables/disables the primary-language fallback for missing values.
    pub fn with_untranslated(mut self, include_untranslated: bool) -> Self {
        self.include_untranslated = include_untranslated;
        self
    }
}

/// A file format that can be consumed into and generated from the store.
pub trait Formatter {
    /// Short identifier of the format (e.g. `"android"`).
    fn format_name(&self) -> &'static str;

    /// File extension, including the leading dot.
    fn extension(&self) -> &'static str;

    /// File name used when the caller only supplies a directory.
    fn default_file_name(&self) -> &'static str;

    /// Whether `dir` contains files laid out for this format.
    fn can_handle_directory(&self, dir: &Path) -> bool;

    /// The language a file at `path` holds, if the path says.
    fn determine_language_given_path(&self, path: &Path, store: &StringsStore) -> Option<String>;

    /// Reads translations for `lang` from any reader into `store`.
    fn read_from_reader<R: BufRead>(
        &self,
        reader: R,
        lang: &str,
        store: &mut StringsStore,
    ) -> Result<(), Error>;

    /// Writes the translations for `lang` to any writer.
    fn write_to_writer<W: Write>(
        &self,
        writer: W,
        lang: &str,
        store: &StringsStore,
        options: &WriteOptions,
    ) -> Result<(), Error>;

    /// Reads translations for `lang` from a file.
    fn read_file<P: AsRef<Path>>(
        &self,
        path: P,
        lang: &str,
        store: &mut StringsStore,
    ) -> Result<(), Error> {
        let file = File::open(path).map_err(Error::Io)?;
        self.read_from_reader(BufReader::new(file), lang, store)
    }

    /// Writes the translations for `lang` to a file, replacing it.
    fn write_file<P: AsRef<Path>>(
        &self,
        path: P,
        lang: &str,
        store: &StringsStore,
        options: &WriteOptions,
    ) -> Result<(), Error> {
        let file = File::create(path).map_err(Error::Io)?;
        let mut writer = BufWriter::new(file);
        self.write_to_writer(&mut writer, lang, store, options)?;
        writer.flush().map_err(Error::Io)
    }

    /// Reads translations for `lang` from a string.
    fn read_from_str(&self, content: &str, lang: &str, store: &mut StringsStore) -> Result<(), Error> {
        self.read_from_reader(Cursor::new(content), lang, store)
    }

    /// Writes the translations for `lang` into a string.
    fn write_to_string(
        &self,
        lang: &str,
        store: &StringsStore,
        options: &WriteOptions,
    ) -> Result<String, Error> {
        let mut out = Vec::new();
        self.write_to_writer(&mut out, lang, store, options)?;
        String::from_utf8(out)
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_options_default() {
        let options = WriteOptions::default();
        assert!(options.tags.is_empty());
        assert!(options.include_untagged);
        assert!(!options.include_untranslated);
    }

    #[test]
    fn test_write_options_builder() {
        let options = WriteOptions::new()
            .with_tags(["android", "release"])
            .with_untagged(false)
            .with_untranslated(true);
        assert_eq!(options.tags, vec!["android", "release"]);
        assert!(!options.include_untagged);
        assert!(options.include_untranslated);
    }
}
