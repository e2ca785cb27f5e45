//! File- and directory-level entry points.
//!
//! These wrap a [`Formatter`] with the path conventions callers usually want:
//! inferring the language from the path when none is given, appending the
//! default file name when the destination is a directory, and walking a
//! `res/` directory to consume or generate every language it contains.

use std::path::{Path, PathBuf};

use crate::{
    error::Error,
    formats::{Formatter, WriteOptions},
    store::StringsStore,
};

/// Reads one resource file into the store.
///
/// Uses `lang` when given, otherwise the language the path resolves to.
/// Returns the language the file was read as.
///
/// # Example
///
/// ```rust,no_run
/// use droidl10n::{StringsStore, codec::consume_file, formats::AndroidStrings};
/// let mut store = StringsStore::new(["en"]);
/// let lang = consume_file(&AndroidStrings, "res/values-fr/strings.xml", None, &mut store)?;
/// assert_eq!(lang, "fr");
/// # Ok::<(), droidl10n::Error>(())
/// ```
pub fn consume_file<F: Formatter, P: AsRef<Path>>(
    formatter: &F,
    path: P,
    lang: Option<&str>,
    store: &mut StringsStore,
) -> Result<String, Error> {
    let path = path.as_ref();
    let lang = language_for(formatter, path, lang, store)?;
    formatter.read_file(path, &lang, store)?;
    Ok(lang)
}

/// Writes one resource file from the store.
///
/// When `path` is an existing directory the formatter's default file name is
/// appended. Returns the path actually written.
pub fn generate_file<F: Formatter, P: AsRef<Path>>(
    formatter: &F,
    path: P,
    lang: Option<&str>,
    store: &StringsStore,
    options: &WriteOptions,
) -> Result<PathBuf, Error> {
    let mut path = path.as_ref().to_path_buf();
    if path.is_dir() {
        path.push(formatter.default_file_name());
    }
    let lang = language_for(formatter, &path, lang, store)?;

    tracing::debug!(path = %path.display(), lang = %lang, "generating {} file", formatter.format_name());
    formatter.write_file(&path, &lang, store, options)?;
    Ok(path)
}

/// Consumes the default-named file of every language directory under `dir`.
///
/// Directories are visited in name order; those whose language cannot be
/// determined, or that hold no file, are skipped. Returns the languages read.
pub fn consume_directory<F: Formatter, P: AsRef<Path>>(
    formatter: &F,
    dir: P,
    store: &mut StringsStore,
) -> Result<Vec<String>, Error> {
    let mut consumed = Vec::new();
    for lang_dir in language_directories(dir.as_ref())? {
        let file = lang_dir.join(formatter.default_file_name());
        if !file.is_file() {
            continue;
        }
        let Some(lang) = formatter.determine_language_given_path(&lang_dir, store) else {
            tracing::debug!(dir = %lang_dir.display(), "skipping directory without language");
            continue;
        };
        formatter.read_file(&file, &lang, store)?;
        consumed.push(lang);
    }
    Ok(consumed)
}

/// Generates a file in every existing language directory under `dir`.
///
/// Languages are only ever derived from directory names; no directory is
/// created. Returns the paths written.
pub fn generate_directory<F: Formatter, P: AsRef<Path>>(
    formatter: &F,
    dir: P,
    store: &StringsStore,
    options: &WriteOptions,
) -> Result<Vec<PathBuf>, Error> {
    let mut written = Vec::new();
    for lang_dir in language_directories(dir.as_ref())? {
        let Some(lang) = formatter.determine_language_given_path(&lang_dir, store) else {
            continue;
        };
        let file = lang_dir.join(formatter.default_file_name());
        formatter.write_file(&file, &lang, store, options)?;
        written.push(file);
    }
    Ok(written)
}

fn language_for<F: Formatter>(
    formatter: &F,
    path: &Path,
    lang: Option<&str>,
    store: &StringsStore,
) -> Result<String, Error> {
    match lang {
        Some(lang) => Ok(lang.to_string()),
        None => formatter
            .determine_language_given_path(path, store)
            .ok_or_else(|| Error::unknown_language(path)),
    }
}

fn language_directories(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut dirs = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()?;
    dirs.retain(|p| p.is_dir());
    dirs.sort();
    Ok(dirs)
}
