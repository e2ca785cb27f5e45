//! Mapping between Android resource directories and canonical language tags.
//!
//! `values/` holds the primary language, `values-<tag>/` every other one.
//! Tags use Android's `-r` region marker (`pt-rBR`) which becomes a plain
//! dash in the canonical form (`pt-BR`).

use std::{collections::HashMap, io, path::Path};

use lazy_static::lazy_static;

/// Directory name for the default locale, and prefix of all others.
pub const VALUES_DIR: &str = "values";

lazy_static! {
    /// Android directory tags that do not translate mechanically.
    static ref LANGUAGE_ALIASES: HashMap<&'static str, &'static str> = HashMap::from([
        ("zh", "zh-Hans"),
        ("zh-rCN", "zh-Hans"),
        ("zh-rHK", "zh-Hant"),
        ("en-rGB", "en-UK"),
        ("in", "id"),
        ("nb", "no"),
    ]);

    /// Stand-in languages tried before the primary language on write.
    static ref DEFAULT_LANGUAGES: HashMap<&'static str, &'static str> =
        HashMap::from([("zh-TW", "zh-Hant")]);
}

/// Resolves the language a resource file holds from its path.
///
/// Path segments are scanned in order and the first `values` or `values-*`
/// segment decides: `values` yields `primary_language`, `values-<tag>` yields
/// the aliased tag with `-r` rewritten to `-`. Returns `None` when no segment
/// matches.
///
/// # Example
/// ```rust
/// use droidl10n::language::resolve_language;
/// assert_eq!(
///     resolve_language("res/values-zh-rCN/strings.xml", Some("en")),
///     Some("zh-Hans".to_string())
/// );
/// assert_eq!(
///     resolve_language("res/values-pt-rBR/strings.xml", Some("en")),
///     Some("pt-BR".to_string())
/// );
/// assert_eq!(resolve_language("res/values/strings.xml", Some("en")), Some("en".to_string()));
/// assert_eq!(resolve_language("res/raw/strings.xml", Some("en")), None);
/// ```
pub fn resolve_language<P: AsRef<Path>>(path: P, primary_language: Option<&str>) -> Option<String> {
    path.as_ref().components().find_map(|c| {
        let segment = c.as_os_str().to_str()?;
        if segment == VALUES_DIR {
            // Stops the scan even when no primary language is configured.
            Some(primary_language.map(str::to_string))
        } else {
            let tag = segment.strip_prefix(VALUES_DIR)?.strip_prefix('-')?;
            Some(Some(canonical_tag(tag)))
        }
    })?
}

/// Canonical form of an Android directory tag.
pub fn canonical_tag(tag: &str) -> String {
    LANGUAGE_ALIASES
        .get(tag)
        .copied()
        .unwrap_or(tag)
        .replacen("-r", "-", 1)
}

/// The stand-in language to try when `lang` has no translation of its own.
pub fn default_fallback_language(lang: &str) -> Option<&'static str> {
    DEFAULT_LANGUAGES.get(lang).copied()
}

/// Whether `dir` looks like an Android `res/` directory.
pub fn can_handle_directory<P: AsRef<Path>>(dir: P) -> io::Result<bool> {
    for entry in std::fs::read_dir(dir)? {
        if entry?.file_name().to_string_lossy().starts_with(VALUES_DIR) {
            return Ok(true);
        }
    }
    Ok(false)
}
