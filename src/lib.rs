#![forbid(unsafe_code)]
//! Android `strings.xml` adapter for a multi-format localization sync tool.
//!
//! Moves translations between a canonical [`StringsStore`] and Android
//! resource files, keeping Android's escaping rules, placeholder syntax and
//! boundary-space conventions intact in both directions.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use droidl10n::{AndroidStrings, Formatter, StringsStore, WriteOptions};
//!
//! let mut store = StringsStore::new(["en", "fr"]);
//! AndroidStrings.read_file("res/values-fr/strings.xml", "fr", &mut store)?;
//! AndroidStrings.write_file("strings.xml", "fr", &store, &WriteOptions::default())?;
//! # Ok::<(), droidl10n::Error>(())
//! ```
//!
//! # Modules
//!
//! - [`formats`]: the [`Formatter`] seam and the Android implementation
//! - [`codec`]: file and directory level consume/generate helpers
//! - [`language`]: directory name <-> language tag resolution
//! - [`escape`], [`placeholder`], [`tokenizer`]: the pure building blocks
//! - [`store`]: the canonical translation store

pub mod codec;
pub mod error;
pub mod escape;
pub mod formats;
pub mod language;
pub mod placeholder;
pub mod store;
pub mod tokenizer;

// Re-export most used types for easy consumption
pub use crate::{
    error::Error,
    formats::{AndroidStrings, Formatter, WriteOptions},
    language::resolve_language,
    store::{ResourceKind, Row, Section, StringsStore},
};
