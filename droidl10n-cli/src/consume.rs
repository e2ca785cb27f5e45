use std::path::PathBuf;

use droidl10n::{
    AndroidStrings,
    codec::{consume_directory, consume_file},
};

use crate::generate::load_store;
use crate::validation::{
    validate_directory, validate_file_path, validate_language_code, validate_output_path,
};

#[derive(Debug, Clone)]
pub struct ConsumeOptions {
    pub store: PathBuf,
    pub input: PathBuf,
    pub lang: Option<String>,
    /// Where to save the updated store; defaults to `store`.
    pub output_store: Option<PathBuf>,
}

/// Reads one `strings.xml` into the store and saves it.
pub fn run_consume_command(opts: ConsumeOptions) -> Result<(), String> {
    validate_file_path(&opts.store)?;
    validate_file_path(&opts.input)?;
    if let Some(lang) = &opts.lang {
        validate_language_code(lang)?;
    }

    let mut store = load_store(&opts.store)?;
    let lang = consume_file(&AndroidStrings, &opts.input, opts.lang.as_deref(), &mut store)
        .map_err(|e| format!("Error consuming {}: {}", opts.input.display(), e))?;

    let out = opts.output_store.as_ref().unwrap_or(&opts.store);
    save_store(&store, out)?;
    println!("Consumed {} as '{}'", opts.input.display(), lang);
    Ok(())
}

#[derive(Debug, Clone)]
pub struct ConsumeAllOptions {
    pub store: PathBuf,
    pub res_dir: PathBuf,
    pub output_store: Option<PathBuf>,
}

/// Reads `strings.xml` from every language directory of a `res/` folder.
pub fn run_consume_all_command(opts: ConsumeAllOptions) -> Result<(), String> {
    validate_file_path(&opts.store)?;
    validate_directory(&opts.res_dir)?;

    let mut store = load_store(&opts.store)?;
    let langs = consume_directory(&AndroidStrings, &opts.res_dir, &mut store)
        .map_err(|e| format!("Error consuming {}: {}", opts.res_dir.display(), e))?;

    let out = opts.output_store.as_ref().unwrap_or(&opts.store);
    save_store(&store, out)?;
    println!("Consumed languages: {}", langs.join(", "));
    Ok(())
}

fn save_store(store: &droidl10n::StringsStore, path: &std::path::Path) -> Result<(), String> {
    validate_output_path(path)?;
    store
        .save_to_file(path)
        .map_err(|e| format!("Error saving store {}: {}", path.display(), e))
}
