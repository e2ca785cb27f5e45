use std::path::PathBuf;

use droidl10n::{
    AndroidStrings, StringsStore, WriteOptions,
    codec::{generate_directory, generate_file},
};

use crate::validation::{
    validate_directory, validate_file_path, validate_language_code, validate_output_path,
};

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub store: PathBuf,
    pub output: PathBuf,
    pub lang: Option<String>,
    pub write: WriteOptions,
}

/// Writes one `strings.xml` from the store.
pub fn run_generate_command(opts: GenerateOptions) -> Result<(), String> {
    validate_file_path(&opts.store)?;
    validate_output_path(&opts.output)?;
    if let Some(lang) = &opts.lang {
        validate_language_code(lang)?;
    }

    let store = load_store(&opts.store)?;
    let written = generate_file(
        &AndroidStrings,
        &opts.output,
        opts.lang.as_deref(),
        &store,
        &opts.write,
    )
    .map_err(|e| format!("Error generating {}: {}", opts.output.display(), e))?;

    println!("Wrote {}", written.display());
    Ok(())
}

#[derive(Debug, Clone)]
pub struct GenerateAllOptions {
    pub store: PathBuf,
    pub res_dir: PathBuf,
    pub write: WriteOptions,
}

/// Writes `strings.xml` into every language directory of a `res/` folder.
pub fn run_generate_all_command(opts: GenerateAllOptions) -> Result<(), String> {
    validate_file_path(&opts.store)?;
    validate_directory(&opts.res_dir)?;

    let store = load_store(&opts.store)?;
    let written = generate_directory(&AndroidStrings, &opts.res_dir, &store, &opts.write)
        .map_err(|e| format!("Error generating into {}: {}", opts.res_dir.display(), e))?;

    if written.is_empty() {
        return Err(format!(
            "No language directories found in {}",
            opts.res_dir.display()
        ));
    }
    for path in written {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

pub(crate) fn load_store(path: &std::path::Path) -> Result<StringsStore, String> {
    StringsStore::load_from_file(path)
        .map_err(|e| format!("Error loading store {}: {}", path.display(), e))
}
