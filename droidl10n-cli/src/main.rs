use std::path::PathBuf;

use clap::{Parser, Subcommand};
use droidl10n::resolve_language;
use droidl10n_cli::{
    Config,
    consume::{ConsumeAllOptions, ConsumeOptions, run_consume_all_command, run_consume_command},
    generate::{
        GenerateAllOptions, GenerateOptions, run_generate_all_command, run_generate_command,
    },
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file; defaults to ./droidl10n.toml when present
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    commands: Commands,
}

/// Row selection shared by the generate commands.
#[derive(clap::Args, Debug)]
struct FilterArgs {
    /// Only write rows carrying all of these tags (comma separated)
    #[arg(long, value_delimiter = ',')]
    tags: Vec<String>,

    /// Skip rows that have no tags
    #[arg(long)]
    exclude_untagged: bool,

    /// Fall back to the primary language for missing translations
    #[arg(long)]
    include_untranslated: bool,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Write one strings.xml from the store.
    Generate {
        /// The JSON store to read
        #[arg(short, long)]
        store: Option<PathBuf>,
        /// The file (or values directory) to write
        #[arg(short, long)]
        output: PathBuf,
        /// Language to write; inferred from the output path when omitted
        #[arg(short, long)]
        lang: Option<String>,
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Write strings.xml into every values* directory of a res folder.
    GenerateAll {
        #[arg(short, long)]
        store: Option<PathBuf>,
        /// The Android res directory
        #[arg(short, long)]
        res_dir: PathBuf,
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Read one strings.xml into the store.
    Consume {
        #[arg(short, long)]
        store: Option<PathBuf>,
        /// The strings.xml file to read
        #[arg(short, long)]
        input: PathBuf,
        /// Language of the file; inferred from the input path when omitted
        #[arg(short, long)]
        lang: Option<String>,
        /// Save the updated store here instead of overwriting it
        #[arg(long)]
        output_store: Option<PathBuf>,
    },

    /// Read strings.xml from every values* directory of a res folder.
    ConsumeAll {
        #[arg(short, long)]
        store: Option<PathBuf>,
        #[arg(short, long)]
        res_dir: PathBuf,
        #[arg(long)]
        output_store: Option<PathBuf>,
    },

    /// Print the language a strings.xml path resolves to.
    Detect {
        /// Path to inspect
        #[arg(short, long)]
        path: PathBuf,
        /// Primary language, used for the bare `values` directory
        #[arg(long)]
        primary: Option<String>,
    },
}

fn run(args: Args) -> Result<(), String> {
    let config = Config::load(args.config.as_deref())?;

    match args.commands {
        Commands::Generate {
            store,
            output,
            lang,
            filter,
        } => run_generate_command(GenerateOptions {
            store: config.resolve_store(store)?,
            output,
            lang,
            write: config.write_options(
                filter.tags,
                filter.exclude_untagged,
                filter.include_untranslated,
            ),
        }),
        Commands::GenerateAll {
            store,
            res_dir,
            filter,
        } => run_generate_all_command(GenerateAllOptions {
            store: config.resolve_store(store)?,
            res_dir,
            write: config.write_options(
                filter.tags,
                filter.exclude_untagged,
                filter.include_untranslated,
            ),
        }),
        Commands::Consume {
            store,
            input,
            lang,
            output_store,
        } => run_consume_command(ConsumeOptions {
            store: config.resolve_store(store)?,
            input,
            lang,
            output_store,
        }),
        Commands::ConsumeAll {
            store,
            res_dir,
            output_store,
        } => run_consume_all_command(ConsumeAllOptions {
            store: config.resolve_store(store)?,
            res_dir,
            output_store,
        }),
        Commands::Detect { path, primary } => {
            let lang = resolve_language(&path, primary.as_deref())
                .ok_or_else(|| format!("Unable to determine language for {}", path.display()))?;
            println!("{}", lang);
            Ok(())
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
