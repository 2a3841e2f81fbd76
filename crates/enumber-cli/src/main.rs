mod commands;
mod logging;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

const DEFAULT_DB: &str = "additives.db";

#[derive(Parser)]
#[command(
    name = "enumber",
    version,
    about = "Build a classified food additive database from the Open Food Facts taxonomy",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    build: BuildArgs,
}

#[derive(clap::Args)]
struct BuildArgs {
    /// Output database file
    #[arg(default_value = DEFAULT_DB)]
    db_path: PathBuf,

    /// TOML config file
    #[arg(short, long, env = "ENUMBER_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Taxonomy URL (overrides the config file)
    #[arg(long, env = "ENUMBER_SOURCE_URL", value_name = "URL")]
    source_url: Option<String>,

    /// Read a previously saved taxonomy file instead of downloading (wins over --source-url)
    #[arg(long, value_name = "FILE")]
    source_file: Option<PathBuf>,

    /// Download timeout in seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Do not add the curated supplement entries
    #[arg(long)]
    no_curated: bool,

    /// Output format: table (default) or json
    #[arg(short, long, default_value = "table")]
    output: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Print dataset statistics and metadata
    Stats {
        /// Database file
        #[arg(default_value = DEFAULT_DB)]
        db_path: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Look up additives by code (E102 or 102), name, risk level, category or diet
    Lookup {
        #[command(flatten)]
        target: commands::lookup::LookupTarget,

        /// Database file
        #[arg(long = "db", default_value = DEFAULT_DB)]
        db_path: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Print sample SQL queries for consumers of the database
    Queries,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        None => {
            let b = cli.build;
            commands::build::run(commands::build::BuildRequest {
                db_path: b.db_path,
                config: b.config,
                source_url: b.source_url,
                source_file: b.source_file,
                timeout: b.timeout,
                no_curated: b.no_curated,
                output: b.output,
            })
        }
        Some(Commands::Stats { db_path, output }) => commands::stats::run(&db_path, &output),
        Some(Commands::Lookup {
            target,
            db_path,
            output,
        }) => commands::lookup::run(&target, &db_path, &output),
        Some(Commands::Queries) => commands::queries::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
