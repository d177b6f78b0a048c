//! assetlane command line
//!
//! Standalone utilities over the naming grammar: encode and decode file
//! names, scan a sequence, resolve the latest version and the next file
//! name, and expand shot ranges.

use anyhow::Result;
use assetlane::NamingGrammar;
use assetlane_logging::{init_logging, LogConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

mod cli;

#[derive(Parser, Debug)]
#[command(name = "assetlane", version, about = "Production asset naming, scanning and versioning")]
struct Cli {
    /// Naming config (TOML). Defaults to ~/.assetlane/naming.toml, then built-ins
    #[arg(long, global = true, env = "ASSETLANE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging (info/debug to stderr)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode file names into their fields
    Decode {
        /// File names or paths
        #[arg(required = true)]
        names: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build a file name from fields
    Encode {
        #[arg(long)]
        base: String,

        /// Sub-name (default MAIN; ignored in legacy mode)
        #[arg(long)]
        sub: Option<String>,

        /// Asset type, e.g. ANIM
        #[arg(short = 't', long = "type")]
        type_name: String,

        #[arg(long, default_value = "0")]
        revision: u32,

        #[arg(long, default_value = "1")]
        version: u32,

        /// User initials
        #[arg(short, long)]
        user: String,

        #[arg(long)]
        notes: Option<String>,

        /// File extension, with or without the dot
        #[arg(long)]
        ext: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the assets of one type in a sequence
    Scan {
        /// Sequence root folder
        sequence_root: PathBuf,

        /// Asset type, e.g. ANIM
        #[arg(short = 't', long = "type")]
        type_name: String,

        /// Base names to scan (default: every folder under the type folder)
        #[arg(short, long = "base")]
        bases: Vec<String>,

        /// Keep assets whose field equals the value, e.g. version=3
        /// Can be specified multiple times.
        #[arg(short, long = "filter")]
        filters: Vec<String>,

        /// Only the latest file of each asset
        #[arg(long)]
        latest: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the latest version of an asset
    Latest {
        /// Sequence root folder
        sequence_root: PathBuf,

        #[arg(short = 't', long = "type")]
        type_name: String,

        #[arg(short, long)]
        base: String,

        #[arg(long)]
        sub: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the path for the next version of an asset
    Next {
        /// Sequence root folder
        sequence_root: PathBuf,

        #[arg(short = 't', long = "type")]
        type_name: String,

        #[arg(short, long)]
        base: String,

        #[arg(long)]
        sub: Option<String>,

        /// User initials
        #[arg(short, long)]
        user: String,

        #[arg(long)]
        notes: Option<String>,

        /// Extension (default: the latest file's)
        #[arg(long)]
        ext: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Expand a range expression, e.g. 1,4-7
    Range {
        expression: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Expand a range expression into shot strings
    Shots {
        expression: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Normalize a shot token, e.g. 10a -> SH010a
    Shot { token: String },

    /// Shot number of a shot string, e.g. SH010a -> 10a
    ShotNumber { shot: String },

    /// Manage the naming config
    Config {
        #[command(subcommand)]
        action: cli::config::ConfigAction,
    },
}

fn command_wants_json(cmd: &Commands) -> bool {
    match cmd {
        Commands::Decode { json, .. }
        | Commands::Encode { json, .. }
        | Commands::Scan { json, .. }
        | Commands::Latest { json, .. }
        | Commands::Next { json, .. }
        | Commands::Range { json, .. }
        | Commands::Shots { json, .. } => *json,
        _ => false,
    }
}

fn load_grammar(config: Option<&std::path::Path>) -> Result<NamingGrammar> {
    let (config, source) = cli::config::load_config(config)?;
    debug!(source = ?source, "Naming config loaded");
    Ok(config.into_grammar()?)
}

fn run_command(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    let grammar = || load_grammar(config_path);

    match cli.command {
        Commands::Decode { names, json } => {
            cli::decode::run(cli::decode::DecodeArgs { names, json }, &grammar()?)
        }
        Commands::Encode {
            base,
            sub,
            type_name,
            revision,
            version,
            user,
            notes,
            ext,
            json,
        } => cli::encode::run(
            cli::encode::EncodeArgs {
                base,
                sub,
                type_name,
                revision,
                version,
                user,
                notes,
                ext,
                json,
            },
            &grammar()?,
        ),
        Commands::Scan {
            sequence_root,
            type_name,
            bases,
            filters,
            latest,
            json,
        } => cli::scan::run(
            cli::scan::ScanArgs {
                sequence_root,
                type_name,
                bases,
                filters,
                latest,
                json,
            },
            &grammar()?,
        ),
        Commands::Latest {
            sequence_root,
            type_name,
            base,
            sub,
            json,
        } => cli::assets::run_latest(
            cli::assets::LatestArgs {
                asset: cli::assets::AssetArgs {
                    sequence_root,
                    type_name,
                    base,
                    sub,
                },
                json,
            },
            &grammar()?,
        ),
        Commands::Next {
            sequence_root,
            type_name,
            base,
            sub,
            user,
            notes,
            ext,
            json,
        } => cli::assets::run_next(
            cli::assets::NextArgs {
                asset: cli::assets::AssetArgs {
                    sequence_root,
                    type_name,
                    base,
                    sub,
                },
                user,
                notes,
                ext,
                json,
            },
            &grammar()?,
        ),
        Commands::Range { expression, json } => cli::shots::run_range(&expression, json),
        Commands::Shots { expression, json } => {
            cli::shots::run_shots(&expression, json, &grammar()?)
        }
        Commands::Shot { token } => cli::shots::run_shot(&token, &grammar()?),
        Commands::ShotNumber { shot } => cli::shots::run_shot_number(&shot, &grammar()?),
        Commands::Config { action } => cli::config::run(action, config_path),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = init_logging(LogConfig {
        app_name: "assetlane",
        verbose: cli.verbose,
    });

    let json_mode = command_wants_json(&cli.command);
    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            info!(error = %format!("{:#}", err), "Command failed");
            if json_mode {
                let payload = serde_json::json!({ "error": format!("{:#}", err) });
                println!("{}", payload);
            } else if err.downcast_ref::<cli::error::HelpfulError>().is_some() {
                eprint!("{}", err);
            } else {
                eprintln!("ERROR: {:#}", err);
            }
            ExitCode::from(1)
        }
    }
}
