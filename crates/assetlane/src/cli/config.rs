//! Naming config resolution and the `config` command.
//!
//! Resolution order:
//! 1. `--config <path>` (or `ASSETLANE_CONFIG`), which must exist
//! 2. `<assetlane home>/naming.toml` if present
//! 3. built-in defaults

use crate::cli::error::HelpfulError;
use assetlane::config::default_config_path;
use assetlane::NamingConfig;
use clap::Subcommand;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Write the default naming config
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the active naming config as TOML
    Show,
}

/// Where the config comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

/// Load the naming config for this invocation.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<(NamingConfig, ConfigSource)> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(HelpfulError::config_not_found(path).into());
        }
        let config = NamingConfig::load(path)?;
        return Ok((config, ConfigSource::File(path.to_path_buf())));
    }

    let path = default_config_path();
    if path.exists() {
        debug!(path = %path.display(), "Loading naming config");
        Ok((NamingConfig::load(&path)?, ConfigSource::File(path)))
    } else {
        debug!("No naming config found, using defaults");
        Ok((NamingConfig::default(), ConfigSource::Defaults))
    }
}

pub fn run(action: ConfigAction, explicit: Option<&Path>) -> anyhow::Result<()> {
    match action {
        ConfigAction::Init { force } => {
            let path = explicit
                .map(Path::to_path_buf)
                .unwrap_or_else(default_config_path);
            if path.exists() && !force {
                return Err(HelpfulError::config_exists(&path).into());
            }
            NamingConfig::default().save(&path)?;
            info!(path = %path.display(), "Wrote default naming config");
            println!("Wrote {}", path.display());
        }
        ConfigAction::Show => {
            let (config, source) = load_config(explicit)?;
            // reject configs the grammar would refuse
            config.clone().into_grammar()?;
            match source {
                ConfigSource::File(path) => println!("# {}", path.display()),
                ConfigSource::Defaults => println!("# built-in defaults"),
            }
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }
    Ok(())
}
