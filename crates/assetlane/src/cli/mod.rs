//! CLI module for assetlane
//!
//! Each command module exposes an args struct and a `run` function taking
//! the active grammar. Output goes to stdout as a table or, with `--json`,
//! as pretty JSON.

pub mod error;
pub mod output;

pub mod assets;
pub mod config;
pub mod decode;
pub mod encode;
pub mod scan;
pub mod shots;

use assetlane::{AssetRepository, NamingGrammar};
use chrono::Duration;
use error::HelpfulError;
use std::path::Path;

/// Repository over `sequence_root` after checking the root and type exist.
///
/// One CLI invocation scans once, so the cache is disabled.
pub fn open_repository(
    sequence_root: &Path,
    type_name: &str,
    grammar: &NamingGrammar,
) -> anyhow::Result<AssetRepository> {
    if !sequence_root.is_dir() {
        return Err(HelpfulError::sequence_not_found(sequence_root).into());
    }
    if grammar.asset_type_by_name(type_name).is_none() {
        return Err(HelpfulError::unknown_asset_type(type_name, grammar).into());
    }
    Ok(AssetRepository::new(grammar.clone(), sequence_root, Duration::zero()))
}
