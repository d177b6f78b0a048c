//! Latest and next commands - resolve one asset's versions

use crate::cli::open_repository;
use crate::cli::output::{identity_row, print_json, print_table, IDENTITY_HEADERS};
use assetlane::naming::DEFAULT_SUB_NAME;
use assetlane::{CriticalKey, NamingGrammar, SubNameMode};
use std::path::PathBuf;

/// Identifies one asset inside a sequence.
#[derive(Debug)]
pub struct AssetArgs {
    pub sequence_root: PathBuf,
    pub type_name: String,
    pub base: String,
    pub sub: Option<String>,
}

impl AssetArgs {
    /// The sub-name falls back to the default in sub-name mode and is
    /// dropped in legacy mode.
    pub fn critical_key(&self, grammar: &NamingGrammar) -> CriticalKey {
        let sub_name = match grammar.mode() {
            SubNameMode::WithSubName => Some(
                self.sub
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SUB_NAME.to_string()),
            ),
            SubNameMode::Legacy => None,
        };
        CriticalKey::new(self.base.as_str(), sub_name, self.type_name.as_str())
    }
}

#[derive(Debug)]
pub struct LatestArgs {
    pub asset: AssetArgs,
    pub json: bool,
}

#[derive(Debug)]
pub struct NextArgs {
    pub asset: AssetArgs,
    pub user: String,
    pub notes: Option<String>,
    pub ext: Option<String>,
    pub json: bool,
}

pub fn run_latest(args: LatestArgs, grammar: &NamingGrammar) -> anyhow::Result<()> {
    let key = args.asset.critical_key(grammar);
    let mut repo = open_repository(&args.asset.sequence_root, &key.type_name, grammar)?;
    let latest = repo.latest(&key)?;

    if args.json {
        return print_json(&latest);
    }
    match latest {
        Some(identity) => {
            print_table(IDENTITY_HEADERS, vec![identity_row(&identity)]);
            if let Some(path) = &identity.path {
                println!("{}", path.display());
            }
        }
        None => println!("No versions of {} yet", key),
    }
    Ok(())
}

pub fn run_next(args: NextArgs, grammar: &NamingGrammar) -> anyhow::Result<()> {
    let key = args.asset.critical_key(grammar);
    let mut repo = open_repository(&args.asset.sequence_root, &key.type_name, grammar)?;
    let next = repo.next_version(
        &key,
        &args.user,
        args.notes.as_deref().unwrap_or_default(),
        args.ext.as_deref(),
    )?;
    let path = repo.path_for(&next)?;

    if args.json {
        print_json(&serde_json::json!({ "identity": next, "path": path }))
    } else {
        println!("{}", path.display());
        Ok(())
    }
}
