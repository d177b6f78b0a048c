//! Scan command - list the assets of one type in a sequence

use crate::cli::error::HelpfulError;
use crate::cli::output::{identity_row, print_json, print_table, IDENTITY_HEADERS};
use crate::cli::open_repository;
use assetlane::resolve::latest_per_asset;
use assetlane::{filter_assets, AssetIdentity, Constraints, NamingGrammar, ScanStats};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug)]
pub struct ScanArgs {
    pub sequence_root: PathBuf,
    pub type_name: String,
    pub bases: Vec<String>,
    pub filters: Vec<String>,
    pub latest: bool,
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct ScanOutput {
    pub assets: Vec<AssetIdentity>,
    pub stats: ScanStats,
}

/// Parse `field=value` filters into constraints.
pub fn parse_filters(filters: &[String]) -> anyhow::Result<Constraints> {
    let mut pairs = Vec::with_capacity(filters.len());
    for filter in filters {
        let (field, value) = filter
            .split_once('=')
            .ok_or_else(|| HelpfulError::invalid_filter(filter))?;
        pairs.push((field.trim().to_string(), value.to_string()));
    }
    let constraints = Constraints::from_pairs(pairs)
        .map_err(|e| HelpfulError::invalid_filter(&filters.join(" ")).with_context(e.to_string()))?;
    Ok(constraints)
}

pub fn collect(args: &ScanArgs, grammar: &NamingGrammar) -> anyhow::Result<ScanOutput> {
    let constraints = parse_filters(&args.filters)?;
    let mut repo = open_repository(&args.sequence_root, &args.type_name, grammar)?;

    let bases = (!args.bases.is_empty()).then_some(args.bases.as_slice());
    let result = repo.assets(&args.type_name, bases)?;

    let filtered = filter_assets(&result.assets, &constraints);
    let assets = if args.latest {
        latest_per_asset(filtered)
    } else {
        filtered
    };

    Ok(ScanOutput {
        assets: assets.into_iter().cloned().collect(),
        stats: result.stats,
    })
}

pub fn run(args: ScanArgs, grammar: &NamingGrammar) -> anyhow::Result<()> {
    let output = collect(&args, grammar)?;
    if args.json {
        return print_json(&output);
    }

    if output.assets.is_empty() {
        println!("No {} assets found under {}", args.type_name, args.sequence_root.display());
    } else {
        let mut headers = IDENTITY_HEADERS.to_vec();
        headers.push("File");
        let rows = output
            .assets
            .iter()
            .map(|identity| {
                let mut row = identity_row(identity);
                row.push(identity.file_name().unwrap_or("-").to_string());
                row
            })
            .collect();
        print_table(&headers, rows);
    }

    let stats = &output.stats;
    println!(
        "{} asset(s) shown; {} file(s) in {} folder(s); skipped: {} foreign, {} ignored, {} malformed, {} invalid",
        output.assets.len(),
        stats.files_seen,
        stats.folders_scanned,
        stats.foreign,
        stats.ignored_extension,
        stats.malformed,
        stats.invalid,
    );
    Ok(())
}
