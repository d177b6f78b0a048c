//! Decode command - read identities out of file names

use crate::cli::output::{identity_row, print_json, print_table, yes_no, IDENTITY_HEADERS};
use assetlane::{decode_file_name, AssetIdentity, NamingGrammar};
use serde::Serialize;
use std::path::Path;

#[derive(Debug)]
pub struct DecodeArgs {
    pub names: Vec<String>,
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct DecodedName {
    pub name: String,
    pub identity: Option<AssetIdentity>,
    pub valid: bool,
    pub error: Option<String>,
}

/// Decode one name. Directory components are ignored.
pub fn decode_name(name: &str, grammar: &NamingGrammar) -> anyhow::Result<DecodedName> {
    let file_name = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(name);

    match decode_file_name(file_name, grammar) {
        Ok(identity) => Ok(DecodedName {
            name: name.to_string(),
            valid: identity.is_valid(grammar),
            identity: Some(identity),
            error: None,
        }),
        Err(e) if e.is_not_an_asset() => Ok(DecodedName {
            name: name.to_string(),
            identity: None,
            valid: false,
            error: Some(e.to_string()),
        }),
        Err(e) => Err(e.into()),
    }
}

pub fn run(args: DecodeArgs, grammar: &NamingGrammar) -> anyhow::Result<()> {
    let decoded = args
        .names
        .iter()
        .map(|name| decode_name(name, grammar))
        .collect::<anyhow::Result<Vec<_>>>()?;

    if args.json {
        return print_json(&decoded);
    }

    let mut headers = vec!["Name"];
    headers.extend_from_slice(IDENTITY_HEADERS);
    headers.push("Valid");

    let rows = decoded
        .iter()
        .map(|d| {
            let mut row = vec![d.name.clone()];
            match &d.identity {
                Some(identity) => row.extend(identity_row(identity)),
                None => row.extend(IDENTITY_HEADERS.iter().map(|_| "-".to_string())),
            }
            row.push(yes_no(d.valid));
            row
        })
        .collect();
    print_table(&headers, rows);

    for d in decoded.iter().filter(|d| d.error.is_some()) {
        eprintln!("{}: {}", d.name, d.error.as_deref().unwrap_or_default());
    }
    Ok(())
}
