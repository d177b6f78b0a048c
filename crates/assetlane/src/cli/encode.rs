//! Encode command - build a file name from fields

use crate::cli::error::HelpfulError;
use crate::cli::output::print_json;
use assetlane::{encode, AssetIdentityBuilder, NamingGrammar};

#[derive(Debug)]
pub struct EncodeArgs {
    pub base: String,
    pub sub: Option<String>,
    pub type_name: String,
    pub revision: u32,
    pub version: u32,
    pub user: String,
    pub notes: Option<String>,
    pub ext: Option<String>,
    pub json: bool,
}

pub fn file_name(args: &EncodeArgs, grammar: &NamingGrammar) -> anyhow::Result<String> {
    if grammar.asset_type_by_name(&args.type_name).is_none() {
        return Err(HelpfulError::unknown_asset_type(&args.type_name, grammar).into());
    }

    let mut builder = AssetIdentityBuilder::new()
        .base_name(args.base.as_str())
        .type_name(args.type_name.as_str())
        .revision(args.revision)
        .version(args.version)
        .user_initials(args.user.as_str());
    if let Some(sub) = &args.sub {
        builder = builder.sub_name(sub.as_str());
    }
    if let Some(notes) = &args.notes {
        builder = builder.notes(notes.as_str());
    }
    if let Some(ext) = &args.ext {
        builder = builder.extension(ext.as_str());
    }

    let built = builder.build(grammar)?;
    Ok(encode(&built.identity, grammar)?)
}

pub fn run(args: EncodeArgs, grammar: &NamingGrammar) -> anyhow::Result<()> {
    let name = file_name(&args, grammar)?;
    if args.json {
        print_json(&serde_json::json!({ "name": name }))
    } else {
        println!("{}", name);
        Ok(())
    }
}
