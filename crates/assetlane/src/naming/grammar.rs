//! Naming grammar: separators, numbered-field prefixes and the asset type table.
//!
//! A [`NamingGrammar`] is built once per repository (usually from
//! [`crate::config::NamingConfig`]) and passed by reference into every codec,
//! scanner and resolver call.

use crate::error::{NamingError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Whether file names carry a sub-name slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubNameMode {
    /// `{base}_{sub}_{type}_...`
    #[default]
    WithSubName,
    /// `{base}_{type}_...`, kept for older repositories.
    Legacy,
}

impl SubNameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WithSubName => "with_sub_name",
            Self::Legacy => "legacy",
        }
    }
}

/// One entry of the asset type table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetTypeDefinition {
    /// Type token used in file names (e.g. `ANIM`)
    pub name: String,
    /// Type folder, relative to the sequence root
    pub path: String,
    /// Whether assets of this type are named after shots
    #[serde(default)]
    pub shot_dependent: bool,
    /// Folder (inside the base-name folder) holding playblasts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playblast_folder: Option<String>,
}

/// A prefixed, zero-padded counter such as `r01` or `v003`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedField {
    prefix: String,
    padding: usize,
}

impl NumberedField {
    pub fn new(prefix: impl Into<String>, padding: usize) -> Result<Self> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(NamingError::Config("numbered field prefix must not be empty".to_string()));
        }
        Ok(Self { prefix, padding })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn padding(&self) -> usize {
        self.padding
    }

    /// Prefix plus the number padded to the configured width. Wider numbers
    /// are rendered in full.
    pub fn format(&self, number: u32) -> String {
        format!("{}{:0width$}", self.prefix, number, width = self.padding)
    }

    pub fn parse(&self, value: &str) -> Result<u32> {
        let digits = self.digits(value).ok_or_else(|| self.format_error(value))?;
        digits.parse().map_err(|_| self.format_error(value))
    }

    /// True when `value` is the prefix followed by one or more ASCII digits.
    pub fn matches(&self, value: &str) -> bool {
        self.digits(value).is_some()
    }

    fn digits<'a>(&self, value: &'a str) -> Option<&'a str> {
        value
            .strip_prefix(self.prefix.as_str())
            .filter(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
    }

    fn format_error(&self, value: &str) -> NamingError {
        NamingError::Format {
            value: value.to_string(),
            prefix: self.prefix.clone(),
        }
    }
}

/// Immutable formatting and parsing rules for asset file names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingGrammar {
    separator: char,
    revision: NumberedField,
    version: NumberedField,
    shot: NumberedField,
    mode: SubNameMode,
    ignored_extensions: BTreeSet<String>,
    asset_types: BTreeMap<String, AssetTypeDefinition>,
}

impl NamingGrammar {
    pub fn new(
        separator: char,
        revision: NumberedField,
        version: NumberedField,
        shot: NumberedField,
        mode: SubNameMode,
    ) -> Self {
        Self {
            separator,
            revision,
            version,
            shot,
            mode,
            ignored_extensions: BTreeSet::new(),
            asset_types: BTreeMap::new(),
        }
    }

    /// Extensions are stored lowercase without a leading dot.
    pub fn with_ignored_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ignored_extensions.extend(
            extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase()),
        );
        self
    }

    /// Registers an asset type. Names must be unique.
    pub fn with_asset_type(mut self, definition: AssetTypeDefinition) -> Result<Self> {
        if definition.name.is_empty() {
            return Err(NamingError::Config("asset type name must not be empty".to_string()));
        }
        if definition.name.contains(self.separator) {
            return Err(NamingError::Config(format!(
                "asset type '{}' contains the separator '{}'",
                definition.name, self.separator
            )));
        }
        if self.asset_types.contains_key(&definition.name) {
            return Err(NamingError::Config(format!(
                "duplicate asset type '{}'",
                definition.name
            )));
        }
        self.asset_types.insert(definition.name.clone(), definition);
        Ok(self)
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn mode(&self) -> SubNameMode {
        self.mode
    }

    pub fn revision(&self) -> &NumberedField {
        &self.revision
    }

    pub fn version(&self) -> &NumberedField {
        &self.version
    }

    pub fn shot(&self) -> &NumberedField {
        &self.shot
    }

    pub fn format_revision(&self, number: u32) -> String {
        self.revision.format(number)
    }

    pub fn format_version(&self, number: u32) -> String {
        self.version.format(number)
    }

    /// Shot prefix, padded number, then the alternate suffix verbatim.
    pub fn format_shot(&self, number: u32, alt_suffix: &str) -> String {
        format!("{}{}", self.shot.format(number), alt_suffix)
    }

    pub fn parse_revision(&self, value: &str) -> Result<u32> {
        self.revision.parse(value)
    }

    pub fn parse_version(&self, value: &str) -> Result<u32> {
        self.version.parse(value)
    }

    pub fn asset_type_by_name(&self, name: &str) -> Option<&AssetTypeDefinition> {
        self.asset_types.get(name)
    }

    pub fn asset_types(&self) -> impl Iterator<Item = &AssetTypeDefinition> {
        self.asset_types.values()
    }

    /// Case-insensitive; accepts the extension with or without a dot.
    pub fn is_ignored_extension(&self, extension: &str) -> bool {
        let normalized = extension.trim_start_matches('.').to_ascii_lowercase();
        self.ignored_extensions.contains(&normalized)
    }

    pub fn ignored_extensions(&self) -> impl Iterator<Item = &str> {
        self.ignored_extensions.iter().map(String::as_str)
    }
}
