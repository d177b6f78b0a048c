//! Asset identity: the metadata tuple carried by a file name.
//!
//! Identities come from two places: [`AssetIdentityBuilder`] for a new asset,
//! or [`crate::naming::codec::decode_file_name`] for a file found on disk.
//! Either way they are treated as immutable values; bumping a version
//! produces a new identity.

use super::grammar::{NamingGrammar, NumberedField, SubNameMode};
use crate::error::{NamingError, Result};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Sub-name used when a caller does not supply one.
pub const DEFAULT_SUB_NAME: &str = "MAIN";

/// A revision or version: the text as written plus its value when the
/// text matches the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Counter {
    pub text: String,
    pub number: Option<u32>,
}

impl Counter {
    /// Canonical counter for `number`.
    pub fn formatted(field: &NumberedField, number: u32) -> Self {
        Self {
            text: field.format(number),
            number: Some(number),
        }
    }

    /// Counter read from a file name; `number` is `None` when `text` does
    /// not match the field.
    pub fn parsed(field: &NumberedField, text: &str) -> Self {
        Self {
            text: text.to_string(),
            number: field.parse(text).ok(),
        }
    }
}

/// Key grouping every version and revision of one logical asset.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CriticalKey {
    pub base_name: String,
    /// `None` under the legacy grammar.
    pub sub_name: Option<String>,
    pub type_name: String,
}

impl CriticalKey {
    pub fn new(
        base_name: impl Into<String>,
        sub_name: Option<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            base_name: base_name.into(),
            sub_name,
            type_name: type_name.into(),
        }
    }

    /// The "critique name": key fields joined with the separator.
    pub fn joined(&self, separator: char) -> String {
        let mut out = self.base_name.clone();
        if let Some(sub) = &self.sub_name {
            out.push(separator);
            out.push_str(sub);
        }
        out.push(separator);
        out.push_str(&self.type_name);
        out
    }
}

impl fmt::Display for CriticalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sub_name {
            Some(sub) => write!(f, "{}/{}/{}", self.base_name, sub, self.type_name),
            None => write!(f, "{}/{}", self.base_name, self.type_name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetIdentity {
    pub base_name: String,
    pub sub_name: Option<String>,
    pub type_name: String,
    pub revision: Option<Counter>,
    pub version: Option<Counter>,
    pub user_initials: Option<String>,
    pub notes: String,
    pub extension: Option<String>,
    /// Full path when the identity was found on disk.
    pub path: Option<PathBuf>,
}

impl AssetIdentity {
    pub fn critical_key(&self) -> CriticalKey {
        CriticalKey::new(&self.base_name, self.sub_name.clone(), &self.type_name)
    }

    pub fn revision_number(&self) -> Option<u32> {
        self.revision.as_ref().and_then(|c| c.number)
    }

    pub fn revision_string(&self) -> Option<&str> {
        self.revision.as_ref().map(|c| c.text.as_str())
    }

    pub fn version_number(&self) -> Option<u32> {
        self.version.as_ref().and_then(|c| c.number)
    }

    pub fn version_string(&self) -> Option<&str> {
        self.version.as_ref().map(|c| c.text.as_str())
    }

    /// File name of the resolved path, if any.
    pub fn file_name(&self) -> Option<&str> {
        self.path.as_ref()?.file_name()?.to_str()
    }

    pub fn is_base_valid(&self) -> bool {
        valid_base_name(&self.base_name)
            && !self.type_name.is_empty()
            && self.sub_name.as_deref().map_or(true, |s| !s.is_empty())
    }

    pub fn is_full_valid(&self) -> bool {
        self.is_base_valid()
            && self.revision.is_some()
            && self.version.is_some()
            && self.user_initials.as_deref().is_some_and(|u| !u.is_empty())
    }

    /// Required fields present for `grammar`'s mode and both counters
    /// match their prefix+digits pattern.
    pub fn is_valid(&self, grammar: &NamingGrammar) -> bool {
        self.check(grammar).is_ok()
    }

    pub(crate) fn check(&self, grammar: &NamingGrammar) -> Result<()> {
        self.check_fields(grammar)?;
        if grammar.mode() == SubNameMode::WithSubName && self.sub_name.is_none() {
            return Err(NamingError::Validation(format!(
                "'{}' has no sub-name",
                self.base_name
            )));
        }
        if !self.is_full_valid() {
            return Err(NamingError::Validation(format!(
                "'{}' is missing required fields",
                self.critical_key()
            )));
        }
        grammar.parse_revision(self.revision_string().unwrap_or_default())?;
        grammar.parse_version(self.version_string().unwrap_or_default())?;
        Ok(())
    }

    /// Field contents that would not survive encoding: the separator inside
    /// a fixed field, or a dot inside the extension.
    fn check_fields(&self, grammar: &NamingGrammar) -> Result<()> {
        let separator = grammar.separator();
        for (label, value) in [
            ("base name", Some(&self.base_name)),
            ("sub name", self.sub_name.as_ref()),
            ("type name", Some(&self.type_name)),
            ("user initials", self.user_initials.as_ref()),
        ] {
            if value.is_some_and(|v| v.contains(separator)) {
                return Err(NamingError::Validation(format!(
                    "{} must not contain '{}'",
                    label, separator
                )));
            }
        }
        if let Some(ext) = self.extension.as_deref().filter(|e| e.contains('.')) {
            return Err(NamingError::Validation(format!(
                "extension '{}' must not contain '.'",
                ext
            )));
        }
        Ok(())
    }

    /// Same identity with the version bumped by one.
    pub fn increase_version(&self, grammar: &NamingGrammar) -> Result<AssetIdentity> {
        let current = self
            .version_number()
            .ok_or_else(|| NamingError::Validation(format!("'{}' has no version", self.critical_key())))?;
        let next = current
            .checked_add(1)
            .ok_or_else(|| NamingError::Validation("version overflow".to_string()))?;
        Ok(AssetIdentity {
            version: Some(Counter::formatted(grammar.version(), next)),
            path: None,
            ..self.clone()
        })
    }

    /// Same identity with the revision bumped by one.
    pub fn increase_revision(&self, grammar: &NamingGrammar) -> Result<AssetIdentity> {
        let current = self
            .revision_number()
            .ok_or_else(|| NamingError::Validation(format!("'{}' has no revision", self.critical_key())))?;
        let next = current
            .checked_add(1)
            .ok_or_else(|| NamingError::Validation("revision overflow".to_string()))?;
        Ok(AssetIdentity {
            revision: Some(Counter::formatted(grammar.revision(), next)),
            path: None,
            ..self.clone()
        })
    }
}

fn valid_base_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| !c.is_ascii_digit())
}

/// How far a built identity got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityStatus {
    /// Base, sub and type set: enough to locate the asset.
    BaseValid,
    /// Revision, version and user initials set too: can be named on disk.
    FullValid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltIdentity {
    pub identity: AssetIdentity,
    pub status: IdentityStatus,
}

/// Typed builder for new-asset identities.
#[derive(Debug, Clone, Default)]
pub struct AssetIdentityBuilder {
    base_name: Option<String>,
    sub_name: Option<String>,
    type_name: Option<String>,
    revision: Option<u32>,
    version: Option<u32>,
    user_initials: Option<String>,
    notes: Option<String>,
    extension: Option<String>,
}

impl AssetIdentityBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_name(mut self, value: impl Into<String>) -> Self {
        self.base_name = Some(value.into());
        self
    }

    pub fn sub_name(mut self, value: impl Into<String>) -> Self {
        self.sub_name = Some(value.into());
        self
    }

    pub fn type_name(mut self, value: impl Into<String>) -> Self {
        self.type_name = Some(value.into());
        self
    }

    pub fn revision(mut self, value: u32) -> Self {
        self.revision = Some(value);
        self
    }

    pub fn version(mut self, value: u32) -> Self {
        self.version = Some(value);
        self
    }

    pub fn user_initials(mut self, value: impl Into<String>) -> Self {
        self.user_initials = Some(value.into());
        self
    }

    pub fn notes(mut self, value: impl Into<String>) -> Self {
        self.notes = Some(value.into());
        self
    }

    pub fn extension(mut self, value: impl Into<String>) -> Self {
        self.extension = Some(value.into());
        self
    }

    pub fn build(self, grammar: &NamingGrammar) -> Result<BuiltIdentity> {
        let base_name = self
            .base_name
            .ok_or_else(|| NamingError::Validation("base name is required".to_string()))?;
        if !valid_base_name(&base_name) {
            return Err(NamingError::Validation(format!(
                "base name '{}' must be non-empty and must not start with a digit",
                base_name
            )));
        }

        let type_name = self
            .type_name
            .ok_or_else(|| NamingError::Validation("type name is required".to_string()))?;
        if grammar.asset_type_by_name(&type_name).is_none() {
            return Err(NamingError::Validation(format!("unknown asset type '{}'", type_name)));
        }

        let sub_name = match grammar.mode() {
            SubNameMode::Legacy => None,
            SubNameMode::WithSubName => {
                let sub = self.sub_name.unwrap_or_else(|| DEFAULT_SUB_NAME.to_string());
                if sub.is_empty() {
                    return Err(NamingError::Validation("sub name must not be empty".to_string()));
                }
                Some(sub)
            }
        };

        let identity = AssetIdentity {
            base_name,
            sub_name,
            type_name,
            revision: self.revision.map(|n| Counter::formatted(grammar.revision(), n)),
            version: self.version.map(|n| Counter::formatted(grammar.version(), n)),
            user_initials: self.user_initials.filter(|u| !u.is_empty()),
            notes: self.notes.unwrap_or_default(),
            extension: self
                .extension
                .map(|e| e.trim_start_matches('.').to_string())
                .filter(|e| !e.is_empty()),
            path: None,
        };
        identity.check_fields(grammar)?;

        let status = if identity.is_full_valid() {
            IdentityStatus::FullValid
        } else {
            IdentityStatus::BaseValid
        };
        Ok(BuiltIdentity { identity, status })
    }
}
