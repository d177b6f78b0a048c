//! Directory layout: `{sequence_root}/{type_folder}/{base_name}/{file_name}`.

use crate::error::{NamingError, Result};
use crate::naming::{encode, AssetIdentity, AssetTypeDefinition, NamingGrammar};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLayout {
    sequence_root: PathBuf,
}

impl RepositoryLayout {
    pub fn new(sequence_root: impl Into<PathBuf>) -> Self {
        Self {
            sequence_root: sequence_root.into(),
        }
    }

    pub fn sequence_root(&self) -> &Path {
        &self.sequence_root
    }

    pub fn type_folder(&self, definition: &AssetTypeDefinition) -> PathBuf {
        self.sequence_root.join(&definition.path)
    }

    pub fn asset_folder(&self, definition: &AssetTypeDefinition, base_name: &str) -> PathBuf {
        self.type_folder(definition).join(base_name)
    }

    /// `None` for types without a playblast folder.
    pub fn playblast_folder(
        &self,
        definition: &AssetTypeDefinition,
        base_name: &str,
    ) -> Option<PathBuf> {
        definition
            .playblast_folder
            .as_ref()
            .map(|folder| self.asset_folder(definition, base_name).join(folder))
    }

    /// Where `identity` lives (or would live) on disk.
    pub fn asset_path(&self, identity: &AssetIdentity, grammar: &NamingGrammar) -> Result<PathBuf> {
        let definition = grammar.asset_type_by_name(&identity.type_name).ok_or_else(|| {
            NamingError::Validation(format!("unknown asset type '{}'", identity.type_name))
        })?;
        let file_name = encode(identity, grammar)?;
        Ok(self
            .asset_folder(definition, &identity.base_name)
            .join(file_name))
    }
}

/// Sub-directory names of a type folder, sorted. A missing folder has none.
pub fn list_base_names(type_folder: &Path) -> Result<Vec<String>> {
    let entries = match fs::read_dir(type_folder) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}
