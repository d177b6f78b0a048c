//! Repository access: layout, scanning, and the cached facade over both.
//!
//! The scanner and resolver are pure with respect to caching.
//! [`AssetRepository`] is the collaborator that owns the cache policy.

pub mod cache;
pub mod layout;
pub mod scanner;

pub use cache::{Cached, ScanCache, ScanKey};
pub use layout::{list_base_names, RepositoryLayout};
pub use scanner::{scan, ScanResult, ScanStats, ScanTarget, Scanner};

use crate::error::{NamingError, Result};
use crate::naming::{
    AssetIdentity, AssetIdentityBuilder, AssetTypeDefinition, CriticalKey, IdentityStatus,
    NamingGrammar,
};
use crate::resolve::latest_asset;
use chrono::{Duration, Utc};
use std::path::PathBuf;
use tracing::debug;

/// Assets of one sequence, scanned on demand and cached for `ttl`.
#[derive(Debug)]
pub struct AssetRepository {
    grammar: NamingGrammar,
    layout: RepositoryLayout,
    cache: ScanCache,
}

impl AssetRepository {
    pub fn new(grammar: NamingGrammar, sequence_root: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            grammar,
            layout: RepositoryLayout::new(sequence_root),
            cache: ScanCache::new(ttl),
        }
    }

    pub fn grammar(&self) -> &NamingGrammar {
        &self.grammar
    }

    pub fn layout(&self) -> &RepositoryLayout {
        &self.layout
    }

    pub fn cache(&self) -> &ScanCache {
        &self.cache
    }

    /// All assets of `type_name`. Without explicit base names, every
    /// sub-folder of the type folder is scanned.
    pub fn assets(&mut self, type_name: &str, base_names: Option<&[String]>) -> Result<ScanResult> {
        let type_folder = self.layout.type_folder(self.asset_type(type_name)?);
        let base_names = match base_names {
            Some(names) => names.to_vec(),
            None => list_base_names(&type_folder)?,
        };
        let targets = base_names
            .iter()
            .map(|base| ScanTarget::all_sub_names(base.as_str(), type_name))
            .collect();
        self.scan_cached(ScanKey {
            type_folder,
            targets,
        })
    }

    /// Every version and revision of the asset named by `key`, sorted by path.
    pub fn assets_for(&mut self, key: &CriticalKey) -> Result<Vec<AssetIdentity>> {
        let type_folder = self.layout.type_folder(self.asset_type(&key.type_name)?);
        let result = self.scan_cached(ScanKey {
            type_folder,
            targets: vec![ScanTarget::asset(key)],
        })?;
        Ok(result.assets)
    }

    /// Latest version of `key`, then latest revision within that version.
    pub fn latest(&mut self, key: &CriticalKey) -> Result<Option<AssetIdentity>> {
        let assets = self.assets_for(key)?;
        Ok(latest_asset(&assets).cloned())
    }

    /// Identity for the next file of `key`: the latest identity with its
    /// version bumped, or revision 0 version 1 when nothing exists yet.
    pub fn next_version(
        &mut self,
        key: &CriticalKey,
        user_initials: &str,
        notes: &str,
        extension: Option<&str>,
    ) -> Result<AssetIdentity> {
        let latest = self.latest(key)?;
        let (revision, version, previous_extension) = match &latest {
            Some(identity) => {
                let next = identity.increase_version(&self.grammar)?;
                (
                    next.revision_number().unwrap_or(0),
                    next.version_number().unwrap_or(1),
                    next.extension,
                )
            }
            None => (0, 1, None),
        };

        let mut builder = AssetIdentityBuilder::new()
            .base_name(key.base_name.as_str())
            .type_name(key.type_name.as_str())
            .revision(revision)
            .version(version)
            .user_initials(user_initials)
            .notes(notes);
        if let Some(sub) = &key.sub_name {
            builder = builder.sub_name(sub.as_str());
        }
        if let Some(ext) = extension.map(str::to_string).or(previous_extension) {
            builder = builder.extension(ext);
        }

        let built = builder.build(&self.grammar)?;
        if built.status != IdentityStatus::FullValid {
            return Err(NamingError::Validation(
                "user initials are required for a new version".to_string(),
            ));
        }
        Ok(built.identity)
    }

    /// Where `identity` goes on disk.
    pub fn path_for(&self, identity: &AssetIdentity) -> Result<PathBuf> {
        self.layout.asset_path(identity, &self.grammar)
    }

    /// Drop every cached scan.
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    fn asset_type(&self, type_name: &str) -> Result<&AssetTypeDefinition> {
        self.grammar
            .asset_type_by_name(type_name)
            .ok_or_else(|| NamingError::Validation(format!("unknown asset type '{}'", type_name)))
    }

    fn scan_cached(&mut self, key: ScanKey) -> Result<ScanResult> {
        let now = Utc::now();
        if let Some(hit) = self.cache.get_fresh(&key, now) {
            debug!(type_folder = %key.type_folder.display(), "Scan cache hit");
            return Ok(hit.clone());
        }
        let result = Scanner::new(&self.grammar).scan(&key.type_folder, &key.targets)?;
        self.cache.insert(key, result.clone(), now);
        Ok(result)
    }
}
