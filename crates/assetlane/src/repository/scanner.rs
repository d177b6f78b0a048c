//! Repository scanner: turns base-name folders into validated identities.
//!
//! Every file in a base-name folder is a candidate. A candidate becomes an
//! asset only if
//!
//! - its name starts with the critique name of the target,
//! - its extension is not ignored by the grammar,
//! - it decodes, and
//! - the decoded identity is valid.
//!
//! Anything else is counted in [`ScanStats`] and skipped. A malformed file
//! never aborts a scan.
//!
//! The scan always reads the file system. Caching lives one layer up in
//! [`super::cache::ScanCache`].

use crate::error::Result;
use crate::naming::{
    decode_file_name, split_extension, AssetIdentity, CriticalKey, NamingGrammar, SubNameMode,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// One base-name folder to scan, and which identities in it belong to the
/// request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScanTarget {
    pub base_name: String,
    /// `None` accepts every sub-name (and is the only choice in legacy mode).
    pub sub_name: Option<String>,
    pub type_name: String,
}

impl ScanTarget {
    /// Exactly the asset named by `key`.
    pub fn asset(key: &CriticalKey) -> Self {
        Self {
            base_name: key.base_name.clone(),
            sub_name: key.sub_name.clone(),
            type_name: key.type_name.clone(),
        }
    }

    /// Every sub-name of `type_name` under `base_name`.
    pub fn all_sub_names(base_name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            base_name: base_name.into(),
            sub_name: None,
            type_name: type_name.into(),
        }
    }

    /// Prefix every matching file name starts with, separator included.
    fn critique_prefix(&self, grammar: &NamingGrammar) -> String {
        let separator = grammar.separator();
        let mut prefix = match (&self.sub_name, grammar.mode()) {
            (_, SubNameMode::Legacy) => {
                CriticalKey::new(&self.base_name, None, &self.type_name).joined(separator)
            }
            (Some(sub), SubNameMode::WithSubName) => {
                CriticalKey::new(&self.base_name, Some(sub.clone()), &self.type_name)
                    .joined(separator)
            }
            // sub-name unknown: type comes after it, so only the base is fixed
            (None, SubNameMode::WithSubName) => self.base_name.clone(),
        };
        prefix.push(separator);
        prefix
    }

    fn accepts(&self, identity: &AssetIdentity) -> bool {
        identity.base_name == self.base_name
            && identity.type_name == self.type_name
            && self
                .sub_name
                .as_ref()
                .map_or(true, |sub| identity.sub_name.as_ref() == Some(sub))
    }
}

/// Per-scan counters. Every file seen lands in exactly one of the skip
/// counters or in `assets`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub folders_scanned: u64,
    /// Base-name folders that do not exist
    pub folders_missing: u64,
    pub files_seen: u64,
    /// Name does not belong to the target
    pub foreign: u64,
    pub ignored_extension: u64,
    /// Too few parts to decode
    pub malformed: u64,
    /// Decoded but fails validation
    pub invalid: u64,
    /// Folders or entries the walker could not read
    pub unreadable: u64,
    pub assets: u64,
    pub duration_ms: u64,
}

/// Result of a scan: identities sorted by path, plus statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanResult {
    pub assets: Vec<AssetIdentity>,
    pub stats: ScanStats,
}

/// Scans base-name folders under one type folder.
pub struct Scanner<'a> {
    grammar: &'a NamingGrammar,
}

impl<'a> Scanner<'a> {
    pub fn new(grammar: &'a NamingGrammar) -> Self {
        Self { grammar }
    }

    /// Scan `{type_folder}/{target.base_name}` for every target.
    ///
    /// Missing and unreadable base-name folders are counted and skipped, so
    /// one bad folder never hides the others.
    pub fn scan(&self, type_folder: &Path, targets: &[ScanTarget]) -> Result<ScanResult> {
        let start = Instant::now();
        let mut result = ScanResult::default();

        for target in targets {
            let folder = type_folder.join(&target.base_name);
            if !folder.is_dir() {
                debug!(folder = %folder.display(), "Base folder missing");
                result.stats.folders_missing += 1;
                continue;
            }
            if let Err(e) = self.scan_folder(&folder, target, &mut result) {
                warn!(folder = %folder.display(), error = %e, "Skipping unreadable folder");
                result.stats.unreadable += 1;
                continue;
            }
            result.stats.folders_scanned += 1;
        }

        result.assets.sort_by(|a, b| a.path.cmp(&b.path));
        // overlapping targets can see the same file twice
        result.assets.dedup_by(|a, b| a.path == b.path);
        result.stats.assets = result.assets.len() as u64;
        result.stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            type_folder = %type_folder.display(),
            folders = result.stats.folders_scanned,
            files = result.stats.files_seen,
            assets = result.stats.assets,
            skipped = result.stats.files_seen.saturating_sub(result.stats.assets),
            "Scan complete"
        );
        Ok(result)
    }

    fn scan_folder(&self, folder: &Path, target: &ScanTarget, result: &mut ScanResult) -> Result<()> {
        let prefix = target.critique_prefix(self.grammar);

        for entry in WalkDir::new(folder).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    warn!(folder = %folder.display(), error = %e, "Skipping unreadable entry");
                    result.stats.unreadable += 1;
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            result.stats.files_seen += 1;

            let Some(file_name) = entry.file_name().to_str() else {
                result.stats.foreign += 1;
                continue;
            };
            match self.classify(file_name, &prefix, target) {
                Ok(mut identity) => {
                    identity.path = Some(entry.path().to_path_buf());
                    result.assets.push(identity);
                }
                Err(skip) => {
                    debug!(file = file_name, reason = skip.as_str(), "Skipping file");
                    skip.count(&mut result.stats);
                }
            }
        }
        Ok(())
    }

    fn classify(
        &self,
        file_name: &str,
        prefix: &str,
        target: &ScanTarget,
    ) -> std::result::Result<AssetIdentity, Skip> {
        if !file_name.starts_with(prefix) {
            return Err(Skip::Foreign);
        }
        let (_, extension) = split_extension(file_name);
        if extension.is_some_and(|ext| self.grammar.is_ignored_extension(ext)) {
            return Err(Skip::IgnoredExtension);
        }
        let identity = decode_file_name(file_name, self.grammar).map_err(|_| Skip::Malformed)?;
        if !target.accepts(&identity) {
            return Err(Skip::Foreign);
        }
        if !identity.is_valid(self.grammar) {
            return Err(Skip::Invalid);
        }
        Ok(identity)
    }
}

#[derive(Debug, Clone, Copy)]
enum Skip {
    Foreign,
    IgnoredExtension,
    Malformed,
    Invalid,
}

impl Skip {
    fn as_str(self) -> &'static str {
        match self {
            Skip::Foreign => "foreign",
            Skip::IgnoredExtension => "ignored_extension",
            Skip::Malformed => "malformed",
            Skip::Invalid => "invalid",
        }
    }

    fn count(self, stats: &mut ScanStats) {
        match self {
            Skip::Foreign => stats.foreign += 1,
            Skip::IgnoredExtension => stats.ignored_extension += 1,
            Skip::Malformed => stats.malformed += 1,
            Skip::Invalid => stats.invalid += 1,
        }
    }
}

/// Scan every sub-name of `type_name` under the given base-name folders.
pub fn scan(
    type_folder: &Path,
    base_names: &[String],
    type_name: &str,
    grammar: &NamingGrammar,
) -> Result<ScanResult> {
    let targets: Vec<ScanTarget> = base_names
        .iter()
        .map(|base| ScanTarget::all_sub_names(base.as_str(), type_name))
        .collect();
    Scanner::new(grammar).scan(type_folder, &targets)
}

/// Paths of a scan result, in order.
pub fn asset_paths(result: &ScanResult) -> Vec<PathBuf> {
    result.assets.iter().filter_map(|a| a.path.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NamingConfig;
    use std::fs;

    fn grammar() -> NamingGrammar {
        NamingConfig::default().into_grammar().unwrap()
    }

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn critique_prefix_depends_on_mode_and_sub_name() {
        let g = grammar();
        let key = CriticalKey::new("SH010", Some("MAIN".to_string()), "ANIM");
        assert_eq!(ScanTarget::asset(&key).critique_prefix(&g), "SH010_MAIN_ANIM_");
        assert_eq!(ScanTarget::all_sub_names("SH010", "ANIM").critique_prefix(&g), "SH010_");

        let legacy = NamingConfig {
            sub_name_mode: SubNameMode::Legacy,
            ..NamingConfig::default()
        }
        .into_grammar()
        .unwrap();
        assert_eq!(
            ScanTarget::all_sub_names("SH010", "ANIM").critique_prefix(&legacy),
            "SH010_ANIM_"
        );
    }

    #[test]
    fn classifies_every_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("SH010");
        fs::create_dir(&base).unwrap();
        touch(&base, "SH010_MAIN_ANIM_r00_v001_ab.ma");
        touch(&base, "SH010_MAIN_ANIM_r00_v002_ab_blocking pass.ma");
        touch(&base, "SH010_MAIN_ANIM_r00_v003_ab.bak");
        touch(&base, "SH010_MAIN_ANIM.ma");
        touch(&base, "SH010_MAIN_ANIM_rXX_v004_ab.ma");
        touch(&base, "SH010_MAIN_LIGHT_r00_v001_ab.ma");
        touch(&base, "Thumbs.db");
        fs::create_dir(base.join("PLAYBLAST")).unwrap();

        let result = scan(dir.path(), &["SH010".to_string()], "ANIM", &grammar()).unwrap();
        let versions: Vec<_> = result.assets.iter().map(|a| a.version_number()).collect();
        assert_eq!(versions, vec![Some(1), Some(2)]);
        assert!(result.assets.iter().all(|a| a.path.is_some()));

        let stats = &result.stats;
        assert_eq!(stats.files_seen, 7);
        assert_eq!(stats.ignored_extension, 1);
        assert_eq!(stats.malformed, 1);
        assert_eq!(stats.invalid, 1);
        assert_eq!(stats.foreign, 2);
        assert_eq!(stats.assets, 2);
    }

    #[test]
    fn missing_folder_is_counted_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = scan(dir.path(), &["SH999".to_string()], "ANIM", &grammar()).unwrap();
        assert!(result.assets.is_empty());
        assert_eq!(result.stats.folders_missing, 1);
        assert_eq!(result.stats.folders_scanned, 0);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_folder_does_not_abort_scan() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("SH010");
        let open = dir.path().join("SH020");
        fs::create_dir(&locked).unwrap();
        fs::create_dir(&open).unwrap();
        touch(&locked, "SH010_MAIN_ANIM_r00_v001_ab.ma");
        touch(&open, "SH020_MAIN_ANIM_r00_v001_ab.ma");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // root ignores directory permissions
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let names = vec!["SH010".to_string(), "SH020".to_string()];
        let result = scan(dir.path(), &names, "ANIM", &grammar());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let result = result.unwrap();
        assert_eq!(asset_paths(&result), vec![open.join("SH020_MAIN_ANIM_r00_v001_ab.ma")]);
        assert_eq!(result.stats.unreadable, 1);
        assert_eq!(result.stats.folders_scanned, 1);
    }

    #[test]
    fn duplicate_targets_do_not_duplicate_assets() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("SH010");
        fs::create_dir(&base).unwrap();
        touch(&base, "SH010_MAIN_ANIM_r00_v001_ab.ma");

        let names = vec!["SH010".to_string(), "SH010".to_string()];
        let result = scan(dir.path(), &names, "ANIM", &grammar()).unwrap();
        assert_eq!(asset_paths(&result), vec![base.join("SH010_MAIN_ANIM_r00_v001_ab.ma")]);
    }
}
