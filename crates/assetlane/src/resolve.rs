//! Version resolution over scanned identities.
//!
//! All functions are pure. The "latest" helpers keep the first identity
//! seen among equal maxima, so callers must feed them a deterministic order
//! (the scanner sorts by path).

use crate::error::{NamingError, Result};
use crate::naming::{AssetIdentity, CriticalKey};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Identity fields that can be constrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AssetField {
    BaseName,
    SubName,
    TypeName,
    Revision,
    RevisionString,
    Version,
    VersionString,
    UserInitials,
    Notes,
    FileName,
}

impl AssetField {
    pub const ALL: [AssetField; 10] = [
        Self::BaseName,
        Self::SubName,
        Self::TypeName,
        Self::Revision,
        Self::RevisionString,
        Self::Version,
        Self::VersionString,
        Self::UserInitials,
        Self::Notes,
        Self::FileName,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BaseName => "baseName",
            Self::SubName => "subName",
            Self::TypeName => "typeName",
            Self::Revision => "revision",
            Self::RevisionString => "revisionString",
            Self::Version => "version",
            Self::VersionString => "versionString",
            Self::UserInitials => "userInitials",
            Self::Notes => "notes",
            Self::FileName => "fileName",
        }
    }

    fn matches(&self, identity: &AssetIdentity, expected: &str) -> bool {
        match self {
            Self::BaseName => identity.base_name == expected,
            Self::SubName => identity.sub_name.as_deref() == Some(expected),
            Self::TypeName => identity.type_name == expected,
            Self::Revision => counter_matches(
                identity.revision_number(),
                identity.revision_string(),
                expected,
            ),
            Self::RevisionString => identity.revision_string() == Some(expected),
            Self::Version => counter_matches(
                identity.version_number(),
                identity.version_string(),
                expected,
            ),
            Self::VersionString => identity.version_string() == Some(expected),
            Self::UserInitials => identity.user_initials.as_deref() == Some(expected),
            Self::Notes => identity.notes == expected,
            Self::FileName => identity.file_name() == Some(expected),
        }
    }
}

/// Numbers compare by value; anything else is compared with the text form.
fn counter_matches(number: Option<u32>, text: Option<&str>, expected: &str) -> bool {
    match expected.trim().parse::<u32>() {
        Ok(wanted) => number == Some(wanted),
        Err(_) => text == Some(expected),
    }
}

impl fmt::Display for AssetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetField {
    type Err = NamingError;

    /// Accepts `baseName` as well as `base_name`.
    fn from_str(s: &str) -> Result<Self> {
        let folded: String = s.chars().filter(|c| *c != '_').collect();
        AssetField::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(&folded))
            .ok_or_else(|| NamingError::Validation(format!("unknown asset field '{}'", s)))
    }
}

/// Required field values. Blank values do not constrain anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constraints {
    fields: BTreeMap<AssetField, String>,
}

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: AssetField, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: AssetField, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.fields.remove(&field);
        } else {
            self.fields.insert(field, value);
        }
    }

    /// Builds constraints from `(field name, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut constraints = Self::new();
        for (name, value) in pairs {
            constraints.insert(name.as_ref().parse()?, value);
        }
        Ok(constraints)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn matches(&self, identity: &AssetIdentity) -> bool {
        self.fields
            .iter()
            .all(|(field, expected)| field.matches(identity, expected))
    }
}

/// Identities satisfying every constraint, in input order.
pub fn filter_assets<'a, I>(identities: I, constraints: &Constraints) -> Vec<&'a AssetIdentity>
where
    I: IntoIterator<Item = &'a AssetIdentity>,
{
    identities
        .into_iter()
        .filter(|identity| constraints.matches(identity))
        .collect()
}

/// Identity with the highest version and that version. First wins on ties.
pub fn latest_version<'a, I>(identities: I) -> Option<(&'a AssetIdentity, u32)>
where
    I: IntoIterator<Item = &'a AssetIdentity>,
{
    max_first_by(identities, AssetIdentity::version_number)
}

/// Identity with the highest revision and that revision. First wins on ties.
pub fn latest_revision<'a, I>(identities: I) -> Option<(&'a AssetIdentity, u32)>
where
    I: IntoIterator<Item = &'a AssetIdentity>,
{
    max_first_by(identities, AssetIdentity::revision_number)
}

fn max_first_by<'a, I, F>(identities: I, number: F) -> Option<(&'a AssetIdentity, u32)>
where
    I: IntoIterator<Item = &'a AssetIdentity>,
    F: Fn(&AssetIdentity) -> Option<u32>,
{
    let mut best: Option<(&'a AssetIdentity, u32)> = None;
    for identity in identities {
        let Some(n) = number(identity) else {
            continue;
        };
        if best.map_or(true, |(_, current)| n > current) {
            best = Some((identity, n));
        }
    }
    best
}

/// Latest version, then latest revision among files sharing that version.
pub fn latest_asset<'a, I>(identities: I) -> Option<&'a AssetIdentity>
where
    I: IntoIterator<Item = &'a AssetIdentity>,
{
    let identities: Vec<&'a AssetIdentity> = identities.into_iter().collect();
    let (_, version) = latest_version(identities.iter().copied())?;
    latest_revision(
        identities
            .into_iter()
            .filter(|identity| identity.version_number() == Some(version)),
    )
    .map(|(identity, _)| identity)
}

/// Groups identities by critical key, preserving input order per group.
pub fn group_by_critical_key<'a, I>(identities: I) -> BTreeMap<CriticalKey, Vec<&'a AssetIdentity>>
where
    I: IntoIterator<Item = &'a AssetIdentity>,
{
    let mut groups: BTreeMap<CriticalKey, Vec<&'a AssetIdentity>> = BTreeMap::new();
    for identity in identities {
        groups.entry(identity.critical_key()).or_default().push(identity);
    }
    groups
}

/// One [`latest_asset`] per critical key, ordered by key.
pub fn latest_per_asset<'a, I>(identities: I) -> Vec<&'a AssetIdentity>
where
    I: IntoIterator<Item = &'a AssetIdentity>,
{
    group_by_critical_key(identities)
        .into_values()
        .filter_map(|group| latest_asset(group))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NamingConfig;
    use crate::naming::{decode_file_name, NamingGrammar};
    use std::path::PathBuf;

    fn grammar() -> NamingGrammar {
        NamingConfig::default().into_grammar().unwrap()
    }

    fn assets(names: &[&str]) -> Vec<AssetIdentity> {
        let g = grammar();
        names
            .iter()
            .map(|name| {
                let mut id = decode_file_name(name, &g).unwrap();
                id.path = Some(PathBuf::from("/seq").join(name));
                id
            })
            .collect()
    }

    #[test]
    fn latest_version_picks_maximum() {
        let ids = assets(&[
            "SH010_MAIN_ANIM_r00_v001_ab.ma",
            "SH010_MAIN_ANIM_r00_v003_ab.ma",
            "SH010_MAIN_ANIM_r00_v002_ab.ma",
        ]);
        let (best, version) = latest_version(&ids).unwrap();
        assert_eq!(version, 3);
        assert_eq!(best.version_string(), Some("v003"));
    }

    #[test]
    fn latest_of_nothing_is_absent() {
        let ids: Vec<AssetIdentity> = Vec::new();
        assert!(latest_version(&ids).is_none());
        assert!(latest_revision(&ids).is_none());
        assert!(latest_asset(&ids).is_none());
    }

    #[test]
    fn ties_keep_first_in_input_order() {
        let ids = assets(&[
            "SH010_MAIN_ANIM_r00_v002_ab_one.ma",
            "SH010_MAIN_ANIM_r01_v002_cd_two.ma",
        ]);
        let (best, _) = latest_version(&ids).unwrap();
        assert_eq!(best.notes, "one");
        let (best, _) = latest_version(ids.iter().rev()).unwrap();
        assert_eq!(best.notes, "two");
    }

    #[test]
    fn latest_revision_uses_revision_numbers() {
        let ids = assets(&[
            "SH010_MAIN_ANIM_r02_v001_ab.ma",
            "SH010_MAIN_ANIM_r10_v001_ab.ma",
            "SH010_MAIN_ANIM_r03_v009_ab.ma",
        ]);
        assert_eq!(latest_revision(&ids).unwrap().1, 10);
    }

    #[test]
    fn unparsed_counters_are_skipped() {
        let ids = assets(&["SH010_MAIN_ANIM_r00_vXYZ_ab.ma", "SH010_MAIN_ANIM_r00_v001_ab.ma"]);
        assert_eq!(latest_version(&ids).unwrap().1, 1);
    }

    #[test]
    fn latest_asset_breaks_version_ties_by_revision() {
        let ids = assets(&[
            "SH010_MAIN_ANIM_r00_v004_ab.ma",
            "SH010_MAIN_ANIM_r03_v004_ab.ma",
            "SH010_MAIN_ANIM_r05_v002_ab.ma",
        ]);
        let best = latest_asset(&ids).unwrap();
        assert_eq!(best.revision_string(), Some("r03"));
        assert_eq!(best.version_string(), Some("v004"));
    }

    #[test]
    fn filter_by_type_ignores_other_fields() {
        let ids = assets(&[
            "SH010_MAIN_MODEL_r00_v001_ab.ma",
            "SH010_MAIN_ANIM_r00_v001_ab.ma",
            "SH020_PROP_MODEL_r01_v004_cd_notes.mb",
        ]);
        let models = filter_assets(&ids, &Constraints::new().with(AssetField::TypeName, "MODEL"));
        assert_eq!(models.len(), 2);
        assert!(models.iter().all(|id| id.type_name == "MODEL"));
    }

    #[test]
    fn empty_constraints_keep_everything() {
        let ids = assets(&["SH010_MAIN_MODEL_r00_v001_ab.ma", "SH010_MAIN_ANIM_r00_v001_ab.ma"]);
        let kept = filter_assets(&ids, &Constraints::new());
        assert_eq!(kept.len(), ids.len());
        assert!(kept.iter().zip(&ids).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn blank_constraint_values_are_ignored() {
        let ids = assets(&["SH010_MAIN_MODEL_r00_v001_ab.ma"]);
        let constraints = Constraints::from_pairs([("typeName", "MODEL"), ("notes", "")]).unwrap();
        assert_eq!(filter_assets(&ids, &constraints).len(), 1);
    }

    #[test]
    fn numeric_and_string_counter_constraints() {
        let ids = assets(&["SH010_MAIN_ANIM_r00_v001_ab.ma", "SH010_MAIN_ANIM_r00_v012_ab.ma"]);
        let by_number = Constraints::new().with(AssetField::Version, "12");
        assert_eq!(filter_assets(&ids, &by_number)[0].version_string(), Some("v012"));
        let by_text = Constraints::new().with(AssetField::VersionString, "v001");
        assert_eq!(filter_assets(&ids, &by_text)[0].version_number(), Some(1));
        let by_prefixed = Constraints::new().with(AssetField::Version, "v012");
        assert_eq!(filter_assets(&ids, &by_prefixed).len(), 1);
    }

    #[test]
    fn file_name_constraint_uses_resolved_path() {
        let ids = assets(&["SH010_MAIN_ANIM_r00_v001_ab.ma", "SH010_MAIN_ANIM_r00_v002_ab.ma"]);
        let constraints =
            Constraints::from_pairs([("file_name", "SH010_MAIN_ANIM_r00_v002_ab.ma")]).unwrap();
        let kept = filter_assets(&ids, &constraints);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].version_number(), Some(2));
    }

    #[test]
    fn field_names_parse_in_both_styles() {
        assert_eq!("baseName".parse::<AssetField>().unwrap(), AssetField::BaseName);
        assert_eq!("user_initials".parse::<AssetField>().unwrap(), AssetField::UserInitials);
        assert_eq!("VERSIONSTRING".parse::<AssetField>().unwrap(), AssetField::VersionString);
        assert!("colour".parse::<AssetField>().is_err());
        assert!(Constraints::from_pairs([("colour", "red")]).is_err());
    }

    #[test]
    fn groups_and_latest_per_asset() {
        let ids = assets(&[
            "SH010_MAIN_ANIM_r00_v001_ab.ma",
            "SH010_CROWD_ANIM_r00_v005_ab.ma",
            "SH010_MAIN_ANIM_r00_v002_ab.ma",
        ]);
        let groups = group_by_critical_key(&ids);
        assert_eq!(groups.len(), 2);
        let main = CriticalKey::new("SH010", Some("MAIN".to_string()), "ANIM");
        assert_eq!(groups[&main].len(), 2);

        let latest = latest_per_asset(&ids);
        let versions: Vec<_> = latest.iter().map(|id| id.version_number()).collect();
        assert_eq!(versions, vec![Some(5), Some(2)]);
    }
}
