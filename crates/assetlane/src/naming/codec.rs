//! File-name codec.
//!
//! Wire format, with `_` standing for the grammar separator:
//!
//! ```text
//! {base}_{sub}_{type}_{rev}_{ver}_{user}[_{notes}].{ext}   with sub-name
//! {base}_{type}_{rev}_{ver}_{user}[_{notes}].{ext}         legacy
//! ```
//!
//! Notes are the trailing remainder, so they may contain separators. The
//! extension is everything after the last dot, so it never contains one,
//! and a name without an extension must not contain a dot at all.

use super::grammar::{NamingGrammar, SubNameMode};
use super::identity::{AssetIdentity, Counter};
use crate::error::{NamingError, Result};

/// Formats a full-valid identity as a file name.
pub fn encode(identity: &AssetIdentity, grammar: &NamingGrammar) -> Result<String> {
    if !identity.is_full_valid() {
        return Err(NamingError::Validation(format!(
            "'{}' is not complete enough to name a file",
            identity.critical_key()
        )));
    }
    if grammar.asset_type_by_name(&identity.type_name).is_none() {
        return Err(NamingError::Validation(format!(
            "unknown asset type '{}'",
            identity.type_name
        )));
    }
    identity.check(grammar)?;

    let mut parts: Vec<&str> = Vec::with_capacity(7);
    parts.push(&identity.base_name);
    if grammar.mode() == SubNameMode::WithSubName {
        parts.extend(identity.sub_name.as_deref());
    }
    parts.push(&identity.type_name);
    parts.extend(identity.revision_string());
    parts.extend(identity.version_string());
    parts.extend(identity.user_initials.as_deref());
    if !identity.notes.is_empty() {
        parts.push(&identity.notes);
    }

    let mut name = parts.join(&grammar.separator().to_string());
    match identity.extension.as_deref().filter(|e| !e.is_empty()) {
        Some(ext) => {
            name.push('.');
            name.push_str(ext);
        }
        // the last dot would be read back as an extension
        None if name.contains('.') => {
            return Err(NamingError::Validation(format!(
                "'{}' has no extension and must not contain '.'",
                name
            )));
        }
        None => {}
    }
    Ok(name)
}

/// Decodes a file name including its extension.
pub fn decode_file_name(file_name: &str, grammar: &NamingGrammar) -> Result<AssetIdentity> {
    let (stem, extension) = split_extension(file_name);
    let mut identity = decode(stem, grammar)?;
    identity.extension = extension.map(str::to_string);
    Ok(identity)
}

/// Decodes a file name whose extension was already removed.
///
/// Only the part count is checked here; whether the counters match the
/// grammar is left to [`AssetIdentity::is_valid`].
pub fn decode(stem: &str, grammar: &NamingGrammar) -> Result<AssetIdentity> {
    let parts: Vec<&str> = stem.split(grammar.separator()).collect();

    let (required, sub_name, rest) = match grammar.mode() {
        SubNameMode::WithSubName => (5, parts.get(1).map(|s| s.to_string()), parts.get(2..)),
        SubNameMode::Legacy => (4, None, parts.get(1..)),
    };
    if parts.len() < required {
        return Err(NamingError::Parse {
            name: stem.to_string(),
            required,
            found: parts.len(),
        });
    }
    // rest: type, rev, ver, [user], [notes...]
    let rest = rest.unwrap_or_default();

    let notes = rest
        .get(4..)
        .map(|tail| tail.join(&grammar.separator().to_string()))
        .unwrap_or_default();

    Ok(AssetIdentity {
        base_name: parts[0].to_string(),
        sub_name,
        type_name: rest[0].to_string(),
        revision: Some(Counter::parsed(grammar.revision(), rest[1])),
        version: Some(Counter::parsed(grammar.version(), rest[2])),
        user_initials: rest.get(3).filter(|u| !u.is_empty()).map(|u| u.to_string()),
        notes,
        extension: None,
        path: None,
    })
}

/// Splits at the last dot. Names without a stem or extension around it
/// are returned whole.
pub fn split_extension(file_name: &str) -> (&str, Option<&str>) {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => (stem, Some(ext)),
        _ => (file_name, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NamingConfig;
    use crate::naming::identity::AssetIdentityBuilder;

    fn grammar() -> NamingGrammar {
        NamingConfig::default().into_grammar().unwrap()
    }

    fn legacy() -> NamingGrammar {
        NamingConfig {
            sub_name_mode: SubNameMode::Legacy,
            ..NamingConfig::default()
        }
        .into_grammar()
        .unwrap()
    }

    fn anim(grammar: &NamingGrammar, notes: &str) -> AssetIdentity {
        AssetIdentityBuilder::new()
            .base_name("SH010")
            .sub_name("MAIN")
            .type_name("ANIM")
            .revision(0)
            .version(2)
            .user_initials("ab")
            .notes(notes)
            .extension("ma")
            .build(grammar)
            .unwrap()
            .identity
    }

    #[test]
    fn decodes_reference_name() {
        let id = decode_file_name("SH010_MAIN_ANIM_r00_v002_ab_first pass.ma", &grammar()).unwrap();
        assert_eq!(id.base_name, "SH010");
        assert_eq!(id.sub_name.as_deref(), Some("MAIN"));
        assert_eq!(id.type_name, "ANIM");
        assert_eq!(id.revision_number(), Some(0));
        assert_eq!(id.version_number(), Some(2));
        assert_eq!(id.user_initials.as_deref(), Some("ab"));
        assert_eq!(id.notes, "first pass");
        assert_eq!(id.extension.as_deref(), Some("ma"));
    }

    #[test]
    fn encodes_with_and_without_notes() {
        let g = grammar();
        assert_eq!(
            encode(&anim(&g, "first pass"), &g).unwrap(),
            "SH010_MAIN_ANIM_r00_v002_ab_first pass.ma"
        );
        assert_eq!(encode(&anim(&g, ""), &g).unwrap(), "SH010_MAIN_ANIM_r00_v002_ab.ma");
    }

    #[test]
    fn round_trips_notes_containing_separators() {
        let g = grammar();
        for notes in ["", "wip", "fix_hands_and_feet", "v2 of the_blocking"] {
            let id = anim(&g, notes);
            let decoded = decode_file_name(&encode(&id, &g).unwrap(), &g).unwrap();
            assert_eq!(decoded, id, "notes {notes:?}");
        }
    }

    #[test]
    fn dotted_notes_round_trip_only_with_extension() {
        let g = grammar();
        let id = anim(&g, "take 1.5");
        let name = encode(&id, &g).unwrap();
        assert_eq!(name, "SH010_MAIN_ANIM_r00_v002_ab_take 1.5.ma");
        assert_eq!(decode_file_name(&name, &g).unwrap(), id);

        let mut bare = id.clone();
        bare.extension = None;
        assert!(matches!(encode(&bare, &g), Err(NamingError::Validation(_))));

        bare.notes = "take 1".to_string();
        let name = encode(&bare, &g).unwrap();
        assert_eq!(decode_file_name(&name, &g).unwrap(), bare);
    }

    #[test]
    fn encode_rejects_fields_that_would_not_decode() {
        let g = grammar();
        let mut dotted_ext = anim(&g, "");
        dotted_ext.extension = Some("tar.gz".to_string());
        assert!(matches!(encode(&dotted_ext, &g), Err(NamingError::Validation(_))));

        let mut split_user = anim(&g, "");
        split_user.user_initials = Some("a_b".to_string());
        assert!(matches!(encode(&split_user, &g), Err(NamingError::Validation(_))));
    }

    #[test]
    fn legacy_round_trip_skips_sub_name() {
        let g = legacy();
        let id = anim(&g, "notes_with_parts");
        let name = encode(&id, &g).unwrap();
        assert_eq!(name, "SH010_ANIM_r00_v002_ab_notes_with_parts.ma");
        let decoded = decode_file_name(&name, &g).unwrap();
        assert_eq!(decoded.user_initials.as_deref(), Some("ab"));
        assert_eq!(decoded.notes, "notes_with_parts");
        assert_eq!(decoded, id);
    }

    #[test]
    fn too_few_parts_is_parse_error() {
        let g = grammar();
        match decode("SH010_MAIN_ANIM", &g) {
            Err(NamingError::Parse { required, found, .. }) => {
                assert_eq!(required, 5);
                assert_eq!(found, 3);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
        assert!(matches!(decode("SH010_ANIM_r00", &legacy()), Err(NamingError::Parse { .. })));
    }

    #[test]
    fn decode_does_not_validate_counters() {
        let g = grammar();
        let id = decode("SH010_MAIN_ANIM_rXX_v002_ab", &g).unwrap();
        assert_eq!(id.revision_string(), Some("rXX"));
        assert_eq!(id.revision_number(), None);
        assert!(!id.is_valid(&g));
    }

    #[test]
    fn decode_without_user_initials_is_not_valid() {
        let g = grammar();
        let id = decode("SH010_MAIN_ANIM_r00_v002", &g).unwrap();
        assert_eq!(id.user_initials, None);
        assert!(!id.is_valid(&g));
    }

    #[test]
    fn encode_rejects_incomplete_identity() {
        let g = grammar();
        let base_only = AssetIdentityBuilder::new()
            .base_name("SH010")
            .type_name("ANIM")
            .build(&g)
            .unwrap()
            .identity;
        assert!(matches!(encode(&base_only, &g), Err(NamingError::Validation(_))));

        let mut odd = anim(&g, "");
        odd.version = Some(Counter::parsed(g.version(), "version2"));
        assert!(matches!(encode(&odd, &g), Err(NamingError::Format { .. })));

        let mut unknown = anim(&g, "");
        unknown.type_name = "SOUND".to_string();
        assert!(matches!(encode(&unknown, &g), Err(NamingError::Validation(_))));
    }

    #[test]
    fn split_extension_handles_edge_names() {
        assert_eq!(split_extension("a_b.ma"), ("a_b", Some("ma")));
        assert_eq!(split_extension("notes v1.2.ma"), ("notes v1.2", Some("ma")));
        assert_eq!(split_extension("noext"), ("noext", None));
        assert_eq!(split_extension(".hidden"), (".hidden", None));
        assert_eq!(split_extension("trailing."), ("trailing.", None));
    }
}
