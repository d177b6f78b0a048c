//! Naming configuration loaded from TOML.
//!
//! The file is the serde model; [`NamingConfig::into_grammar`] validates it
//! and produces the immutable [`NamingGrammar`] the rest of the crate uses.

use crate::error::{NamingError, Result};
use crate::naming::{AssetTypeDefinition, NamingGrammar, NumberedField, SubNameMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file name inside the assetlane home directory.
pub const CONFIG_FILE_NAME: &str = "naming.toml";

/// Main naming configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConfig {
    /// Field separator, exactly one character
    #[serde(default = "default_separator")]
    pub separator: String,

    #[serde(default)]
    pub sub_name_mode: SubNameMode,

    /// Extensions skipped while scanning (no leading dot)
    #[serde(default = "default_ignored_extensions")]
    pub ignored_extensions: Vec<String>,

    #[serde(default = "default_revision")]
    pub revision: NumberedFieldConfig,

    #[serde(default = "default_version")]
    pub version: NumberedFieldConfig,

    #[serde(default = "default_shot")]
    pub shot: NumberedFieldConfig,

    #[serde(default = "default_asset_types")]
    pub asset_types: Vec<AssetTypeDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberedFieldConfig {
    pub prefix: String,
    #[serde(default)]
    pub padding: usize,
}

impl NumberedFieldConfig {
    fn new(prefix: &str, padding: usize) -> Self {
        Self {
            prefix: prefix.to_string(),
            padding,
        }
    }
}

fn default_separator() -> String {
    "_".to_string()
}

fn default_ignored_extensions() -> Vec<String> {
    ["db", "tmp", "bak"].iter().map(|s| s.to_string()).collect()
}

fn default_revision() -> NumberedFieldConfig {
    NumberedFieldConfig::new("r", 2)
}

fn default_version() -> NumberedFieldConfig {
    NumberedFieldConfig::new("v", 3)
}

fn default_shot() -> NumberedFieldConfig {
    NumberedFieldConfig::new("SH", 3)
}

fn default_asset_types() -> Vec<AssetTypeDefinition> {
    let asset = |name: &str, path: &str, shot_dependent: bool, playblast: Option<&str>| {
        AssetTypeDefinition {
            name: name.to_string(),
            path: path.to_string(),
            shot_dependent,
            playblast_folder: playblast.map(str::to_string),
        }
    };
    vec![
        asset("MODEL", "01_ASSETS/MODEL", false, None),
        asset("RIG", "01_ASSETS/RIG", false, None),
        asset("LAYOUT", "02_SHOTS/LAYOUT", true, Some("PLAYBLAST")),
        asset("ANIM", "02_SHOTS/ANIM", true, Some("PLAYBLAST")),
        asset("LIGHT", "02_SHOTS/LIGHT", true, None),
        asset("COMP", "02_SHOTS/COMP", true, None),
    ]
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            sub_name_mode: SubNameMode::default(),
            ignored_extensions: default_ignored_extensions(),
            revision: default_revision(),
            version: default_version(),
            shot: default_shot(),
            asset_types: default_asset_types(),
        }
    }
}

/// Default config location: `<assetlane home>/naming.toml`
pub fn default_config_path() -> PathBuf {
    assetlane_logging::assetlane_home().join(CONFIG_FILE_NAME)
}

impl NamingConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| NamingError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| NamingError::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate and build the grammar.
    pub fn into_grammar(self) -> Result<NamingGrammar> {
        NamingGrammar::try_from(self)
    }
}

impl TryFrom<NamingConfig> for NamingGrammar {
    type Error = NamingError;

    fn try_from(config: NamingConfig) -> Result<Self> {
        let mut chars = config.separator.chars();
        let separator = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(NamingError::Config(format!(
                    "separator must be exactly one character, got '{}'",
                    config.separator
                )))
            }
        };

        let field = |label: &str, cfg: &NumberedFieldConfig| -> Result<NumberedField> {
            if cfg.prefix.contains(separator) {
                return Err(NamingError::Config(format!(
                    "{} prefix '{}' contains the separator",
                    label, cfg.prefix
                )));
            }
            if cfg.prefix.ends_with(|c: char| c.is_ascii_digit()) {
                return Err(NamingError::Config(format!(
                    "{} prefix '{}' must not end with a digit",
                    label, cfg.prefix
                )));
            }
            NumberedField::new(cfg.prefix.as_str(), cfg.padding)
                .map_err(|_| NamingError::Config(format!("{} prefix must not be empty", label)))
        };

        let mut grammar = NamingGrammar::new(
            separator,
            field("revision", &config.revision)?,
            field("version", &config.version)?,
            field("shot", &config.shot)?,
            config.sub_name_mode,
        )
        .with_ignored_extensions(&config.ignored_extensions);

        for definition in config.asset_types {
            grammar = grammar.with_asset_type(definition)?;
        }
        Ok(grammar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_builds() {
        let grammar = NamingConfig::default().into_grammar().unwrap();
        assert_eq!(grammar.separator(), '_');
        assert_eq!(grammar.format_revision(0), "r00");
        assert_eq!(grammar.format_version(2), "v002");
        assert_eq!(grammar.format_shot(1, ""), "SH001");
        assert_eq!(grammar.mode(), SubNameMode::WithSubName);
        assert!(grammar.asset_type_by_name("ANIM").is_some());
        assert!(grammar.is_ignored_extension("db"));
    }

    #[test]
    fn test_config_serialization() {
        let config = NamingConfig {
            sub_name_mode: SubNameMode::Legacy,
            ..NamingConfig::default()
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = NamingConfig::from_toml(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed = NamingConfig::from_toml(
            r#"
            separator = "-"
            sub_name_mode = "legacy"

            [version]
            prefix = "ver"
            padding = 4

            [[asset_types]]
            name = "FX"
            path = "05_FX"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.revision, default_revision());
        assert_eq!(parsed.asset_types.len(), 1);

        let grammar = parsed.into_grammar().unwrap();
        assert_eq!(grammar.separator(), '-');
        assert_eq!(grammar.format_version(7), "ver0007");
        assert_eq!(grammar.mode(), SubNameMode::Legacy);
        let fx = grammar.asset_type_by_name("FX").unwrap();
        assert!(!fx.shot_dependent);
        assert_eq!(fx.playblast_folder, None);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let bad = [
            NamingConfig {
                separator: "__".to_string(),
                ..NamingConfig::default()
            },
            NamingConfig {
                separator: String::new(),
                ..NamingConfig::default()
            },
            NamingConfig {
                version: NumberedFieldConfig::new("", 3),
                ..NamingConfig::default()
            },
            NamingConfig {
                revision: NumberedFieldConfig::new("r_", 2),
                ..NamingConfig::default()
            },
            NamingConfig {
                shot: NumberedFieldConfig::new("SH1", 3),
                ..NamingConfig::default()
            },
        ];
        for config in bad {
            assert!(matches!(config.into_grammar(), Err(NamingError::Config(_))));
        }
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
        let config = NamingConfig::default();
        config.save(&path).unwrap();
        assert_eq!(NamingConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        assert!(matches!(
            NamingConfig::from_toml("separator = ["),
            Err(NamingError::Config(_))
        ));
    }
}
