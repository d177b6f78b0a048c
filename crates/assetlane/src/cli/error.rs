//! Helpful error types for CLI commands
//!
//! Every error includes:
//! - What went wrong
//! - Context about the situation
//! - Suggestions for how to fix it

use assetlane::NamingGrammar;
use std::fmt;
use std::path::Path;

/// An error with helpful context and suggestions
#[derive(Debug)]
pub struct HelpfulError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_suggestions(mut self, suggestions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.suggestions.extend(suggestions.into_iter().map(|s| s.into()));
        self
    }

    // === Common error constructors ===

    /// Sequence root does not exist
    pub fn sequence_not_found(path: &Path) -> Self {
        Self::new(format!("Sequence root not found: {}", path.display()))
            .with_context("Assets are looked up under {sequence}/{type folder}/{base name}")
            .with_suggestions([
                format!("TRY: Check that the path exists: ls -la {}", path.display()),
                "TRY: Pass the sequence folder, not a type or asset folder".to_string(),
            ])
    }

    /// Type name not in the configured asset types
    pub fn unknown_asset_type(name: &str, grammar: &NamingGrammar) -> Self {
        let known: Vec<&str> = grammar.asset_types().map(|t| t.name.as_str()).collect();
        Self::new(format!("Unknown asset type: {}", name))
            .with_context(format!("Configured types: {}", known.join(", ")))
            .with_suggestions([
                "TRY: Type names are case sensitive".to_string(),
                "TRY: Add the type to [[asset_types]] in the naming config".to_string(),
                "TRY: Inspect the active config: assetlane config show".to_string(),
            ])
    }

    /// Explicit config path that does not exist
    pub fn config_not_found(path: &Path) -> Self {
        Self::new(format!("Config file not found: {}", path.display()))
            .with_context("An explicit --config path must exist")
            .with_suggestions([
                format!("TRY: Create it with defaults: assetlane --config {} config init", path.display()),
                "TRY: Omit --config to use the built-in defaults".to_string(),
            ])
    }

    /// Config init over an existing file
    pub fn config_exists(path: &Path) -> Self {
        Self::new(format!("Config file already exists: {}", path.display()))
            .with_suggestion("TRY: Overwrite it: assetlane config init --force")
            .with_suggestion("TRY: Inspect it: assetlane config show")
    }

    /// Malformed --filter argument
    pub fn invalid_filter(filter: &str) -> Self {
        Self::new(format!("Invalid filter: {}", filter))
            .with_context("Filters have the form field=value")
            .with_suggestions([
                "TRY: --filter version=3".to_string(),
                "TRY: --filter userInitials=ab".to_string(),
                "Fields: baseName, subName, typeName, revision, revisionString, version, versionString, userInitials, notes, fileName".to_string(),
            ])
    }

    /// Shot token without any digits
    pub fn no_shot_number(token: &str) -> Self {
        Self::new(format!("No shot number in '{}'", token))
            .with_context("A shot token needs at least one digit, e.g. 10, SH010, 10a")
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}
