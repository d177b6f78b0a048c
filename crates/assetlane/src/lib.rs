//! Assetlane - File-name metadata for production assets
//!
//! Production files carry their identity in their names. Assetlane encodes
//! that identity, reads it back from a sequence tree, and picks the latest
//! file of each asset.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐     ┌──────────────┐     ┌────────────┐     ┌────────────┐
//! │ naming.toml│────▶│ NamingGrammar│────▶│  Scanner   │────▶│  Resolver  │
//! │  (config)  │     │ (codec rules)│     │ (dir walk) │     │  (latest)  │
//! └────────────┘     └──────────────┘     └────────────┘     └────────────┘
//! ```
//!
//! # Core Concepts
//!
//! - **Identity**: base name, sub-name, type, revision, version, user, notes
//! - **Critical key**: the part of an identity shared by all its versions
//! - **Repository**: `{sequence}/{type folder}/{base name}/{file}`

pub mod config;
pub mod error;
pub mod naming;
pub mod repository;
pub mod resolve;

// Re-exports for convenience
pub use config::NamingConfig;
pub use error::{NamingError, Result};
pub use naming::{
    decode, decode_file_name, encode, expand_range, shot_number_for, shot_string_for,
    AssetIdentity, AssetIdentityBuilder, AssetTypeDefinition, CriticalKey, IdentityStatus,
    NamingGrammar, SubNameMode,
};
pub use repository::{AssetRepository, RepositoryLayout, ScanResult, ScanStats, Scanner};
pub use resolve::{filter_assets, latest_asset, latest_revision, latest_version, AssetField, Constraints};
