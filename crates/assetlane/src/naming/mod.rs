//! Naming grammar and the codecs built on it.

pub mod codec;
pub mod grammar;
pub mod identity;
pub mod range;
pub mod shot;

pub use codec::{decode, decode_file_name, encode, split_extension};
pub use grammar::{AssetTypeDefinition, NamingGrammar, NumberedField, SubNameMode};
pub use identity::{
    AssetIdentity, AssetIdentityBuilder, BuiltIdentity, Counter, CriticalKey, IdentityStatus,
    DEFAULT_SUB_NAME,
};
pub use range::expand_range;
pub use shot::{shot_list, shot_number_for, shot_string_for, shot_string_from_number};
