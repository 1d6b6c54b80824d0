//! Format implementations
//!
//! Each format converts between its text and the `serde_json::Value` tree used as the pivot.

pub mod json;
pub mod marc;
pub mod toml;
pub mod yaml;

pub use json::{JsonFormat, JsonOptions};
pub use marc::MarcFormat;
pub use toml::TomlFormat;
pub use yaml::YamlFormat;
