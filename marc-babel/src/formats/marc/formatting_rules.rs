use serde::{Deserialize, Serialize};

/// Configuration for the marc serializer and formatter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattingRules {
    /// Blank lines the serializer puts between top-level groups of entries
    pub blank_lines_between_groups: usize,

    /// Maximum number of consecutive blank lines kept by the formatter
    pub max_blank_lines: usize,

    /// Whether strings are written raw (`'...'`, `'''...'''`) whenever they can be
    pub prefer_raw_strings: bool,
}

impl Default for FormattingRules {
    fn default() -> Self {
        Self {
            blank_lines_between_groups: 1,
            max_blank_lines: 1,
            prefer_raw_strings: true,
        }
    }
}
