//! Document state shared by the hub and the editor surfaces

use crate::convert::ConversionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four representations of a document. `Tree` is the pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatKind {
    Primary,
    Tree,
    Block,
    Table,
}

impl FormatKind {
    pub const ALL: [FormatKind; 4] = [
        FormatKind::Primary,
        FormatKind::Tree,
        FormatKind::Block,
        FormatKind::Table,
    ];

    /// Name of the format implementing this kind in the registry.
    pub fn name(self) -> &'static str {
        match self {
            FormatKind::Primary => "marc",
            FormatKind::Tree => "json",
            FormatKind::Block => "yaml",
            FormatKind::Table => "toml",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormatKind::Primary => "MARC",
            FormatKind::Tree => "JSON",
            FormatKind::Block => "YAML",
            FormatKind::Table => "TOML",
        }
    }

    pub fn is_pivot(self) -> bool {
        self == FormatKind::Tree
    }

    fn index(self) -> usize {
        match self {
            FormatKind::Primary => 0,
            FormatKind::Tree => 1,
            FormatKind::Block => 2,
            FormatKind::Table => 3,
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FormatKind {
    type Err = String;

    /// Accepts registry names, labels and tags, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormatKind::ALL
            .into_iter()
            .find(|kind| {
                s.eq_ignore_ascii_case(kind.name())
                    || s.eq_ignore_ascii_case(kind.label())
                    || s.eq_ignore_ascii_case(&format!("{kind:?}"))
            })
            .ok_or_else(|| format!("unknown format '{s}'"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "error", rename_all = "lowercase")]
pub enum SlotStatus {
    Ok,
    Err(ConversionError),
}

/// One representation. An errored slot shows the error message as its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub text: String,
    #[serde(flatten)]
    pub status: SlotStatus,
}

impl Slot {
    pub fn ok(text: impl Into<String>) -> Self {
        Slot {
            text: text.into(),
            status: SlotStatus::Ok,
        }
    }

    pub fn err(error: ConversionError) -> Self {
        Slot {
            text: error.message.clone(),
            status: SlotStatus::Err(error),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.status, SlotStatus::Err(_))
    }

    pub fn error(&self) -> Option<&ConversionError> {
        match &self.status {
            SlotStatus::Ok => None,
            SlotStatus::Err(error) => Some(error),
        }
    }
}

impl Default for Slot {
    fn default() -> Self {
        Slot::ok("")
    }
}

/// All four representations, plus the kind whose edit produced them.
///
/// Documents are plain values. The hub consumes one and returns the next; nothing is patched in
/// place behind a surface's back.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Document {
    slots: [Slot; 4],
    origin: Option<FormatKind>,
}

impl Document {
    /// Four empty, valid slots and no origin.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn slot(&self, kind: FormatKind) -> &Slot {
        &self.slots[kind.index()]
    }

    pub fn text(&self, kind: FormatKind) -> &str {
        &self.slot(kind).text
    }

    pub fn origin(&self) -> Option<FormatKind> {
        self.origin
    }

    pub fn slots(&self) -> impl Iterator<Item = (FormatKind, &Slot)> {
        FormatKind::ALL.into_iter().zip(self.slots.iter())
    }

    pub fn has_errors(&self) -> bool {
        self.slots.iter().any(Slot::is_error)
    }

    pub(crate) fn set(&mut self, kind: FormatKind, slot: Slot) {
        self.slots[kind.index()] = slot;
    }

    pub(crate) fn set_origin(&mut self, origin: FormatKind) {
        self.origin = Some(origin);
    }
}
