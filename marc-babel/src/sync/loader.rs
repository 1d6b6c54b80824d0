//! The document every session starts from

use super::document::{Document, FormatKind};
use super::hub::SyncHub;
use crate::convert::{ConversionError, Converter};
use thiserror::Error;

/// Primary text of the initial document.
pub const EXAMPLE: &str = include_str!("example.marc");

/// The example did not convert cleanly into every representation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("the initial document failed in {kind}: {}", .error.message)]
pub struct BootstrapError {
    pub kind: FormatKind,
    pub error: ConversionError,
}

impl<C: Converter> SyncHub<C> {
    /// Build the initial document by editing the example into an empty document.
    pub fn initial(&self) -> Result<Document, BootstrapError> {
        let doc = self.transition(Document::empty(), FormatKind::Primary, EXAMPLE);
        if let Some((kind, error)) = doc
            .slots()
            .find_map(|(kind, slot)| slot.error().map(|error| (kind, error.clone())))
        {
            return Err(BootstrapError { kind, error });
        }
        Ok(doc)
    }
}
