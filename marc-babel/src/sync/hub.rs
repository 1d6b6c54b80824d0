//! The synchronization hub
//!
//! Every edit is a transition from one [`Document`] to the next. The edited text is accepted as
//! is; everything else is derived from it through the pivot:
//!
//! ```text
//!   edited ──to_tree──▶ Tree ──from_tree──▶ each remaining kind
//! ```
//!
//! A failed `to_tree` leaves no pivot, so every other slot shows that failure. A failed
//! `from_tree` only affects its own target. Editing `Tree` skips the first hop and keeps the
//! typed text verbatim.

use super::document::{Document, FormatKind, Slot};
use crate::convert::{BabelConverter, Converter};

pub struct SyncHub<C = BabelConverter> {
    converter: C,
}

impl<C: Converter> SyncHub<C> {
    pub fn new(converter: C) -> Self {
        Self { converter }
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    /// Apply an edit of `edited` to `doc`.
    pub fn transition(&self, mut doc: Document, edited: FormatKind, new_text: &str) -> Document {
        tracing::debug!(?edited, len = new_text.len(), "Transition");
        doc.set(edited, Slot::ok(new_text));
        doc.set_origin(edited);

        let pivot = if edited.is_pivot() {
            new_text.to_string()
        } else {
            match self.converter.to_tree(edited, new_text) {
                Ok(pivot) => {
                    doc.set(FormatKind::Tree, Slot::ok(pivot.clone()));
                    pivot
                }
                Err(error) => {
                    tracing::warn!(?edited, kind = %error.kind, "No pivot, all derived slots fail");
                    for kind in FormatKind::ALL.into_iter().filter(|k| *k != edited) {
                        doc.set(kind, Slot::err(error.clone()));
                    }
                    return doc;
                }
            }
        };

        for target in FormatKind::ALL
            .into_iter()
            .filter(|k| *k != edited && !k.is_pivot())
        {
            let slot = match self.converter.from_tree(target, &pivot) {
                Ok(text) => Slot::ok(text),
                Err(error) => {
                    tracing::debug!(?target, %error, "Derived slot failed");
                    Slot::err(error)
                }
            };
            doc.set(target, slot);
        }
        doc
    }

    /// Canonicalize the primary text and cascade the result. A document whose primary text
    /// cannot be canonicalized comes back unchanged.
    pub fn reformat(&self, doc: Document) -> Document {
        let primary = doc.text(FormatKind::Primary);
        match self.converter.canonicalize(primary) {
            Ok(formatted) => {
                if formatted == primary {
                    tracing::debug!("Primary text already canonical");
                }
                self.transition(doc, FormatKind::Primary, &formatted)
            }
            Err(error) => {
                tracing::debug!(%error, "Reformat skipped");
                doc
            }
        }
    }
}

impl Default for SyncHub<BabelConverter> {
    fn default() -> Self {
        Self::new(BabelConverter::default())
    }
}
