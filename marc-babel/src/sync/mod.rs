//! Keeping the four representations of a document in step
//!
//! - [`document`]: the value passed between the hub and the editor surfaces
//! - [`hub`]: transitions and the formatter trigger
//! - [`loader`]: the initial document

pub mod document;
pub mod hub;
pub mod loader;

pub use document::{Document, FormatKind, Slot, SlotStatus};
pub use hub::SyncHub;
pub use loader::{BootstrapError, EXAMPLE};
