//! Conversions through the pivot

mod pivot;
