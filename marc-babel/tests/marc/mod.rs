//! MARC format tests
//!
//! Parsing, canonical formatting and diagnostics against whole documents.

mod canonical;
mod diagnostics;
mod roundtrip;
