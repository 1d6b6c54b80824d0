//! Synchronization hub tests with the real converter

mod isolation;
mod scenarios;
