//! Core types for the AI vs human paper tournament
//!
//! This crate holds what every other crate in the workspace agrees on:
//! - Paper entries with their lifecycle status and skill state
//! - Match records and the winner vocabulary
//! - The `Judge` trait that external comparison backends implement
//! - Seeded random generators derived from string keys

pub mod entry;
pub mod judge;
pub mod match_record;
pub mod seed;

pub use entry::*;
pub use judge::*;
pub use match_record::*;
pub use seed::*;
