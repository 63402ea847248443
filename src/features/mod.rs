//! Feature modules for daymark.
//!
//! - Focus: countdown timer and session recording
//! - Stats: profile statistics

pub mod focus;
pub mod stats;
