//! Storage layer for daymark.
//!
//! This module provides SQLite-based persistence for:
//! - Tasks and their lifecycle status
//! - The profile row with focus-timer aggregates

mod database;
mod migrations;

pub use database::{Database, Location};
