//! Configuration management for daymark.
//!
//! This module handles loading and saving configuration from `~/.daymark/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, FocusConfig, GeneralConfig, TasksConfig};
