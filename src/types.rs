//! Core data types for the Lunary shell
//!
//! This module contains the shell's persisted data structures:
//! - Window state (size, position, monitor) per window label
//! - Shell-wide configuration storage

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Window state (size, position, monitor) for a shell window
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WindowState {
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
    /// Monitor name (may not be unique if multiple identical monitors)
    #[serde(default)]
    pub monitor_name: Option<String>,
    #[serde(default)]
    pub maximized: bool,
    /// RFC 3339 timestamp of the last save
    #[serde(default)]
    pub saved_at: Option<String>,
}

/// Shell-wide configuration, persisted to shell_configs.json
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ShellConfigs {
    /// Window states keyed by window label
    #[serde(default)]
    pub window_states: HashMap<String, WindowState>,
    /// UI language override (None = follow the system locale)
    #[serde(default)]
    pub language: Option<String>,
}
