//! Shell configuration storage
//!
//! This module handles persistent storage for the Lunary shell:
//! - Window states per window label (shell_configs.json)
//! - UI language override

use crate::types::{ShellConfigs, WindowState};
use std::path::PathBuf;
use tauri::Manager;

/// Get the path to the shell configs JSON
pub fn get_shell_configs_path(app: &tauri::AppHandle) -> Result<PathBuf, String> {
    let data_dir = app.path().app_data_dir().map_err(|e| e.to_string())?;
    Ok(data_dir.join("shell_configs.json"))
}

/// Load shell configs from disk
pub fn load_shell_configs(app: &tauri::AppHandle) -> Result<ShellConfigs, String> {
    let path = get_shell_configs_path(app)?;
    if path.exists() {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read shell configs: {}", e))?;
        serde_json::from_str(&content).map_err(|e| format!("Failed to parse shell configs: {}", e))
    } else {
        Ok(ShellConfigs::default())
    }
}

/// Save shell configs to disk
pub fn save_shell_configs(app: &tauri::AppHandle, configs: &ShellConfigs) -> Result<(), String> {
    let path = get_shell_configs_path(app)?;

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;
    }

    let content = serde_json::to_string_pretty(configs)
        .map_err(|e| format!("Failed to serialize shell configs: {}", e))?;
    std::fs::write(&path, content).map_err(|e| format!("Failed to write shell configs: {}", e))
}

/// Get saved window state for a window label
pub fn get_window_state(app: &tauri::AppHandle, label: &str) -> Option<WindowState> {
    let configs = load_shell_configs(app).ok()?;
    configs.window_states.get(label).cloned()
}

/// Effective UI language: user override, then system locale, then "en"
pub fn get_effective_language(app: &tauri::AppHandle) -> String {
    if let Ok(configs) = load_shell_configs(app) {
        if let Some(lang) = configs.language {
            return lang;
        }
    }
    sys_locale::get_locale().unwrap_or_else(|| "en".to_string())
}

// ============================================================================
// Tauri Commands
// ============================================================================

/// Debug logging from JavaScript - prints to terminal
#[tauri::command]
pub fn js_log(message: String) {
    eprintln!("[Lunary] JS: {}", message);
}

/// Save window state for a window label
#[tauri::command]
pub fn save_window_state(
    app: tauri::AppHandle,
    label: String,
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    monitor_name: Option<String>,
    maximized: bool,
) -> Result<(), String> {
    eprintln!(
        "[Lunary] Saving window state for '{}': {}x{} at ({}, {}), maximized={}",
        label, width, height, x, y, maximized
    );
    let mut configs = load_shell_configs(&app)?;
    configs.window_states.insert(
        label,
        WindowState {
            width,
            height,
            x,
            y,
            monitor_name,
            maximized,
            saved_at: Some(chrono::Local::now().to_rfc3339()),
        },
    );
    save_shell_configs(&app, &configs)
}

/// Effective UI language for the web app
#[tauri::command]
pub fn get_language(app: tauri::AppHandle) -> String {
    get_effective_language(&app)
}

/// Set or clear the UI language override (None = follow the system locale)
#[tauri::command]
pub fn set_language(app: tauri::AppHandle, language: Option<String>) -> Result<(), String> {
    let mut configs = load_shell_configs(&app)?;
    configs.language = language;
    save_shell_configs(&app, &configs)
}

/// System locale as reported by the OS
#[tauri::command]
pub fn get_system_language() -> String {
    sys_locale::get_locale().unwrap_or_else(|| "en".to_string())
}
