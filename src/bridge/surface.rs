//! Tauri-backed script surface.

use std::sync::atomic::{AtomicU64, Ordering};

use tauri::Manager;

use super::registrar::ScriptSurface;

/// Process-wide surface generation counter. A recreated window (same label)
/// gets a larger generation, which is what lets the registry refuse bindings
/// from tasks that outlived their surface.
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// A shell webview window as seen by the registrar.
///
/// Holds the app handle and the window label, never the window itself - the
/// window may not exist yet when the handle is created, and may be gone by
/// the time the posted task runs.
pub struct TauriSurface {
    app: tauri::AppHandle,
    label: String,
    generation: u64,
}

impl TauriSurface {
    /// Handle for the window with `label`. Create one per window creation.
    pub fn new(app: tauri::AppHandle, label: &str) -> Self {
        Self {
            app,
            label: label.to_string(),
            generation: NEXT_GENERATION.fetch_add(1, Ordering::SeqCst),
        }
    }
}

impl ScriptSurface for TauriSurface {
    fn label(&self) -> &str {
        &self.label
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn post_task(&self, task: Box<dyn FnOnce() + Send + 'static>) -> Result<(), String> {
        self.app.run_on_main_thread(task).map_err(|e| e.to_string())
    }

    fn is_alive(&self) -> bool {
        self.app.get_webview_window(&self.label).is_some()
    }

    fn eval_script(&self, script: &str) -> Result<(), String> {
        match self.app.get_webview_window(&self.label) {
            Some(window) => window.eval(script).map_err(|e| e.to_string()),
            None => Err(format!("window '{}' is gone", self.label)),
        }
    }
}
