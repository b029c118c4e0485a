//! Lunary native shell.
//!
//! Boots the web-view-hosted UI and exposes the widget bridge to the script
//! layer. The shell stays thin: window management, configuration, and the
//! bridge registration hook. What the widgets actually do lives in the widget
//! subsystem behind [`bridge::WidgetHost`].

use std::sync::Arc;

use tauri::{Manager, WebviewUrl, WebviewWindowBuilder};

pub mod bridge;
pub mod shell_storage;
pub mod types;

use bridge::registrar::BridgeRegistry;
use bridge::surface::TauriSurface;
use bridge::{NullWidgetHost, WidgetBridge};

/// Label of the shell's single UI window
const MAIN_WINDOW_LABEL: &str = "main";

/// Platform name reported through the bridge
fn platform_name() -> &'static str {
    if cfg!(target_os = "android") {
        "android"
    } else if cfg!(target_os = "ios") {
        "ios"
    } else {
        std::env::consts::OS
    }
}

/// Create the shell window, restoring saved geometry when present.
fn create_main_window(
    app: &tauri::App,
    saved_state: Option<&types::WindowState>,
) -> Result<tauri::WebviewWindow, tauri::Error> {
    let (width, height) = saved_state
        .map(|s| (s.width as f64, s.height as f64))
        .unwrap_or((420.0, 860.0));

    let language = shell_storage::get_effective_language(&app.handle());
    eprintln!("[Lunary] UI language: {}", language);

    let mut builder = WebviewWindowBuilder::new(
        app,
        MAIN_WINDOW_LABEL,
        WebviewUrl::App("index.html".into()),
    )
    .title("Lunary")
    .inner_size(width, height)
    .initialization_script(&bridge::init_script::shell_init_script(
        &language,
        platform_name(),
    ))
    .devtools(cfg!(debug_assertions)); // Only enable in debug builds

    if let Some(state) = saved_state {
        builder = builder.position(state.x as f64, state.y as f64);
    }

    let window = builder.build()?;

    if saved_state.map(|s| s.maximized).unwrap_or(false) {
        let _ = window.maximize();
    }

    Ok(window)
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            // Binding registry shared with the widget_bridge_call command
            let registry = Arc::new(BridgeRegistry::new());
            app.manage(registry.clone());

            // Phase 1: boot the shell window synchronously. The saved state
            // blob only feeds window geometry; the registrar never sees it.
            let saved_state = shell_storage::get_window_state(&app.handle(), MAIN_WINDOW_LABEL);
            create_main_window(app, saved_state.as_ref())?;

            // Phase 2: the bridge attaches later, as a one-shot task on the
            // surface's own thread, once the window is fully constructed.
            // The widget subsystem supplies a real host on mobile builds;
            // everywhere else the null host keeps script behavior identical.
            let surface = Arc::new(TauriSurface::new(
                app.handle().clone(),
                MAIN_WINDOW_LABEL,
            ));
            bridge::registrar::register(
                surface,
                registry,
                bridge::init_script::BINDING_NAME,
                || WidgetBridge::new(Arc::new(NullWidgetHost), platform_name()),
            );

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            bridge::widget_bridge_call,
            shell_storage::js_log,
            shell_storage::save_window_state,
            shell_storage::get_language,
            shell_storage::set_language,
            shell_storage::get_system_language,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
