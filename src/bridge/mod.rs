//! The widget bridge: the one native capability the shell exposes to script code.
//!
//! Script code reaches the bridge through a single well-known binding
//! (`window.AndroidWidgetBridge`, see [`init_script::BINDING_NAME`]) that the
//! registrar attaches to the webview after the shell has finished booting.
//! Dispatch is a fixed enumerated set of operations - no reflection - and the
//! marshaled argument and return types are primitives and strings only.
//!
//! The widget subsystem itself (home-screen rendering, persistence, update
//! scheduling) lives behind the [`WidgetHost`] trait; the bridge only carries
//! calls across the script/native boundary.

pub mod init_script;
pub mod registrar;
pub mod surface;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Operations script code can invoke on the bridge.
///
/// The serde tags are the script-facing method names; the app bundle
/// hard-codes them, so they are part of the compatibility surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum BridgeCall {
    /// Hand a serialized widget payload to the widget subsystem.
    /// The payload is opaque to the shell.
    UpdateWidgetData { json: String },
    /// Drop any previously handed-over widget payload.
    ClearWidgetData,
    /// Redraw home-screen widgets from the currently stored payload.
    RequestWidgetRefresh,
    /// Name of the platform the shell is running on.
    GetPlatform,
    /// Whether this platform has home-screen widgets at all.
    IsWidgetSupported,
}

/// Values the script/native boundary marshals back to script code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BridgeValue {
    Null,
    Bool(bool),
    Text(String),
}

/// Platform side of the bridge: the widget subsystem the shell delegates to.
pub trait WidgetHost: Send + Sync {
    /// Store a new widget payload.
    fn update_data(&self, payload: &str) -> Result<(), String>;

    /// Remove the stored payload.
    fn clear_data(&self) -> Result<(), String>;

    /// Redraw widgets from whatever payload is currently stored.
    fn request_refresh(&self) -> Result<(), String>;

    /// Whether home-screen widgets exist on this platform.
    fn is_supported(&self) -> bool;
}

/// Host for platforms without home-screen widgets.
///
/// Acknowledges every call so script code behaves identically everywhere;
/// `isWidgetSupported` still reports false.
pub struct NullWidgetHost;

impl WidgetHost for NullWidgetHost {
    fn update_data(&self, payload: &str) -> Result<(), String> {
        eprintln!(
            "[Widget Bridge] No widget host on this platform, dropping {} byte payload",
            payload.len()
        );
        Ok(())
    }

    fn clear_data(&self) -> Result<(), String> {
        Ok(())
    }

    fn request_refresh(&self) -> Result<(), String> {
        Ok(())
    }

    fn is_supported(&self) -> bool {
        false
    }
}

/// The native object script code talks to, constructed once per registration.
///
/// Stateless beyond its single injected dependency; all calls for a given
/// surface are serialized by that surface's execution context, so no locking
/// happens here.
pub struct WidgetBridge {
    host: Arc<dyn WidgetHost>,
    platform: String,
}

impl WidgetBridge {
    pub fn new(host: Arc<dyn WidgetHost>, platform: &str) -> Self {
        Self {
            host,
            platform: platform.to_string(),
        }
    }

    /// Execute one bridge operation.
    pub fn dispatch(&self, call: BridgeCall) -> Result<BridgeValue, String> {
        match call {
            BridgeCall::UpdateWidgetData { json } => {
                self.host.update_data(&json)?;
                Ok(BridgeValue::Null)
            }
            BridgeCall::ClearWidgetData => {
                self.host.clear_data()?;
                Ok(BridgeValue::Null)
            }
            BridgeCall::RequestWidgetRefresh => {
                self.host.request_refresh()?;
                Ok(BridgeValue::Null)
            }
            BridgeCall::GetPlatform => Ok(BridgeValue::Text(self.platform.clone())),
            BridgeCall::IsWidgetSupported => Ok(BridgeValue::Bool(self.host.is_supported())),
        }
    }
}

// ============================================================================
// Tauri Commands
// ============================================================================

/// Entry point for script-side bridge calls.
///
/// Resolves the binding for the calling window and dispatches. An unbound
/// window is an error, which the shim surfaces as a rejected promise.
#[tauri::command]
pub fn widget_bridge_call(
    window: tauri::WebviewWindow,
    registry: tauri::State<'_, Arc<registrar::BridgeRegistry>>,
    call: BridgeCall,
) -> Result<BridgeValue, String> {
    match registry.lookup(window.label()) {
        Some(bridge) => bridge.dispatch(call),
        None => Err(format!(
            "widget bridge is not bound for window '{}'",
            window.label()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingHost {
        updates: Mutex<Vec<String>>,
        cleared: Mutex<u32>,
        refreshes: Mutex<u32>,
    }

    impl RecordingHost {
        fn new() -> Self {
            Self {
                updates: Mutex::new(Vec::new()),
                cleared: Mutex::new(0),
                refreshes: Mutex::new(0),
            }
        }
    }

    impl WidgetHost for RecordingHost {
        fn update_data(&self, payload: &str) -> Result<(), String> {
            self.updates.lock().unwrap().push(payload.to_string());
            Ok(())
        }

        fn clear_data(&self) -> Result<(), String> {
            *self.cleared.lock().unwrap() += 1;
            Ok(())
        }

        fn request_refresh(&self) -> Result<(), String> {
            *self.refreshes.lock().unwrap() += 1;
            Ok(())
        }

        fn is_supported(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_dispatch_reaches_host() {
        let host = Arc::new(RecordingHost::new());
        let bridge = WidgetBridge::new(host.clone(), "android");

        let result = bridge
            .dispatch(BridgeCall::UpdateWidgetData {
                json: r#"{"moon":{"phase":"Full Moon"}}"#.to_string(),
            })
            .unwrap();
        assert_eq!(result, BridgeValue::Null);
        assert_eq!(
            host.updates.lock().unwrap().as_slice(),
            &[r#"{"moon":{"phase":"Full Moon"}}"#.to_string()]
        );

        bridge.dispatch(BridgeCall::ClearWidgetData).unwrap();
        bridge.dispatch(BridgeCall::RequestWidgetRefresh).unwrap();
        assert_eq!(*host.cleared.lock().unwrap(), 1);
        assert_eq!(*host.refreshes.lock().unwrap(), 1);
    }

    #[test]
    fn test_platform_and_support_queries() {
        let bridge = WidgetBridge::new(Arc::new(RecordingHost::new()), "android");
        assert_eq!(
            bridge.dispatch(BridgeCall::GetPlatform).unwrap(),
            BridgeValue::Text("android".to_string())
        );
        assert_eq!(
            bridge.dispatch(BridgeCall::IsWidgetSupported).unwrap(),
            BridgeValue::Bool(true)
        );

        let null_bridge = WidgetBridge::new(Arc::new(NullWidgetHost), "linux");
        assert_eq!(
            null_bridge.dispatch(BridgeCall::IsWidgetSupported).unwrap(),
            BridgeValue::Bool(false)
        );
    }

    #[test]
    fn test_call_deserializes_from_script_shape() {
        // The exact JSON the shim sends for each method.
        let call: BridgeCall =
            serde_json::from_str(r#"{"method":"updateWidgetData","json":"{}"}"#).unwrap();
        match call {
            BridgeCall::UpdateWidgetData { json } => assert_eq!(json, "{}"),
            other => panic!("unexpected call: {:?}", other),
        }

        let call: BridgeCall = serde_json::from_str(r#"{"method":"isWidgetSupported"}"#).unwrap();
        assert!(matches!(call, BridgeCall::IsWidgetSupported));
    }

    #[test]
    fn test_values_marshal_as_primitives() {
        assert_eq!(serde_json::to_string(&BridgeValue::Null).unwrap(), "null");
        assert_eq!(
            serde_json::to_string(&BridgeValue::Bool(false)).unwrap(),
            "false"
        );
        assert_eq!(
            serde_json::to_string(&BridgeValue::Text("ios".to_string())).unwrap(),
            "\"ios\""
        );
    }
}
