//! JavaScript injected into the shell window.
//!
//! Two scripts exist:
//! - The window initialization script, passed to the window builder so the
//!   `window.__LUNARY_*__` globals are available before any app code runs.
//! - The bridge shim, evaluated later by the deferred attachment task once
//!   the webview is fully constructed.
//!
//! Uses serde_json for safe string escaping to prevent injection attacks.

/// Property name under which the bridge is exposed to script code.
/// The app bundle hard-codes this; changing it breaks every widget feature.
pub const BINDING_NAME: &str = "AndroidWidgetBridge";

/// Initialization script for the shell window - sets globals the web app
/// reads during boot.
pub fn shell_init_script(language: &str, platform: &str) -> String {
    // serde_json::to_string handles all escaping edge cases (backslashes,
    // quotes, newlines, unicode).
    let language_json = serde_json::to_string(language).unwrap_or_else(|_| "\"en\"".to_string());
    let platform_json = serde_json::to_string(platform).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        r#"
    window.__LUNARY_LANGUAGE__ = {};
    window.__LUNARY_PLATFORM__ = {};
    "#,
        language_json, platform_json
    )
}

/// The bridge shim: assigns the binding object whose named methods forward a
/// tagged call through Tauri's invoke.
///
/// Plain assignment is what gives re-registration its overwrite semantics -
/// a second evaluation replaces the object instead of duplicating it.
pub fn bridge_shim(name: &str) -> String {
    let name_json = serde_json::to_string(name).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        r#"(function () {{
  var invoke = window.__TAURI__ && window.__TAURI__.core && window.__TAURI__.core.invoke;
  if (!invoke) {{
    console.error('[Lunary] Tauri invoke unavailable, widget bridge not attached');
    return;
  }}
  var call = function (payload) {{ return invoke('widget_bridge_call', {{ call: payload }}); }};
  window[{name}] = {{
    updateWidgetData: function (json) {{ return call({{ method: 'updateWidgetData', json: String(json) }}); }},
    clearWidgetData: function () {{ return call({{ method: 'clearWidgetData' }}); }},
    requestWidgetRefresh: function () {{ return call({{ method: 'requestWidgetRefresh' }}); }},
    getPlatform: function () {{ return call({{ method: 'getPlatform' }}); }},
    isWidgetSupported: function () {{ return call({{ method: 'isWidgetSupported' }}); }}
  }};
}})();"#,
        name = name_json
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shim_exposes_every_method_under_binding_name() {
        let shim = bridge_shim(BINDING_NAME);
        assert!(shim.contains("\"AndroidWidgetBridge\""));
        for method in [
            "updateWidgetData",
            "clearWidgetData",
            "requestWidgetRefresh",
            "getPlatform",
            "isWidgetSupported",
        ] {
            assert!(shim.contains(method), "shim is missing {}", method);
        }
    }

    #[test]
    fn test_init_script_escapes_interpolated_values() {
        let script = shell_init_script("de-\"DE\"", "android");
        assert!(script.contains(r#"window.__LUNARY_LANGUAGE__ = "de-\"DE\"";"#));
        assert!(script.contains(r#"window.__LUNARY_PLATFORM__ = "android";"#));
    }
}
