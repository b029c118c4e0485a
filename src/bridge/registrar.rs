//! Deferred, single-shot attachment of the widget bridge to a script surface.
//!
//! The host shell constructs its script surface asynchronously relative to the
//! registrar's own startup call, so `register` never touches the surface
//! directly. It posts one task onto the surface's own execution context and
//! lets that task do the attachment once the surface is fully constructed.
//! A surface torn down before the task runs makes the task a silent no-op,
//! never an error.
//!
//! Bindings live in a [`BridgeRegistry`] keyed by window label. Re-registration
//! (shell recreation, rotation restarts) replaces the previous binding; a task
//! left over from a destroyed surface generation cannot displace the binding
//! of a newer one.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::init_script;
use super::WidgetBridge;

/// A script-execution surface the bridge can be attached to.
///
/// Production code wraps a Tauri webview window ([`super::surface::TauriSurface`]);
/// tests drive a fake with a manual task queue.
pub trait ScriptSurface: Send + Sync + 'static {
    /// Window label, shared by every recreation of this surface.
    fn label(&self) -> &str;

    /// Creation generation; a recreated surface gets a larger value.
    fn generation(&self) -> u64;

    /// Schedule a task on the surface's own execution context.
    /// Err means the owning event loop is already gone and the task was dropped.
    fn post_task(&self, task: Box<dyn FnOnce() + Send + 'static>) -> Result<(), String>;

    /// Whether the surface still exists and can accept bindings.
    fn is_alive(&self) -> bool;

    /// Evaluate JavaScript in the surface.
    fn eval_script(&self, script: &str) -> Result<(), String>;
}

/// Binding lifecycle. `Bound` is terminal; there is no way back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingState {
    Unbound,
    Bound,
}

/// Observable handle for one registration attempt.
pub struct Registration {
    state: Mutex<BindingState>,
}

impl Registration {
    fn new() -> Self {
        Self {
            state: Mutex::new(BindingState::Unbound),
        }
    }

    pub fn state(&self) -> BindingState {
        *self.state.lock().unwrap()
    }

    fn mark_bound(&self) {
        *self.state.lock().unwrap() = BindingState::Bound;
    }
}

struct BoundBridge {
    generation: u64,
    bridge: Arc<WidgetBridge>,
}

/// At most one bound bridge per window label.
pub struct BridgeRegistry {
    bindings: Mutex<HashMap<String, BoundBridge>>,
}

impl BridgeRegistry {
    pub fn new() -> Self {
        Self {
            bindings: Mutex::new(HashMap::new()),
        }
    }

    /// Record a binding, replacing any previous one for the label.
    /// Returns false when a newer surface generation already holds the slot.
    fn bind(&self, label: &str, generation: u64, bridge: Arc<WidgetBridge>) -> bool {
        let mut bindings = self.bindings.lock().unwrap();
        if let Some(existing) = bindings.get(label) {
            if existing.generation > generation {
                return false;
            }
        }
        bindings.insert(label.to_string(), BoundBridge { generation, bridge });
        true
    }

    /// Bridge bound for a window label, if any.
    pub fn lookup(&self, label: &str) -> Option<Arc<WidgetBridge>> {
        self.bindings
            .lock()
            .unwrap()
            .get(label)
            .map(|b| b.bridge.clone())
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.lock().unwrap().len()
    }
}

impl Default for BridgeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Attach a widget bridge to `surface` under the well-known binding name.
///
/// Returns immediately; the attachment itself runs later as a single task on
/// the surface's execution context. The returned handle reports whether the
/// binding has happened yet.
pub fn register<S, F>(
    surface: Arc<S>,
    registry: Arc<BridgeRegistry>,
    name: &'static str,
    factory: F,
) -> Arc<Registration>
where
    S: ScriptSurface,
    F: FnOnce() -> WidgetBridge + Send + 'static,
{
    let registration = Arc::new(Registration::new());
    let task_registration = registration.clone();
    let task_surface = surface.clone();

    let posted = surface.post_task(Box::new(move || {
        // The surface may have been torn down between posting and execution.
        if !task_surface.is_alive() {
            eprintln!(
                "[Widget Bridge] Surface '{}' gone before attachment, skipping",
                task_surface.label()
            );
            return;
        }

        let bridge = Arc::new(factory());
        if !registry.bind(task_surface.label(), task_surface.generation(), bridge) {
            // A recreated surface already bound a newer bridge.
            eprintln!(
                "[Widget Bridge] Stale attachment for surface '{}' ignored",
                task_surface.label()
            );
            return;
        }

        match task_surface.eval_script(&init_script::bridge_shim(name)) {
            Ok(()) => {
                task_registration.mark_bound();
                eprintln!(
                    "[Widget Bridge] Bound '{}' on surface '{}'",
                    name,
                    task_surface.label()
                );
            }
            Err(e) => eprintln!("[Widget Bridge] Shim injection failed: {}", e),
        }
    }));

    if let Err(e) = posted {
        // Event loop already gone; the registration simply stays unbound.
        eprintln!("[Widget Bridge] Could not schedule attachment: {}", e);
    }

    registration
}
