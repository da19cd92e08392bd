//! Avatar talk hooks
//!
//! The session decides when the avatar starts and stops talking; the page
//! decides what that looks like. Native callers implement [`TalkHooks`],
//! the browser registers two functions through `setTalkHooks`.

use wasm_bindgen::JsValue;

use crate::console;

/// Callbacks fired around a spoken reply
pub trait TalkHooks {
    /// A reply is ready and about to be returned
    fn start_talking(&self);

    /// The reply finished playing, or was interrupted by a new question
    fn stop_talking(&self);
}

/// Hooks that do nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHooks;

impl TalkHooks for NoopHooks {
    fn start_talking(&self) {}
    fn stop_talking(&self) {}
}

/// JS functions registered by the page. A throwing callback is logged and
/// ignored.
pub struct JsTalkHooks {
    start: Option<js_sys::Function>,
    stop: Option<js_sys::Function>,
}

impl JsTalkHooks {
    pub fn new(start: Option<js_sys::Function>, stop: Option<js_sys::Function>) -> Self {
        Self { start, stop }
    }

    fn call(hook: &Option<js_sys::Function>, name: &str) {
        if let Some(f) = hook {
            if let Err(e) = f.call0(&JsValue::NULL) {
                console::warn(&format!("[ChatSession] {} hook threw: {:?}", name, e));
            }
        }
    }
}

impl TalkHooks for JsTalkHooks {
    fn start_talking(&self) {
        Self::call(&self.start, "startTalking");
    }

    fn stop_talking(&self) {
        Self::call(&self.stop, "stopTalking");
    }
}
