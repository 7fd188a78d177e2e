pub mod eip1193;
pub mod eip6963;

pub use self::eip1193::Eip1193Provider;
use wasm_bindgen::JsValue;

/// Diagnostic logging to the browser console.
///
/// Failures this library swallows (silent query errors, malformed event
/// payloads) still have to leave a trace somewhere.
pub(crate) fn console_warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

pub(crate) fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from_str(message));
}
