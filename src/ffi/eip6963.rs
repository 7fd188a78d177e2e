use super::eip1193::{Eip1193Provider, looks_like_eip1193_provider};
use wasm_bindgen::{JsCast, JsValue};

/// Name of the broadcast event through which wallets announce themselves,
/// as specified by [EIP-6963](https://eips.ethereum.org/EIPS/eip-6963).
///
/// Every wallet dispatches its own event on the window, so multiple
/// extensions can coexist without fighting over the single legacy global
/// slot. The event `detail` carries `{ info, provider }` where `info.rdns`
/// is a reverse-DNS identifier of the wallet brand (e.g. `"io.metamask"`).
pub const ANNOUNCE_PROVIDER: &str = "eip6963:announceProvider";

/// One provider announcement, extracted from the broadcast event. Not
/// retained: selection runs once per event and drops the record.
pub(crate) struct Announcement {
    pub rdns: String,
    pub provider: Eip1193Provider,
}

/// Read `{ detail: { info: { rdns }, provider } }` out of an announcement
/// event. Anything that does not have that shape is discarded; the page is
/// free to dispatch garbage under the well-known event name.
pub(crate) fn announcement(event: &JsValue) -> Option<Announcement> {
    let detail = js_sys::Reflect::get(event, &JsValue::from_str("detail")).ok()?;
    let info = js_sys::Reflect::get(&detail, &JsValue::from_str("info")).ok()?;
    let rdns = js_sys::Reflect::get(&info, &JsValue::from_str("rdns"))
        .ok()?
        .as_string()?;
    let provider = js_sys::Reflect::get(&detail, &JsValue::from_str("provider")).ok()?;

    if !looks_like_eip1193_provider(&provider) {
        return None;
    }

    Some(Announcement {
        rdns,
        provider: provider.unchecked_into(),
    })
}
