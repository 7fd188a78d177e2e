use wasm_bindgen::prelude::*;

/// Event emitted by the provider whenever the accounts available to the
/// dApp change, with the new account list as payload.
pub const ACCOUNTS_CHANGED: &str = "accountsChanged";

#[wasm_bindgen]
extern "C" {
    /// A JavaScript Ethereum Provider as specified by
    /// [EIP-1193](https://eips.ethereum.org/EIPS/eip-1193).
    ///
    /// Wallet extensions historically expose one of these on
    /// `window.ethereum`; wallets implementing EIP-6963 instead hand it
    /// over inside an announcement event.
    #[derive(Clone, PartialEq)]
    pub type Eip1193Provider;

    /// Submit an RPC request to the wallet. `args` is a
    /// `{ method, params? }` object. The promise resolves with the method's
    /// result or rejects with a `ProviderRpcError`: an Error carrying a
    /// numeric `code` and a human-readable `message`.
    ///
    /// `eth_accounts` resolves with the already-authorized account list and
    /// never prompts; `eth_requestAccounts` asks the wallet to authorize
    /// the dApp and may prompt the user.
    #[wasm_bindgen(method, catch)]
    pub async fn request(this: &Eip1193Provider, args: &JsValue) -> Result<JsValue, JsValue>;

    /// The provider implements the Node.js `EventEmitter` API for its
    /// events. Registers `listener` for the named event.
    #[wasm_bindgen(method, js_name = "on")]
    pub fn on(this: &Eip1193Provider, event: &str, listener: &js_sys::Function);

    /// Remove a listener previously registered with `on`.
    #[wasm_bindgen(method, js_name = "removeListener")]
    pub fn remove_listener(this: &Eip1193Provider, event: &str, listener: &js_sys::Function);
}

/// Check that an arbitrary JS value has the shape of an EIP-1193 provider
/// before we hand it to the rest of the crate. Pages can put anything on
/// the legacy global slot.
pub(crate) fn looks_like_eip1193_provider(value: &JsValue) -> bool {
    if !value.is_object() {
        return false;
    }

    let has_function_property = |prop: &str| {
        js_sys::Reflect::get(value, &JsValue::from_str(prop))
            .ok()
            .map(|v| v.is_function())
            .unwrap_or(false)
    };

    has_function_property("request")
        && has_function_property("on")
        && has_function_property("removeListener")
}
