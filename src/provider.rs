use crate::{
    error::{ProviderError, ProviderErrorCode},
    ffi,
};
use wasm_bindgen::JsValue;

/// Identifies the wallet application we are looking for.
///
/// Wallets announce themselves under a reverse-DNS identifier, and legacy
/// providers that predate announcements carry a boolean marker property
/// instead (`isMetaMask` for MetaMask). Both names together describe one
/// brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Brand {
    rdns: &'static str,
    legacy_marker: &'static str,
}

impl Brand {
    /// The MetaMask extension.
    pub const METAMASK: Self = Self::new("io.metamask", "isMetaMask");

    pub const fn new(rdns: &'static str, legacy_marker: &'static str) -> Self {
        Self {
            rdns,
            legacy_marker,
        }
    }

    pub fn rdns(&self) -> &str {
        self.rdns
    }

    pub(crate) fn matches_rdns(&self, rdns: &str) -> bool {
        self.rdns == rdns
    }

    /// The marker is boolean-ish by convention, so any truthy value counts.
    pub(crate) fn matches_legacy(&self, provider: &JsValue) -> bool {
        js_sys::Reflect::get(provider, &JsValue::from_str(self.legacy_marker))
            .map(|marker| marker.is_truthy())
            .unwrap_or(false)
    }
}

#[derive(serde::Serialize)]
struct RequestArguments<'a> {
    method: &'a str,
}

/// A wallet provider selected for this page.
///
/// This is a reference into the host environment, valid for the lifetime of
/// the page. It only exposes account discovery; everything a wallet can do
/// beyond that (signing, submitting) is out of this crate's scope.
#[derive(Clone, PartialEq)]
pub struct Provider {
    eip1193: ffi::Eip1193Provider,
}

impl Provider {
    pub(crate) fn new(eip1193: ffi::Eip1193Provider) -> Self {
        Self { eip1193 }
    }

    /// Query the accounts the user has already authorized for this dApp.
    ///
    /// This never prompts the user: a dApp that was not authorized yet
    /// simply gets an empty list back.
    pub async fn authorized_accounts(&self) -> Result<Vec<String>, ProviderError> {
        self.account_list("eth_accounts").await
    }

    /// Ask the wallet to authorize this dApp, prompting the user in the
    /// wallet UI if needed, and return the authorized accounts.
    ///
    /// Whether an already-authorized dApp is re-prompted or confirmed
    /// silently is the wallet's own policy.
    pub async fn request_authorization(&self) -> Result<Vec<String>, ProviderError> {
        self.account_list("eth_requestAccounts").await
    }

    async fn account_list(&self, method: &str) -> Result<Vec<String>, ProviderError> {
        let args = serde_wasm_bindgen::to_value(&RequestArguments { method }).map_err(
            |encode_error| ProviderError {
                code: ProviderErrorCode::InternalError,
                message: format!("Couldn't encode the request arguments: {encode_error}"),
            },
        )?;

        match self.eip1193.request(&args).await {
            Ok(accounts) => {
                serde_wasm_bindgen::from_value(accounts).map_err(|decode_error| ProviderError {
                    code: ProviderErrorCode::InternalError,
                    message: format!("Couldn't decode the account list: {decode_error}"),
                })
            }
            Err(error) => Err(decode_provider_error(error)),
        }
    }

    pub(crate) fn subscribe_accounts_changed(&self, listener: &js_sys::Function) {
        self.eip1193.on(ffi::eip1193::ACCOUNTS_CHANGED, listener);
    }

    pub(crate) fn unsubscribe_accounts_changed(&self, listener: &js_sys::Function) {
        self.eip1193
            .remove_listener(ffi::eip1193::ACCOUNTS_CHANGED, listener);
    }
}

fn decode_provider_error(error: JsValue) -> ProviderError {
    serde_wasm_bindgen::from_value(error).unwrap_or_else(|decode_error| ProviderError {
        code: ProviderErrorCode::InternalError,
        message: format!("Couldn't decode the error content: {decode_error}"),
    })
}
