use crate::{
    account::Account,
    connection::ConnectionStore,
    discovery::Discovery,
    error::ConnectError,
    ffi,
    provider::{Brand, Provider},
};
use std::rc::Rc;

/// Discovers a wallet of one brand and tracks its authorized account.
///
/// One connector owns the whole discovery-and-connection state of a page:
/// which provider was selected and which account it currently authorizes.
/// The UI reads [`account`], renders, and calls [`connect`] when the user
/// asks to; [`on_change`] wakes it whenever either value moves under its
/// feet (the user switching or disconnecting accounts in the wallet UI,
/// a wallet announcing itself late).
///
/// Dropping the connector releases the announcement listener and the
/// account-change subscription; responses still in flight at that point are
/// discarded.
///
/// [`account`]: Connector::account
/// [`connect`]: Connector::connect
/// [`on_change`]: Connector::on_change
pub struct Connector {
    store: Rc<ConnectionStore>,
    _discovery: Discovery,
}

impl Connector {
    /// Start discovering `brand` wallets on the given event source.
    ///
    /// The event source is the object wallets announce themselves on and
    /// expose their legacy provider from. On a real page that is the
    /// window, which [`Connector::metamask`] wires up for you; tests can
    /// hand in a detached `EventTarget` and dispatch synthetic
    /// announcements at it.
    pub fn new(brand: Brand, event_source: &web_sys::EventTarget) -> Self {
        let store = ConnectionStore::new(brand);
        let discovery = Discovery::start(event_source, &store);
        Self {
            store,
            _discovery: discovery,
        }
    }

    /// Connector for the MetaMask wallet, discovering providers on the
    /// window.
    ///
    /// Returns `None` when there is no window, i.e. outside of a browser
    /// page.
    pub fn metamask() -> Option<Self> {
        let window = web_sys::window()?;
        Some(Self::new(Brand::METAMASK, &window))
    }

    /// The wallet brand this connector is looking for.
    pub fn brand(&self) -> Brand {
        *self.store.brand()
    }

    /// The selected wallet provider, or `None` while no matching wallet
    /// was discovered. Selection never reverts to `None` once made.
    pub fn provider(&self) -> Option<Provider> {
        self.store.provider()
    }

    /// The account the wallet currently authorizes for this page, or
    /// `None` while disconnected (no wallet, no authorization, or the user
    /// revoked it).
    pub fn account(&self) -> Option<Account> {
        self.store.account()
    }

    /// Register the observer woken whenever the published state changes: a
    /// provider got selected, or the account was set or cleared.
    ///
    /// One observer at a time; registering a new one replaces the previous
    /// one. The callback should read [`Connector::account`] back and
    /// re-render.
    pub fn on_change(&self, observer: impl Fn() + 'static) {
        self.store.set_observer(Rc::new(observer));
    }

    /// Ask the wallet to authorize this page, prompting the user in the
    /// wallet UI.
    ///
    /// On success the published account is updated to the first authorized
    /// address and returned; a wallet resolving the prompt with no accounts
    /// yields `Ok(None)`. Without a discovered provider this returns
    /// [`ConnectError::NotInstalled`] and performs no request at all.
    ///
    /// There is no "already connected" guard: invoking this again simply
    /// re-prompts or re-confirms, per the wallet's own policy. A rejected
    /// or failed request leaves the published account unchanged.
    pub async fn connect(&self) -> Result<Option<Account>, ConnectError> {
        let Some(provider) = self.provider() else {
            return Err(ConnectError::NotInstalled);
        };

        match provider.request_authorization().await {
            Ok(accounts) => Ok(self.store.apply_accounts(accounts)),
            Err(error) => {
                let error = ConnectError::from(error);
                if let ConnectError::Unexpected(provider_error) = &error {
                    ffi::console_error(&format!("connection request failed: {provider_error}"));
                }
                Err(error)
            }
        }
    }
}
