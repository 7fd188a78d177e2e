use crate::{
    account::Account,
    ffi,
    provider::{Brand, Provider},
    state::ConnectionState,
};
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::{JsCast, JsValue, prelude::Closure};

/// The runtime store behind a [`Connector`].
///
/// Owns the published `{provider, account}` pair, the live account-change
/// subscription and the consumer's change observer. Shared between the
/// discovery listener, spawned queries and the connector itself through an
/// `Rc`; everything runs on the single browser thread.
///
/// [`Connector`]: crate::Connector
pub(crate) struct ConnectionStore {
    brand: Brand,
    state: RefCell<ConnectionState<Provider>>,
    subscription: RefCell<Option<AccountsSubscription>>,
    observer: RefCell<Option<Rc<dyn Fn()>>>,
}

impl ConnectionStore {
    pub(crate) fn new(brand: Brand) -> Rc<Self> {
        Rc::new(Self {
            brand,
            state: RefCell::new(ConnectionState::new()),
            subscription: RefCell::new(None),
            observer: RefCell::new(None),
        })
    }

    pub(crate) fn brand(&self) -> &Brand {
        &self.brand
    }

    pub(crate) fn provider(&self) -> Option<Provider> {
        self.state.borrow().provider().cloned()
    }

    pub(crate) fn account(&self) -> Option<Account> {
        self.state.borrow().account().cloned()
    }

    pub(crate) fn set_observer(&self, observer: Rc<dyn Fn()>) {
        *self.observer.borrow_mut() = Some(observer);
    }

    /// Offer the provider found on the legacy global slot.
    pub(crate) fn adopt_legacy(self: &Rc<Self>, provider: Provider) {
        let adopted = self.state.borrow_mut().select_legacy(provider.clone());
        if adopted {
            self.bind(provider);
            self.notify();
        }
    }

    /// Offer a provider delivered by an announcement event.
    pub(crate) fn adopt_announced(self: &Rc<Self>, provider: Provider) {
        let adopted = self.state.borrow_mut().select_announced(provider.clone());
        if adopted {
            self.bind(provider);
            self.notify();
        }
    }

    /// Publish an account list reported by the selected provider: the first
    /// address becomes the account, an empty list clears it.
    pub(crate) fn apply_accounts(&self, accounts: Vec<String>) -> Option<Account> {
        let account = Account::first_of(accounts);
        let changed = self.state.borrow_mut().set_account(account.clone());
        if changed {
            self.notify();
        }
        account
    }

    /// Keep `account` synchronized with a newly selected provider: release
    /// the previous subscription, fire the one-shot silent query and
    /// subscribe to live account changes.
    ///
    /// The query and the subscription race; whichever delivers last wins,
    /// both report current truth.
    fn bind(self: &Rc<Self>, provider: Provider) {
        // a subscription left on a replaced provider would keep delivering
        // notifications for a provider no longer selected
        self.subscription.borrow_mut().take();

        let store = Rc::downgrade(self);
        let queried = provider.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match queried.authorized_accounts().await {
                Ok(accounts) => {
                    // the store may be gone by the time the wallet answers
                    if let Some(store) = store.upgrade() {
                        store.apply_accounts(accounts);
                    }
                }
                // non-fatal: the user merely appears disconnected
                Err(error) => {
                    ffi::console_warn(&format!("authorized-accounts query failed: {error}"));
                }
            }
        });

        let store = Rc::downgrade(self);
        let listener: Closure<dyn FnMut(JsValue)> = Closure::new(move |accounts: JsValue| {
            let Some(store) = store.upgrade() else {
                return;
            };
            match serde_wasm_bindgen::from_value::<Vec<String>>(accounts) {
                Ok(accounts) => {
                    store.apply_accounts(accounts);
                }
                Err(decode_error) => {
                    ffi::console_warn(&format!(
                        "ignoring malformed accountsChanged payload: {decode_error}"
                    ));
                }
            }
        });
        provider.subscribe_accounts_changed(listener.as_ref().unchecked_ref());
        *self.subscription.borrow_mut() = Some(AccountsSubscription { provider, listener });
    }

    /// Wake the consumer, outside of any borrow: the callback is expected
    /// to read the store right back.
    fn notify(&self) {
        let observer = self.observer.borrow().clone();
        if let Some(observer) = observer {
            (*observer)();
        }
    }
}

/// A live `accountsChanged` registration, removed from the provider again
/// when the handle is dropped.
struct AccountsSubscription {
    provider: Provider,
    listener: Closure<dyn FnMut(JsValue)>,
}

impl Drop for AccountsSubscription {
    fn drop(&mut self) {
        self.provider
            .unsubscribe_accounts_changed(self.listener.as_ref().unchecked_ref());
    }
}
