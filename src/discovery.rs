use crate::{
    connection::ConnectionStore,
    ffi,
    provider::{Brand, Provider},
};
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue, prelude::Closure};

/// Resolves which wallet provider the page should use.
///
/// Listens for announcement events on the injected event source and checks
/// the legacy global once; the selection policy itself lives on the store.
/// Dropping the handle removes the announcement listener.
pub(crate) struct Discovery {
    target: web_sys::EventTarget,
    announce: Closure<dyn FnMut(web_sys::Event)>,
}

impl Discovery {
    pub(crate) fn start(target: &web_sys::EventTarget, store: &Rc<ConnectionStore>) -> Self {
        let weak = Rc::downgrade(store);
        let announce: Closure<dyn FnMut(web_sys::Event)> =
            Closure::new(move |event: web_sys::Event| {
                let Some(store) = weak.upgrade() else {
                    return;
                };
                let Some(announcement) = ffi::eip6963::announcement(event.as_ref()) else {
                    return;
                };
                if store.brand().matches_rdns(&announcement.rdns) {
                    store.adopt_announced(Provider::new(announcement.provider));
                }
            });

        if let Err(error) = target.add_event_listener_with_callback(
            ffi::eip6963::ANNOUNCE_PROVIDER,
            announce.as_ref().unchecked_ref(),
        ) {
            // should not happen on a real page; discovery degrades to the
            // legacy check below
            ffi::console_error(&format!(
                "couldn't listen for wallet announcements: {error:?}"
            ));
        }

        // The wallet may predate the announcement protocol, or its
        // announcement may already have fired before this page started
        // listening: check the legacy global once, best effort.
        if let Some(provider) = legacy_provider(target, store.brand()) {
            store.adopt_legacy(provider);
        }

        Self {
            target: target.clone(),
            announce,
        }
    }
}

impl Drop for Discovery {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            ffi::eip6963::ANNOUNCE_PROVIDER,
            self.announce.as_ref().unchecked_ref(),
        );
    }
}

/// Read the global slot wallets used to share before announcements existed.
/// The slot is a free-for-all, so duck-type whatever is there before
/// trusting it.
fn legacy_provider(target: &web_sys::EventTarget, brand: &Brand) -> Option<Provider> {
    let value = js_sys::Reflect::get(target.as_ref(), &JsValue::from_str("ethereum")).ok()?;
    if !ffi::eip1193::looks_like_eip1193_provider(&value) {
        return None;
    }
    if !brand.matches_legacy(&value) {
        return None;
    }
    Some(Provider::new(value.unchecked_into()))
}
