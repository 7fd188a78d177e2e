/*!

# Ethereum Connector for EIP-1193 wallets

This library is meant to be used by web applications that need to connect to
an Ethereum wallet extension. It discovers the wallet injected into the
page, keeps track of the account the user authorized and lets the
application request authorization with one call.

## Features

- Discover wallet providers announced through the
  [EIP-6963](https://eips.ethereum.org/EIPS/eip-6963) broadcast event
- Fall back to the legacy `window.ethereum` provider for wallets that
  predate announcements
- Track the authorized account live, following `accountsChanged`
- Request authorization (connect) with classified failure outcomes

## Usage

Start a connector for the wallet brand you target; discovery begins
immediately:

```no_run
use ethereum_connector::Connector;

let Some(connector) = Connector::metamask() else {
    panic!("not running in a browser page");
};
```

The connector publishes one `{provider, account}` pair. Register an
observer to be woken whenever it changes, and read it back:

```no_run
# use std::rc::Rc;
# let connector = Rc::new(ethereum_connector::Connector::metamask().unwrap());
let state = Rc::clone(&connector);
connector.on_change(move || {
    let label = match state.account() {
        Some(account) => account.abbreviated(),
        None => "Connect Wallet".to_owned(),
    };
    web_sys::console::log_1(&label.into());
});
```

The account only appears once the user authorized the page. Ask for
authorization when the user clicks your connect button; every failure is
classified and carries a message you can show as-is:

```no_run
# use ethereum_connector::ConnectError;
# async fn test() -> anyhow::Result<()> {
# let connector = ethereum_connector::Connector::metamask().unwrap();
match connector.connect().await {
    Ok(account) => web_sys::console::log_1(&format!("connected: {account:?}").into()),
    Err(error @ ConnectError::Rejected) => web_sys::console::log_1(&error.to_string().into()),
    Err(error) => web_sys::console::error_1(&error.to_string().into()),
}
# Ok(()) }
```

Dropping the [`Connector`] releases every listener it registered.

*/

mod account;
mod connection;
mod connector;
mod discovery;
pub mod error;
pub mod ffi;
mod provider;
mod state;

pub use self::{
    account::Account,
    connector::Connector,
    error::{ConnectError, ProviderError, ProviderErrorCode},
    provider::{Brand, Provider},
};
