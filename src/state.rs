use crate::account::Account;

/// The single source of truth for "which provider, which account".
///
/// The provider slot is written by the discovery side, the account slot by
/// the account-synchronization side; consumers only ever read a consistent
/// pair. Generic over the provider handle so the selection policy can be
/// exercised without a browser.
///
/// Invariant: `account` is only ever non-none while `provider` is non-none.
pub(crate) struct ConnectionState<P> {
    provider: Option<P>,
    /// set once the first matching announcement has been adopted; from that
    /// point the selection is final.
    announced: bool,
    account: Option<Account>,
}

impl<P> ConnectionState<P> {
    pub(crate) fn new() -> Self {
        Self {
            provider: None,
            announced: false,
            account: None,
        }
    }

    pub(crate) fn provider(&self) -> Option<&P> {
        self.provider.as_ref()
    }

    pub(crate) fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    /// Offer the provider found on the legacy global slot.
    ///
    /// The legacy global is a fallback for wallets that predate the
    /// announcement protocol: it is only adopted while nothing else has been
    /// selected, so the UI can unblock immediately without ever shadowing an
    /// announced provider. Returns whether the offer was adopted.
    pub(crate) fn select_legacy(&mut self, provider: P) -> bool {
        if self.provider.is_some() {
            return false;
        }
        self.provider = Some(provider);
        true
    }

    /// Offer a provider delivered by an announcement event.
    ///
    /// Announcements are the standardized discovery mechanism and therefore
    /// authoritative: the first matching one replaces any legacy selection.
    /// Later announcements are ignored. Returns whether the offer was
    /// adopted.
    pub(crate) fn select_announced(&mut self, provider: P) -> bool {
        if self.announced {
            return false;
        }
        self.announced = true;
        self.provider = Some(provider);
        true
    }

    /// Publish the account most recently reported by the selected provider.
    ///
    /// Whichever caller runs last wins; the silent query, a live
    /// notification and an explicit connect all represent current truth.
    /// Without a selected provider the account stays none. Returns whether
    /// the published account actually changed.
    pub(crate) fn set_account(&mut self, account: Option<Account>) -> bool {
        if self.provider.is_none() || self.account == account {
            return false;
        }
        self.account = account;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(address: &str) -> Option<Account> {
        Account::new(address.to_owned())
    }

    fn first_of(accounts: &[&str]) -> Option<Account> {
        Account::first_of(accounts.iter().map(|a| (*a).to_owned()).collect())
    }

    #[test]
    fn starts_empty() {
        let state = ConnectionState::<u32>::new();
        assert_eq!(state.provider(), None);
        assert_eq!(state.account(), None);
    }

    #[test]
    fn matching_announcement_is_selected() {
        let mut state = ConnectionState::new();
        assert!(state.select_announced(1));
        assert_eq!(state.provider(), Some(&1));
    }

    #[test]
    fn announcement_replaces_legacy_selection() {
        let mut state = ConnectionState::new();
        assert!(state.select_legacy(1));
        assert_eq!(state.provider(), Some(&1));

        assert!(state.select_announced(2));
        assert_eq!(state.provider(), Some(&2));
    }

    #[test]
    fn first_announcement_wins() {
        let mut state = ConnectionState::new();
        assert!(state.select_announced(1));
        assert!(!state.select_announced(2));
        assert_eq!(state.provider(), Some(&1));
    }

    #[test]
    fn legacy_never_replaces_a_selection() {
        let mut state = ConnectionState::new();
        assert!(state.select_legacy(1));
        assert!(!state.select_legacy(2));
        assert_eq!(state.provider(), Some(&1));

        let mut state = ConnectionState::new();
        assert!(state.select_announced(1));
        assert!(!state.select_legacy(2));
        assert_eq!(state.provider(), Some(&1));
    }

    #[test]
    fn account_requires_a_provider() {
        let mut state = ConnectionState::<u32>::new();
        assert!(!state.set_account(account("0xaaaa")));
        assert_eq!(state.account(), None);
    }

    #[test]
    fn notification_converges_on_the_first_address() {
        let mut state = ConnectionState::new();
        state.select_announced(1);

        // non-empty list publishes the head, whatever the prior value
        assert!(state.set_account(first_of(&["0xaaaa", "0xbbbb"])));
        assert_eq!(state.account(), account("0xaaaa").as_ref());
        assert!(state.set_account(first_of(&["0xcccc"])));
        assert_eq!(state.account(), account("0xcccc").as_ref());

        // empty list clears
        assert!(state.set_account(first_of(&[])));
        assert_eq!(state.account(), None);

        // re-delivery of the same payload is a no-op
        assert!(!state.set_account(first_of(&[])));
    }

    #[test]
    fn same_account_is_not_republished() {
        let mut state = ConnectionState::new();
        state.select_announced(1);
        assert!(state.set_account(account("0xaaaa")));
        assert!(!state.set_account(account("0xaaaa")));
        assert_eq!(state.account(), account("0xaaaa").as_ref());
    }

    // announce -> empty silent query -> explicit connect -> remote disconnect
    #[test]
    fn connection_lifecycle() {
        let mut state = ConnectionState::new();

        assert!(state.select_announced("io.metamask"));
        assert_eq!(state.provider(), Some(&"io.metamask"));
        assert_eq!(state.account(), None);

        // silent query comes back empty: still unauthorized
        assert!(!state.set_account(first_of(&[])));
        assert_eq!(state.account(), None);

        // the user approves the connect prompt
        assert!(state.set_account(first_of(&["0xABCD...1234"])));
        assert_eq!(state.account(), account("0xABCD...1234").as_ref());

        // the wallet later revokes authorization
        assert!(state.set_account(first_of(&[])));
        assert_eq!(state.account(), None);
    }
}
