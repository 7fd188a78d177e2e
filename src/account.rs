use core::fmt;

/// An Ethereum account address as reported by the wallet provider.
///
/// The inner string is guaranteed to be non-empty; a wallet reporting an
/// empty address is treated as reporting no account at all. The address is
/// otherwise kept opaque, exactly as the provider handed it over.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Account(String);

impl Account {
    pub(crate) fn new(address: String) -> Option<Self> {
        if address.is_empty() {
            None
        } else {
            Some(Self(address))
        }
    }

    /// Keep only the first address of an account list.
    ///
    /// Wallets may expose several authorized accounts; this library only
    /// tracks the active one, which providers report first. The remaining
    /// entries are deliberately discarded.
    pub(crate) fn first_of(accounts: Vec<String>) -> Option<Self> {
        accounts.into_iter().next().and_then(Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened form for display purposes: `0x1234...abcd`.
    ///
    /// Addresses too short to abbreviate are returned in full.
    pub fn abbreviated(&self) -> String {
        if self.0.len() <= 10 {
            return self.0.clone();
        }
        match (self.0.get(..6), self.0.get(self.0.len() - 4..)) {
            (Some(head), Some(tail)) => format!("{head}...{tail}"),
            _ => self.0.clone(),
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Account {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_address_is_no_account() {
        assert_eq!(Account::new(String::new()), None);
    }

    #[test]
    fn first_of_takes_the_head() {
        assert_eq!(
            Account::first_of(vec!["0xaaaa".to_owned(), "0xbbbb".to_owned()])
                .unwrap()
                .as_str(),
            "0xaaaa"
        );
        assert_eq!(Account::first_of(Vec::new()), None);
        assert_eq!(Account::first_of(vec![String::new()]), None);
    }

    #[test]
    fn abbreviated_long_address() {
        let account =
            Account::new("0x1234567890123456789012345678901234567890".to_owned()).unwrap();
        assert_eq!(account.abbreviated(), "0x1234...7890");
    }

    #[test]
    fn abbreviated_short_address() {
        let account = Account::new("0x1234".to_owned()).unwrap();
        assert_eq!(account.abbreviated(), "0x1234");
    }

    #[test]
    fn display_is_the_full_address() {
        let account =
            Account::new("0x1234567890123456789012345678901234567890".to_owned()).unwrap();
        assert_eq!(
            account.to_string(),
            "0x1234567890123456789012345678901234567890"
        );
    }
}
