//! Textual Stellar addresses as entered in the forms.
//!
//! Only the shape is checked: a `G` (account) or `C` (contract) prefix,
//! 56 characters, and the base32 alphabet. The checksum is left to the
//! wallet and the network.

use std::fmt;

use crate::error::ValidationError;

/// Length of an encoded account or contract strkey.
pub const STRKEY_LEN: usize = 56;

/// Which form field an address came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressRole {
    Sender,
    Recipient,
}

impl fmt::Display for AddressRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sender => f.write_str("sender"),
            Self::Recipient => f.write_str("recipient"),
        }
    }
}

/// A principal on the ledger, in strkey form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId(String);

impl AccountId {
    /// Parses `text` as an account or contract address.
    pub fn parse(role: AddressRole, text: &str) -> Result<Self, ValidationError> {
        if is_valid_strkey(text) {
            Ok(Self(text.to_string()))
        } else {
            Err(ValidationError::InvalidAddress(role))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is a contract (`C...`) rather than an account address.
    pub fn is_contract(&self) -> bool {
        self.0.starts_with('C')
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shape check for `G...` and `C...` strkeys.
pub fn is_valid_strkey(text: &str) -> bool {
    text.len() == STRKEY_LEN
        && (text.starts_with('G') || text.starts_with('C'))
        && text
            .bytes()
            .all(|b| b.is_ascii_uppercase() || (b'2'..=b'7').contains(&b))
}
