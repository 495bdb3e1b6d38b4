use std::time::Duration;

use thiserror::Error;

use crate::address::AddressRole;

/// Input rejected before any wallet or network call.
///
/// The `Display` text is what the UI shows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter both recipient address and amount")]
    MissingTipFields,

    #[error("Please enter both sender and recipient addresses")]
    MissingQueryFields,

    #[error("Invalid {0} address format")]
    InvalidAddress(AddressRole),

    #[error("Please enter a valid amount")]
    InvalidAmount,

    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    #[error("Message must be at most {max} characters")]
    MessageTooLong { max: usize },
}

/// Failure reported by the wallet provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("no wallet provider installed")]
    NotInstalled,

    #[error("request cancelled by user")]
    Cancelled,

    #[error("wallet rejected request: {0}")]
    Rejected(String),

    #[error("wallet transport error: {0}")]
    Transport(String),
}

/// Failure of a read-only contract query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("query transport error: {0}")]
    Transport(String),

    #[error("could not decode contract response: {0}")]
    Decode(String),

    #[error("could not encode contract call: {0}")]
    Encode(String),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("wallet not connected")]
    NotConnected,

    #[error("a request is already in flight")]
    Busy,

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Text surfaced to the user for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::Wallet(WalletError::Cancelled) => "Transaction cancelled".to_string(),
            Self::NotConnected => "Please connect your wallet first".to_string(),
            other => format!("Error: {other}"),
        }
    }
}
