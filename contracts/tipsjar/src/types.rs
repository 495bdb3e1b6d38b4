//! Data types and storage keys for the tip ledger.

use soroban_sdk::{contracttype, Address, String};

/// Maximum message length, counted in characters.
pub const MAX_MESSAGE_CHARS: u32 = 280;

/// Upper bound on the byte length of a message that can still fit in
/// `MAX_MESSAGE_CHARS` characters (4 bytes per UTF-8 character at most).
pub const MAX_MESSAGE_BYTES: u32 = MAX_MESSAGE_CHARS * 4;

/// The tip currently recorded for a (sender, recipient) pair.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TipRecord {
    /// Tip amount in stroops
    pub amount: u128,
    /// Free text attached to the tip, possibly empty
    pub message: String,
}

/// Storage keys for contract state.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Tip from the first address to the second (sender, recipient)
    Tip(Address, Address),
}
