//! Description of calls into the tips jar contract.

use std::fmt;

use crate::address::AccountId;

/// Maximum message length accepted by the contract, in characters.
pub const MAX_MESSAGE_CHARS: usize = 280;

/// Contract entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractFunction {
    Tip,
    GetTip,
    GetTipWithMessage,
}

impl ContractFunction {
    /// Name of the function as exported by the contract.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tip => "tip",
            Self::GetTip => "get_tip",
            Self::GetTipWithMessage => "get_tip_with_message",
        }
    }
}

impl fmt::Display for ContractFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed contract argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallArg {
    Address(AccountId),
    U128(u128),
    Utf8(String),
}

/// A validated tip, ready to be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipRequest {
    pub recipient: AccountId,
    /// Amount in stroops
    pub amount: u128,
    pub message: String,
}

/// A validated (sender, recipient) lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipQuery {
    pub sender: AccountId,
    pub recipient: AccountId,
}

/// Decoded result of `get_tip_with_message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipView {
    /// Amount in stroops
    pub amount: u128,
    pub message: String,
}

/// A state-changing contract invocation to be signed by the wallet.
///
/// The wallet signs as the connected user, who becomes the `sender`
/// argument of `tip`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    pub contract_id: String,
    pub function: ContractFunction,
    pub args: Vec<CallArg>,
}

impl ContractCall {
    /// Builds `tip(sender, recipient, amount, message)`.
    pub fn tip(contract_id: &str, sender: &AccountId, request: &TipRequest) -> Self {
        Self {
            contract_id: contract_id.to_string(),
            function: ContractFunction::Tip,
            args: vec![
                CallArg::Address(sender.clone()),
                CallArg::Address(request.recipient.clone()),
                CallArg::U128(request.amount),
                CallArg::Utf8(request.message.clone()),
            ],
        }
    }
}

/// Identifier of a broadcast transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TxId(pub String);

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
