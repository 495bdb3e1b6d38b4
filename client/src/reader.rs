//! Read-only access to the tips jar contract.

use crate::address::AccountId;
use crate::contract::TipView;
use crate::error::QueryError;

/// Read-only contract calls, answered by simulation without signing.
///
/// `sender` doubles as the simulation source account. `Ok(None)` means no
/// tip is recorded for the pair; it is not an error.
#[allow(async_fn_in_trait)]
pub trait TipReader {
    async fn get_tip(
        &self,
        contract_id: &str,
        sender: &AccountId,
        recipient: &AccountId,
    ) -> Result<Option<u128>, QueryError>;

    async fn get_tip_with_message(
        &self,
        contract_id: &str,
        sender: &AccountId,
        recipient: &AccountId,
    ) -> Result<Option<TipView>, QueryError>;
}
