//! User-visible text for query results and broadcasts.

use crate::contract::{TipView, TxId};
use crate::units::format_xlm;

pub const NOT_FOUND: &str = "No tip found between these addresses";

/// Text for a `get_tip_with_message` result.
///
/// A present record always renders its amount, even when the amount is
/// zero; only an absent record renders as not found.
pub fn render_tip(tip: Option<&TipView>) -> String {
    let Some(tip) = tip else {
        return NOT_FOUND.to_string();
    };
    let amount = format!("{} XLM ({} stroops)", format_xlm(tip.amount), tip.amount);
    if tip.message.is_empty() {
        format!("{amount}\n(No message)")
    } else {
        format!("{amount}\nMessage: \"{}\"", tip.message)
    }
}

pub fn render_broadcast(tx_id: &TxId) -> String {
    format!("Transaction broadcast! TX ID: {tx_id}")
}
