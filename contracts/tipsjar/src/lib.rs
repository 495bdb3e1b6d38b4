//! # Tips Jar Contract
//!
//! A Soroban smart contract recording one tip per (sender, recipient) pair.
//!
//! ## Features
//!
//! - **Single Record per Pair**: A new tip fully replaces the previous amount and message
//! - **Explicit Absence**: Reads return `None` for pairs that were never tipped, never zero
//! - **Validation**: Zero amounts, over-long and non-UTF-8 messages are rejected before any write
//!
//! Token movement is not modelled here; the contract only keeps the ledger of tips.

#![no_std]

mod types;
mod validation;

use soroban_sdk::{contract, contractimpl, log, panic_with_error, Address, Env, String};

pub use crate::types::{DataKey, TipRecord, MAX_MESSAGE_BYTES, MAX_MESSAGE_CHARS};
use crate::validation::{validate_amount, validate_message};

/// Error codes for the tips jar contract.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum TipsJarError {
    /// Tip amount is zero
    InvalidAmount = 1,
    /// Message exceeds `MAX_MESSAGE_CHARS` characters
    MessageTooLong = 2,
    /// Message is not valid UTF-8
    InvalidMessage = 3,
}

impl From<TipsJarError> for soroban_sdk::Error {
    fn from(e: TipsJarError) -> Self {
        soroban_sdk::Error::from_contract_error(e as u32)
    }
}

#[contract]
pub struct TipsJarContract;

#[contractimpl]
impl TipsJarContract {
    /// Records a tip from `sender` to `recipient`.
    ///
    /// Any tip previously recorded for the same pair is replaced entirely.
    ///
    /// # Arguments
    /// * `env` - The contract environment
    /// * `sender` - The tipping address (must authorize the call)
    /// * `recipient` - The tipped address
    /// * `amount` - Tip amount in stroops, must be positive
    /// * `message` - Attached text, at most `MAX_MESSAGE_CHARS` characters
    ///
    /// # Errors
    /// * `InvalidAmount` - If `amount` is zero
    /// * `MessageTooLong` - If `message` is longer than the cap
    /// * `InvalidMessage` - If `message` is not valid UTF-8
    pub fn tip(
        env: Env,
        sender: Address,
        recipient: Address,
        amount: u128,
        message: String,
    ) -> bool {
        sender.require_auth();

        if let Err(e) = validate_amount(amount) {
            panic_with_error!(&env, e);
        }
        if let Err(e) = validate_message(&message) {
            panic_with_error!(&env, e);
        }

        let key = DataKey::Tip(sender.clone(), recipient.clone());
        env.storage()
            .persistent()
            .set(&key, &TipRecord { amount, message });

        log!(&env, "tip recorded", sender, recipient, amount);

        true
    }

    /// Returns the amount of the tip from `sender` to `recipient`, if any.
    pub fn get_tip(env: Env, sender: Address, recipient: Address) -> Option<u128> {
        Self::load(&env, sender, recipient).map(|record| record.amount)
    }

    /// Returns the full tip record from `sender` to `recipient`, if any.
    pub fn get_tip_with_message(
        env: Env,
        sender: Address,
        recipient: Address,
    ) -> Option<TipRecord> {
        Self::load(&env, sender, recipient)
    }

    /// Returns the maximum message length in characters.
    pub fn max_message_chars(_env: Env) -> u32 {
        MAX_MESSAGE_CHARS
    }

    fn load(env: &Env, sender: Address, recipient: Address) -> Option<TipRecord> {
        env.storage()
            .persistent()
            .get(&DataKey::Tip(sender, recipient))
    }
}
