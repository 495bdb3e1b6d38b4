//! Input validation for tips.

use soroban_sdk::String;

use crate::types::{MAX_MESSAGE_BYTES, MAX_MESSAGE_CHARS};
use crate::TipsJarError;

/// Validates a tip amount.
///
/// Zero-amount tips are rejected, so a stored record always carries a
/// positive amount.
pub fn validate_amount(amount: u128) -> Result<(), TipsJarError> {
    if amount == 0 {
        return Err(TipsJarError::InvalidAmount);
    }
    Ok(())
}

/// Validates a tip message.
///
/// The message must be valid UTF-8 and at most `MAX_MESSAGE_CHARS`
/// characters long. An empty message is valid.
pub fn validate_message(message: &String) -> Result<(), TipsJarError> {
    let len = message.len();
    if len == 0 {
        return Ok(());
    }
    if len > MAX_MESSAGE_BYTES {
        return Err(TipsJarError::MessageTooLong);
    }

    let mut buf = [0u8; MAX_MESSAGE_BYTES as usize];
    let bytes = &mut buf[..len as usize];
    message.copy_into_slice(bytes);

    let text = core::str::from_utf8(bytes).map_err(|_| TipsJarError::InvalidMessage)?;
    if count_chars(text) > MAX_MESSAGE_CHARS {
        return Err(TipsJarError::MessageTooLong);
    }
    Ok(())
}

/// Number of characters (Unicode scalar values) in `text`.
pub fn count_chars(text: &str) -> u32 {
    text.chars().count() as u32
}
