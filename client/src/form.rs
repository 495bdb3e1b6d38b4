//! Form state for sending and viewing tips.

use crate::address::{AccountId, AddressRole};
use crate::contract::{TipQuery, TipRequest, MAX_MESSAGE_CHARS};
use crate::error::ValidationError;
use crate::units::parse_xlm;

/// Raw input of the "Send Tip" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendTipForm {
    pub recipient: String,
    /// Amount in XLM, as typed
    pub amount: String,
    pub message: String,
}

impl SendTipForm {
    /// Checks the input and converts it into a [`TipRequest`].
    ///
    /// Checks run in order: required fields, recipient address, amount,
    /// message length. The first failure is returned.
    pub fn validate(&self) -> Result<TipRequest, ValidationError> {
        if self.recipient.trim().is_empty() || self.amount.trim().is_empty() {
            return Err(ValidationError::MissingTipFields);
        }
        let recipient = AccountId::parse(AddressRole::Recipient, &self.recipient)?;
        let amount = parse_xlm(&self.amount)?;
        if self.message_chars() > MAX_MESSAGE_CHARS {
            return Err(ValidationError::MessageTooLong {
                max: MAX_MESSAGE_CHARS,
            });
        }
        Ok(TipRequest {
            recipient,
            amount,
            message: self.message.clone(),
        })
    }

    /// Character counter shown under the message box.
    pub fn char_count_label(&self) -> String {
        format!("{}/{} characters", self.message_chars(), MAX_MESSAGE_CHARS)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn message_chars(&self) -> usize {
        self.message.chars().count()
    }
}

/// Raw input of the "View Tip" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewTipForm {
    pub sender: String,
    pub recipient: String,
}

impl ViewTipForm {
    pub fn validate(&self) -> Result<TipQuery, ValidationError> {
        if self.sender.trim().is_empty() || self.recipient.trim().is_empty() {
            return Err(ValidationError::MissingQueryFields);
        }
        let sender = AccountId::parse(AddressRole::Sender, &self.sender)?;
        let recipient = AccountId::parse(AddressRole::Recipient, &self.recipient)?;
        Ok(TipQuery { sender, recipient })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: &str = "GAAZI4TCR3TY5OJHCTJC2A4QSY6CJWJH5IAJTGKIN2ER7LBNVKOCCWN7";
    const BOB: &str = "GBRPYHIL2CI3FNQ4BXLFMNDLFJUNPU2HY3ZMFSHONUCEOASW7QC7OX2H";

    fn send_form(recipient: &str, amount: &str, message: &str) -> SendTipForm {
        SendTipForm {
            recipient: recipient.into(),
            amount: amount.into(),
            message: message.into(),
        }
    }

    #[test]
    fn valid_send_form() {
        let request = send_form(BOB, "1.5", "Thanks!").validate().unwrap();
        assert_eq!(request.recipient.as_str(), BOB);
        assert_eq!(request.amount, 15_000_000);
        assert_eq!(request.message, "Thanks!");
    }

    #[test]
    fn message_is_optional() {
        let request = send_form(BOB, "2", "").validate().unwrap();
        assert_eq!(request.message, "");
    }

    #[test]
    fn missing_fields_checked_first() {
        assert_eq!(
            send_form("", "1", "").validate(),
            Err(ValidationError::MissingTipFields)
        );
        assert_eq!(
            send_form("not an address", "", "").validate(),
            Err(ValidationError::MissingTipFields)
        );
    }

    #[test]
    fn blank_fields_count_as_missing() {
        assert_eq!(
            send_form(BOB, "   ", "").validate(),
            Err(ValidationError::MissingTipFields)
        );
        assert_eq!(
            send_form(" \t", "1", "").validate(),
            Err(ValidationError::MissingTipFields)
        );

        let form = ViewTipForm {
            sender: "  ".into(),
            recipient: BOB.into(),
        };
        assert_eq!(form.validate(), Err(ValidationError::MissingQueryFields));
    }

    #[test]
    fn recipient_checked_before_amount() {
        assert_eq!(
            send_form("ST1SJ3DTE5DN7X54YDH5D64R3BCB6A2AG2ZQ8YPD5", "abc", "").validate(),
            Err(ValidationError::InvalidAddress(AddressRole::Recipient))
        );
    }

    #[test]
    fn amount_must_be_positive() {
        assert_eq!(
            send_form(BOB, "0", "").validate(),
            Err(ValidationError::NonPositiveAmount)
        );
        assert_eq!(
            send_form(BOB, "lots", "").validate(),
            Err(ValidationError::InvalidAmount)
        );
    }

    #[test]
    fn message_length_limit() {
        let at_limit = "a".repeat(MAX_MESSAGE_CHARS);
        assert!(send_form(BOB, "1", &at_limit).validate().is_ok());

        let over = "é".repeat(MAX_MESSAGE_CHARS + 1);
        assert_eq!(
            send_form(BOB, "1", &over).validate(),
            Err(ValidationError::MessageTooLong { max: 280 })
        );
    }

    #[test]
    fn char_count_label_counts_characters() {
        assert_eq!(send_form(BOB, "1", "").char_count_label(), "0/280 characters");
        assert_eq!(
            send_form(BOB, "1", "héllo").char_count_label(),
            "5/280 characters"
        );
    }

    #[test]
    fn clear_resets_all_fields() {
        let mut form = send_form(BOB, "1", "hi");
        form.clear();
        assert_eq!(form, SendTipForm::default());
    }

    #[test]
    fn view_form_validation() {
        let form = ViewTipForm {
            sender: ALICE.into(),
            recipient: BOB.into(),
        };
        let query = form.validate().unwrap();
        assert_eq!(query.sender.as_str(), ALICE);
        assert_eq!(query.recipient.as_str(), BOB);

        let form = ViewTipForm {
            sender: ALICE.into(),
            recipient: String::new(),
        };
        assert_eq!(form.validate(), Err(ValidationError::MissingQueryFields));

        let form = ViewTipForm {
            sender: "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7".into(),
            recipient: BOB.into(),
        };
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Invalid sender address format"
        );

        let form = ViewTipForm {
            sender: ALICE.into(),
            recipient: "bob".into(),
        };
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Invalid recipient address format"
        );
    }
}
