//! Entirely numeric rule.

use secrecy::{ExposeSecret, SecretString};

use super::PasswordValidator;
use crate::config::{OptionReader, ValidatorOptions};
use crate::error::{ConfigurationError, ValidationError};
use crate::i18n::{LocalizedText, Message};
use crate::user::PasswordUser;

/// Rejects passwords made only of ASCII digits.
#[derive(Debug, Clone, Default)]
pub struct NumericPasswordValidator;

impl NumericPasswordValidator {
    pub const NAME: &'static str = "NumericPasswordValidator";

    pub(crate) fn from_options(options: &ValidatorOptions) -> Result<Self, ConfigurationError> {
        OptionReader::new(Self::NAME, options, &[])?;
        Ok(Self)
    }
}

impl PasswordValidator for NumericPasswordValidator {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn validate(
        &self,
        password: &SecretString,
        _user: Option<&dyn PasswordUser>,
    ) -> Result<(), ValidationError> {
        let pwd = password.expose_secret();
        if !pwd.is_empty() && pwd.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::new(
                Message::new("This password is entirely numeric."),
                "password_entirely_numeric",
            ));
        }
        Ok(())
    }

    fn help_text(&self) -> LocalizedText {
        LocalizedText::new(Message::new("Your password can't be entirely numeric."))
    }
}
