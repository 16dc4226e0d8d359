//! Minimum length rule.

use secrecy::{ExposeSecret, SecretString};

use super::PasswordValidator;
use crate::config::{OptionReader, ValidatorOptions};
use crate::error::{ConfigurationError, ValidationError};
use crate::i18n::{LocalizedText, Message};
use crate::user::PasswordUser;

const DEFAULT_MIN_LENGTH: usize = 8;

const TOO_SHORT: Message = Message::plural(
    "This password is too short. It must contain at least {min_length} character.",
    "This password is too short. It must contain at least {min_length} characters.",
    "min_length",
);

const HELP: Message = Message::plural(
    "Your password must contain at least {min_length} character.",
    "Your password must contain at least {min_length} characters.",
    "min_length",
);

/// Rejects passwords with fewer than `min_length` characters.
#[derive(Debug, Clone)]
pub struct MinimumLengthValidator {
    min_length: usize,
}

impl MinimumLengthValidator {
    pub const NAME: &'static str = "MinimumLengthValidator";

    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    pub(crate) fn from_options(options: &ValidatorOptions) -> Result<Self, ConfigurationError> {
        let reader = OptionReader::new(Self::NAME, options, &["min_length"])?;
        Ok(Self::new(reader.usize("min_length")?.unwrap_or(DEFAULT_MIN_LENGTH)))
    }
}

impl Default for MinimumLengthValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_LENGTH)
    }
}

impl PasswordValidator for MinimumLengthValidator {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn validate(
        &self,
        password: &SecretString,
        _user: Option<&dyn PasswordUser>,
    ) -> Result<(), ValidationError> {
        if password.expose_secret().chars().count() < self.min_length {
            return Err(ValidationError::new(TOO_SHORT, "password_too_short")
                .with_param("min_length", self.min_length));
        }
        Ok(())
    }

    fn help_text(&self) -> LocalizedText {
        LocalizedText::new(HELP).with_param("min_length", self.min_length)
    }

    fn options(&self) -> ValidatorOptions {
        let mut options = ValidatorOptions::new();
        options.insert("min_length".to_string(), self.min_length.into());
        options
    }
}
