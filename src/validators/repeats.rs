//! Repeated characters rule.

use std::collections::HashSet;

use secrecy::{ExposeSecret, SecretString};

use super::PasswordValidator;
use crate::config::{OptionReader, ValidatorOptions};
use crate::error::{ConfigurationError, ValidationError};
use crate::i18n::{LocalizedText, Message};
use crate::user::PasswordUser;

const DEFAULT_MAX_REPEATS: usize = 2;

const CONTAINS_REPEATS: Message = Message::plural(
    "This password contains a character repeated more than {max_repeats} time in a row.",
    "This password contains a character repeated more than {max_repeats} times in a row.",
    "max_repeats",
);

const HELP: Message = Message::plural(
    "Your password can't contain a character repeated more than {max_repeats} time in a row.",
    "Your password can't contain a character repeated more than {max_repeats} times in a row.",
    "max_repeats",
);

/// Rejects passwords where any character occurs more than `max_repeats` times
/// consecutively.
#[derive(Debug, Clone)]
pub struct NoRepeatsValidator {
    max_repeats: usize,
}

impl NoRepeatsValidator {
    pub const NAME: &'static str = "NoRepeatsValidator";

    pub fn new(max_repeats: usize) -> Self {
        Self { max_repeats }
    }

    pub fn max_repeats(&self) -> usize {
        self.max_repeats
    }

    pub(crate) fn from_options(options: &ValidatorOptions) -> Result<Self, ConfigurationError> {
        let reader = OptionReader::new(Self::NAME, options, &["max_repeats"])?;
        Ok(Self::new(reader.usize("max_repeats")?.unwrap_or(DEFAULT_MAX_REPEATS)))
    }

    fn has_run(&self, pwd: &str) -> bool {
        // A run longer than the password cannot exist.
        if self.max_repeats >= pwd.chars().count() {
            return false;
        }
        let distinct: HashSet<char> = pwd.chars().collect();
        distinct.into_iter().any(|c| {
            let run: String = std::iter::repeat_n(c, self.max_repeats.saturating_add(1)).collect();
            pwd.contains(&run)
        })
    }
}

impl Default for NoRepeatsValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REPEATS)
    }
}

impl PasswordValidator for NoRepeatsValidator {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn validate(
        &self,
        password: &SecretString,
        _user: Option<&dyn PasswordUser>,
    ) -> Result<(), ValidationError> {
        if self.has_run(password.expose_secret()) {
            return Err(ValidationError::new(CONTAINS_REPEATS, "password_contains_repeats")
                .with_param("max_repeats", self.max_repeats));
        }
        Ok(())
    }

    fn help_text(&self) -> LocalizedText {
        LocalizedText::new(HELP).with_param("max_repeats", self.max_repeats)
    }

    fn options(&self) -> ValidatorOptions {
        let mut options = ValidatorOptions::new();
        options.insert("max_repeats".to_string(), self.max_repeats.into());
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    #[test]
    fn test_three_in_a_row() {
        let err = NoRepeatsValidator::default()
            .validate(&secret("aaab"), None)
            .unwrap_err();
        assert_eq!(err.code(), "password_contains_repeats");
        assert_eq!(
            err.to_string(),
            "This password contains a character repeated more than 2 times in a row."
        );
    }

    #[test]
    fn test_separated_pairs_pass() {
        assert!(NoRepeatsValidator::default().validate(&secret("aabaa"), None).is_ok());
    }

    #[test]
    fn test_run_anywhere_in_password() {
        let validator = NoRepeatsValidator::default();
        assert!(validator.validate(&secret("Xk9!qzT2111"), None).is_err());
        assert!(validator.validate(&secret("x!!!y"), None).is_err());
    }

    #[test]
    fn test_custom_max_repeats() {
        let validator = NoRepeatsValidator::new(3);
        assert!(validator.validate(&secret("aaab"), None).is_ok());
        assert!(validator.validate(&secret("aaaab"), None).is_err());
    }

    #[test]
    fn test_zero_rejects_any_character() {
        let validator = NoRepeatsValidator::new(0);
        assert!(validator.validate(&secret("a"), None).is_err());
        assert!(validator.validate(&secret(""), None).is_ok());
    }

    #[test]
    fn test_huge_max_repeats_from_options() {
        let options = crate::config::ValidatorConfig::new(NoRepeatsValidator::NAME)
            .with_option("max_repeats", i64::MAX)
            .options;
        let validator = NoRepeatsValidator::from_options(&options).unwrap();
        assert!(validator.validate(&secret("abc"), None).is_ok());
        assert!(validator.validate(&secret("aaaaaaaa"), None).is_ok());
    }

    #[test]
    fn test_max_repeats_usize_max() {
        let validator = NoRepeatsValidator::new(usize::MAX);
        assert!(validator.validate(&secret("zzzz"), None).is_ok());
        assert!(validator.validate(&secret(""), None).is_ok());
    }

    #[test]
    fn test_run_spanning_whole_password() {
        let validator = NoRepeatsValidator::new(3);
        assert!(validator.validate(&secret("aaa"), None).is_ok());
        assert!(validator.validate(&secret("aaaa"), None).is_err());
    }

    #[test]
    fn test_help_text() {
        assert_eq!(
            NoRepeatsValidator::new(1).help_text().to_string(),
            "Your password can't contain a character repeated more than 1 time in a row."
        );
    }
}
