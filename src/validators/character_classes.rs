//! Character class rules: digit, punctuation, uppercase, lowercase.

use secrecy::{ExposeSecret, SecretString};

use super::PasswordValidator;
use crate::config::{OptionReader, ValidatorOptions};
use crate::error::{ConfigurationError, ValidationError};
use crate::i18n::{LocalizedText, Message};
use crate::user::PasswordUser;

fn is_punctuation(c: char) -> bool {
    c == ' ' || c.is_ascii_punctuation()
}

// Declares a validator that requires at least one character matching `$pred`.
macro_rules! character_class_validator {
    (
        $(#[$doc:meta])*
        $ty:ident, $name:literal, $pred:expr, $code:literal, $message:literal, $help:literal
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default)]
        pub struct $ty;

        impl $ty {
            pub const NAME: &'static str = $name;

            pub(crate) fn from_options(
                options: &ValidatorOptions,
            ) -> Result<Self, ConfigurationError> {
                OptionReader::new(Self::NAME, options, &[])?;
                Ok(Self)
            }
        }

        impl PasswordValidator for $ty {
            fn name(&self) -> &'static str {
                Self::NAME
            }

            fn validate(
                &self,
                password: &SecretString,
                _user: Option<&dyn PasswordUser>,
            ) -> Result<(), ValidationError> {
                if !password.expose_secret().chars().any($pred) {
                    return Err(ValidationError::new(Message::new($message), $code));
                }
                Ok(())
            }

            fn help_text(&self) -> LocalizedText {
                LocalizedText::new(Message::new($help))
            }
        }
    };
}

character_class_validator!(
    /// Requires at least one ASCII digit.
    AtLeastOneDigitValidator,
    "AtLeastOneDigitValidator",
    |c: char| c.is_ascii_digit(),
    "password_without_digit",
    "This password does not contain a digit.",
    "Your password must contain at least one digit."
);

character_class_validator!(
    /// Requires at least one ASCII punctuation character or space.
    AtLeastOnePunctuationCharacterValidator,
    "AtLeastOnePunctuationCharacterValidator",
    is_punctuation,
    "password_without_punctuation",
    "This password does not contain a punctuation character.",
    "Your password must contain at least one punctuation character."
);

character_class_validator!(
    /// Requires at least one uppercase letter.
    AtLeastOneUppercaseCharacterValidator,
    "AtLeastOneUppercaseCharacterValidator",
    char::is_uppercase,
    "password_without_uppercase",
    "This password does not contain an uppercase character.",
    "Your password must contain at least one uppercase character."
);

character_class_validator!(
    /// Requires at least one lowercase letter.
    AtLeastOneLowercaseCharacterValidator,
    "AtLeastOneLowercaseCharacterValidator",
    char::is_lowercase,
    "password_without_lowercase",
    "This password does not contain a lowercase character.",
    "Your password must contain at least one lowercase character."
);

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    fn code_of(validator: &dyn PasswordValidator, pwd: &str) -> Option<&'static str> {
        validator.validate(&secret(pwd), None).err().map(|e| e.code())
    }

    #[test]
    fn test_digit() {
        assert_eq!(code_of(&AtLeastOneDigitValidator, "NoNumbers!"), Some("password_without_digit"));
        assert_eq!(code_of(&AtLeastOneDigitValidator, "abc1"), None);
    }

    #[test]
    fn test_digit_ignores_other_numerals() {
        let v = AtLeastOneDigitValidator;
        assert_eq!(code_of(&v, "Abc½!xyzⅫ"), Some("password_without_digit"));
        assert_eq!(code_of(&v, "Abc½!xyzⅫ7"), None);
    }

    #[test]
    fn test_punctuation() {
        let v = AtLeastOnePunctuationCharacterValidator;
        assert_eq!(code_of(&v, "NoSpecial123"), Some("password_without_punctuation"));
        assert_eq!(code_of(&v, "with space"), None);
        assert_eq!(code_of(&v, "tilde~"), None);
        // Non-ASCII symbols do not count
        assert_eq!(code_of(&v, "euro€"), Some("password_without_punctuation"));
    }

    #[test]
    fn test_uppercase() {
        let v = AtLeastOneUppercaseCharacterValidator;
        assert_eq!(code_of(&v, "lowercase123!"), Some("password_without_uppercase"));
        assert_eq!(code_of(&v, "Àccent"), None);
    }

    #[test]
    fn test_lowercase() {
        let v = AtLeastOneLowercaseCharacterValidator;
        assert_eq!(code_of(&v, "UPPERCASE123!"), Some("password_without_lowercase"));
        assert_eq!(code_of(&v, "UPPERx"), None);
    }

    #[test]
    fn test_empty_password_fails_every_class() {
        let validators: [&dyn PasswordValidator; 4] = [
            &AtLeastOneDigitValidator,
            &AtLeastOnePunctuationCharacterValidator,
            &AtLeastOneUppercaseCharacterValidator,
            &AtLeastOneLowercaseCharacterValidator,
        ];
        for v in validators {
            assert!(code_of(v, "").is_some(), "{} accepted empty password", v.name());
        }
    }

    #[test]
    fn test_help_texts() {
        assert_eq!(
            AtLeastOneDigitValidator.help_text().to_string(),
            "Your password must contain at least one digit."
        );
        assert_eq!(
            AtLeastOnePunctuationCharacterValidator.help_text().to_string(),
            "Your password must contain at least one punctuation character."
        );
    }
}
