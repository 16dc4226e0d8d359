//! Password validators
//!
//! Each validator checks a single rule and describes it with a help text.

mod character_classes;
mod common;
mod length;
mod numeric;
mod repeats;
mod similarity;

pub use character_classes::{
    AtLeastOneDigitValidator, AtLeastOneLowercaseCharacterValidator,
    AtLeastOnePunctuationCharacterValidator, AtLeastOneUppercaseCharacterValidator,
};
pub use common::CommonPasswordValidator;
pub use length::MinimumLengthValidator;
pub use numeric::NumericPasswordValidator;
pub use repeats::NoRepeatsValidator;
pub use similarity::{UserAttributeSimilarityValidator, quick_ratio};

use secrecy::SecretString;

use crate::config::ValidatorOptions;
use crate::error::ValidationError;
use crate::i18n::LocalizedText;
use crate::user::PasswordUser;

/// A single password rule.
pub trait PasswordValidator: Send + Sync {
    /// Registry name of the validator.
    fn name(&self) -> &'static str;

    /// Checks `password`, returning the violated rule on failure.
    fn validate(
        &self,
        password: &SecretString,
        user: Option<&dyn PasswordUser>,
    ) -> Result<(), ValidationError>;

    /// Describes the rule to the user.
    fn help_text(&self) -> LocalizedText;

    /// Called after a user's password has been changed.
    fn password_changed(&self, _password: &SecretString, _user: Option<&dyn PasswordUser>) {}

    /// The options the validator was constructed with, including defaults.
    fn options(&self) -> ValidatorOptions {
        ValidatorOptions::new()
    }
}
