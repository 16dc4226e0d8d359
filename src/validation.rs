//! Validation orchestrator - runs a password through every configured validator.

use secrecy::SecretString;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

use crate::error::{ConfigurationError, PasswordError, ValidationErrors};
use crate::registry::get_default_password_validators;
use crate::user::PasswordUser;
use crate::validators::PasswordValidator;

/// Runs `f` on the given validators, or on the default set when `None`.
pub(crate) fn with_validators<T>(
    validators: Option<&[Box<dyn PasswordValidator>]>,
    f: impl FnOnce(&[Box<dyn PasswordValidator>]) -> T,
) -> Result<T, ConfigurationError> {
    match validators {
        Some(validators) => Ok(f(validators)),
        None => {
            let defaults = get_default_password_validators()?;
            Ok(f(&defaults[..]))
        }
    }
}

/// Validates `password` against every validator.
///
/// All validators run even after one fails, so the caller can show every
/// violated rule at once. `None` uses the default validator set.
///
/// # Errors
///
/// - [`PasswordError::Invalid`] with one error per failing validator, in order
/// - [`PasswordError::Configuration`] if the default set cannot be built
pub fn validate_password(
    password: &SecretString,
    user: Option<&dyn PasswordUser>,
    validators: Option<&[Box<dyn PasswordValidator>]>,
) -> Result<(), PasswordError> {
    let errors = with_validators(validators, |validators| {
        let mut errors = Vec::new();
        for validator in validators {
            match validator.validate(password, user) {
                Ok(()) => {}
                Err(error) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("Password rejected by {}: {}", validator.name(), error.code());
                    errors.push(error);
                }
            }
        }
        errors
    })?;

    if errors.is_empty() {
        return Ok(());
    }
    Err(ValidationErrors::new(errors).into())
}

/// Notifies every validator that `user`'s password changed.
///
/// Validators that keep no history ignore the call.
pub fn password_changed(
    password: &SecretString,
    user: Option<&dyn PasswordUser>,
    validators: Option<&[Box<dyn PasswordValidator>]>,
) -> Result<(), ConfigurationError> {
    with_validators(validators, |validators| {
        for validator in validators {
            validator.password_changed(password, user);
        }
    })
}

/// Async version that sends the validation outcome via channel.
#[cfg(feature = "async")]
pub async fn validate_password_tx(
    password: &SecretString,
    user: Option<&(dyn PasswordUser + Sync)>,
    validators: Option<&[Box<dyn PasswordValidator>]>,
    tx: mpsc::Sender<Result<(), PasswordError>>,
) {
    #[cfg(feature = "tracing")]
    tracing::info!("password validation is about to start...");

    let user = user.map(|u| u as &dyn PasswordUser);
    let outcome = validate_password(password, user, validators);

    if let Err(_e) = tx.send(outcome).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password validation result: {}", _e);
    }
}
