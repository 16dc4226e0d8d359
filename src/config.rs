//! Validator configuration.
//!
//! A configuration is an ordered list of [`ValidatorConfig`] records, each naming a
//! validator and the options it is constructed with. The process-wide list is set
//! with [`set_auth_password_validators`]; when unset, [`default_validator_configs`]
//! is used.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use crate::error::ConfigurationError;
use crate::validators::{
    AtLeastOneDigitValidator, AtLeastOneLowercaseCharacterValidator,
    AtLeastOnePunctuationCharacterValidator, AtLeastOneUppercaseCharacterValidator,
    CommonPasswordValidator, MinimumLengthValidator, NoRepeatsValidator,
    NumericPasswordValidator, UserAttributeSimilarityValidator,
};

static AUTH_PASSWORD_VALIDATORS: RwLock<Option<Vec<ValidatorConfig>>> = RwLock::new(None);

/// Constructor options of a validator, keyed by option name.
pub type ValidatorOptions = BTreeMap<String, OptionValue>;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum OptionValue {
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<String>),
}

impl From<i32> for OptionValue {
    fn from(n: i32) -> Self {
        OptionValue::Int(i64::from(n))
    }
}

impl From<i64> for OptionValue {
    fn from(n: i64) -> Self {
        OptionValue::Int(n)
    }
}

impl From<usize> for OptionValue {
    fn from(n: usize) -> Self {
        OptionValue::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<f64> for OptionValue {
    fn from(x: f64) -> Self {
        OptionValue::Float(x)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Str(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Str(s)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(items: Vec<String>) -> Self {
        OptionValue::List(items)
    }
}

impl From<&[&str]> for OptionValue {
    fn from(items: &[&str]) -> Self {
        OptionValue::List(items.iter().map(|s| s.to_string()).collect())
    }
}

/// One entry of the validator list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidatorConfig {
    #[cfg_attr(feature = "serde", serde(rename = "NAME", alias = "name"))]
    pub name: String,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "OPTIONS", alias = "options", default)
    )]
    pub options: ValidatorOptions,
}

impl ValidatorConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: ValidatorOptions::new(),
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// The built-in validator list used when no configuration has been set.
pub fn default_validator_configs() -> Vec<ValidatorConfig> {
    vec![
        ValidatorConfig::new(UserAttributeSimilarityValidator::NAME)
            .with_option("max_similarity", 0.5),
        ValidatorConfig::new(MinimumLengthValidator::NAME).with_option("min_length", 10),
        ValidatorConfig::new(CommonPasswordValidator::NAME),
        ValidatorConfig::new(NumericPasswordValidator::NAME),
        ValidatorConfig::new(AtLeastOneDigitValidator::NAME),
        ValidatorConfig::new(AtLeastOnePunctuationCharacterValidator::NAME),
        ValidatorConfig::new(AtLeastOneUppercaseCharacterValidator::NAME),
        ValidatorConfig::new(AtLeastOneLowercaseCharacterValidator::NAME),
        ValidatorConfig::new(NoRepeatsValidator::NAME).with_option("max_repeats", 2),
    ]
}

/// Sets the process-wide validator list.
///
/// Call once at startup, before the default validator set is first used. An
/// already built default set is kept until
/// [`clear_default_password_validators`](crate::clear_default_password_validators).
pub fn set_auth_password_validators(config: Vec<ValidatorConfig>) {
    #[cfg(feature = "tracing")]
    tracing::info!("Password validators configured: {} entries", config.len());

    let mut guard = AUTH_PASSWORD_VALIDATORS
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = Some(config);
}

/// Returns the process-wide validator list, or the built-in defaults if unset.
pub fn auth_password_validators() -> Vec<ValidatorConfig> {
    let guard = AUTH_PASSWORD_VALIDATORS
        .read()
        .unwrap_or_else(PoisonError::into_inner);
    guard.clone().unwrap_or_else(default_validator_configs)
}

#[cfg(test)]
pub(crate) fn reset_auth_password_validators_for_testing() {
    let mut guard = AUTH_PASSWORD_VALIDATORS
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = None;
}

/// Typed access to a validator's options.
///
/// Rejects option names the validator does not accept, then hands out values by
/// key with type checking.
pub(crate) struct OptionReader<'a> {
    validator: &'static str,
    options: &'a ValidatorOptions,
}

impl<'a> OptionReader<'a> {
    pub(crate) fn new(
        validator: &'static str,
        options: &'a ValidatorOptions,
        accepted: &[&str],
    ) -> Result<Self, ConfigurationError> {
        if let Some(key) = options.keys().find(|k| !accepted.contains(&k.as_str())) {
            return Err(ConfigurationError::UnexpectedOption {
                validator: validator.to_string(),
                option: key.clone(),
            });
        }
        Ok(Self { validator, options })
    }

    fn invalid(&self, key: &str, expected: &'static str) -> ConfigurationError {
        ConfigurationError::InvalidOption {
            validator: self.validator.to_string(),
            option: key.to_string(),
            expected,
        }
    }

    pub(crate) fn usize(&self, key: &str) -> Result<Option<usize>, ConfigurationError> {
        match self.options.get(key) {
            None => Ok(None),
            Some(OptionValue::Int(n)) => usize::try_from(*n)
                .map(Some)
                .map_err(|_| self.invalid(key, "a non-negative integer")),
            Some(_) => Err(self.invalid(key, "a non-negative integer")),
        }
    }

    pub(crate) fn f64(&self, key: &str) -> Result<Option<f64>, ConfigurationError> {
        match self.options.get(key) {
            None => Ok(None),
            Some(OptionValue::Float(x)) => Ok(Some(*x)),
            Some(OptionValue::Int(n)) => Ok(Some(*n as f64)),
            Some(_) => Err(self.invalid(key, "a number")),
        }
    }

    pub(crate) fn string(&self, key: &str) -> Result<Option<String>, ConfigurationError> {
        match self.options.get(key) {
            None => Ok(None),
            Some(OptionValue::Str(s)) => Ok(Some(s.clone())),
            Some(_) => Err(self.invalid(key, "a string")),
        }
    }

    pub(crate) fn string_list(&self, key: &str) -> Result<Option<Vec<String>>, ConfigurationError> {
        match self.options.get(key) {
            None => Ok(None),
            Some(OptionValue::List(items)) => Ok(Some(items.clone())),
            Some(OptionValue::Str(s)) => Ok(Some(vec![s.clone()])),
            Some(_) => Err(self.invalid(key, "a list of strings")),
        }
    }
}
