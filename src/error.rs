//! Error types.
//!
//! Two tiers: [`ConfigurationError`] is raised while building validators and is
//! fatal for the caller's setup, [`ValidationError`] describes one violated rule
//! and is meant for the end user. [`ValidationErrors`] aggregates the latter.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::i18n::{LocalizedText, Message, ParamValue, Params, Translator, Untranslated};

#[derive(Error, Debug)]
pub enum CommonPasswordsError {
    #[error("Common password list not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read common password list: {0}")]
    ReadError(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error(
        "The validator in NAME could not be resolved: {0}. Check your password validators setting."
    )]
    UnknownValidator(String),
    #[error("{validator} got an unexpected option '{option}'")]
    UnexpectedOption { validator: String, option: String },
    #[error("{validator}: invalid value for option '{option}', expected {expected}")]
    InvalidOption {
        validator: String,
        option: String,
        expected: &'static str,
    },
    #[error(transparent)]
    CommonPasswords(#[from] CommonPasswordsError),
}

/// A single violated password rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    code: &'static str,
    text: LocalizedText,
}

impl ValidationError {
    pub fn new(message: Message, code: &'static str) -> Self {
        Self {
            code,
            text: LocalizedText::new(message),
        }
    }

    pub fn with_param(mut self, name: &'static str, value: impl Into<ParamValue>) -> Self {
        self.text = self.text.with_param(name, value);
        self
    }

    /// Machine-readable identifier, e.g. `password_too_short`.
    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &Message {
        self.text.message()
    }

    pub fn params(&self) -> &Params {
        self.text.params()
    }

    /// Renders the message through `translator`.
    pub fn render(&self, translator: &dyn Translator) -> String {
        self.text.render(translator)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&Untranslated))
    }
}

impl std::error::Error for ValidationError {}

/// Every rule a password violated, in validator order.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub(crate) fn new(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    pub fn codes(&self) -> Vec<&'static str> {
        self.0.iter().map(ValidationError::code).collect()
    }

    /// Renders every message through `translator`.
    pub fn messages(&self, translator: &dyn Translator) -> Vec<String> {
        self.0.iter().map(|e| e.render(translator)).collect()
    }

    pub fn into_inner(self) -> Vec<ValidationError> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages(&Untranslated).join(" "))
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Outcome of [`validate_password`](crate::validate_password).
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

impl PasswordError {
    /// The violated rules, if validation ran.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            PasswordError::Invalid(errors) => Some(errors),
            PasswordError::Configuration(_) => None,
        }
    }
}
