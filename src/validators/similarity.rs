//! Similarity to the user's own attributes.

use std::collections::HashMap;

use secrecy::{ExposeSecret, SecretString};

use super::PasswordValidator;
use crate::config::{OptionReader, ValidatorOptions};
use crate::error::{ConfigurationError, ValidationError};
use crate::i18n::{LocalizedText, Message};
use crate::user::PasswordUser;

/// Only `username` is compared by default. Attributes such as `email`,
/// `first_name` or `last_name` are opt-in through the `user_attributes` option.
const DEFAULT_USER_ATTRIBUTES: &[&str] = &["username"];
const DEFAULT_MAX_SIMILARITY: f64 = 0.5;

/// Upper bound on the similarity of two strings, ignoring character order.
///
/// Returns `2 * M / T` where `M` is the number of characters the strings have in
/// common (counted as a multiset) and `T` is their combined length. Two empty
/// strings are identical (`1.0`).
pub fn quick_ratio(a: &str, b: &str) -> f64 {
    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut len_b = 0;
    for c in b.chars() {
        *counts.entry(c).or_insert(0) += 1;
        len_b += 1;
    }

    let mut len_a = 0;
    let mut matches = 0;
    for c in a.chars() {
        len_a += 1;
        if let Some(n) = counts.get_mut(&c) {
            if *n > 0 {
                *n -= 1;
                matches += 1;
            }
        }
    }

    let total = len_a + len_b;
    if total == 0 {
        return 1.0;
    }
    2.0 * matches as f64 / total as f64
}

/// Splits on runs of non-word characters, keeping empty leading and trailing parts.
fn split_non_word(value: &str) -> Vec<&str> {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_separator = false;
    for (i, c) in value.char_indices() {
        if is_word(c) {
            if in_separator {
                start = i;
                in_separator = false;
            }
        } else if !in_separator {
            parts.push(&value[start..i]);
            in_separator = true;
        }
    }
    parts.push(if in_separator { "" } else { &value[start..] });
    parts
}

/// Rejects passwords too similar to the user's attributes.
///
/// Each attribute is compared whole and split on non-word characters, so an email
/// address is checked both as a whole and by its local part and domain labels.
/// Attributes the user lacks are ignored. `max_similarity == 0` rejects every
/// password of a user who has any of the attributes.
#[derive(Debug, Clone)]
pub struct UserAttributeSimilarityValidator {
    user_attributes: Vec<String>,
    max_similarity: f64,
}

impl UserAttributeSimilarityValidator {
    pub const NAME: &'static str = "UserAttributeSimilarityValidator";

    pub fn new(user_attributes: Vec<String>, max_similarity: f64) -> Self {
        Self {
            user_attributes,
            max_similarity,
        }
    }

    pub fn user_attributes(&self) -> &[String] {
        &self.user_attributes
    }

    pub fn max_similarity(&self) -> f64 {
        self.max_similarity
    }

    pub(crate) fn from_options(options: &ValidatorOptions) -> Result<Self, ConfigurationError> {
        let reader = OptionReader::new(Self::NAME, options, &["user_attributes", "max_similarity"])?;
        let user_attributes = reader
            .string_list("user_attributes")?
            .unwrap_or_else(|| DEFAULT_USER_ATTRIBUTES.iter().map(|s| s.to_string()).collect());
        let max_similarity = reader
            .f64("max_similarity")?
            .unwrap_or(DEFAULT_MAX_SIMILARITY);
        Ok(Self::new(user_attributes, max_similarity))
    }

    fn too_similar(&self, password: &str, value: &str) -> bool {
        let value = value.to_lowercase();
        split_non_word(&value)
            .into_iter()
            .chain(std::iter::once(value.as_str()))
            .any(|part| {
                let similarity = quick_ratio(password, part);
                similarity > self.max_similarity || similarity == 1.0 || self.max_similarity == 0.0
            })
    }
}

impl Default for UserAttributeSimilarityValidator {
    fn default() -> Self {
        Self::new(
            DEFAULT_USER_ATTRIBUTES.iter().map(|s| s.to_string()).collect(),
            DEFAULT_MAX_SIMILARITY,
        )
    }
}

impl PasswordValidator for UserAttributeSimilarityValidator {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn validate(
        &self,
        password: &SecretString,
        user: Option<&dyn PasswordUser>,
    ) -> Result<(), ValidationError> {
        let Some(user) = user else {
            return Ok(());
        };
        let password = password.expose_secret().to_lowercase();

        for attribute in &self.user_attributes {
            let value = match user.attribute(attribute) {
                Some(v) if !v.is_empty() => v,
                _ => continue,
            };
            if self.too_similar(&password, value) {
                return Err(ValidationError::new(
                    Message::new("The password is too similar to the {verbose_name}."),
                    "password_too_similar",
                )
                .with_param("verbose_name", user.verbose_name(attribute).into_owned()));
            }
        }
        Ok(())
    }

    fn help_text(&self) -> LocalizedText {
        LocalizedText::new(Message::new(
            "Your password can't be too similar to your other personal information.",
        ))
    }

    fn options(&self) -> ValidatorOptions {
        let mut options = ValidatorOptions::new();
        options.insert(
            "user_attributes".to_string(),
            self.user_attributes.clone().into(),
        );
        options.insert("max_similarity".to_string(), self.max_similarity.into());
        options
    }
}
