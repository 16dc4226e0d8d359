//! Help text aggregation - describes the configured rules to the user.

use crate::error::ConfigurationError;
use crate::i18n::{Translator, Untranslated};
use crate::validation::with_validators;
use crate::validators::PasswordValidator;

/// Returns every validator's help text, in configured order.
///
/// `None` uses the default validator set.
pub fn password_validators_help_texts(
    validators: Option<&[Box<dyn PasswordValidator>]>,
) -> Result<Vec<String>, ConfigurationError> {
    password_validators_help_texts_with(validators, &Untranslated)
}

/// Like [`password_validators_help_texts`], rendered through `translator`.
pub fn password_validators_help_texts_with(
    validators: Option<&[Box<dyn PasswordValidator>]>,
    translator: &dyn Translator,
) -> Result<Vec<String>, ConfigurationError> {
    with_validators(validators, |validators| {
        validators
            .iter()
            .map(|v| v.help_text().render(translator))
            .collect()
    })
}

/// Returns the help texts as an HTML `<ul>`, or an empty string if there are none.
///
/// Every help text is escaped.
pub fn password_validators_help_text_html(
    validators: Option<&[Box<dyn PasswordValidator>]>,
) -> Result<String, ConfigurationError> {
    password_validators_help_text_html_with(validators, &Untranslated)
}

/// Like [`password_validators_help_text_html`], rendered through `translator`.
pub fn password_validators_help_text_html_with(
    validators: Option<&[Box<dyn PasswordValidator>]>,
    translator: &dyn Translator,
) -> Result<String, ConfigurationError> {
    let help_texts = password_validators_help_texts_with(validators, translator)?;
    if help_texts.is_empty() {
        return Ok(String::new());
    }

    let items: String = help_texts
        .iter()
        .map(|text| format!("<li>{}</li>", escape_html(text)))
        .collect();
    Ok(format!("<ul>{}</ul>", items))
}

/// Escape HTML special characters
fn escape_html(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
