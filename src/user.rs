//! Access to the account a password belongs to.

use std::borrow::Cow;
use std::collections::HashMap;

/// The user whose password is being validated.
///
/// Implemented by the host's account model. Only string attributes matter:
/// return `None` for attributes that do not exist or are not text.
pub trait PasswordUser {
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Human-readable name of an attribute, used in error messages.
    fn verbose_name<'a>(&self, attribute: &'a str) -> Cow<'a, str> {
        if attribute.contains('_') {
            Cow::Owned(attribute.replace('_', " "))
        } else {
            Cow::Borrowed(attribute)
        }
    }
}

impl PasswordUser for HashMap<String, String> {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}
