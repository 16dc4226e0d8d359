//! Localizable message templates.
//!
//! Validators never produce final strings. They return a [`Message`] (an English
//! source template, optionally with a plural form) plus [`Params`], and the caller
//! renders it through a [`Translator`] when it is about to be shown to a user.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Interpolation parameters, keyed by placeholder name.
pub type Params = BTreeMap<&'static str, ParamValue>;

/// A value substituted into a `{name}` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Count(u64),
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Count(n) => write!(f, "{}", n),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<usize> for ParamValue {
    fn from(n: usize) -> Self {
        ParamValue::Count(n as u64)
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

/// Translation service supplied by the host framework.
///
/// The default methods return the source text unchanged and pick the singular
/// form only when `n == 1`.
pub trait Translator: Send + Sync {
    fn gettext<'a>(&self, msgid: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(msgid)
    }

    fn ngettext<'a>(&self, singular: &'a str, plural: &'a str, n: u64) -> Cow<'a, str> {
        if n == 1 {
            Cow::Borrowed(singular)
        } else {
            Cow::Borrowed(plural)
        }
    }
}

/// Identity translator: English source texts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Untranslated;

impl Translator for Untranslated {}

/// A translatable message template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message {
    singular: &'static str,
    plural: Option<Plural>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Plural {
    template: &'static str,
    count_param: &'static str,
}

impl Message {
    /// A message without plural forms.
    pub const fn new(template: &'static str) -> Self {
        Self {
            singular: template,
            plural: None,
        }
    }

    /// A message whose form is selected by the numeric parameter `count_param`.
    pub const fn plural(
        singular: &'static str,
        plural: &'static str,
        count_param: &'static str,
    ) -> Self {
        Self {
            singular,
            plural: Some(Plural {
                template: plural,
                count_param,
            }),
        }
    }

    /// The untranslated singular template.
    pub fn template(&self) -> &'static str {
        self.singular
    }

    /// Translates the template and substitutes `params`.
    ///
    /// A plural message whose count parameter is missing or not numeric is
    /// rendered with the plural form.
    pub fn render(&self, params: &Params, translator: &dyn Translator) -> String {
        let text = match self.plural {
            None => translator.gettext(self.singular),
            Some(plural) => {
                let n = match params.get(plural.count_param) {
                    Some(ParamValue::Count(n)) => *n,
                    _ => 0,
                };
                translator.ngettext(self.singular, plural.template, n)
            }
        };
        interpolate(&text, params)
    }
}

/// A message bound to its parameters, rendered on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalizedText {
    message: Message,
    params: Params,
}

impl LocalizedText {
    pub fn new(message: Message) -> Self {
        Self {
            message,
            params: Params::new(),
        }
    }

    pub fn with_param(mut self, name: &'static str, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name, value.into());
        self
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn render(&self, translator: &dyn Translator) -> String {
        self.message.render(&self.params, translator)
    }
}

impl fmt::Display for LocalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&Untranslated))
    }
}

// Single pass: substituted values are never re-scanned for placeholders.
fn interpolate(template: &str, params: &Params) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        match tail.find('}') {
            Some(end) => {
                let name = &tail[..end];
                match params.get(name) {
                    Some(value) => out.push_str(&value.to_string()),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &tail[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
