//! Password validation library
//!
//! This library checks candidate passwords against a configurable, ordered list
//! of independent validators and reports every violated rule at once, together
//! with help texts describing the rules.
//!
//! # Features
//!
//! - `async` (default): Enables channel-based async validation
//! - `tracing`: Enables logging via tracing crate
//! - `serde`: Enables deserializing validator configuration
//!
//! # Environment Variables
//!
//! - `PWD_COMMON_PASSWORDS_PATH`: Custom path to the common password list
//!   (default: `./assets/common-passwords.txt.gz`)
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_validators::{ValidatorConfig, get_password_validators, validate_password};
//! use secrecy::SecretString;
//!
//! // Build validators from configuration (call once at startup)
//! let validators = get_password_validators(&[
//!     ValidatorConfig::new("MinimumLengthValidator").with_option("min_length", 12),
//!     ValidatorConfig::new("NumericPasswordValidator"),
//! ])
//! .expect("Invalid password validator configuration");
//!
//! // Validate a password
//! let password = SecretString::new("MyP@ssw0rd!".to_string().into());
//!
//! if let Err(err) = validate_password(&password, None, Some(&validators)) {
//!     for error in err.validation_errors().into_iter().flatten() {
//!         println!("{}: {}", error.code(), error);
//!     }
//! }
//! ```

mod common_passwords;
mod config;
mod error;
mod help_text;
mod i18n;
mod registry;
mod user;
mod validation;
pub mod validators;

// Public API
pub use common_passwords::{
    COMMON_PASSWORDS_PATH_ENV, default_password_list_path, load_password_list,
};
pub use config::{
    OptionValue, ValidatorConfig, ValidatorOptions, auth_password_validators,
    default_validator_configs, set_auth_password_validators,
};
pub use error::{
    CommonPasswordsError, ConfigurationError, PasswordError, ValidationError, ValidationErrors,
};
pub use help_text::{
    password_validators_help_text_html, password_validators_help_text_html_with,
    password_validators_help_texts, password_validators_help_texts_with,
};
pub use i18n::{LocalizedText, Message, ParamValue, Params, Translator, Untranslated};
pub use registry::{
    ValidatorFactory, ValidatorRegistry, ValidatorSet, clear_default_password_validators,
    get_default_password_validators, get_password_validators, register_validator,
};
pub use user::PasswordUser;
pub use validation::{password_changed, validate_password};
pub use validators::PasswordValidator;

#[cfg(feature = "async")]
pub use validation::validate_password_tx;
