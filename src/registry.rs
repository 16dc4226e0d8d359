//! Validator registry and the cached default validator set.
//!
//! Validators are resolved by name through a [`ValidatorRegistry`]. The process-wide
//! registry starts with the built-in validators; hosts add their own with
//! [`register_validator`] at startup.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use crate::config::{ValidatorConfig, ValidatorOptions, auth_password_validators};
use crate::error::ConfigurationError;
use crate::validators::{
    AtLeastOneDigitValidator, AtLeastOneLowercaseCharacterValidator,
    AtLeastOnePunctuationCharacterValidator, AtLeastOneUppercaseCharacterValidator,
    CommonPasswordValidator, MinimumLengthValidator, NoRepeatsValidator,
    NumericPasswordValidator, PasswordValidator, UserAttributeSimilarityValidator,
};

/// Constructs a validator from its options.
pub type ValidatorFactory = Box<
    dyn Fn(&ValidatorOptions) -> Result<Box<dyn PasswordValidator>, ConfigurationError>
        + Send
        + Sync,
>;

/// An immutable, shareable list of validators.
pub type ValidatorSet = Arc<[Box<dyn PasswordValidator>]>;

static REGISTRY: LazyLock<RwLock<ValidatorRegistry>> =
    LazyLock::new(|| RwLock::new(ValidatorRegistry::with_builtins()));

static DEFAULT_VALIDATORS: RwLock<Option<ValidatorSet>> = RwLock::new(None);

/// Maps validator names to factories.
#[derive(Default)]
pub struct ValidatorRegistry {
    factories: HashMap<String, ValidatorFactory>,
}

impl ValidatorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the nine built-in validators.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(UserAttributeSimilarityValidator::NAME, |o| {
            Ok(Box::new(UserAttributeSimilarityValidator::from_options(o)?))
        });
        registry.register(MinimumLengthValidator::NAME, |o| {
            Ok(Box::new(MinimumLengthValidator::from_options(o)?))
        });
        registry.register(CommonPasswordValidator::NAME, |o| {
            Ok(Box::new(CommonPasswordValidator::from_options(o)?))
        });
        registry.register(NumericPasswordValidator::NAME, |o| {
            Ok(Box::new(NumericPasswordValidator::from_options(o)?))
        });
        registry.register(AtLeastOneDigitValidator::NAME, |o| {
            Ok(Box::new(AtLeastOneDigitValidator::from_options(o)?))
        });
        registry.register(AtLeastOnePunctuationCharacterValidator::NAME, |o| {
            Ok(Box::new(AtLeastOnePunctuationCharacterValidator::from_options(o)?))
        });
        registry.register(AtLeastOneUppercaseCharacterValidator::NAME, |o| {
            Ok(Box::new(AtLeastOneUppercaseCharacterValidator::from_options(o)?))
        });
        registry.register(AtLeastOneLowercaseCharacterValidator::NAME, |o| {
            Ok(Box::new(AtLeastOneLowercaseCharacterValidator::from_options(o)?))
        });
        registry.register(NoRepeatsValidator::NAME, |o| {
            Ok(Box::new(NoRepeatsValidator::from_options(o)?))
        });
        registry
    }

    /// Adds or replaces the factory for `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&ValidatorOptions) -> Result<Box<dyn PasswordValidator>, ConfigurationError>
            + Send
            + Sync
            + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Instantiates every entry of `config`, in order.
    ///
    /// # Errors
    ///
    /// Fails on the first entry whose name is not registered or whose options the
    /// validator rejects.
    pub fn build(
        &self,
        config: &[ValidatorConfig],
    ) -> Result<Vec<Box<dyn PasswordValidator>>, ConfigurationError> {
        let mut validators = Vec::with_capacity(config.len());
        for entry in config {
            let Some(factory) = self.factories.get(&entry.name) else {
                #[cfg(feature = "tracing")]
                tracing::error!("Unknown password validator: {}", entry.name);
                return Err(ConfigurationError::UnknownValidator(entry.name.clone()));
            };
            validators.push(factory(&entry.options)?);
        }
        Ok(validators)
    }
}

/// Registers a validator factory in the process-wide registry.
pub fn register_validator<F>(name: impl Into<String>, factory: F)
where
    F: Fn(&ValidatorOptions) -> Result<Box<dyn PasswordValidator>, ConfigurationError>
        + Send
        + Sync
        + 'static,
{
    let mut registry = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    registry.register(name, factory);
}

/// Instantiates `config` through the process-wide registry.
pub fn get_password_validators(
    config: &[ValidatorConfig],
) -> Result<Vec<Box<dyn PasswordValidator>>, ConfigurationError> {
    let registry = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    registry.build(config)
}

/// Returns the default validator set, building it on first use.
///
/// The set comes from the process-wide configuration (see
/// [`set_auth_password_validators`](crate::set_auth_password_validators)) and is
/// cached until [`clear_default_password_validators`]. A failed build is not cached.
pub fn get_default_password_validators() -> Result<ValidatorSet, ConfigurationError> {
    {
        let guard = DEFAULT_VALIDATORS
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(set) = guard.as_ref() {
            return Ok(Arc::clone(set));
        }
    }

    // Build under the write lock so concurrent first calls construct once.
    let mut guard = DEFAULT_VALIDATORS
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_ref() {
        return Ok(Arc::clone(set));
    }

    let set: ValidatorSet = get_password_validators(&auth_password_validators())?.into();

    #[cfg(feature = "tracing")]
    tracing::info!("Default password validators initialized: {} validators", set.len());

    *guard = Some(Arc::clone(&set));
    Ok(set)
}

/// Drops the cached default validator set; the next use rebuilds it.
pub fn clear_default_password_validators() {
    let mut guard = DEFAULT_VALIDATORS
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common_passwords::COMMON_PASSWORDS_PATH_ENV;
    use crate::config::{
        OptionValue, default_validator_configs, reset_auth_password_validators_for_testing,
        set_auth_password_validators,
    };
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value); }
    }

    fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key); }
    }

    fn setup_common_passwords() -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        for pwd in ["password", "123456", "qwerty", "admin"] {
            writeln!(temp_file, "{}", pwd).expect("Failed to write");
        }
        set_env(COMMON_PASSWORDS_PATH_ENV, temp_file.path().to_str().unwrap());
        temp_file
    }

    fn names(validators: &[Box<dyn PasswordValidator>]) -> Vec<&'static str> {
        validators.iter().map(|v| v.name()).collect()
    }

    #[test]
    fn test_builtins_registered() {
        let registry = ValidatorRegistry::with_builtins();
        assert_eq!(registry.names().len(), 9);
        for config in default_validator_configs() {
            assert!(registry.contains(&config.name), "{} missing", config.name);
        }
    }

    #[test]
    fn test_build_preserves_order() {
        let config = vec![
            ValidatorConfig::new("NoRepeatsValidator"),
            ValidatorConfig::new("MinimumLengthValidator"),
            ValidatorConfig::new("NumericPasswordValidator"),
        ];
        let validators = get_password_validators(&config).unwrap();
        assert_eq!(
            names(&validators),
            vec!["NoRepeatsValidator", "MinimumLengthValidator", "NumericPasswordValidator"]
        );
    }

    #[test]
    fn test_unknown_validator() {
        let config = vec![
            ValidatorConfig::new("MinimumLengthValidator"),
            ValidatorConfig::new("accounts.validators.DoesNotExist"),
        ];
        match get_password_validators(&config) {
            Err(ConfigurationError::UnknownValidator(name)) => {
                assert_eq!(name, "accounts.validators.DoesNotExist")
            }
            Err(other) => panic!("Expected UnknownValidator, got {other}"),
            Ok(_) => panic!("Expected UnknownValidator error"),
        }
    }

    #[test]
    fn test_unexpected_option() {
        let config = vec![ValidatorConfig::new("NoRepeatsValidator").with_option("min_length", 3)];
        assert!(matches!(
            get_password_validators(&config),
            Err(ConfigurationError::UnexpectedOption { .. })
        ));
    }

    #[test]
    fn test_options_round_trip() {
        let temp_file = setup_common_passwords_file();
        let config = vec![
            ValidatorConfig::new("UserAttributeSimilarityValidator")
                .with_option("user_attributes", &["username", "email"][..])
                .with_option("max_similarity", 0.7),
            ValidatorConfig::new("MinimumLengthValidator").with_option("min_length", 10),
            ValidatorConfig::new("CommonPasswordValidator")
                .with_option("password_list_path", temp_file.path().to_str().unwrap()),
            ValidatorConfig::new("NumericPasswordValidator"),
            ValidatorConfig::new("NoRepeatsValidator").with_option("max_repeats", 3),
        ];
        let validators = get_password_validators(&config).unwrap();
        for (validator, entry) in validators.iter().zip(&config) {
            assert_eq!(validator.options(), entry.options, "{}", entry.name);
        }
    }

    fn setup_common_passwords_file() -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(temp_file, "password").expect("Failed to write");
        temp_file
    }

    #[test]
    fn test_custom_registry_entry() {
        let mut registry = ValidatorRegistry::new();
        registry.register("Strict", |_| Ok(Box::new(MinimumLengthValidator::new(20))));
        let validators = registry.build(&[ValidatorConfig::new("Strict")]).unwrap();
        assert_eq!(validators[0].options().get("min_length"), Some(&OptionValue::Int(20)));
        assert!(registry.build(&[ValidatorConfig::new("MinimumLengthValidator")]).is_err());
    }

    #[test]
    fn test_register_validator_globally() {
        register_validator("registry_test.LongPassword", |o| {
            Ok(Box::new(MinimumLengthValidator::from_options(o)?))
        });
        let config = vec![
            ValidatorConfig::new("registry_test.LongPassword").with_option("min_length", 16),
        ];
        let validators = get_password_validators(&config).unwrap();
        assert_eq!(validators[0].name(), "MinimumLengthValidator");
    }

    #[test]
    #[serial]
    fn test_default_set_is_cached() {
        let _list = setup_common_passwords();
        reset_auth_password_validators_for_testing();
        clear_default_password_validators();

        let first = get_default_password_validators().unwrap();
        let second = get_default_password_validators().unwrap();
        assert_eq!(first.len(), 9);
        assert!(Arc::ptr_eq(&first, &second));

        clear_default_password_validators();
        let rebuilt = get_default_password_validators().unwrap();
        assert!(!Arc::ptr_eq(&first, &rebuilt));

        clear_default_password_validators();
        remove_env(COMMON_PASSWORDS_PATH_ENV);
    }

    #[test]
    #[serial]
    fn test_default_set_follows_configuration() {
        reset_auth_password_validators_for_testing();
        clear_default_password_validators();
        set_auth_password_validators(vec![
            ValidatorConfig::new("AtLeastOneDigitValidator"),
            ValidatorConfig::new("NoRepeatsValidator"),
        ]);

        let set = get_default_password_validators().unwrap();
        assert_eq!(names(&set), vec!["AtLeastOneDigitValidator", "NoRepeatsValidator"]);

        clear_default_password_validators();
        reset_auth_password_validators_for_testing();
    }

    #[test]
    #[serial]
    fn test_default_set_build_failure_not_cached() {
        reset_auth_password_validators_for_testing();
        clear_default_password_validators();
        set_env(COMMON_PASSWORDS_PATH_ENV, "/nonexistent/common.txt");

        assert!(matches!(
            get_default_password_validators(),
            Err(ConfigurationError::CommonPasswords(_))
        ));

        let _list = setup_common_passwords();
        assert!(get_default_password_validators().is_ok());

        clear_default_password_validators();
        remove_env(COMMON_PASSWORDS_PATH_ENV);
    }
}
