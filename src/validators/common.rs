//! Common password rule.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use super::PasswordValidator;
use crate::common_passwords::{default_password_list_path, load_password_list};
use crate::config::{OptionReader, ValidatorOptions};
use crate::error::{CommonPasswordsError, ConfigurationError, ValidationError};
use crate::i18n::{LocalizedText, Message};
use crate::user::PasswordUser;

/// Rejects passwords found in a list of commonly used passwords.
///
/// The list is loaded once at construction and shared by every call. Matching
/// ignores case and surrounding whitespace.
#[derive(Debug, Clone)]
pub struct CommonPasswordValidator {
    passwords: Arc<HashSet<String>>,
    password_list_path: Option<PathBuf>,
}

impl CommonPasswordValidator {
    pub const NAME: &'static str = "CommonPasswordValidator";

    /// Loads the list at `path` (plain text or gzip).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CommonPasswordsError> {
        let path = path.as_ref();
        let passwords = load_password_list(path)?;
        Ok(Self {
            passwords: Arc::new(passwords),
            password_list_path: Some(path.to_path_buf()),
        })
    }

    /// Builds the validator from an in-memory list.
    pub fn from_passwords<I, S>(passwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let passwords = passwords
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        Self {
            passwords: Arc::new(passwords),
            password_list_path: None,
        }
    }

    /// Number of distinct entries in the list.
    pub fn len(&self) -> usize {
        self.passwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passwords.is_empty()
    }

    pub(crate) fn from_options(options: &ValidatorOptions) -> Result<Self, ConfigurationError> {
        let reader = OptionReader::new(Self::NAME, options, &["password_list_path"])?;
        let path = reader
            .string("password_list_path")?
            .map(PathBuf::from)
            .unwrap_or_else(default_password_list_path);
        Ok(Self::from_path(path)?)
    }
}

impl PasswordValidator for CommonPasswordValidator {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn validate(
        &self,
        password: &SecretString,
        _user: Option<&dyn PasswordUser>,
    ) -> Result<(), ValidationError> {
        let normalized = password.expose_secret().trim().to_lowercase();
        if self.passwords.contains(&normalized) {
            return Err(ValidationError::new(
                Message::new("This password is too common."),
                "password_too_common",
            ));
        }
        Ok(())
    }

    fn help_text(&self) -> LocalizedText {
        LocalizedText::new(Message::new(
            "Your password can't be a commonly used password.",
        ))
    }

    fn options(&self) -> ValidatorOptions {
        let mut options = ValidatorOptions::new();
        if let Some(path) = &self.password_list_path {
            options.insert(
                "password_list_path".to_string(),
                path.to_string_lossy().into_owned().into(),
            );
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    fn setup_with_tempfile(passwords: &[&str]) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        for pwd in passwords {
            writeln!(temp_file, "{}", pwd).expect("Failed to write");
        }
        temp_file
    }

    #[test]
    fn test_common_password_case_insensitive_and_trimmed() {
        let temp_file = setup_with_tempfile(&["password", "123456"]);
        let validator = CommonPasswordValidator::from_path(temp_file.path()).unwrap();

        for pwd in ["Password", " password ", "123456"] {
            let err = validator.validate(&secret(pwd), None).unwrap_err();
            assert_eq!(err.code(), "password_too_common");
        }
        assert!(validator.validate(&secret("Xk9!qzT2"), None).is_ok());
    }

    #[test]
    fn test_from_passwords() {
        let validator = CommonPasswordValidator::from_passwords(["Qwerty", "", "admin"]);
        assert_eq!(validator.len(), 2);
        assert!(validator.validate(&secret("QWERTY"), None).is_err());
    }

    #[test]
    fn test_clones_share_list() {
        let validator = CommonPasswordValidator::from_passwords(["admin"]);
        let clone = validator.clone();
        assert!(Arc::ptr_eq(&validator.passwords, &clone.passwords));
    }

    #[test]
    fn test_from_options_missing_file() {
        let options = crate::config::ValidatorConfig::new(CommonPasswordValidator::NAME)
            .with_option("password_list_path", "/nonexistent/common.txt")
            .options;
        let result = CommonPasswordValidator::from_options(&options);
        assert!(matches!(
            result,
            Err(ConfigurationError::CommonPasswords(CommonPasswordsError::FileNotFound(_)))
        ));
    }

    #[test]
    fn test_from_options_blank_file_accepts_everything() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        write!(temp_file, "\n   \n\n").expect("Failed to write");
        let options = crate::config::ValidatorConfig::new(CommonPasswordValidator::NAME)
            .with_option("password_list_path", temp_file.path().to_str().unwrap())
            .options;
        let validator = CommonPasswordValidator::from_options(&options).unwrap();
        assert!(validator.is_empty());
        assert!(validator.validate(&secret("password"), None).is_ok());
    }

    #[test]
    fn test_options_round_trip() {
        let temp_file = setup_with_tempfile(&["letmein"]);
        let options = crate::config::ValidatorConfig::new(CommonPasswordValidator::NAME)
            .with_option("password_list_path", temp_file.path().to_str().unwrap())
            .options;
        let validator = CommonPasswordValidator::from_options(&options).unwrap();
        assert_eq!(validator.options(), options);
    }
}
