use anyhow::{anyhow, Result};
use phonenumber::country;
use std::path::Path;

/// Validation utilities for startup-time input checks
#[derive(Debug, Copy, Clone)]
pub struct InputValidator;

impl InputValidator {
    /// Validate the target directory; a bad directory is fatal before any
    /// file is touched.
    pub fn validate_target_directory(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(anyhow!("The specified directory does not exist: {}", path.display()));
        }

        if !path.is_dir() {
            return Err(anyhow!("The specified path is not a directory: {}", path.display()));
        }

        Ok(())
    }

    /// Validate the contacts file path.
    ///
    /// A missing file is the normal first-run case; in strict mode a missing
    /// parent directory is fatal because the final save would fail only
    /// after files were already renamed.
    pub fn validate_contacts_path(path: &Path, strict: bool) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(anyhow!("Contacts file path cannot be empty"));
        }

        if path.exists() && !path.is_file() {
            return Err(anyhow!("Contacts path is not a file: {}", path.display()));
        }

        if strict {
            let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
            if let Some(parent) = parent {
                if !parent.is_dir() {
                    return Err(anyhow!(
                        "Contacts file directory does not exist: {}",
                        parent.display()
                    ));
                }
            }
        }

        Ok(())
    }

    /// Parse a two-letter region code into a phone-number region
    pub fn parse_region(code: &str) -> Result<country::Id> {
        let normalized = code.trim().to_uppercase();
        normalized
            .parse::<country::Id>()
            .map_err(|_| anyhow!("Unknown phone region code: {code}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_target_directory_missing() {
        assert!(InputValidator::validate_target_directory(Path::new("/no/such/dir")).is_err());
    }

    #[test]
    fn test_validate_target_directory_file_rejected() {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        assert!(InputValidator::validate_target_directory(file.path()).is_err());
    }

    #[test]
    fn test_validate_target_directory_ok() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(InputValidator::validate_target_directory(dir.path()).is_ok());
    }

    #[test]
    fn test_validate_contacts_path_missing_file_ok() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("contacts.toml");
        assert!(InputValidator::validate_contacts_path(&path, false).is_ok());
        assert!(InputValidator::validate_contacts_path(&path, true).is_ok());
    }

    #[test]
    fn test_validate_contacts_path_strict_missing_parent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("contacts.toml");
        assert!(InputValidator::validate_contacts_path(&path, false).is_ok());
        assert!(InputValidator::validate_contacts_path(&path, true).is_err());
    }

    #[test]
    fn test_parse_region_known_codes() {
        assert!(InputValidator::parse_region("HU").is_ok());
        assert!(InputValidator::parse_region("us").is_ok());
    }

    #[test]
    fn test_parse_region_unknown_code() {
        assert!(InputValidator::parse_region("ZZ").is_err());
    }
}
