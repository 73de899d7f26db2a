//! @ai:module:intent Locate and read fio run result files
//! @ai:module:layer infrastructure
//! @ai:module:public_api check_run_naming, run_filenames, DocumentLoader, DocumentLoaderTrait
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::input::document::FioDocument;
use std::path::{Path, PathBuf};

/// @ai:intent Reject run naming that cannot produce any file name
/// @ai:post Ok only if iterations > 0 and prefix and extension are non-empty
/// @ai:effects pure
pub fn check_run_naming(iterations: u32, prefix: &str, extension: &str) -> Result<()> {
    if iterations == 0 {
        return Err(Error::InvalidConfig(
            "iterations must be a positive integer".to_string(),
        ));
    }

    if prefix.is_empty() {
        return Err(Error::InvalidConfig(
            "input prefix must be a non-empty string".to_string(),
        ));
    }

    if extension.is_empty() {
        return Err(Error::InvalidConfig(
            "input extension must be a non-empty string".to_string(),
        ));
    }

    Ok(())
}

/// @ai:intent Generate `prefix{i}.{extension}` for i in 1..=iterations
/// @ai:pre iterations > 0, prefix and extension non-empty
/// @ai:effects pure
pub fn run_filenames(iterations: u32, prefix: &str, extension: &str) -> Result<Vec<PathBuf>> {
    check_run_naming(iterations, prefix, extension)?;

    Ok((1..=iterations)
        .map(|i| PathBuf::from(format!("{prefix}{i}.{extension}")))
        .collect())
}

/// @ai:intent Trait for reading run result documents
pub trait DocumentLoaderTrait: Send + Sync {
    /// @ai:intent Read and parse one run result file
    fn load(&self, path: &Path) -> Result<FioDocument>;
}

/// @ai:intent Reads fio JSON documents from the filesystem
pub struct DocumentLoader;

impl DocumentLoader {
    /// @ai:intent Create a new document loader
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Parse a document already held in memory
    /// @ai:effects pure
    pub fn parse(path: &Path, content: &str) -> Result<FioDocument> {
        serde_json::from_str(content).map_err(|source| Error::DocumentParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentLoaderTrait for DocumentLoader {
    /// @ai:intent Read and parse one run result file
    /// @ai:effects fs:read
    fn load(&self, path: &Path) -> Result<FioDocument> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::DocumentRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(path, &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_run_filenames() {
        let names = run_filenames(3, "test_file_", "json").unwrap();
        assert_eq!(
            names,
            vec![
                PathBuf::from("test_file_1.json"),
                PathBuf::from("test_file_2.json"),
                PathBuf::from("test_file_3.json"),
            ]
        );
    }

    #[test]
    fn test_run_filenames_keeps_directory_prefix() {
        let names = run_filenames(1, "results/randread-", "json").unwrap();
        assert_eq!(names, vec![PathBuf::from("results/randread-1.json")]);
    }

    #[test]
    fn test_run_filenames_rejects_zero_iterations() {
        assert!(matches!(
            run_filenames(0, "data_", "json"),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_run_filenames_rejects_empty_prefix() {
        assert!(matches!(
            run_filenames(5, "", "json"),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_check_run_naming_rejects_empty_extension() {
        let err = check_run_naming(2, "data_", "").unwrap_err();
        assert!(err.to_string().contains("extension"));
        assert!(check_run_naming(2, "data_", "json").is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = DocumentLoader::new().load(&temp.path().join("absent.json"));
        assert!(matches!(result, Err(Error::DocumentRead { .. })));
    }

    #[test]
    fn test_load_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("run1.json");
        std::fs::write(&path, "{\"jobs\": [").unwrap();

        let result = DocumentLoader::new().load(&path);
        assert!(matches!(result, Err(Error::DocumentParse { .. })));
    }

    #[test]
    fn test_load_valid_document() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("run1.json");
        std::fs::write(&path, r#"{"jobs": [{"usr_cpu": 1.5}]}"#).unwrap();

        let doc = DocumentLoader::new().load(&path).unwrap();
        assert_eq!(doc.first_job().unwrap().usr_cpu(), 1.5);
    }
}
