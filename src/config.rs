//! @ai:module:intent Configuration for the fio report pipeline
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportConfig
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::input::check_run_naming;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// @ai:intent Inputs and outputs for one report generation
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Number of run result files to expect
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Prefix of each run file, e.g. `fio-output` for `fio-output1.json`
    #[serde(default = "default_input_prefix")]
    pub input_prefix: String,
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default = "default_csv_output")]
    pub csv_output: PathBuf,
    #[serde(default)]
    pub json_output: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            input_prefix: default_input_prefix(),
            extension: default_extension(),
            csv_output: default_csv_output(),
            json_output: None,
        }
    }
}

fn default_iterations() -> u32 {
    5
}

fn default_input_prefix() -> String {
    "fio-csv".to_string()
}

fn default_extension() -> String {
    "json".to_string()
}

fn default_csv_output() -> PathBuf {
    PathBuf::from("fio_results.csv")
}

impl ReportConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| Error::ConfigWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    /// @ai:intent Reject configurations that cannot produce a report
    /// @ai:post Ok only if iterations > 0 and prefix, extension and csv path are non-empty
    /// @ai:effects pure
    pub fn validate(&self) -> Result<()> {
        check_run_naming(self.iterations, &self.input_prefix, &self.extension)?;

        if self.csv_output.as_os_str().is_empty() {
            return Err(Error::InvalidConfig(
                "CSV output path must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = ReportConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.iterations, 5);
        assert_eq!(config.input_prefix, "fio-csv");
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let config = ReportConfig {
            iterations: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert!(err.to_string().contains("iterations"));
    }

    #[test]
    fn test_empty_prefix_rejected() {
        let config = ReportConfig {
            input_prefix: String::new(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_matches_run_naming_messages() {
        let config = ReportConfig {
            extension: String::new(),
            ..Default::default()
        };
        let from_config = config.validate().unwrap_err().to_string();
        let from_naming = check_run_naming(5, "fio-csv", "").unwrap_err().to_string();
        assert_eq!(from_config, from_naming);
    }

    #[test]
    fn test_empty_csv_output_rejected() {
        let config = ReportConfig {
            csv_output: PathBuf::new(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("fio-report.toml");

        let config = ReportConfig {
            iterations: 3,
            input_prefix: "seqread-".to_string(),
            json_output: Some(PathBuf::from("summary.json")),
            ..Default::default()
        };
        config.save(&path).unwrap();

        let loaded = ReportConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("partial.toml");
        std::fs::write(&path, "iterations = 2\n").unwrap();

        let loaded = ReportConfig::load(&path).unwrap();
        assert_eq!(loaded.iterations, 2);
        assert_eq!(loaded.extension, "json");
        assert_eq!(loaded.csv_output, PathBuf::from("fio_results.csv"));
        assert!(loaded.json_output.is_none());
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.toml");
        std::fs::write(&path, "iterations = [").unwrap();

        assert!(matches!(
            ReportConfig::load(&path),
            Err(Error::ConfigParse { .. })
        ));
    }
}
