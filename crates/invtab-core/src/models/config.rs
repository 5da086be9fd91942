//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration for the invtab pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InvtabConfig {
    /// Directory layout for the pipeline stages.
    pub paths: PathsConfig,

    /// Line-item parser configuration.
    pub parser: ParserConfig,
}

impl Default for InvtabConfig {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            parser: ParserConfig::default(),
        }
    }
}

/// Pipeline directory layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory scanned for input PDFs.
    pub input_dir: PathBuf,

    /// Directory for per-document extracted text files.
    pub text_dir: PathBuf,

    /// Directory for per-document CSV files.
    pub table_dir: PathBuf,

    /// Path of the final combined CSV.
    pub combined_output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("filesToExtract"),
            text_dir: PathBuf::from("out/text"),
            table_dir: PathBuf::from("out/csv"),
            combined_output: PathBuf::from("out/combined_invoices.csv"),
        }
    }
}

/// Line-item parser configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Log the quantity x unit price arithmetic check for each item.
    pub validate_amounts: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            validate_amounts: false,
        }
    }
}

impl InvtabConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
