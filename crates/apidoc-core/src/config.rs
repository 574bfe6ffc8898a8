//! Generator configuration (`apidoc.toml`) parsing and validation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The configuration file name looked up by the CLI.
pub const CONFIG_FILE: &str = "apidoc.toml";

/// Options controlling document generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorOptions {
    /// Do not prepend a table of contents to container documents.
    pub skip_table_of_contents: bool,

    /// Extension of every generated document, without the leading dot.
    pub output_extension: String,

    /// Language tag used for fenced signature blocks.
    pub code_language: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            skip_table_of_contents: false,
            output_extension: "md".to_string(),
            code_language: "typescript".to_string(),
        }
    }
}

impl GeneratorOptions {
    /// Load options from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse options from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or a value is out of range.
    pub fn parse(content: &str) -> Result<Self> {
        let options: Self = toml::from_str(content)?;
        options.validate()?;
        Ok(options)
    }

    /// Validate the options.
    pub fn validate(&self) -> Result<()> {
        let ext = &self.output_extension;

        if ext.is_empty() {
            return Err(Error::InvalidOption {
                field: "output_extension",
                reason: "extension cannot be empty".to_string(),
            });
        }

        if ext.contains(['.', '/', '\\']) {
            return Err(Error::InvalidOption {
                field: "output_extension",
                reason: format!("'{ext}' must not contain dots or path separators"),
            });
        }

        if self.code_language.contains(char::is_whitespace) {
            return Err(Error::InvalidOption {
                field: "code_language",
                reason: "language tag cannot contain whitespace".to_string(),
            });
        }

        Ok(())
    }
}
