//! Program and configuration loading.
//!
//! This module reads the files the batch runner is pointed at. It performs:
//! 1. **Program loading:** Reads assembly text from disk.
//! 2. **Config loading:** Reads and validates a JSON configuration file.
//!
//! Failures carry the offending path in [`SimError::Io`].

use std::fs;
use std::path::Path;

use crate::common::error::SimError;
use crate::config::Config;

/// Reads a program file into a string.
///
/// # Arguments
///
/// * `path` - Path to the assembly source.
///
/// # Errors
///
/// Returns [`SimError::Io`] if the file cannot be read.
pub fn read_program(path: impl AsRef<Path>) -> Result<String, SimError> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and validates a JSON configuration file.
///
/// # Errors
///
/// Returns [`SimError::Io`] if the file cannot be read, and
/// [`SimError::Config`] or [`SimError::InvalidConfig`] if it is rejected.
pub fn read_config(path: impl AsRef<Path>) -> Result<Config, SimError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Config::from_json(&text)
}
