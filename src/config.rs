//! Surface configuration
//!
//! A surface is described by a small static configuration object produced by
//! the packaging step: the command to run, window title, working directory,
//! extra environment variables, and an optional initial size. It is loaded
//! exactly once per surface and immutable afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Fixed fallback size used when the configuration leaves `initial_size`
/// unset, in logical pixels.
pub const DEFAULT_SIZE: (u32, u32) = (800, 600);

/// Initial window size in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeConfig {
    pub width: u32,
    pub height: u32,
}

/// Static configuration for one terminal surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Command line to run inside the surface
    pub command: String,

    /// Window title; falls back to the command when blank
    #[serde(default)]
    pub title: String,

    /// Working directory for the command
    #[serde(default)]
    pub working_directory: Option<String>,

    /// Extra environment variables for the command
    #[serde(default)]
    pub environment: HashMap<String, String>,

    /// Initial window size; `None` means use [`DEFAULT_SIZE`]
    #[serde(default)]
    pub initial_size: Option<SizeConfig>,
}

impl SurfaceConfig {
    /// Create a configuration running the given command with defaults for
    /// everything else.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            title: String::new(),
            working_directory: None,
            environment: HashMap::new(),
            initial_size: None,
        }
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration. A command that is empty after trimming is
    /// fatal: there is nothing to run inside the surface.
    pub fn validate(&self) -> Result<()> {
        if self.command.trim().is_empty() {
            return Err(Error::EmptyCommand);
        }
        Ok(())
    }

    /// Effective window title.
    pub fn title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.command
        } else {
            &self.title
        }
    }

    /// Effective initial size in logical pixels.
    pub fn initial_size(&self) -> (u32, u32) {
        match self.initial_size {
            Some(size) => (size.width, size.height),
            None => DEFAULT_SIZE,
        }
    }
}
