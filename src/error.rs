//! Error types for the input bridge

use std::io;
use thiserror::Error;

/// Bridge error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while loading configuration
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed configuration file
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Surface command is empty after trimming
    #[error("Surface command must not be empty")]
    EmptyCommand,

    /// Engine initialization reported a non-success status
    #[error("Terminal engine failed to initialize")]
    EngineInit,

    /// Engine returned no handle for a new surface
    #[error("Terminal engine could not create a surface")]
    SurfaceCreation,
}

/// Result type for bridge operations
pub type Result<T> = std::result::Result<T, Error>;
