//! # Shell Error Types
//!
//! Everything that can go wrong between reading a line and printing a reply.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Shell Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Start-up       │  │   Input         │  │     Engine              │ │
//! │  │  (fatal)        │  │   (recoverable) │  │     (recoverable)       │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Io             │  │  Parse          │  │  Core(CoreError)        │ │
//! │  │  Toml           │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Recoverable errors are printed and the read loop carries on.

use grocer_core::CoreError;
use thiserror::Error;

pub type ShellResult<T> = Result<T, ShellError>;

#[derive(Debug, Error)]
pub enum ShellError {
    // =========================================================================
    // Start-up Errors
    // =========================================================================
    /// Reading a config/dataset file or stdin failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A config or dataset file is not valid TOML for its shape.
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid shell configuration: {0}")]
    InvalidConfig(String),

    // =========================================================================
    // Per-Command Errors
    // =========================================================================
    /// The input line is not a known command or is missing arguments.
    #[error("{0}")]
    Parse(String),

    /// The engine rejected the command.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ShellError {
    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        ShellError::Parse(message.into())
    }

    /// Whether the read loop may continue after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ShellError::Parse(_) | ShellError::Core(_))
    }
}
