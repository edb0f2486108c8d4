//! Error types for cartlink
//!
//! Provides a unified error type for all operations. Every variant is
//! terminal: a command round trip either fully succeeds or aborts.

use std::time::Duration;

use thiserror::Error;

use crate::protocol::ResponseCode;

/// Result type alias using CartError
pub type Result<T> = std::result::Result<T, CartError>;

/// Unified error type for cartlink operations
#[derive(Debug, Error)]
pub enum CartError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    // -------------------------------------------------------------------------
    // Host-side Validation Errors
    // -------------------------------------------------------------------------
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Payload too large: {0} bytes does not fit a 4-byte length prefix")]
    PayloadTooLarge(usize),

    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Device Status Errors
    // -------------------------------------------------------------------------
    #[error("Command not recognized. Try \"help\" for command reference.")]
    UnknownCommand,

    /// Device or cartridge state is inconsistent (bad banks, unknown type)
    #[error("{}", .0.message())]
    CartridgeIntegrity(ResponseCode),

    /// The attached cartridge lacks the requested capability
    #[error("{}", .0.message())]
    UnsupportedOperation(ResponseCode),

    /// Payload length disagrees with the size the target expects
    #[error("{}", .0.message())]
    SizeMismatch(ResponseCode),

    /// Status byte outside the defined set
    #[error("Invalid response type: {0}")]
    InvalidResponse(u8),

    // -------------------------------------------------------------------------
    // Flow Control Errors
    // -------------------------------------------------------------------------
    #[error(
        "Transfer timed out: no progress for {}s (waiting for {expected} bytes, {available} available)",
        .timeout.as_secs()
    )]
    TransferStall {
        timeout: Duration,
        expected: usize,
        available: usize,
    },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CartError {
    /// Process exit code for this error kind
    ///
    /// Only consulted when the CLI runs with strict exit codes; the default
    /// behavior exits neutrally on every path.
    pub fn exit_code(&self) -> i32 {
        match self {
            CartError::Io(_) | CartError::Serial(_) => 1,
            CartError::UnknownCommand => 2,
            CartError::CartridgeIntegrity(_) => 3,
            CartError::UnsupportedOperation(_) => 4,
            CartError::SizeMismatch(_) => 5,
            CartError::InvalidResponse(_) => 6,
            CartError::TransferStall { .. } => 7,
            CartError::InvalidCommand(_)
            | CartError::PayloadTooLarge(_)
            | CartError::Protocol(_) => 8,
            CartError::Config(_) => 9,
        }
    }

    /// Whether this error was reported by the device rather than detected locally
    pub fn is_device_status(&self) -> bool {
        matches!(
            self,
            CartError::UnknownCommand
                | CartError::CartridgeIntegrity(_)
                | CartError::UnsupportedOperation(_)
                | CartError::SizeMismatch(_)
        )
    }
}
