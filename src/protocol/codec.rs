//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ### Command (host → device)
//! ```text
//! ┌─────────────────────────────┬────────┐
//! │     ASCII command text      │ \r (1) │
//! └─────────────────────────────┴────────┘
//! ```
//!
//! ### Status (device → host)
//! ```text
//! ┌──────────┐
//! │Status(1) │
//! └──────────┘
//! ```
//!
//! ### Bulk phase (either direction, after OK)
//! ```text
//! ┌──────────┬──────────┬──────────┬─────┬──────────┐
//! │ Len (4)  │ Chunk 64 │ Chunk 64 │ ... │  Tail    │
//! └──────────┴──────────┴──────────┴─────┴──────────┘
//! ```
//! The length is unsigned little-endian.

use crate::error::Result;
use crate::link::Link;
use super::Command;

/// Line terminator appended to every command
pub const COMMAND_TERMINATOR: u8 = b'\r';

/// Size of the status byte
pub const STATUS_SIZE: usize = 1;

/// Size of the bulk length prefix
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Bulk chunk size, matching the device's 64-byte receive buffer
pub const CHUNK_SIZE: usize = 64;

// =============================================================================
// Command Encoding
// =============================================================================

/// Encode a command line
///
/// Format: ASCII text + `\r`
pub fn encode_command(command: &Command) -> Vec<u8> {
    let text = command.as_str().as_bytes();

    let mut message = Vec::with_capacity(text.len() + 1);
    message.extend_from_slice(text);
    message.push(COMMAND_TERMINATOR);

    message
}

/// Encode a command line and send it in a single write
pub fn write_command<L: Link + ?Sized>(link: &mut L, command: &Command) -> Result<()> {
    link.send(&encode_command(command))
}

// =============================================================================
// Length Prefix Encoding/Decoding
// =============================================================================

/// Encode a bulk length prefix
pub fn encode_length(length: u32) -> [u8; LENGTH_PREFIX_SIZE] {
    length.to_le_bytes()
}

/// Decode a bulk length prefix
pub fn decode_length(bytes: [u8; LENGTH_PREFIX_SIZE]) -> u32 {
    u32::from_le_bytes(bytes)
}
