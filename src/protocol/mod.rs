//! Protocol Module
//!
//! Defines the serial command/response protocol spoken with the device.
//!
//! ## Exchange
//! ```text
//! host                                device
//!  │ ── "<command>\r" ───────────────────▶ │
//!  │ ◀───────────────────────── status (1) │
//!  │        (OK only, per command)         │
//!  │ ◀── len (4) + data ────────────────── │   read / help / parse header
//!  │ ── len (4) ─────────────────────────▶ │   write
//!  │ ◀───────────────────────── status (1) │
//!  │ ── chunk (64) ──────────────────────▶ │
//!  │ ◀────────────────────────── ack (64)  │   repeated per chunk
//! ```
//!
//! ### Status Codes
//! - 0: OK
//! - 1: UNKNOWN_COMMAND
//! - 10-12: cartridge integrity (ROM banks, RAM banks, cartridge type)
//! - 21-24: RAM write size, no RAM, no RTC, RTC write size

mod command;
mod response;
mod codec;

pub use command::{Command, DataPhase, KnownCommand};
pub use response::{ResponseClass, ResponseCode};
pub use codec::{
    decode_length, encode_command, encode_length, write_command, CHUNK_SIZE,
    COMMAND_TERMINATOR, LENGTH_PREFIX_SIZE, STATUS_SIZE,
};
