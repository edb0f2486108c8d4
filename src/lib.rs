//! # cartlink
//!
//! Host side of the serial transfer protocol spoken by a cartridge-reading
//! device over an 8N1 link:
//! - ASCII command line, one-byte status answer
//! - Length-prefixed streaming reads (device → host)
//! - Length-prefixed chunked writes with per-chunk acknowledgment
//! - Progress-relative stall watchdog
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Session                              │
//! │        (one command, exclusive link, state machine)          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┼──────────────────┐
//!          │            │                  │
//!          ▼            ▼                  ▼
//!   ┌─────────────┐ ┌──────────┐   ┌──────────────────┐
//!   │  Protocol   │ │ Watchdog │   │     Transfer     │
//!   │ (status,    │ │ (stall   │   │ (BulkReceiver,   │
//!   │  codec)     │ │  timer)  │   │  BulkTransmitter)│
//!   └─────────────┘ └────┬─────┘   └────────┬─────────┘
//!                        │                  │
//!                        ▼                  ▼
//!                   ┌─────────────────────────────┐
//!                   │            Link             │
//!                   │   (SerialLink, MemoryLink)  │
//!                   └─────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod link;
pub mod watchdog;
pub mod transfer;
pub mod session;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CartError, Result};
pub use config::Config;
pub use protocol::{Command, DataPhase, ResponseCode};
pub use session::{Session, SessionState, TransferSummary};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of cartlink
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
