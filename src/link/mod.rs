//! Link Module
//!
//! The bidirectional byte channel between host and device.
//!
//! ## Lifecycle
//! - Opened once per command invocation
//! - Exclusively owned by the running session
//! - Closed on drop, whatever path the session ends on

mod serial;
mod memory;

pub use serial::{list_ports, SerialLink};
pub use memory::{MemoryLink, MemoryLinkHandle, Responder, SendRecord};

use crate::error::Result;

/// A byte channel with an availability counter
pub trait Link {
    /// Bytes buffered and readable without blocking
    fn available(&mut self) -> Result<usize>;

    /// Read exactly `buf.len()` bytes
    fn receive(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Write all of `bytes` and flush
    fn send(&mut self, bytes: &[u8]) -> Result<()>;
}

impl<L: Link + ?Sized> Link for Box<L> {
    fn available(&mut self) -> Result<usize> {
        (**self).available()
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<()> {
        (**self).receive(buf)
    }

    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).send(bytes)
    }
}
