//! Transfer Module
//!
//! Length-prefixed bulk data phases that follow an OK status.
//!
//! ## Responsibilities
//! - Inbound: stream exactly the declared number of bytes to the data sink
//! - Outbound: send the payload in 64-byte chunks, one chunk in flight
//! - Progress reporting on the diagnostic sink

mod progress;
mod receiver;
mod transmitter;

pub use progress::{Granularity, Progress};
pub use receiver::BulkReceiver;
pub use transmitter::BulkTransmitter;

use crate::error::{CartError, Result};
use crate::protocol::CHUNK_SIZE;

/// Direction of a bulk phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Device → host
    Inbound,

    /// Host → device
    Outbound,
}

/// Byte accounting for one bulk phase
///
/// `moved` never exceeds `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    direction: Direction,
    total: u32,
    moved: u32,
}

impl Transfer {
    /// Start an inbound transfer of `total` bytes
    pub fn inbound(total: u32) -> Self {
        Self {
            direction: Direction::Inbound,
            total,
            moved: 0,
        }
    }

    /// Start an outbound transfer of `total` bytes
    pub fn outbound(total: u32) -> Self {
        Self {
            direction: Direction::Outbound,
            total,
            moved: 0,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Declared length
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Bytes moved so far
    pub fn moved(&self) -> u32 {
        self.moved
    }

    pub fn remaining(&self) -> u32 {
        self.total - self.moved
    }

    pub fn is_complete(&self) -> bool {
        self.moved == self.total
    }

    /// Size of the next inbound read
    ///
    /// A full chunk while at least 64 bytes remain, then single bytes for a
    /// tail that is not 64-aligned.
    pub fn next_inbound_chunk(&self) -> usize {
        match self.remaining() as usize {
            0 => 0,
            n if n >= CHUNK_SIZE => CHUNK_SIZE,
            _ => 1,
        }
    }

    /// Size of the next outbound write (the tail is sent as one short chunk)
    pub fn next_outbound_chunk(&self) -> usize {
        (self.remaining() as usize).min(CHUNK_SIZE)
    }

    /// Account for `count` moved bytes
    pub fn advance(&mut self, count: usize) -> Result<()> {
        if count > self.remaining() as usize {
            return Err(CartError::Protocol(format!(
                "{:?} transfer overrun: {} bytes past {} of {}",
                self.direction, count, self.moved, self.total
            )));
        }

        // Fits: count <= remaining <= u32::MAX
        self.moved += count as u32;
        Ok(())
    }
}
