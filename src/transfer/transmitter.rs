//! Bulk Transmitter
//!
//! Host → device phase used by every write command.
//!
//! The device has a 64-byte receive buffer and echoes every byte it
//! consumes, so each chunk is followed by draining an acknowledgment of the
//! same length before the next chunk goes out.

use std::io::Write;

use crate::error::{CartError, Result};
use crate::link::Link;
use crate::protocol::{encode_length, ResponseCode, CHUNK_SIZE, STATUS_SIZE};
use crate::watchdog::{Clock, Watchdog};
use super::{Granularity, Progress, Transfer};

/// Sends an in-memory payload with per-chunk flow control
pub struct BulkTransmitter<'a, L: Link + ?Sized, C: Clock> {
    link: &'a mut L,
    watchdog: &'a mut Watchdog<C>,
}

impl<'a, L: Link + ?Sized, C: Clock> BulkTransmitter<'a, L, C> {
    pub fn new(link: &'a mut L, watchdog: &'a mut Watchdog<C>) -> Self {
        Self { link, watchdog }
    }

    /// Run the outbound phase
    ///
    /// 1. Send the 4-byte little-endian length `L`
    /// 2. Read one status byte; any code other than OK is terminal
    /// 3. For each chunk: send it, then wait for and discard its
    ///    acknowledgment. At most one chunk is ever in flight.
    ///
    /// A tail shorter than 64 bytes goes out as a final short chunk.
    /// Returns `L`.
    pub fn transmit<D>(&mut self, payload: &[u8], diag: &mut D) -> Result<u32>
    where
        D: Write + ?Sized,
    {
        let total = u32::try_from(payload.len())
            .map_err(|_| CartError::PayloadTooLarge(payload.len()))?;

        let size_line = Progress::start(&mut *diag, "Sending size...", None)?;
        self.link.send(&encode_length(total))?;
        size_line.finish("done!")?;

        self.watchdog.await_bytes(&mut *self.link, STATUS_SIZE)?;
        let mut status = [0u8; STATUS_SIZE];
        self.link.receive(&mut status)?;
        let code = ResponseCode::classify(status[0])?;
        tracing::debug!("Write size acknowledged with {}", code);
        code.check()?;

        let mut progress =
            Progress::start(&mut *diag, "Sending data...", Some(Granularity::Kibibytes))?;
        let mut transfer = Transfer::outbound(total);
        let mut ack = [0u8; CHUNK_SIZE];

        for (index, chunk) in payload.chunks(CHUNK_SIZE).enumerate() {
            debug_assert_eq!(chunk.len(), transfer.next_outbound_chunk());

            self.link.send(chunk)?;

            // Drain the echo before the next chunk goes out
            self.watchdog.await_bytes(&mut *self.link, chunk.len())?;
            self.link.receive(&mut ack[..chunk.len()])?;

            transfer.advance(chunk.len())?;
            tracing::trace!("Chunk {} acknowledged ({} bytes)", index, chunk.len());
            progress.update(transfer.moved(), total)?;
        }

        if payload.len() % CHUNK_SIZE != 0 {
            tracing::debug!(
                "Sent trailing partial chunk of {} bytes",
                payload.len() % CHUNK_SIZE
            );
        }

        progress.finish("done!")?;
        Ok(total)
    }
}
