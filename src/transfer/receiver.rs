//! Bulk Receiver
//!
//! Device → host phase used by `help`, `parse header` and every read
//! command.

use std::io::Write;

use crate::error::Result;
use crate::link::Link;
use crate::protocol::{decode_length, CHUNK_SIZE, LENGTH_PREFIX_SIZE};
use crate::watchdog::{Clock, Watchdog};
use super::{Progress, Transfer};

/// Streams a length-prefixed payload from the link into a data sink
pub struct BulkReceiver<'a, L: Link + ?Sized, C: Clock> {
    link: &'a mut L,
    watchdog: &'a mut Watchdog<C>,
}

impl<'a, L: Link + ?Sized, C: Clock> BulkReceiver<'a, L, C> {
    pub fn new(link: &'a mut L, watchdog: &'a mut Watchdog<C>) -> Self {
        Self { link, watchdog }
    }

    /// Run the inbound phase
    ///
    /// 1. Read the 4-byte little-endian total `T`
    /// 2. Read 64-byte chunks while at least 64 bytes remain, then single
    ///    bytes, forwarding each one to `output` as it arrives
    /// 3. Stop exactly at `T`
    ///
    /// Returns `T`.
    pub fn receive<W, D>(&mut self, output: &mut W, diag: &mut D) -> Result<u32>
    where
        W: Write + ?Sized,
        D: Write + ?Sized,
    {
        let mut progress = Progress::start(&mut *diag, "Receiving data...", None)?;

        self.watchdog.await_bytes(&mut *self.link, LENGTH_PREFIX_SIZE)?;
        let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
        self.link.receive(&mut prefix)?;
        let total = decode_length(prefix);

        tracing::debug!("Inbound transfer of {} bytes", total);

        let mut transfer = Transfer::inbound(total);
        let mut chunk = [0u8; CHUNK_SIZE];

        while !transfer.is_complete() {
            let size = transfer.next_inbound_chunk();

            self.watchdog.await_bytes(&mut *self.link, size)?;
            let buf = &mut chunk[..size];
            self.link.receive(buf)?;
            output.write_all(buf)?;

            transfer.advance(size)?;
            progress.update(transfer.moved(), total)?;
        }

        output.flush()?;
        progress.finish("...done!")?;

        tracing::trace!("Inbound transfer complete");
        Ok(total)
    }
}
