//! In-memory Link
//!
//! A scripted peer for simulation, tests and benchmarks. Every host write is
//! recorded and handed to an optional responder, whose reply is appended to
//! the inbound buffer.

use std::io;
use std::sync::Arc;

use bytes::{Buf, BytesMut};
use parking_lot::Mutex;

use crate::error::Result;
use super::Link;

/// Reacts to one host write with the bytes the peer sends back
pub type Responder = Box<dyn FnMut(&[u8]) -> Vec<u8> + Send>;

/// One host write, as seen by the peer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRecord {
    /// Bytes written
    pub bytes: Vec<u8>,

    /// Inbound bytes the host had not read yet when it wrote
    pub unread_inbound: usize,
}

#[derive(Default)]
struct Shared {
    inbound: BytesMut,
    sent: Vec<SendRecord>,
    received: usize,
    closed: bool,
}

/// In-memory link with a scripted peer
pub struct MemoryLink {
    shared: Arc<Mutex<Shared>>,
    responder: Option<Responder>,
}

/// Inspection handle that stays valid after the link is moved or dropped
#[derive(Clone)]
pub struct MemoryLinkHandle {
    shared: Arc<Mutex<Shared>>,
}

impl MemoryLink {
    /// Create a link whose peer never answers on its own
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared::default())),
            responder: None,
        }
    }

    /// Create a link whose peer answers every host write
    pub fn with_responder<F>(responder: F) -> Self
    where
        F: FnMut(&[u8]) -> Vec<u8> + Send + 'static,
    {
        Self {
            shared: Arc::new(Mutex::new(Shared::default())),
            responder: Some(Box::new(responder)),
        }
    }

    /// Get an inspection handle
    pub fn handle(&self) -> MemoryLinkHandle {
        MemoryLinkHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Queue bytes from the peer
    pub fn push_inbound(&self, bytes: &[u8]) {
        self.shared.lock().inbound.extend_from_slice(bytes);
    }
}

impl Default for MemoryLink {
    fn default() -> Self {
        Self::new()
    }
}

impl Link for MemoryLink {
    fn available(&mut self) -> Result<usize> {
        Ok(self.shared.lock().inbound.len())
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<()> {
        let mut shared = self.shared.lock();

        if shared.inbound.len() < buf.len() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "requested {} bytes, only {} buffered",
                    buf.len(),
                    shared.inbound.len()
                ),
            )
            .into());
        }

        shared.inbound.copy_to_slice(buf);
        shared.received += buf.len();
        Ok(())
    }

    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        {
            let mut shared = self.shared.lock();
            let unread_inbound = shared.inbound.len();
            shared.sent.push(SendRecord {
                bytes: bytes.to_vec(),
                unread_inbound,
            });
        }

        if let Some(responder) = self.responder.as_mut() {
            let reply = responder(bytes);
            self.shared.lock().inbound.extend_from_slice(&reply);
        }

        Ok(())
    }
}

impl Drop for MemoryLink {
    fn drop(&mut self) {
        self.shared.lock().closed = true;
    }
}

impl MemoryLinkHandle {
    /// Every host write so far, in order
    pub fn sent(&self) -> Vec<SendRecord> {
        self.shared.lock().sent.clone()
    }

    /// All host writes concatenated
    pub fn sent_bytes(&self) -> Vec<u8> {
        self.shared
            .lock()
            .sent
            .iter()
            .flat_map(|record| record.bytes.iter().copied())
            .collect()
    }

    /// Total bytes the host has read
    pub fn received(&self) -> usize {
        self.shared.lock().received
    }

    /// Inbound bytes the host has not read
    pub fn unread(&self) -> usize {
        self.shared.lock().inbound.len()
    }

    /// Whether the link has been dropped
    pub fn is_closed(&self) -> bool {
        self.shared.lock().closed
    }
}
