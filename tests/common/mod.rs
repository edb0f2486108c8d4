//! Shared helpers: configs and scripted device responders.

#![allow(dead_code)]

use std::time::Duration;

use cartlink::config::Config;
use cartlink::link::Link;
use cartlink::protocol::encode_length;
use cartlink::Result;

pub const STALL_TIMEOUT: Duration = Duration::from_secs(30);
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub fn test_config() -> Config {
    Config::builder()
        .stall_timeout(STALL_TIMEOUT)
        .poll_interval(POLL_INTERVAL)
        .build()
        .unwrap()
}

/// Deterministic payload of `len` bytes
pub fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

/// Device answering a read-class command: status, then (on OK) the
/// length-prefixed payload
pub fn read_device(status: u8, payload: Vec<u8>) -> impl FnMut(&[u8]) -> Vec<u8> + Send {
    let mut answered = false;
    move |_bytes| {
        if answered {
            return Vec::new();
        }
        answered = true;

        let mut reply = vec![status];
        if status == 0 {
            reply.extend_from_slice(&encode_length(payload.len() as u32));
            reply.extend_from_slice(&payload);
        }
        reply
    }
}

/// Device answering a write-class command: command status, then the status
/// for the length prefix, then an echo of every chunk
pub fn write_device(status: u8, size_status: u8) -> impl FnMut(&[u8]) -> Vec<u8> + Send {
    let mut writes = 0usize;
    move |bytes| {
        writes += 1;
        match writes {
            1 => vec![status],
            2 => vec![size_status],
            _ => bytes.to_vec(),
        }
    }
}

/// Length-prefix stage of a write, without the command round trip
pub fn size_ack_device(size_status: u8) -> impl FnMut(&[u8]) -> Vec<u8> + Send {
    let mut writes = 0usize;
    move |bytes| {
        writes += 1;
        if writes == 1 {
            vec![size_status]
        } else {
            bytes.to_vec()
        }
    }
}

/// Link wrapper that records the size of every read
pub struct RecordingLink<L: Link> {
    pub inner: L,
    pub reads: Vec<usize>,
}

impl<L: Link> RecordingLink<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            reads: Vec::new(),
        }
    }
}

impl<L: Link> Link for RecordingLink<L> {
    fn available(&mut self) -> Result<usize> {
        self.inner.available()
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<()> {
        self.reads.push(buf.len());
        self.inner.receive(buf)
    }

    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.send(bytes)
    }
}
