//! Tests for BulkReceiver
//!
//! These tests verify:
//! - Exactly the declared number of bytes is read and forwarded
//! - Chunking: 64-byte reads, then single bytes for an unaligned tail
//! - Stalls abort the phase

use std::io::{self, Read, Seek, SeekFrom};

use cartlink::link::MemoryLink;
use cartlink::protocol::encode_length;
use cartlink::transfer::BulkReceiver;
use cartlink::watchdog::{ManualClock, Watchdog};
use cartlink::CartError;
use tempfile::tempfile;

use crate::common::{pattern, test_config, RecordingLink, STALL_TIMEOUT};

// =============================================================================
// Helper Functions
// =============================================================================

fn link_with_payload(payload: &[u8]) -> MemoryLink {
    let link = MemoryLink::new();
    link.push_inbound(&encode_length(payload.len() as u32));
    link.push_inbound(payload);
    link
}

fn receive_all(link: &mut MemoryLink) -> (Vec<u8>, String) {
    let mut watchdog = Watchdog::with_clock(&test_config(), ManualClock::new());
    let mut output: Vec<u8> = Vec::new();
    let mut diag: Vec<u8> = Vec::new();

    let total = BulkReceiver::new(link, &mut watchdog)
        .receive(&mut output, &mut diag)
        .unwrap();
    assert_eq!(total as usize, output.len());

    (output, String::from_utf8(diag).unwrap())
}

// =============================================================================
// Length Tests
// =============================================================================

#[test]
fn test_receives_exact_payload() {
    let payload = pattern(16);
    let mut link = link_with_payload(&payload);

    let (output, _) = receive_all(&mut link);
    assert_eq!(output, payload);
}

#[test]
fn test_zero_length_payload() {
    let mut link = link_with_payload(&[]);

    let (output, diag) = receive_all(&mut link);
    assert!(output.is_empty());
    assert!(diag.ends_with("...done!\n"));
}

#[test]
fn test_never_reads_past_declared_length() {
    for len in [0usize, 1, 63, 64, 65, 130, 1024, 4100] {
        let payload = pattern(len);
        let mut link = link_with_payload(&payload);
        link.push_inbound(b"trailing");
        let handle = link.handle();

        let (output, _) = receive_all(&mut link);

        assert_eq!(output, payload, "length {}", len);
        assert_eq!(handle.unread(), b"trailing".len(), "length {}", len);
        assert_eq!(handle.received(), 4 + len, "length {}", len);
    }
}

// =============================================================================
// Chunking Tests
// =============================================================================

#[test]
fn test_chunk_pattern_follows_remainder() {
    for len in [0usize, 1, 63, 64, 65, 128, 130, 1000] {
        let mut link = RecordingLink::new(link_with_payload(&pattern(len)));
        let mut watchdog = Watchdog::with_clock(&test_config(), ManualClock::new());
        let mut output: Vec<u8> = Vec::new();

        BulkReceiver::new(&mut link, &mut watchdog)
            .receive(&mut output, &mut io::sink())
            .unwrap();

        let mut expected = vec![4];
        expected.extend(std::iter::repeat(64).take(len / 64));
        expected.extend(std::iter::repeat(1).take(len % 64));
        assert_eq!(link.reads, expected, "length {}", len);
    }
}

// =============================================================================
// Progress Tests
// =============================================================================

#[test]
fn test_small_transfer_reports_bytes() {
    let mut link = link_with_payload(&pattern(16));

    let (_, diag) = receive_all(&mut link);
    assert!(diag.starts_with("Receiving data..."));
    assert!(diag.contains("\rReceiving data...16/16B"));
    assert!(diag.ends_with("...done!\n"));
}

#[test]
fn test_large_transfer_reports_kibibytes() {
    let mut link = link_with_payload(&pattern(2048));

    let (_, diag) = receive_all(&mut link);
    assert!(diag.contains("\rReceiving data...1K/2K"));
    assert!(diag.contains("\rReceiving data...2K/2K"));
    assert!(!diag.contains("B"));
}

#[test]
fn test_progress_never_reaches_data_sink() {
    let payload = pattern(300);
    let mut link = link_with_payload(&payload);

    let (output, diag) = receive_all(&mut link);
    assert_eq!(output, payload);
    assert!(!diag.is_empty());
}

// =============================================================================
// Sink Tests
// =============================================================================

#[test]
fn test_streams_into_file() {
    let payload = pattern(5000);
    let mut link = link_with_payload(&payload);
    let mut watchdog = Watchdog::with_clock(&test_config(), ManualClock::new());
    let mut file = tempfile().unwrap();

    BulkReceiver::new(&mut link, &mut watchdog)
        .receive(&mut file, &mut io::sink())
        .unwrap();

    file.seek(SeekFrom::Start(0)).unwrap();
    let mut written = Vec::new();
    file.read_to_end(&mut written).unwrap();
    assert_eq!(written, payload);
}

// =============================================================================
// Stall Tests
// =============================================================================

#[test]
fn test_missing_length_prefix_stalls() {
    let mut link = MemoryLink::new();
    link.push_inbound(&[0x10, 0x00]);
    let clock = ManualClock::new();
    let mut watchdog = Watchdog::with_clock(&test_config(), clock.clone());

    let err = BulkReceiver::new(&mut link, &mut watchdog)
        .receive(&mut io::sink(), &mut io::sink())
        .unwrap_err();

    assert!(matches!(
        err,
        CartError::TransferStall {
            expected: 4,
            available: 2,
            ..
        }
    ));
    assert_eq!(clock.elapsed(), STALL_TIMEOUT);
}

#[test]
fn test_truncated_payload_stalls_after_delivered_chunks() {
    let mut link = MemoryLink::new();
    link.push_inbound(&encode_length(200));
    link.push_inbound(&pattern(100));
    let mut watchdog = Watchdog::with_clock(&test_config(), ManualClock::new());
    let mut output: Vec<u8> = Vec::new();

    let err = BulkReceiver::new(&mut link, &mut watchdog)
        .receive(&mut output, &mut io::sink())
        .unwrap_err();

    // First chunk streamed out, second chunk never complete
    assert!(matches!(err, CartError::TransferStall { expected: 64, .. }));
    assert_eq!(output, pattern(64));
}
