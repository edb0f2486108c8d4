//! Progress and Transfer accounting tests

use cartlink::transfer::{Direction, Granularity, Progress, Transfer};
use cartlink::CartError;

// =============================================================================
// Granularity Tests
// =============================================================================

#[test]
fn test_granularity_threshold() {
    assert_eq!(Granularity::for_total(0), Granularity::Bytes);
    assert_eq!(Granularity::for_total(1023), Granularity::Bytes);
    assert_eq!(Granularity::for_total(1024), Granularity::Kibibytes);
}

#[test]
fn test_granularity_format() {
    assert_eq!(Granularity::Bytes.format(10, 500), "10/500B");
    assert_eq!(Granularity::Kibibytes.format(1536, 32768), "1K/32K");
}

#[test]
fn test_progress_overwrites_line() {
    let mut sink: Vec<u8> = Vec::new();
    let mut progress = Progress::start(&mut sink, "Working...", None).unwrap();
    progress.update(1, 2).unwrap();
    progress.update(2, 2).unwrap();
    progress.finish(" ok").unwrap();

    assert_eq!(
        String::from_utf8(sink).unwrap(),
        "Working...\rWorking...1/2B\rWorking...2/2B ok\n"
    );
}

#[test]
fn test_fixed_granularity_ignores_total() {
    let mut sink: Vec<u8> = Vec::new();
    let mut progress =
        Progress::start(&mut sink, "Sending...", Some(Granularity::Kibibytes)).unwrap();
    progress.update(64, 128).unwrap();
    progress.finish("").unwrap();

    assert_eq!(String::from_utf8(sink).unwrap(), "Sending...\rSending...0K/0K\n");
}

// =============================================================================
// Transfer Accounting Tests
// =============================================================================

#[test]
fn test_inbound_chunk_sizes() {
    let mut transfer = Transfer::inbound(130);
    assert_eq!(transfer.direction(), Direction::Inbound);

    let mut sizes = Vec::new();
    while !transfer.is_complete() {
        let size = transfer.next_inbound_chunk();
        sizes.push(size);
        transfer.advance(size).unwrap();
    }

    assert_eq!(sizes, vec![64, 64, 1, 1]);
    assert_eq!(transfer.moved(), 130);
    assert_eq!(transfer.next_inbound_chunk(), 0);
}

#[test]
fn test_outbound_chunk_sizes() {
    let mut transfer = Transfer::outbound(100);
    assert_eq!(transfer.direction(), Direction::Outbound);

    assert_eq!(transfer.next_outbound_chunk(), 64);
    transfer.advance(64).unwrap();
    assert_eq!(transfer.next_outbound_chunk(), 36);
    transfer.advance(36).unwrap();
    assert!(transfer.is_complete());
}

#[test]
fn test_advance_never_exceeds_total() {
    let mut transfer = Transfer::inbound(10);
    transfer.advance(8).unwrap();

    assert!(matches!(transfer.advance(3), Err(CartError::Protocol(_))));
    assert_eq!(transfer.moved(), 8);
    assert_eq!(transfer.remaining(), 2);
    assert_eq!(transfer.total(), 10);
}
