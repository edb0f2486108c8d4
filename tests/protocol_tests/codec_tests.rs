//! Codec Tests
//!
//! Byte-exact encoding of command lines and length prefixes.

use cartlink::link::MemoryLink;
use cartlink::protocol::{
    decode_length, encode_command, encode_length, write_command, Command, CHUNK_SIZE,
    COMMAND_TERMINATOR, LENGTH_PREFIX_SIZE,
};

#[test]
fn test_command_terminated_by_carriage_return() {
    let command = Command::new("help").unwrap();
    assert_eq!(encode_command(&command), b"help\r");
    assert_eq!(COMMAND_TERMINATOR, 0x0D);
}

#[test]
fn test_command_sent_verbatim() {
    let command = Command::new("Parse Header").unwrap();
    assert_eq!(encode_command(&command), b"Parse Header\r");
}

#[test]
fn test_write_command_is_one_terminated_write() {
    let mut link = MemoryLink::new();
    let handle = link.handle();

    write_command(&mut link, &Command::new("read rom").unwrap()).unwrap();

    let sent = handle.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].bytes, b"read rom\r");
    assert_eq!(handle.received(), 0);
}

#[test]
fn test_length_is_little_endian() {
    assert_eq!(encode_length(16), [0x10, 0x00, 0x00, 0x00]);
    assert_eq!(encode_length(0x0001_0203), [0x03, 0x02, 0x01, 0x00]);
    assert_eq!(decode_length([0x00, 0x80, 0x00, 0x00]), 0x8000);
    assert_eq!(decode_length([0xFF, 0xFF, 0xFF, 0xFF]), u32::MAX);
}

#[test]
fn test_length_prefix_size() {
    assert_eq!(LENGTH_PREFIX_SIZE, 4);
    assert_eq!(decode_length(encode_length(0xDEAD_BEEF)), 0xDEAD_BEEF);
}

#[test]
fn test_chunk_size_matches_device_buffer() {
    assert_eq!(CHUNK_SIZE, 64);
}
