//! Command definitions
//!
//! Represents the ASCII command line sent to the device.

use std::fmt;

use crate::error::{CartError, Result};

/// Which bulk phase follows an OK status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataPhase {
    /// Device → host, length-prefixed stream
    Receive,

    /// Host → device, length-prefixed chunks with per-chunk acknowledgment
    Transmit,

    /// Status byte only
    None,
}

/// Commands documented by the device's help page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownCommand {
    Help,
    ParseHeader,
    ReadRom,
    ReadRam,
    WriteRam,
    ReadRtc,
    WriteRtc,
}

impl KnownCommand {
    pub const ALL: [KnownCommand; 7] = [
        KnownCommand::Help,
        KnownCommand::ParseHeader,
        KnownCommand::ReadRom,
        KnownCommand::ReadRam,
        KnownCommand::WriteRam,
        KnownCommand::ReadRtc,
        KnownCommand::WriteRtc,
    ];

    /// Wire text of the command
    pub fn as_str(self) -> &'static str {
        match self {
            KnownCommand::Help => "help",
            KnownCommand::ParseHeader => "parse header",
            KnownCommand::ReadRom => "read rom",
            KnownCommand::ReadRam => "read ram",
            KnownCommand::WriteRam => "write ram",
            KnownCommand::ReadRtc => "read rtc",
            KnownCommand::WriteRtc => "write rtc",
        }
    }

    /// One-line description, as listed by the device
    pub fn description(self) -> &'static str {
        match self {
            KnownCommand::Help => "Display this help page",
            KnownCommand::ParseHeader => "Read cartridge header and parse into readable form",
            KnownCommand::ReadRom => "Read cartridge rom and echo it in binary",
            KnownCommand::ReadRam => "Read cartridge ram (if available) and echo it in binary",
            KnownCommand::WriteRam => {
                "Write cartridge ram (if available) from binary terminal data"
            }
            KnownCommand::ReadRtc => "Read cartridge RTC (if available) and echo it in binary",
            KnownCommand::WriteRtc => {
                "Write cartridge RTC (if available) from binary terminal data"
            }
        }
    }
}

/// A validated command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Text exactly as it goes on the wire (without terminator)
    text: String,

    /// Lowercase form used to pick the data phase
    normalized: String,
}

impl Command {
    /// Validate a command line
    ///
    /// Rejects empty text, non-ASCII text and embedded line terminators.
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();

        if text.trim().is_empty() {
            return Err(CartError::InvalidCommand("command is empty".to_string()));
        }
        if !text.is_ascii() {
            return Err(CartError::InvalidCommand(format!(
                "{:?} contains non-ASCII characters",
                text
            )));
        }
        if text.contains(['\r', '\n']) {
            return Err(CartError::InvalidCommand(format!(
                "{:?} contains a line terminator",
                text
            )));
        }

        let normalized = text.to_ascii_lowercase();
        Ok(Self { text, normalized })
    }

    /// Join command words the way a shell invocation passes them
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Result<Self> {
        let joined = words
            .iter()
            .map(AsRef::<str>::as_ref)
            .collect::<Vec<_>>()
            .join(" ");
        Self::new(joined)
    }

    /// Wire text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Lowercase form
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Data phase selected by the command text
    ///
    /// Receive wins when the text matches both classes.
    pub fn data_phase(&self) -> DataPhase {
        let cmd = self.normalized.as_str();
        if cmd == "help" || cmd == "parse header" || cmd.contains("read") {
            DataPhase::Receive
        } else if cmd.contains("write") {
            DataPhase::Transmit
        } else {
            DataPhase::None
        }
    }

    /// Documented command this text matches, if any
    pub fn known(&self) -> Option<KnownCommand> {
        KnownCommand::ALL
            .into_iter()
            .find(|known| known.as_str() == self.normalized)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
