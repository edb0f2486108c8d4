//! Response definitions
//!
//! The one-byte status codes the device answers with.

use std::fmt;

use crate::error::{CartError, Result};

/// Device status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ResponseCode {
    // General
    Ok = 0,
    UnknownCommand = 1,

    // Broken cartridge
    InvalidNumRomBanks = 10,
    InvalidNumRamBanks = 11,
    InvalidCartridgeType = 12,

    // Host requests an operation the cartridge cannot handle
    InvalidRamWriteSize = 21,
    CartridgeHasNoRam = 22,
    CartridgeHasNoRtc = 23,
    InvalidRtcWriteSize = 24,
}

/// How a status code ends (or continues) a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    /// Proceed to the data phase
    Continue,
    UnknownCommand,
    CartridgeIntegrity,
    UnsupportedOperation,
    SizeMismatch,
}

impl ResponseCode {
    /// Every defined code, in wire order
    pub const ALL: [ResponseCode; 9] = [
        ResponseCode::Ok,
        ResponseCode::UnknownCommand,
        ResponseCode::InvalidNumRomBanks,
        ResponseCode::InvalidNumRamBanks,
        ResponseCode::InvalidCartridgeType,
        ResponseCode::InvalidRamWriteSize,
        ResponseCode::CartridgeHasNoRam,
        ResponseCode::CartridgeHasNoRtc,
        ResponseCode::InvalidRtcWriteSize,
    ];

    /// Decode a raw status byte, failing with `InvalidResponse` for
    /// values outside the defined set
    pub fn classify(byte: u8) -> Result<Self> {
        Self::try_from(byte).map_err(CartError::InvalidResponse)
    }

    /// Which error group this code belongs to
    pub fn class(self) -> ResponseClass {
        match self {
            ResponseCode::Ok => ResponseClass::Continue,
            ResponseCode::UnknownCommand => ResponseClass::UnknownCommand,
            ResponseCode::InvalidNumRomBanks
            | ResponseCode::InvalidNumRamBanks
            | ResponseCode::InvalidCartridgeType => ResponseClass::CartridgeIntegrity,
            ResponseCode::CartridgeHasNoRam | ResponseCode::CartridgeHasNoRtc => {
                ResponseClass::UnsupportedOperation
            }
            ResponseCode::InvalidRamWriteSize | ResponseCode::InvalidRtcWriteSize => {
                ResponseClass::SizeMismatch
            }
        }
    }

    /// Human-readable description shown to the user
    pub fn message(self) -> &'static str {
        match self {
            ResponseCode::Ok => "OK.",
            ResponseCode::UnknownCommand => {
                "Command not recognized. Try \"help\" for command reference."
            }
            ResponseCode::InvalidNumRomBanks => {
                "Cartridge has invalid amount of ROM banks. Broken cartridge/Bad connection?"
            }
            ResponseCode::InvalidNumRamBanks => {
                "Cartridge has invalid amount of RAM banks. Broken cartridge/Bad connection?"
            }
            ResponseCode::InvalidCartridgeType => {
                "Cartridge type not recognized. Broken cartridge/Bad connection?"
            }
            ResponseCode::InvalidRamWriteSize => {
                "RAM write size does not match cartridge RAM size."
            }
            ResponseCode::CartridgeHasNoRam => "Cartridge has no RAM.",
            ResponseCode::CartridgeHasNoRtc => "Cartridge has no RTC.",
            ResponseCode::InvalidRtcWriteSize => {
                "RTC write size does not match cartridge RTC size."
            }
        }
    }

    /// `Ok(())` for OK, otherwise the terminal error for this code
    pub fn check(self) -> Result<()> {
        match self.class() {
            ResponseClass::Continue => Ok(()),
            ResponseClass::UnknownCommand => Err(CartError::UnknownCommand),
            ResponseClass::CartridgeIntegrity => Err(CartError::CartridgeIntegrity(self)),
            ResponseClass::UnsupportedOperation => Err(CartError::UnsupportedOperation(self)),
            ResponseClass::SizeMismatch => Err(CartError::SizeMismatch(self)),
        }
    }
}

impl TryFrom<u8> for ResponseCode {
    type Error = u8;

    fn try_from(byte: u8) -> std::result::Result<Self, Self::Error> {
        ResponseCode::ALL
            .into_iter()
            .find(|code| *code as u8 == byte)
            .ok_or(byte)
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResponseCode::Ok => "OK",
            ResponseCode::UnknownCommand => "UNKNOWN_COMMAND",
            ResponseCode::InvalidNumRomBanks => "INVALID_NUM_ROM_BANKS",
            ResponseCode::InvalidNumRamBanks => "INVALID_NUM_RAM_BANKS",
            ResponseCode::InvalidCartridgeType => "INVALID_CARTRIDGE_TYPE",
            ResponseCode::InvalidRamWriteSize => "INVALID_RAM_WRITE_SIZE",
            ResponseCode::CartridgeHasNoRam => "CARTRIDGE_HAS_NO_RAM",
            ResponseCode::CartridgeHasNoRtc => "CARTRIDGE_HAS_NO_RTC",
            ResponseCode::InvalidRtcWriteSize => "INVALID_RTC_WRITE_SIZE",
        };
        write!(f, "{}({})", name, *self as u8)
    }
}
