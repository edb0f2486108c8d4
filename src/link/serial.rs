//! Serial Link
//!
//! `serialport`-backed link, configured as 8N1 without flow control.

use std::io::{Read, Write};

use serialport::{DataBits, FlowControl, Parity, SerialPort, SerialPortInfo, StopBits};

use crate::config::Config;
use crate::error::Result;
use super::Link;

/// A serial port opened for one command invocation
pub struct SerialLink {
    /// Open port handle (closed on drop)
    port: Box<dyn SerialPort>,

    /// Port path for logging
    name: String,
}

impl SerialLink {
    /// Open the configured port as 8N1
    pub fn open(config: &Config) -> Result<Self> {
        config.validate_serial()?;

        let port = serialport::new(&config.port, config.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(config.read_timeout)
            .open()?;

        tracing::debug!(
            "Opened serial port {} at {} baud (8N1)",
            config.port,
            config.baud_rate
        );

        Ok(Self {
            port,
            name: config.port.clone(),
        })
    }

    /// Get the port path
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Link for SerialLink {
    fn available(&mut self) -> Result<usize> {
        let count = self.port.bytes_to_read()?;
        Ok(count as usize)
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<()> {
        self.port.read_exact(buf)?;
        Ok(())
    }

    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        self.port.write_all(bytes)?;
        self.port.flush()?;
        Ok(())
    }
}

impl Drop for SerialLink {
    fn drop(&mut self) {
        tracing::debug!("Closing serial port {}", self.name);
    }
}

/// Enumerate the serial ports present on this host
pub fn list_ports() -> Result<Vec<SerialPortInfo>> {
    Ok(serialport::available_ports()?)
}
