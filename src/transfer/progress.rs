//! Progress reporting
//!
//! Writes a single self-overwriting status line (`\r`) to the diagnostic
//! sink, never to the data sink.

use std::io::Write;

use crate::error::Result;

/// Unit of the progress counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Bytes,
    Kibibytes,
}

impl Granularity {
    /// Bytes below 1 KiB, kibibytes from there on
    pub fn for_total(total: u32) -> Self {
        if total < 1024 {
            Granularity::Bytes
        } else {
            Granularity::Kibibytes
        }
    }

    /// Render `done/total` in this unit
    pub fn format(self, done: u32, total: u32) -> String {
        match self {
            Granularity::Bytes => format!("{}/{}B", done, total),
            Granularity::Kibibytes => format!("{}K/{}K", done / 1024, total / 1024),
        }
    }
}

/// Progress line for one phase
pub struct Progress<'a, W: Write + ?Sized> {
    sink: &'a mut W,
    label: &'static str,

    /// `None` picks the unit from the total
    granularity: Option<Granularity>,
}

impl<'a, W: Write + ?Sized> Progress<'a, W> {
    /// Print the label and start the line
    pub fn start(
        sink: &'a mut W,
        label: &'static str,
        granularity: Option<Granularity>,
    ) -> Result<Self> {
        write!(sink, "{}", label)?;
        sink.flush()?;
        Ok(Self {
            sink,
            label,
            granularity,
        })
    }

    /// Overwrite the line with the current counter
    pub fn update(&mut self, done: u32, total: u32) -> Result<()> {
        let granularity = self
            .granularity
            .unwrap_or_else(|| Granularity::for_total(total));
        write!(self.sink, "\r{}{}", self.label, granularity.format(done, total))?;
        self.sink.flush()?;
        Ok(())
    }

    /// Terminate the line
    pub fn finish(self, suffix: &str) -> Result<()> {
        writeln!(self.sink, "{}", suffix)?;
        self.sink.flush()?;
        Ok(())
    }
}
