//! Session Module
//!
//! Drives one command invocation from start to finish.
//!
//! ## State Machine
//! ```text
//! Idle ─▶ CommandSent ─▶ AwaitingStatus ─┬─▶ Receiving ────┬─▶ Done
//!                                        ├─▶ Transmitting ─┤
//!                                        └─────────────────┘
//!              any error ─▶ Failed (terminal, no retry)
//! ```
//!
//! ## Responsibilities
//! - Own the link exclusively for the whole invocation
//! - Read a write-class payload before any wire activity
//! - Classify the status byte and select the data phase
//! - Release the link on drop, whatever path the session ends on

use std::io::{Read, Write};

use crate::config::Config;
use crate::error::{CartError, Result};
use crate::link::{Link, SerialLink};
use crate::protocol::{write_command, Command, DataPhase, ResponseCode, STATUS_SIZE};
use crate::transfer::{BulkReceiver, BulkTransmitter};
use crate::watchdog::{Clock, SystemClock, Watchdog};

/// Where a session is in its single command round trip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    CommandSent,
    AwaitingStatus,
    Receiving,
    Transmitting,
    Done,
    Failed,
}

/// Outcome of a successful command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferSummary {
    /// Status the device answered the command with
    pub status: ResponseCode,

    /// Data phase that ran
    pub phase: DataPhase,

    /// Bytes moved in the data phase (declared length)
    pub bytes: u32,
}

/// One command invocation over an exclusively owned link
pub struct Session<L: Link, C: Clock = SystemClock> {
    /// The link (released when the session drops)
    link: L,

    /// Stall detection for every wait on the link
    watchdog: Watchdog<C>,

    state: SessionState,
}

impl Session<SerialLink> {
    /// Open the configured serial port and wrap it in a session
    pub fn open(config: &Config) -> Result<Self> {
        let link = SerialLink::open(config)?;
        tracing::debug!("Session opened on {}", link.name());
        Ok(Self::new(link, config))
    }
}

impl<L: Link> Session<L> {
    /// Create a session on the wall clock
    pub fn new(link: L, config: &Config) -> Self {
        Self::with_clock(link, config, SystemClock)
    }
}

impl<L: Link, C: Clock> Session<L, C> {
    /// Create a session on the given clock
    pub fn with_clock(link: L, config: &Config, clock: C) -> Self {
        Self {
            link,
            watchdog: Watchdog::with_clock(config, clock),
            state: SessionState::Idle,
        }
    }

    /// Get the current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Execute one command
    ///
    /// `input` is only read for write-class commands, in full, before the
    /// command is sent. Received data goes to `output`; progress goes to
    /// `diag`. A session runs a single command: any further call fails.
    pub fn execute<R, W, D>(
        &mut self,
        command: &Command,
        input: &mut R,
        output: &mut W,
        diag: &mut D,
    ) -> Result<TransferSummary>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
        D: Write + ?Sized,
    {
        if self.state != SessionState::Idle {
            return Err(CartError::Protocol(format!(
                "session already used (state {:?})",
                self.state
            )));
        }

        let result = self.run(command, input, output, diag);

        match &result {
            Ok(summary) => {
                self.transition(SessionState::Done);
                tracing::debug!(
                    "Command {:?} finished: {:?}, {} bytes",
                    command.as_str(),
                    summary.phase,
                    summary.bytes
                );
            }
            Err(e) => {
                self.transition(SessionState::Failed);
                tracing::debug!("Command {:?} failed: {}", command.as_str(), e);
            }
        }

        result
    }

    fn run<R, W, D>(
        &mut self,
        command: &Command,
        input: &mut R,
        output: &mut W,
        diag: &mut D,
    ) -> Result<TransferSummary>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
        D: Write + ?Sized,
    {
        let phase = command.data_phase();

        // Payload size must be known before any wire activity
        let payload = match phase {
            DataPhase::Transmit => {
                let mut buffer = Vec::new();
                input.read_to_end(&mut buffer)?;
                tracing::debug!("Read {} payload bytes from input", buffer.len());
                buffer
            }
            DataPhase::Receive | DataPhase::None => Vec::new(),
        };

        tracing::info!("Sending command: {}", command);
        write_command(&mut self.link, command)?;
        self.watchdog.reset();
        self.transition(SessionState::CommandSent);

        self.transition(SessionState::AwaitingStatus);
        self.watchdog.await_bytes(&mut self.link, STATUS_SIZE)?;
        let mut status = [0u8; STATUS_SIZE];
        self.link.receive(&mut status)?;

        let code = ResponseCode::classify(status[0])?;
        tracing::debug!("Status: {}", code);
        code.check()?;

        let bytes = match phase {
            DataPhase::Receive => {
                self.transition(SessionState::Receiving);
                BulkReceiver::new(&mut self.link, &mut self.watchdog).receive(output, diag)?
            }
            DataPhase::Transmit => {
                self.transition(SessionState::Transmitting);
                BulkTransmitter::new(&mut self.link, &mut self.watchdog)
                    .transmit(&payload, diag)?
            }
            DataPhase::None => 0,
        };

        Ok(TransferSummary {
            status: code,
            phase,
            bytes,
        })
    }

    fn transition(&mut self, next: SessionState) {
        tracing::trace!("Session state {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
