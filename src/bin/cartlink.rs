//! cartlink CLI
//!
//! Dispatches one serial command to the device on a given port and baud
//! rate (8N1). Received data goes to stdout untouched; logs and progress go
//! to stderr.

use std::io;
use std::time::Duration;

use cartlink::link::list_ports;
use cartlink::protocol::KnownCommand;
use cartlink::{CartError, Command, Config, Session};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

/// cartlink CLI
#[derive(Parser, Debug)]
#[command(name = "cartlink")]
#[command(about = "Dispatch serial commands to a cartridge reader (8N1)")]
#[command(version)]
#[command(arg_required_else_help = true)]
#[command(after_help = known_commands_help())]
struct Args {
    /// Serial port the board is connected to
    #[arg(short, long, required_unless_present = "list_ports")]
    port: Option<String>,

    /// Baud rate of the connection (e.g. 115200)
    #[arg(short, long, required_unless_present = "list_ports")]
    baudrate: Option<u32>,

    /// Abort after this many seconds without transfer progress
    #[arg(long, default_value = "30")]
    stall_timeout: u64,

    /// Exit with a distinct non-zero status per error kind
    #[arg(long)]
    strict_exit: bool,

    /// List available serial ports and exit
    #[arg(long)]
    list_ports: bool,

    /// Command to send (help, parse header, read rom, ...)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

fn main() {
    // Logs share stderr with progress; stdout carries only data
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let args = Args::parse();
    let strict_exit = args.strict_exit;

    // run() returns before exit so the link is always closed
    let code = match run(args) {
        Ok(()) => 0,
        Err(e) => {
            // Device answers are shown as-is, without a log prefix
            if e.is_device_status() {
                eprintln!("{}", e);
            } else {
                tracing::error!("{}", e);
            }
            if strict_exit {
                e.exit_code()
            } else {
                0
            }
        }
    };

    std::process::exit(code);
}

fn run(args: Args) -> Result<(), CartError> {
    if args.list_ports {
        for port in list_ports()? {
            println!("{}\t{:?}", port.port_name, port.port_type);
        }
        return Ok(());
    }

    if args.command.is_empty() {
        eprintln!("No command was passed. Exiting.");
        return Ok(());
    }

    let command = Command::from_words(&args.command)?;
    if command.known().is_none() {
        tracing::debug!("{:?} is not a documented command, sending anyway", command.as_str());
    }

    let config = Config::builder()
        .port(args.port.unwrap_or_default())
        .baud_rate(args.baudrate.unwrap_or_default())
        .stall_timeout(Duration::from_secs(args.stall_timeout))
        .build_serial()?;

    let mut session = Session::open(&config)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();

    session.execute(
        &command,
        &mut stdin.lock(),
        &mut stdout.lock(),
        &mut stderr.lock(),
    )?;

    Ok(())
}

/// Command reference appended to `--help`
fn known_commands_help() -> String {
    let mut help = String::from("Device commands:\n");
    for known in KnownCommand::ALL {
        help.push_str(&format!("  {:<14}{}\n", known.as_str(), known.description()));
    }
    help
}
