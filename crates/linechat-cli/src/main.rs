//! Line chat client binary.
//!
//! # Usage
//!
//! ```bash
//! # Connect to a chat server on port 9001
//! chatclient localhost 9001
//!
//! # With debug logging on stderr
//! chatclient localhost 9001 --log-level debug
//! ```
//!
//! Exits 0 when the user quits, when the server closes the connection, and
//! when the arguments are wrong. Exits 1 on any resolution, connection or
//! transport failure.

use std::{
    io::{self, Write},
    process::ExitCode,
};

use clap::{Parser, error::ErrorKind};
use linechat_client::SessionConfig;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Usage text printed for a wrong argument count.
const USAGE: &str =
    "Please supply the required command line arguments.\nUsage: chatclient [host] [port]";

/// Line chat client
#[derive(Parser, Debug)]
#[command(name = "chatclient")]
#[command(about = "Chat with a line chat server, one message at a time")]
#[command(version)]
struct Args {
    /// Server hostname or IPv4 address
    host: String,

    /// Server port number
    port: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            // Nothing sensible to report if stdout is gone
            let _ = e.print();
            return ExitCode::SUCCESS;
        },
        Err(_) => {
            let _ = writeln!(io::stdout(), "{USAGE}");
            return ExitCode::SUCCESS;
        },
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    tracing::debug!(host = %args.host, port = %args.port, "starting chat client");

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();

    let config = SessionConfig::default();
    match linechat_client::run(&config, &args.host, &args.port, &mut input, &mut output) {
        Ok(termination) => {
            tracing::info!(?termination, "chat ended");
            ExitCode::SUCCESS
        },
        Err(err) => {
            tracing::debug!(error = ?err, "chat failed");
            let _ = writeln!(io::stderr(), "{err}");
            ExitCode::from(err.exit_code())
        },
    }
}
