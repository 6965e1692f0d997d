//! Parlor terminal client entry point.
//!
//! A minimal line-oriented presentation layer: stdin lines are submitted as
//! outgoing messages, and the shared transcript is polled and printed as it
//! grows. Any richer frontend would drive the same three-call session
//! interface.

// The transcript is this program's output.
#![allow(clippy::print_stdout)]

use std::time::Duration;

use clap::Parser;
use parlor_client::ChatSession;
use parlor_core::{DEFAULT_PORT, Endpoint, Identity, SessionConfig, SessionState};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Parlor chat client
#[derive(Parser, Debug)]
#[command(name = "parlor")]
#[command(about = "Line-oriented chat client for the parlor protocol")]
#[command(version)]
struct Args {
    /// Chat server host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Chat server port
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Display name prefixed onto outgoing messages
    #[arg(short, long, default_value = "guest")]
    name: String,

    /// Echo sent messages into the local transcript
    #[arg(long)]
    local_echo: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let identity = Identity::new(&args.name)?;
    let config = SessionConfig::new(Endpoint::new(args.host, args.port), identity)
        .with_local_echo(args.local_echo);

    let session = ChatSession::connect(config).await?;
    tracing::info!("connected; type messages, Ctrl-D to quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut printed = 0;
    let mut redraw = tokio::time::interval(Duration::from_millis(100));

    loop {
        tokio::select! {
            _ = redraw.tick() => {
                let transcript = session.messages();
                for entry in transcript.iter().skip(printed) {
                    println!("{entry}");
                }
                printed = transcript.len();

                if session.state() == SessionState::Closed {
                    tracing::warn!("session closed");
                    break;
                }
            },
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if session.submit_outgoing(&line).is_err() {
                            // Closed mid-read; the redraw arm reports it.
                            break;
                        }
                    },
                    None => break, // EOF
                }
            },
        }
    }

    session.shutdown().await;
    Ok(())
}
