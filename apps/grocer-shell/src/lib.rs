//! # Grocer Shell
//!
//! Line-oriented front end for `grocer-core`: reads one command per line on
//! stdin and prints results on stdout. Logs go to stderr.
//!
//! ## Module Organization
//! ```text
//! grocer_shell/
//! ├── lib.rs          ◄─── You are here (start-up & read loop)
//! ├── config.rs       ◄─── ShellConfig: file, env overrides, validation
//! ├── state.rs        ◄─── ShellState: session + config
//! ├── commands.rs     ◄─── Command parsing, name resolution, execution
//! ├── view.rs         ◄─── Text rendering of session reads
//! └── error.rs        ◄─── ShellError
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod state;
pub mod view;

use std::io::{BufRead, Write};

use grocer_core::Session;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use commands::{Command, Reply};
use config::ShellConfig;
use error::ShellResult;
use state::ShellState;

/// Runs the shell on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Shell Startup                                     │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, writing to stderr             │
/// │     • Default: info,grocer=debug, can be overridden with RUST_LOG       │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → shell.toml → GROCER_* environment → validate           │
/// │                                                                         │
/// │  3. Load Dataset ─────────────────────────────────────────────────────► │
/// │     • TOML dataset file if configured, built-in demo data otherwise     │
/// │                                                                         │
/// │  4. Read Loop ────────────────────────────────────────────────────────► │
/// │     • one command per line until `quit` or end of input                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ShellResult<()> {
    init_tracing();

    info!("Starting grocer shell");

    let config = ShellConfig::load(None)?;
    let dataset = config.load_dataset()?;
    let session = Session::new(dataset, config.user_location());
    let mut state = ShellState::new(session, config);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_loop(&mut state, stdin.lock(), stdout.lock())
}

/// Reads commands from `input` until `quit` or end of input.
///
/// Command errors are printed and the loop continues; I/O errors end it.
pub fn run_loop(
    state: &mut ShellState,
    input: impl BufRead,
    mut output: impl Write,
) -> ShellResult<()> {
    writeln!(output, "{}", view::status(state.session.view(), &state.config))?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let reply = line
            .parse::<Command>()
            .and_then(|command| commands::execute(state, command));
        match reply {
            Ok(Reply::Text(text)) => writeln!(output, "{}", text)?,
            Ok(Reply::Quit) => break,
            Err(e) if e.is_recoverable() => writeln!(output, "error: {}", e)?,
            Err(e) => {
                error!(error = %e, "Shell stopped");
                return Err(e);
            }
        }
        output.flush()?;
    }

    info!("Grocer shell finished");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=grocer_core=trace` - Show trace for the engine only
/// - Default: INFO, DEBUG for grocer crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,grocer=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
