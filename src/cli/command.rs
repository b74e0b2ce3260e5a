use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::filter::LevelFilter;

use crate::error::CliConfigError;
use crate::protocol::Slot;
use crate::transport::HexScript;

const DEFAULT_IO_TIMEOUT: &str = "3s";

/// Command-line options for the AV-HS450 framestore tool.
#[derive(Debug, Parser)]
#[command(
    name = "hs450",
    about = "Exchange frames with the framestore of a Panasonic AV-HS450 vision mixer."
)]
pub struct Args {
    /// Telemetry log level override.
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,
    /// Result output format; defaults to pretty on a terminal, JSON otherwise.
    #[arg(long, global = true, value_enum)]
    output: Option<OutputFormat>,
    /// Per-step device I/O deadline (e.g. `3s`, `500ms`).
    #[arg(long, global = true, value_parser = parse_duration, default_value = DEFAULT_IO_TIMEOUT)]
    timeout: Duration,
    /// Uses a scripted in-memory device instead of a TCP connection.
    #[arg(long, global = true)]
    fake: bool,
    /// Bytes the fake device serves, as hexadecimal.
    #[arg(long, global = true, requires = "fake", required_if_eq("fake", "true"))]
    fake_device_script: Option<HexScript>,
    #[command(subcommand)]
    command: Command,
}

impl Args {
    /// Returns the telemetry log-level override, if given.
    #[must_use]
    pub fn log_level(&self) -> Option<LogLevel> {
        self.log_level
    }

    /// Returns the requested output format, if given.
    #[must_use]
    pub fn output_format(&self) -> Option<OutputFormat> {
        self.output
    }

    /// Returns the per-step device I/O deadline.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Splits parsed arguments into the command and an optional fake-device
    /// script.
    ///
    /// # Errors
    ///
    /// Returns an error when fake mode is enabled without a script.
    pub fn into_command_and_fake_script(self) -> anyhow::Result<(Command, Option<HexScript>)> {
        let Args {
            log_level: _,
            output: _,
            timeout: _,
            fake,
            fake_device_script,
            command,
        } = self;

        let script = if fake {
            let Some(script) = fake_device_script else {
                return Err(CliConfigError::MissingFakeDeviceScript.into());
            };
            Some(script)
        } else {
            None
        };

        Ok((command, script))
    }
}

/// Supported CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the frame stored in a framestore slot and save it as an image file.
    Get(GetArgs),
    /// Load an image file and store it into a framestore slot.
    Put(PutArgs),
}

/// Arguments for the `get` command.
#[derive(Debug, clap::Args)]
pub struct GetArgs {
    /// IP address or host name of the mixer.
    host: String,
    /// Framestore slot, 1 through 4.
    slot: Slot,
    /// Destination image file; format follows the extension.
    file: PathBuf,
}

impl GetArgs {
    /// Returns the mixer host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the selected framestore slot.
    #[must_use]
    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Returns the destination file path.
    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }
}

/// Arguments for the `put` command.
#[derive(Debug, clap::Args)]
pub struct PutArgs {
    /// IP address or host name of the mixer.
    host: String,
    /// Framestore slot, 1 through 4.
    slot: Slot,
    /// Source image file to encode and store.
    file: PathBuf,
}

impl PutArgs {
    /// Returns the mixer host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the selected framestore slot.
    #[must_use]
    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Returns the source file path.
    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }
}

/// Telemetry verbosity levels selectable from the command line.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Returns the tracing filter for this level.
    #[must_use]
    pub fn as_level_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::ERROR,
            Self::Warn => LevelFilter::WARN,
            Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }
}

/// Result presentation selected on the command line.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable single-line results.
    Pretty,
    /// One pretty-printed JSON object per result.
    Json,
}

fn parse_duration(value: &str) -> Result<Duration, String> {
    humantime::parse_duration(value).map_err(|error| error.to_string())
}
