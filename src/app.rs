use std::io;
use std::time::Duration;

use anyhow::Result;
use tracing::instrument;

use crate::cli::{Args, Command, LogLevel, OutputFormat};
use crate::telemetry;
use crate::terminal::TerminalClient;
use crate::transport::{HexScript, ScriptedTransport, TcpTransport, Transport};

/// Runs a parsed CLI invocation end to end.
///
/// ```
/// # async fn demo() -> anyhow::Result<()> {
/// use clap::Parser;
///
/// struct FakeTerminal;
/// impl hs450::TerminalClient for FakeTerminal {
///     fn stdout_is_terminal(&self) -> bool { false }
///     fn stderr_is_terminal(&self) -> bool { false }
/// }
///
/// let args = hs450::Args::try_parse_from([
///     "hs450",
///     "--fake",
///     "--fake-device-script",
///     // get-ready ack, 2x1 header, one packed group
///     "100002000110801080",
///     "get",
///     "10.0.0.5",
///     "1",
///     "frame.png",
/// ])?;
/// let mut out = Vec::new();
/// hs450::run(args, &mut out, &FakeTerminal).await?;
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if telemetry initialisation, the device exchange, image
/// I/O, or output writing fails.
#[instrument(skip(args, out, terminal_client), level = "info")]
pub async fn run<W>(args: Args, out: &mut W, terminal_client: &dyn TerminalClient) -> Result<()>
where
    W: io::Write,
{
    telemetry::initialise_tracing(
        terminal_client.stderr_is_terminal(),
        args.log_level().map(LogLevel::as_level_filter),
    )?;

    let output_format = args.output_format().unwrap_or({
        if terminal_client.stdout_is_terminal() {
            OutputFormat::Pretty
        } else {
            OutputFormat::Json
        }
    });
    let timeout = args.timeout();
    let (command, fake_script) = args.into_command_and_fake_script()?;

    match command {
        Command::Get(get_args) => {
            let mut transport = build_transport(get_args.host(), timeout, fake_script).await?;
            crate::cli::get::run(transport.as_mut(), &get_args, out, output_format).await
        }
        Command::Put(put_args) => {
            let mut transport = build_transport(put_args.host(), timeout, fake_script).await?;
            crate::cli::put::run(transport.as_mut(), &put_args, out, output_format).await
        }
    }
}

/// Builds the device transport selected by the CLI flags.
async fn build_transport(
    host: &str,
    timeout: Duration,
    fake_script: Option<HexScript>,
) -> Result<Box<dyn Transport>> {
    let transport: Box<dyn Transport> = match fake_script {
        Some(script) => {
            tracing::info!("using scripted fake device");
            Box::new(ScriptedTransport::new(script.into_bytes()))
        }
        None => Box::new(TcpTransport::connect(host, timeout).await?),
    };

    Ok(transport)
}
