use std::io;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::instrument;

use crate::cli::{GetArgs, OutputFormat, write_json_line};
use crate::media::ImageIo;
use crate::transfer::FrameTransfer;
use crate::transport::Transport;

/// JSON result emitted by the `get` command.
#[derive(Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum GetResult {
    Get {
        slot: u8,
        width: u16,
        height: u16,
        file: String,
    },
}

/// Executes the `get` command against an already-built transport.
#[instrument(skip(transport, args, out), level = "info", fields(?output_format))]
pub(crate) async fn run<W>(
    transport: &mut dyn Transport,
    args: &GetArgs,
    out: &mut W,
    output_format: OutputFormat,
) -> Result<()>
where
    W: io::Write,
{
    let frame = FrameTransfer::get(transport, args.slot())
        .await
        .with_context(|| format!("failed to fetch a frame from slot {}", args.slot()))?;
    let dimensions = frame.dimensions();

    ImageIo::save_rgb_frame(&frame, args.file())
        .with_context(|| format!("failed to save frame to `{}`", args.file().display()))?;

    match output_format {
        OutputFormat::Pretty => {
            writeln!(
                out,
                "Got {dimensions} frame from slot {}; saved to `{}`",
                args.slot(),
                args.file().display(),
            )?;
        }
        OutputFormat::Json => {
            write_json_line(
                out,
                &GetResult::Get {
                    slot: args.slot().into(),
                    width: dimensions.width(),
                    height: dimensions.height(),
                    file: args.file().display().to_string(),
                },
            )?;
        }
    }
    Ok(())
}
