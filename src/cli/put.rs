use std::io;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::instrument;

use crate::cli::{OutputFormat, PutArgs, write_json_line};
use crate::media::ImageIo;
use crate::transfer::FrameTransfer;
use crate::transport::Transport;

/// JSON result emitted by the `put` command.
#[derive(Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum PutResult {
    Put {
        slot: u8,
        width: u16,
        height: u16,
        payload_bytes: usize,
    },
}

/// Executes the `put` command against an already-built transport.
#[instrument(skip(transport, args, out), level = "info", fields(?output_format))]
pub(crate) async fn run<W>(
    transport: &mut dyn Transport,
    args: &PutArgs,
    out: &mut W,
    output_format: OutputFormat,
) -> Result<()>
where
    W: io::Write,
{
    let frame = ImageIo::load_rgb_frame(args.file())
        .with_context(|| format!("failed to load image `{}`", args.file().display()))?;
    let dimensions = frame.dimensions();
    let payload_bytes = dimensions.packed_len();

    FrameTransfer::put(transport, args.slot(), &frame)
        .await
        .with_context(|| format!("failed to store frame into slot {}", args.slot()))?;

    match output_format {
        OutputFormat::Pretty => {
            writeln!(
                out,
                "Stored {dimensions} frame ({payload_bytes} payload bytes) into slot {}",
                args.slot(),
            )?;
        }
        OutputFormat::Json => {
            write_json_line(
                out,
                &PutResult::Put {
                    slot: args.slot().into(),
                    width: dimensions.width(),
                    height: dimensions.height(),
                    payload_bytes,
                },
            )?;
        }
    }
    Ok(())
}
