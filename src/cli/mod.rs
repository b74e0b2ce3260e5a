mod command;
pub(crate) mod get;
pub(crate) mod put;

use std::io;

use anyhow::Result;
use serde::Serialize;

pub use command::{Args, Command, GetArgs, LogLevel, OutputFormat, PutArgs};

pub(crate) fn write_json_line(out: &mut impl io::Write, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
