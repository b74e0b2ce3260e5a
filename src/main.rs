use std::process::ExitCode;

use clap::Parser;

use hs450::{Args, SystemTerminalClient};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let mut stdout = std::io::stdout();

    match hs450::run(args, &mut stdout, &SystemTerminalClient).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(1)
        }
    }
}
