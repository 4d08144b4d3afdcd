use anyhow::{Context, Result};
use std::process::ExitCode;

fn main() -> ExitCode {
    let parsed = match opshell::cli::parse_from(std::env::args()) {
        Ok(parsed) => parsed,
        Err(e) => e.exit(),
    };
    opshell::host::init_tracing(parsed.globals.log_level.as_deref(), parsed.globals.log_format);

    match run(parsed) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            ExitCode::from(opshell::host::EXIT_FAILURE)
        }
    }
}

fn run(parsed: opshell::cli::ParsedCli) -> Result<u8> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?
        .block_on(opshell::app::run(parsed))
}
