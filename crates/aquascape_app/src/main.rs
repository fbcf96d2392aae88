//! `aquascape` interactive entry point.
//!
//! Reads one command per line from stdin and prints the re-rendered page
//! whenever the store or the route changed.

use aquascape_app::{AppConfig, Shell, ShellOutcome};
use aquascape_core::init_logging;
use log::{info, warn};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("aquascape: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = init_logging(config.log_level.as_str(), log_dir) {
            eprintln!("aquascape: logging disabled: {err}");
        }
    }

    match run(io::stdin().lock(), io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("aquascape: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(input: impl BufRead, mut output: impl Write) -> io::Result<()> {
    let mut shell = Shell::new();
    writeln!(output, "{}", shell.render())?;
    write!(output, "> ")?;
    output.flush()?;

    for line in input.lines() {
        match shell.execute(&line?) {
            Ok(ShellOutcome::Quit) => break,
            Ok(ShellOutcome::Output(text)) if !text.is_empty() => writeln!(output, "{text}")?,
            Ok(ShellOutcome::Output(_)) => {}
            Err(err) => {
                warn!("event=command module=shell status=error reason=\"{err}\"");
                writeln!(output, "error: {err}")?;
            }
        }
        if let Some(page) = shell.render_if_stale() {
            writeln!(output, "{page}")?;
        }
        write!(output, "> ")?;
        output.flush()?;
    }

    info!(
        "event=app_exit module=shell status=ok tanks={}",
        shell.store().len()
    );
    Ok(())
}
