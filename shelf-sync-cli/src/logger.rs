//! `env_logger` setup for CLI output.
//!
//! Normal output is `log::info!`, so the logger prints bare messages to
//! stdout. `--verbose` adds timestamps and debug lines, `--quiet` keeps only
//! warnings and errors, and `RUST_LOG` overrides both. With `--logfile` every
//! line is also written to a file with ANSI codes stripped.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Builder, Target};
use log::LevelFilter;

use crate::CliError;

/// Level implied by the global flags. `--verbose` wins over `--quiet`.
pub(crate) fn level_for(quiet: bool, verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}

pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let mut builder = Builder::new();
    builder
        .filter_level(level_for(quiet, verbose))
        .filter_module("hyper", LevelFilter::Warn)
        .filter_module("hyper_util", LevelFilter::Warn)
        .filter_module("reqwest", LevelFilter::Warn)
        .filter_module("rustls", LevelFilter::Warn)
        .parse_default_env();

    builder.format(move |buf, record| {
        if verbose {
            writeln!(
                buf,
                "[{} {:<5} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        } else {
            writeln!(buf, "{}", record.args())
        }
    });

    match logfile {
        Some(path) => {
            let file = File::create(path)?;
            builder.target(Target::Pipe(Box::new(TeeWriter::new(io::stdout(), file))));
        }
        None => {
            builder.target(Target::Stdout);
        }
    }

    builder
        .try_init()
        .map_err(|e| CliError::runtime(format!("Failed to initialize logger: {}", e)))
}

/// Writes everything to `console` and an ANSI-stripped copy to `file`.
pub(crate) struct TeeWriter<C, F> {
    console: C,
    file: F,
}

impl<C: Write, F: Write> TeeWriter<C, F> {
    pub(crate) fn new(console: C, file: F) -> Self {
        Self { console, file }
    }
}

impl<C: Write, F: Write> Write for TeeWriter<C, F> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.console.write_all(buf)?;
        self.file.write_all(&strip_ansi_escapes::strip(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.console.flush()?;
        self.file.flush()
    }
}

#[cfg(test)]
#[path = "tests/logger_tests.rs"]
mod tests;
