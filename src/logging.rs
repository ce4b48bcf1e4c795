// Copyright (c) 2026 rezky_nightky

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use env_logger::{Builder, Env, Target};

/// Log records held back while the rain owns the terminal.
#[derive(Clone, Default)]
pub struct Backlog(Arc<Mutex<Vec<u8>>>);

impl Backlog {
    /// Moves everything buffered so far into `out`.
    pub fn replay<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let buf = match self.0.lock() {
            Ok(mut g) => std::mem::take(&mut *g),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        };
        out.write_all(&buf)?;
        out.flush()
    }
}

impl Write for Backlog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.0.lock() {
            Ok(mut g) => g.extend_from_slice(buf),
            Err(poisoned) => poisoned.into_inner().extend_from_slice(buf),
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Installs the global logger. `RUST_LOG` overrides the `warn` default.
/// With `log_file` set, records are appended there. Otherwise they are
/// buffered in the returned [`Backlog`], to be replayed on stderr once the
/// terminal is restored; writing to stderr under the alternate screen would
/// be wiped by the next repaint.
pub fn init(log_file: Option<&Path>) -> io::Result<Option<Backlog>> {
    let mut builder = builder();

    let backlog = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.target(Target::Pipe(Box::new(file)));
            None
        }
        None => {
            let backlog = Backlog::default();
            builder.target(Target::Pipe(Box::new(backlog.clone())));
            Some(backlog)
        }
    };

    builder.try_init().map_err(io::Error::other)?;
    Ok(backlog)
}

fn builder() -> Builder {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    builder.format_timestamp_millis();
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backlog_replays_once_in_order() {
        let mut backlog = Backlog::default();
        let mut writer = backlog.clone();
        writer.write_all(b"first\n").unwrap();
        backlog.write_all(b"second\n").unwrap();

        let mut out = Vec::new();
        backlog.replay(&mut out).unwrap();
        assert_eq!(out, b"first\nsecond\n");

        let mut again = Vec::new();
        backlog.replay(&mut again).unwrap();
        assert!(again.is_empty());
    }

    #[test]
    fn records_reach_the_backlog() {
        let backlog = Backlog::default();
        let logger = builder()
            .filter_level(log::LevelFilter::Error)
            .target(Target::Pipe(Box::new(backlog.clone())))
            .build();
        log::Log::log(
            &logger,
            &log::Record::builder()
                .level(log::Level::Error)
                .args(format_args!("failed to toggle fullscreen"))
                .build(),
        );
        log::Log::flush(&logger);

        let mut out = Vec::new();
        backlog.replay(&mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("failed to toggle fullscreen"));
    }
}
