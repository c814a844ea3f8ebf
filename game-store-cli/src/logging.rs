//! Logger setup. All command output goes through the `log` macros, so
//! `--quiet` and `--logfile` apply to everything the binary prints.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Builder, Target};
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

/// Copies everything to stdout and an ANSI-stripped copy to a file.
struct TeeWriter {
    file: strip_ansi_escapes::Writer<File>,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        self.file.flush()
    }
}

fn level_filter(quiet: bool, verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}

pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> io::Result<()> {
    let mut builder = Builder::new();
    builder.filter_level(level_filter(quiet, verbose));
    builder.format(move |buf, record| {
        let prefix = match record.level() {
            Level::Error => format!("{} ", "error:".if_supports_color(Stdout, |t| t.red())),
            Level::Warn => format!("{} ", "warning:".if_supports_color(Stdout, |t| t.yellow())),
            Level::Info => String::new(),
            Level::Debug | Level::Trace => {
                format!("{} ", "debug:".if_supports_color(Stdout, |t| t.dimmed()))
            }
        };
        if verbose {
            writeln!(
                buf,
                "{} {}{}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                prefix,
                record.args()
            )
        } else {
            writeln!(buf, "{}{}", prefix, record.args())
        }
    });

    match logfile {
        Some(path) => {
            let file = File::create(path)?;
            builder.target(Target::Pipe(Box::new(TeeWriter {
                file: strip_ansi_escapes::Writer::new(file),
            })));
        }
        None => {
            builder.target(Target::Stdout);
        }
    }

    builder.try_init().map_err(io::Error::other)
}
