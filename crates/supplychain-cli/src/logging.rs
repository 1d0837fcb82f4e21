use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;

use crate::error::CliError;

const DEFAULT_FILTER: &str = "warn";

/// Where log events go. Results are printed on stdout, so console logs use stderr.
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub json: bool,
    pub file: Option<std::path::PathBuf>,
}

pub fn init_logging(opts: &LogOptions) -> Result<(), CliError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let result = match (&opts.file, opts.json) {
        (Some(path), _) => {
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_timer(UtcTime::rfc_3339())
                .with_writer(file_writer(path)?);
            tracing_subscriber::registry().with(filter).with(layer).try_init()
        }
        (None, true) => {
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_timer(UtcTime::rfc_3339())
                .with_writer(io::stderr);
            tracing_subscriber::registry().with(filter).with(layer).try_init()
        }
        (None, false) => {
            let layer = tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr);
            tracing_subscriber::registry().with(filter).with(layer).try_init()
        }
    };

    result.map_err(|err| CliError::Logging(err.to_string()))
}

fn file_writer(path: &Path) -> Result<BoxMakeWriter, CliError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| CliError::Logging(format!("{}: {err}", path.display())))?;
    let file = Arc::new(Mutex::new(file));

    Ok(BoxMakeWriter::new(move || SharedWriter {
        file: Arc::clone(&file),
    }))
}

struct SharedWriter {
    file: Arc<Mutex<File>>,
}

impl SharedWriter {
    fn with_file<T>(&self, f: impl FnOnce(&mut File) -> io::Result<T>) -> io::Result<T> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        f(&mut file)
    }
}

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with_file(|file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with_file(|file| file.flush())
    }
}
