//! File handles used by the corpus tools.
//!
//! Opening a missing input yields [Error::MissingFile] rather than a bare io error,
//! so that commands can report which file was expected.
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::debug;

use crate::error::Error;

/// Open `path` for buffered reading.
pub fn reader(path: &Path) -> Result<BufReader<File>, Error> {
    if !path.exists() {
        return Err(Error::MissingFile(path.to_path_buf()));
    }
    debug!("opening {:?}", path);
    Ok(BufReader::new(File::open(path)?))
}

/// Create (or truncate) `path` for buffered writing.
pub fn writer(path: &Path) -> Result<BufWriter<File>, Error> {
    debug!("creating {:?}", path);
    Ok(BufWriter::new(File::create(path)?))
}

/// Open `path` in append mode, creating it if needed.
pub fn appender(path: &Path) -> Result<BufWriter<File>, Error> {
    let mut options = OpenOptions::new();
    options.append(true).create(true);

    debug!("appending to {:?}", path);
    Ok(BufWriter::new(options.open(path)?))
}
