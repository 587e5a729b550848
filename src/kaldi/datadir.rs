//! Kaldi data directory layout.
use std::fmt;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::Error;

/// Files of a Kaldi data directory that the tools read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFile {
    WavScp,
    Segments,
    Text,
    FeatsScp,
    Utt2Spk,
}

impl DataFile {
    pub fn file_name(&self) -> &'static str {
        match self {
            DataFile::WavScp => "wav.scp",
            DataFile::Segments => "segments",
            DataFile::Text => "text",
            DataFile::FeatsScp => "feats.scp",
            DataFile::Utt2Spk => "utt2spk",
        }
    }
}

impl fmt::Display for DataFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// A Kaldi data directory rooted at some path.
#[derive(Debug, Clone)]
pub struct KaldiDir {
    root: PathBuf,
}

impl KaldiDir {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of `file` inside the directory. The file may not exist.
    pub fn path(&self, file: DataFile) -> PathBuf {
        self.root.join(file.file_name())
    }

    pub fn contains(&self, file: DataFile) -> bool {
        self.path(file).exists()
    }

    /// Create the directory (and parents).
    ///
    /// An existing directory is kept: writers append to the files it already holds.
    pub fn create(&self) -> Result<(), Error> {
        if self.root.is_dir() {
            warn!(
                "Kaldi directory {:?} already exists, files will be appended",
                self.root
            );
            return Ok(());
        }

        info!("creating Kaldi directory {:?}", self.root);
        std::fs::create_dir_all(&self.root)?;
        Ok(())
    }
}

/// First whitespace separated token of a line.
pub fn utterance_id(line: &str) -> Option<&str> {
    line.split_whitespace().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn paths() {
        let dir = KaldiDir::new(Path::new("data/train"));
        assert_eq!(dir.path(DataFile::WavScp), Path::new("data/train/wav.scp"));
        assert_eq!(dir.path(DataFile::Utt2Spk), Path::new("data/train/utt2spk"));
    }

    #[test]
    fn create_nested() {
        let tmp = tempdir().unwrap();
        let dir = KaldiDir::new(&tmp.path().join("a/b"));
        dir.create().unwrap();
        assert!(dir.root().is_dir());
        // second call keeps the directory
        dir.create().unwrap();
        assert!(!dir.contains(DataFile::Text));
    }

    #[test]
    fn first_token() {
        assert_eq!(utterance_id("  utt1 hello world"), Some("utt1"));
        assert_eq!(utterance_id("   "), None);
    }
}
