/*! MGB-3 data aggregation.

MGB-3 adaptation and development sets are transcribed by several annotators, each in their own directory:

```text
<base>/<data set>/<annotator>/segments
<base>/<data set>/<annotator>/text_noverlap.bw
```

Aggregation merges them into one Kaldi directory per data set, prefixing segment ids with the annotator name.
Each aggregated segment is its own speaker.
!*/
use std::collections::BTreeSet;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use log::info;

use crate::error::Error;
use crate::io;
use crate::kaldi::{DataFile, KaldiDir};

pub const DATA_SETS: [&str; 2] = ["adapt.20170322", "dev.20170322"];
pub const ANNOTATORS: [&str; 4] = ["Alaa", "Ali", "Mohamed", "Omar"];

/// Annotator transcript file name.
pub const TEXT_FILE: &str = "text_noverlap.bw";

/// Source layout of an MGB-3 release.
#[derive(Debug, Clone)]
pub struct Mgb3Layout {
    pub base: PathBuf,
    pub data_sets: Vec<String>,
    pub annotators: Vec<String>,
}

impl Mgb3Layout {
    /// Layout with the default data sets and annotators.
    pub fn new(base: &Path) -> Self {
        Self {
            base: base.to_path_buf(),
            data_sets: DATA_SETS.iter().map(|s| s.to_string()).collect(),
            annotators: ANNOTATORS.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn annotator_dir(&self, data_set: &str, annotator: &str) -> PathBuf {
        [self.base.as_path(), Path::new(data_set), Path::new(annotator)]
            .iter()
            .collect()
    }
}

/// Copy `src` lines into `dst`, each prefixed by `<prefix>_`.
pub fn prefix_lines<R: BufRead, W: Write>(src: R, prefix: &str, dst: &mut W) -> Result<usize, Error> {
    let mut nb_lines = 0;
    for line in src.lines() {
        writeln!(dst, "{}_{}", prefix, line?)?;
        nb_lines += 1;
    }
    Ok(nb_lines)
}

/// Recording ids (second column) of a segments file.
pub fn recording_ids<R: BufRead>(segments: R) -> Result<BTreeSet<String>, Error> {
    let mut ids = BTreeSet::new();
    for (idx, line) in segments.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let id = line
            .split_whitespace()
            .nth(1)
            .ok_or_else(|| Error::MalformedLine {
                line: idx + 1,
                reason: "segments line without recording id".to_string(),
            })?;
        ids.insert(id.to_string());
    }
    Ok(ids)
}

/// Write an utt2spk where every segment of `segments` is its own speaker.
pub fn self_utt2spk<R: BufRead, W: Write>(segments: R, dst: &mut W) -> Result<usize, Error> {
    let mut nb_lines = 0;
    for line in segments.lines() {
        let line = line?;
        if let Some(id) = line.split_whitespace().next() {
            writeln!(dst, "{} {}", id, id)?;
            nb_lines += 1;
        }
    }
    Ok(nb_lines)
}

fn aggregate_data_set(layout: &Mgb3Layout, data_set: &str, dst: &KaldiDir) -> Result<(), Error> {
    dst.create()?;

    let mut segments = io::writer(&dst.path(DataFile::Segments))?;
    let mut text = io::writer(&dst.path(DataFile::Text))?;
    let mut recordings = BTreeSet::new();

    for annotator in &layout.annotators {
        let src = layout.annotator_dir(data_set, annotator);
        info!("[{}] adding annotator {}", data_set, annotator);

        prefix_lines(io::reader(&src.join(TEXT_FILE))?, annotator, &mut text)?;
        let src_segments = src.join(DataFile::Segments.file_name());
        prefix_lines(io::reader(&src_segments)?, annotator, &mut segments)?;
        recordings.extend(recording_ids(io::reader(&src_segments)?)?);
    }
    segments.flush()?;
    text.flush()?;

    let mut utt2spk = io::writer(&dst.path(DataFile::Utt2Spk))?;
    let nb_segments = self_utt2spk(io::reader(&dst.path(DataFile::Segments))?, &mut utt2spk)?;
    utt2spk.flush()?;

    let mut wav_scp = io::writer(&dst.path(DataFile::WavScp))?;
    for id in &recordings {
        writeln!(wav_scp, "{} {}.wav", id, id)?;
    }
    wav_scp.flush()?;

    info!(
        "[{}] {} segments over {} recordings",
        data_set,
        nb_segments,
        recordings.len()
    );
    Ok(())
}

/// Aggregate every data set of `layout` into `<dst>/<data set>`.
pub fn aggregate(layout: &Mgb3Layout, dst: &Path) -> Result<(), Error> {
    for data_set in &layout.data_sets {
        aggregate_data_set(layout, data_set, &KaldiDir::new(&dst.join(data_set)))?;
    }
    Ok(())
}
