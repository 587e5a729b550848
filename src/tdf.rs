/*! LDC TDF transcripts to Kaldi data directories.

TDF (tab-delimited format) files carry one segment per row. The header names typed columns, such as
`file;unicode`, `start;float` or `transcript;unicode`.
Rows starting with `;;` are comments.

Conversion keeps Modern Standard Arabic segments only (foreign language segments are dropped and `<non-MSA>` tags removed),
and writes transcripts in Buckwalter.

Times are written in their shortest float form (`0.50` becomes `0.5`, `3` becomes `3.0`),
so the same segment gets the same id whatever the TDF padding.
!*/
use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use csv::StringRecord;
use itertools::Itertools;
use log::{debug, info};

use crate::error::Error;
use crate::io;
use crate::kaldi::{DataFile, KaldiDir};
use crate::transliteration::{transliterate, Format};

const FILE: &str = "file;unicode";
const START: &str = "start;float";
const END: &str = "end;float";
const SPEAKER: &str = "speaker;unicode";
const TRANSCRIPT: &str = "transcript;unicode";

const COMMENT: &str = ";;";
const NON_MSA_TAG: &str = "<non-MSA>";
const FOREIGN_OPEN: &str = "<foreign language=\"";
const FOREIGN_CLOSE: &str = "\"> </foreign>";

/// A kept TDF row.
#[derive(Debug, Clone, PartialEq)]
pub struct TdfSegment {
    pub file: String,
    /// Start and end, in seconds.
    pub start: f64,
    pub end: f64,
    pub speaker: String,
    pub transcript: String,
}

impl TdfSegment {
    /// `<file>_<start>-<end>`
    pub fn segment_id(&self) -> String {
        format!("{}_{}-{}", self.file, seconds(self.start), seconds(self.end))
    }

    /// Audio file name: the TDF file name with a `.wav` extension.
    pub fn wav_path(&self) -> String {
        let stem = Path::new(&self.file)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file.clone());
        format!("{}.wav", stem)
    }

    /// Speakers are prefixed by their file, since generic names (`speaker 1`) are reused across files.
    pub fn speaker_id(&self) -> String {
        format!("{}-{}", self.file, self.speaker.split_whitespace().join("_"))
    }
}

/// `3` is written `3.0`, `0.50` is written `0.5`.
fn seconds(value: f64) -> String {
    format!("{:?}", value)
}

/// Whether a transcript is an untranscribed foreign language segment.
pub fn is_foreign(transcript: &str) -> bool {
    transcript
        .find(FOREIGN_OPEN)
        .map_or(false, |idx| transcript[idx + FOREIGN_OPEN.len()..].contains(FOREIGN_CLOSE))
}

/// Remove `<non-MSA>` tags and transliterate to Buckwalter.
pub fn clean_transcript(transcript: &str) -> Result<String, Error> {
    let transcript = transcript.replace(NON_MSA_TAG, "");
    transliterate(
        &transcript,
        Format::Unicode.as_str(),
        Format::Buckwalter.as_str(),
        false,
    )
}

/// Column indices of the needed fields.
struct Columns {
    file: usize,
    start: usize,
    end: usize,
    speaker: usize,
    transcript: usize,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self, Error> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| Error::MissingColumn(name.to_string()))
        };
        Ok(Self {
            file: find(FILE)?,
            start: find(START)?,
            end: find(END)?,
            speaker: find(SPEAKER)?,
            transcript: find(TRANSCRIPT)?,
        })
    }
}

fn field(record: &StringRecord, idx: usize) -> String {
    record.get(idx).unwrap_or_default().trim().to_string()
}

fn time(record: &StringRecord, idx: usize) -> Result<f64, Error> {
    let value = field(record, idx);
    value.parse::<f64>().map_err(|e| Error::MalformedLine {
        line: record.position().map_or(0, |p| p.line() as usize),
        reason: format!("invalid time {:?}: {}", value, e),
    })
}

/// Read the MSA segments of a TDF file, with cleaned transcripts.
pub fn read_tdf(path: &Path) -> Result<Vec<TdfSegment>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .quoting(false)
        .from_reader(io::reader(path)?);

    let columns = Columns::from_headers(reader.headers()?)?;

    let mut segments = Vec::new();
    let (mut nb_comments, mut nb_foreign) = (0, 0);
    for record in reader.records() {
        let record = record?;
        let file = field(&record, columns.file);
        if file.starts_with(COMMENT) {
            nb_comments += 1;
            continue;
        }

        let transcript = field(&record, columns.transcript);
        if is_foreign(&transcript) {
            nb_foreign += 1;
            continue;
        }

        segments.push(TdfSegment {
            file,
            start: time(&record, columns.start)?,
            end: time(&record, columns.end)?,
            speaker: field(&record, columns.speaker),
            transcript: clean_transcript(&transcript)?,
        });
    }

    info!(
        "{:?}: {} segments kept, {} comments and {} foreign segments dropped",
        path,
        segments.len(),
        nb_comments,
        nb_foreign
    );
    Ok(segments)
}

/// Append `segments` to the Kaldi directory, creating it if needed.
///
/// `wav.scp` gets one entry per distinct file, in order of appearance.
pub fn write_kaldi_dir(segments: &[TdfSegment], dir: &KaldiDir) -> Result<(), Error> {
    dir.create()?;

    let mut wav_scp = io::appender(&dir.path(DataFile::WavScp))?;
    let mut seen = HashSet::new();
    for segment in segments.iter().filter(|s| seen.insert(s.file.as_str())) {
        writeln!(wav_scp, "{} {}", segment.file, segment.wav_path())?;
    }
    wav_scp.flush()?;
    debug!("wrote {} recordings", seen.len());

    let mut seg_file = io::appender(&dir.path(DataFile::Segments))?;
    let mut text = io::appender(&dir.path(DataFile::Text))?;
    let mut utt2spk = io::appender(&dir.path(DataFile::Utt2Spk))?;
    for segment in segments {
        let id = segment.segment_id();
        writeln!(
            seg_file,
            "{} {} {} {}",
            id,
            segment.file,
            seconds(segment.start),
            seconds(segment.end)
        )?;
        writeln!(text, "{}\t{}", id, segment.transcript)?;
        writeln!(utt2spk, "{} {}", id, segment.speaker_id())?;
    }
    seg_file.flush()?;
    text.flush()?;
    utt2spk.flush()?;

    info!("wrote {} segments to {:?}", segments.len(), dir.root());
    Ok(())
}

/// Convert a TDF file into a Kaldi data directory.
pub fn tdf_to_kaldi_dir(tdf: &Path, dir: &KaldiDir) -> Result<usize, Error> {
    let segments = read_tdf(tdf)?;
    write_kaldi_dir(&segments, dir)?;
    Ok(segments.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment() -> TdfSegment {
        TdfSegment {
            file: "AJ_20070101.sph".to_string(),
            start: 12.5,
            end: 15.25,
            speaker: "speaker 1".to_string(),
            transcript: "bAb".to_string(),
        }
    }

    #[test]
    fn ids() {
        let s = segment();
        assert_eq!(s.segment_id(), "AJ_20070101.sph_12.5-15.25");
        assert_eq!(s.wav_path(), "AJ_20070101.wav");
        assert_eq!(s.speaker_id(), "AJ_20070101.sph-speaker_1");
    }

    #[test]
    fn padded_times() {
        let s = TdfSegment {
            start: 0.50,
            end: 3.0,
            ..segment()
        };
        assert_eq!(s.segment_id(), "AJ_20070101.sph_0.5-3.0");
        assert_eq!("3".parse::<f64>().map(seconds).unwrap(), "3.0");
        assert_eq!("0.50".parse::<f64>().map(seconds).unwrap(), "0.5");
    }

    #[test]
    fn foreign() {
        assert!(is_foreign("<foreign language=\"English\"> </foreign>"));
        assert!(is_foreign("foo <foreign language=\"French\"> </foreign> bar"));
        assert!(!is_foreign("<foreign language=\"English\">hello</foreign>"));
        assert!(!is_foreign("\u{0628}\u{0627}\u{0628}"));
    }

    #[test]
    fn clean() {
        let cleaned = clean_transcript("<non-MSA>\u{0628}\u{0627}\u{0628} x").unwrap();
        assert_eq!(cleaned, "bAb x");
    }
}
