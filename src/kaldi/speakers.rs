/*! Speaker removal.

Removes from a Kaldi directory every utterance spoken by a speaker that also appears in another directory,
typically to keep test speakers out of a training set.
Files of the cleaned directory are rewritten in place.
!*/
use std::collections::HashSet;
use std::io::{BufRead, Write};

use log::{info, warn};

use super::{utterance_id, DataFile, KaldiDir};
use crate::error::Error;
use crate::io;

/// Speakers (second column) of an utt2spk file.
pub fn speakers<R: BufRead>(utt2spk: R) -> Result<HashSet<String>, Error> {
    let mut speakers = HashSet::new();
    for (idx, line) in utt2spk.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let (_, speaker) = parse_utt2spk(&line, idx + 1)?;
        speakers.insert(speaker.to_string());
    }
    Ok(speakers)
}

fn parse_utt2spk(line: &str, line_nb: usize) -> Result<(&str, &str), Error> {
    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(utt), Some(spk), None) => Ok((utt, spk)),
        _ => Err(Error::MalformedLine {
            line: line_nb,
            reason: format!("expected `<utterance-id> <speaker-id>`, got {:?}", line),
        }),
    }
}

/// Result of [filter_utt2spk].
#[derive(Debug, Default)]
pub struct FilteredUtt2Spk {
    /// utt2spk lines to keep, in input order.
    pub lines: Vec<String>,
    /// Utterances of the kept lines.
    pub utterances: HashSet<String>,
    /// Speakers whose utterances were removed.
    pub removed_speakers: HashSet<String>,
}

/// Drop every utt2spk entry whose speaker is in `speakers`.
pub fn filter_utt2spk<R: BufRead>(
    utt2spk: R,
    speakers: &HashSet<String>,
) -> Result<FilteredUtt2Spk, Error> {
    let mut filtered = FilteredUtt2Spk::default();
    for (idx, line) in utt2spk.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let (utt, spk) = parse_utt2spk(&line, idx + 1)?;
        if speakers.contains(spk) {
            filtered.removed_speakers.insert(spk.to_string());
        } else {
            filtered.utterances.insert(utt.to_string());
            filtered.lines.push(line);
        }
    }
    Ok(filtered)
}

/// Lines whose first token is in `keep`.
pub fn retain_utterances<R: BufRead>(src: R, keep: &HashSet<String>) -> Result<Vec<String>, Error> {
    let mut kept = Vec::new();
    for line in src.lines() {
        let line = line?;
        if utterance_id(&line).map_or(false, |id| keep.contains(id)) {
            kept.push(line);
        }
    }
    Ok(kept)
}

fn overwrite(dir: &KaldiDir, file: DataFile, lines: &[String]) -> Result<(), Error> {
    let mut w = io::writer(&dir.path(file))?;
    for line in lines {
        writeln!(w, "{}", line)?;
    }
    w.flush()?;
    info!("{}: {} entries written", file, lines.len());
    Ok(())
}

fn clean_file(dir: &KaldiDir, file: DataFile, keep: &HashSet<String>) -> Result<usize, Error> {
    let kept = retain_utterances(io::reader(&dir.path(file))?, keep)?;
    overwrite(dir, file, &kept)?;
    Ok(kept.len())
}

/// Summary of a [remove_speakers] run.
#[derive(Debug)]
pub struct RemovalReport {
    pub kept_utterances: usize,
    pub removed_speakers: usize,
}

/// Remove utterances of `to_clean` whose speaker also appears in `spk_dir`.
///
/// Rewrites `utt2spk`, then `segments` (or `wav.scp` if there are no segments), `text` and `feats.scp`.
/// A missing `feats.scp` is skipped.
/// Nothing is rewritten unless `utt2spk`, `text` and a recordings file are all present.
pub fn remove_speakers(to_clean: &KaldiDir, spk_dir: &KaldiDir) -> Result<RemovalReport, Error> {
    let recordings = if to_clean.contains(DataFile::Segments) {
        DataFile::Segments
    } else {
        DataFile::WavScp
    };
    for file in [DataFile::Utt2Spk, recordings, DataFile::Text] {
        if !to_clean.contains(file) {
            return Err(Error::MissingFile(to_clean.path(file)));
        }
    }

    info!("reading speakers of {:?}", spk_dir.root());
    let spk_dir_speakers = speakers(io::reader(&spk_dir.path(DataFile::Utt2Spk))?)?;
    info!("found {} speakers", spk_dir_speakers.len());

    let filtered = filter_utt2spk(
        io::reader(&to_clean.path(DataFile::Utt2Spk))?,
        &spk_dir_speakers,
    )?;
    info!(
        "found {} speakers present in both directories",
        filtered.removed_speakers.len()
    );
    overwrite(to_clean, DataFile::Utt2Spk, &filtered.lines)?;

    clean_file(to_clean, recordings, &filtered.utterances)?;
    clean_file(to_clean, DataFile::Text, &filtered.utterances)?;

    if to_clean.contains(DataFile::FeatsScp) {
        clean_file(to_clean, DataFile::FeatsScp, &filtered.utterances)?;
    } else {
        warn!("no {} in {:?}, skipping", DataFile::FeatsScp, to_clean.root());
    }

    Ok(RemovalReport {
        kept_utterances: filtered.lines.len(),
        removed_speakers: filtered.removed_speakers.len(),
    })
}
