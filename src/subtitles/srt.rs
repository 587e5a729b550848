//! SRT cue building and writing.
use std::fmt;
use std::io::Write;
use std::path::Path;

use itertools::Itertools;
use log::{debug, info};
use rayon::prelude::*;

use super::ctm::{CtmEntry, WordMap};
use crate::error::Error;
use crate::io;
use crate::transliteration::{self, Format};

/// Default cue length, in seconds.
pub const DEFAULT_WINDOW: f64 = 5.0;

/// How cues are built from CTM entries.
#[derive(Debug, Clone)]
pub struct SubtitleOptions {
    /// Cue window, in seconds.
    pub window: f64,
    /// Transliteration applied to cue text. Both formats have to be set, or none.
    pub input_format: Option<String>,
    pub output_format: Option<String>,
}

impl Default for SubtitleOptions {
    /// Buckwalter decoding output, displayed in Arabic script.
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            input_format: Some(Format::Buckwalter.to_string()),
            output_format: Some(Format::Unicode.to_string()),
        }
    }
}

impl SubtitleOptions {
    fn validate(&self) -> Result<(), Error> {
        if !(self.window > 0.0) {
            return Err(Error::Custom(format!(
                "subtitle window must be positive, got {}",
                self.window
            )));
        }
        match (&self.input_format, &self.output_format) {
            (Some(input), Some(output)) => transliteration::mapping(input, output).map(|_| ()),
            (None, None) => Ok(()),
            (None, Some(_)) => Err(Error::Custom("input format not specified".to_string())),
            (Some(_), None) => Err(Error::Custom("output format not specified".to_string())),
        }
    }

    fn render(&self, text: String) -> Result<String, Error> {
        match (&self.input_format, &self.output_format) {
            (Some(input), Some(output)) => transliteration::transliterate(&text, input, output, false),
            _ => Ok(text),
        }
    }
}

/// A numbered subtitle.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(
            f,
            "{} --> {}",
            format_timestamp(self.start),
            format_timestamp(self.end)
        )?;
        writeln!(f, "{}", self.text)
    }
}

/// `HH:MM:SS,mmm`. Negative times are clamped to zero.
pub fn format_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let total_s = total_ms / 1000;
    format!(
        "{:02}:{:02}:{:02},{:03}",
        total_s / 3600,
        (total_s / 60) % 60,
        total_s % 60,
        ms
    )
}

/// Build the cues of one utterance.
///
/// Words are grouped by the window their start time falls in.
/// A cue spans from the start of its first word to the end of its last one.
pub fn cues(
    entries: &[CtmEntry],
    words: Option<&WordMap>,
    options: &SubtitleOptions,
) -> Result<Vec<Cue>, Error> {
    options.validate()?;

    let windows = entries
        .iter()
        .group_by(|entry| (entry.start / options.window).floor() as i64);

    let mut cues = Vec::new();
    for (_, window) in &windows {
        let window: Vec<&CtmEntry> = window.collect();
        let (first, last) = match (window.first(), window.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => continue,
        };

        let text = window
            .iter()
            .map(|entry| match words {
                Some(words) => words.word(&entry.word),
                None => Ok(entry.word.as_str()),
            })
            .collect::<Result<Vec<&str>, Error>>()?
            .join(" ");

        cues.push(Cue {
            index: cues.len() + 1,
            start: first.start,
            end: last.end(),
            text: options.render(text)?,
        });
    }
    Ok(cues)
}

fn write_srt(path: &Path, cues: &[Cue]) -> Result<(), Error> {
    let mut w = io::writer(path)?;
    for cue in cues {
        writeln!(w, "{}", cue)?;
    }
    w.flush()?;
    Ok(())
}

/// Write `<dst>/<utterance-id>.srt` for every utterance, in parallel.
///
/// Returns the total number of cues written.
pub fn write_srt_dir(
    utterances: &[(String, Vec<CtmEntry>)],
    words: Option<&WordMap>,
    options: &SubtitleOptions,
    dst: &Path,
) -> Result<usize, Error> {
    options.validate()?;
    std::fs::create_dir_all(dst)?;

    let counts = utterances
        .par_iter()
        .map(|(utterance_id, entries)| -> Result<usize, Error> {
            let cues = cues(entries, words, options)?;
            let path = dst.join(format!("{}.srt", utterance_id));
            debug!("[{}] writing {} cues to {:?}", utterance_id, cues.len(), path);
            write_srt(&path, &cues)?;
            Ok(cues.len())
        })
        .collect::<Result<Vec<usize>, Error>>()?;

    let nb_cues = counts.iter().sum();
    info!(
        "wrote {} cues for {} utterances in {:?}",
        nb_cues,
        utterances.len(),
        dst
    );
    Ok(nb_cues)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(start: f64, duration: f64, word: &str) -> CtmEntry {
        CtmEntry {
            utterance_id: "utt".to_string(),
            channel: "1".to_string(),
            start,
            duration,
            word: word.to_string(),
            confidence: None,
        }
    }

    fn raw() -> SubtitleOptions {
        SubtitleOptions {
            input_format: None,
            output_format: None,
            ..Default::default()
        }
    }

    #[test]
    fn timestamps() {
        assert_eq!(format_timestamp(0.0), "00:00:00,000");
        assert_eq!(format_timestamp(5.25), "00:00:05,250");
        assert_eq!(format_timestamp(3725.5), "01:02:05,500");
        assert_eq!(format_timestamp(59.9996), "00:01:00,000");
        assert_eq!(format_timestamp(-1.0), "00:00:00,000");
    }

    #[test]
    fn windows() {
        let entries = vec![
            entry(0.5, 0.5, "a"),
            entry(4.0, 0.5, "b"),
            entry(5.2, 0.3, "c"),
            entry(16.0, 1.0, "d"),
        ];
        let cues = cues(&entries, None, &raw()).unwrap();
        assert_eq!(cues.len(), 3);
        assert_eq!(cues[0].text, "a b");
        assert_eq!((cues[0].start, cues[0].end), (0.5, 4.5));
        assert_eq!(cues[1].text, "c");
        assert_eq!(cues[2].index, 3);
        assert_eq!(cues[2].text, "d");
        assert_eq!(cues[2].end, 17.0);
    }

    #[test]
    fn word_ids_and_transliteration() {
        let words = WordMap::from_reader("bAb 1\nmn 2\n".as_bytes()).unwrap();
        let entries = vec![entry(0.0, 1.0, "1"), entry(1.0, 1.0, "2")];
        let cues = cues(&entries, Some(&words), &SubtitleOptions::default()).unwrap();
        assert_eq!(cues[0].text, "\u{0628}\u{0627}\u{0628} \u{0645}\u{0646}");

        let entries = vec![entry(0.0, 1.0, "3")];
        assert!(matches!(
            super::cues(&entries, Some(&words), &SubtitleOptions::default()),
            Err(Error::UnknownWord(_))
        ));
    }

    #[test]
    fn one_sided_formats() {
        let options = SubtitleOptions {
            input_format: None,
            ..Default::default()
        };
        assert!(cues(&[entry(0.0, 1.0, "a")], None, &options).is_err());
    }

    #[test]
    fn display() {
        let cue = Cue {
            index: 1,
            start: 0.0,
            end: 1.5,
            text: "bAb".to_string(),
        };
        assert_eq!(cue.to_string(), "1\n00:00:00,000 --> 00:00:01,500\nbAb\n");
    }
}
