/*! Lexicon tools.

- Extraction of a VariKN vocabulary from a Kaldi lexicon.
- Generation of a grapheme lexicon from a Kaldi text, where each word is "pronounced" by its own characters.
  This is what a grapheme based acoustic model expects (Buckwalter text makes every grapheme a single ASCII char).
!*/
use std::collections::{BTreeSet, HashSet};
use std::io::{BufRead, Write};

use itertools::Itertools;
use log::{debug, info, warn};

use super::text::{SENTENCE_END, SENTENCE_START};
use crate::error::Error;

/// Last entry of every generated lexicon: unknown words map to spoken noise.
pub const UNKNOWN_ENTRY: &str = "<UNK> spn";

/// Write the words of a Kaldi lexicon (first column) as a VariKN vocabulary,
/// preceded by the sentence boundary symbols.
///
/// Returns the number of words written (boundary symbols excluded).
pub fn lexicon_to_vocab<R: BufRead, W: Write>(src: R, dst: &mut W) -> Result<usize, Error> {
    writeln!(dst, "{}", SENTENCE_START)?;
    writeln!(dst, "{}", SENTENCE_END)?;

    let mut nb_words = 0;
    for line in src.lines() {
        let line = line?;
        if let Some(word) = line.split_whitespace().next() {
            writeln!(dst, "{}", word)?;
            nb_words += 1;
        }
    }
    dst.flush()?;
    Ok(nb_words)
}

/// Every distinct word of a Kaldi text, sorted.
pub fn collect_words<R: BufRead>(kaldi_text: R) -> Result<BTreeSet<String>, Error> {
    let mut words = BTreeSet::new();
    for line in kaldi_text.lines() {
        let line = line?;
        words.extend(line.split_whitespace().skip(1).map(String::from));
    }
    debug!("found {} distinct words", words.len());
    Ok(words)
}

/// Read a non-silence phones file (one phone per line).
pub fn read_phones<R: BufRead>(src: R) -> Result<HashSet<String>, Error> {
    let mut phones = HashSet::new();
    for line in src.lines() {
        let line = line?;
        let phone = line.trim();
        if !phone.is_empty() {
            phones.insert(phone.to_string());
        }
    }
    Ok(phones)
}

/// `<word> <g1> <g2> ...`
pub fn lexicon_entry(word: &str) -> String {
    format!("{} {}", word, word.chars().join(" "))
}

/// Graphemes of `word` that are not in `phones`, sorted.
fn absent_graphemes(word: &str, phones: &HashSet<String>) -> BTreeSet<char> {
    let mut buf = [0u8; 4];
    word.chars()
        .filter(|c| !phones.contains(&*c.encode_utf8(&mut buf)))
        .collect()
}

/// Outcome of a lexicon generation.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LexiconStats {
    pub written: usize,
    pub skipped: usize,
}

/// Write a grapheme lexicon for `words`.
///
/// If `phones` is provided, words holding a grapheme that is not a known phone are skipped.
/// The lexicon always ends with [UNKNOWN_ENTRY].
pub fn write_grapheme_lexicon<'a, I, W>(
    words: I,
    phones: Option<&HashSet<String>>,
    dst: &mut W,
) -> Result<LexiconStats, Error>
where
    I: IntoIterator<Item = &'a String>,
    W: Write,
{
    let mut stats = LexiconStats::default();
    for word in words {
        if let Some(phones) = phones {
            let absent = absent_graphemes(word, phones);
            if !absent.is_empty() {
                warn!(
                    "ignoring word {} which contains unknown graphemes: {}",
                    word,
                    absent.iter().join(", ")
                );
                stats.skipped += 1;
                continue;
            }
        }
        writeln!(dst, "{}", lexicon_entry(word))?;
        stats.written += 1;
    }
    write!(dst, "{}", UNKNOWN_ENTRY)?;
    dst.flush()?;

    info!(
        "lexicon done: {} entries, {} words skipped",
        stats.written, stats.skipped
    );
    Ok(stats)
}
