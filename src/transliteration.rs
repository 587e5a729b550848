/*! Unicode/Buckwalter transliteration of Arabic text.

Buckwalter maps every Arabic letter and diacritic onto a single ASCII character,
which makes transcripts usable by tools that only handle ASCII (Kaldi, VariKN).
Conversion is character by character through a static table.

```
use arprep::transliteration::transliterate;

let bw = transliterate("\u{0628}\u{0627}\u{0628}", "unicode", "buckwalter", false).unwrap();
assert_eq!(bw, "bAb");
```
!*/
use std::collections::HashMap;
use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use lazy_static::lazy_static;
use log::debug;

use crate::error::Error;

/// Unicode code point to Buckwalter character.
const UNICODE_BUCKWALTER: [(char, char); 48] = [
    ('\u{0621}', '\''),
    ('\u{0622}', '|'),
    ('\u{0623}', '>'),
    ('\u{0624}', '&'),
    ('\u{0625}', '<'),
    ('\u{0626}', '}'),
    ('\u{0627}', 'A'),
    ('\u{0628}', 'b'),
    ('\u{0629}', 'p'),
    ('\u{062A}', 't'),
    ('\u{062B}', 'v'),
    ('\u{062C}', 'j'),
    ('\u{062D}', 'H'),
    ('\u{062E}', 'x'),
    ('\u{062F}', 'd'),
    ('\u{0630}', '*'),
    ('\u{0631}', 'r'),
    ('\u{0632}', 'z'),
    ('\u{0633}', 's'),
    ('\u{0634}', '$'),
    ('\u{0635}', 'S'),
    ('\u{0636}', 'D'),
    ('\u{0637}', 'T'),
    ('\u{0638}', 'Z'),
    ('\u{0639}', 'E'),
    ('\u{063A}', 'g'),
    ('\u{0640}', '_'),
    ('\u{0641}', 'f'),
    ('\u{0642}', 'q'),
    ('\u{0643}', 'k'),
    ('\u{0644}', 'l'),
    ('\u{0645}', 'm'),
    ('\u{0646}', 'n'),
    ('\u{0647}', 'h'),
    ('\u{0648}', 'w'),
    ('\u{0649}', 'Y'),
    ('\u{064A}', 'y'),
    ('\u{064B}', 'F'),
    ('\u{064C}', 'N'),
    ('\u{064D}', 'K'),
    ('\u{064E}', 'a'),
    ('\u{064F}', 'u'),
    ('\u{0650}', 'i'),
    ('\u{0651}', '~'),
    ('\u{0652}', 'o'),
    ('\u{0670}', '`'),
    ('\u{0671}', '{'),
    (' ', ' '),
];

lazy_static! {
    /// Forward table.
    pub static ref UNICODE2BUCKWALTER: HashMap<char, char> =
        UNICODE_BUCKWALTER.iter().copied().collect();

    /// Inverse of [UNICODE2BUCKWALTER].
    ///
    /// Panics on first use if the forward table maps two code points onto the same character,
    /// since swapping keys and values would then lose an entry.
    pub static ref BUCKWALTER2UNICODE: HashMap<char, char> = {
        let inverse: HashMap<char, char> = UNICODE2BUCKWALTER
            .iter()
            .map(|(unicode, buckwalter)| (*buckwalter, *unicode))
            .collect();
        assert_eq!(
            inverse.len(),
            UNICODE2BUCKWALTER.len(),
            "Buckwalter table is not injective"
        );
        inverse
    };
}

/// Supported text encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Unicode,
    Buckwalter,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Unicode => "unicode",
            Format::Buckwalter => "buckwalter",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unicode" => Ok(Format::Unicode),
            "buckwalter" => Ok(Format::Buckwalter),
            other => Err(Error::Custom(format!("unknown format {other}"))),
        }
    }
}

/// Get the table for the `input_format` -> `output_format` direction.
///
/// Returns `Ok(None)` when both tags are equal, whatever they are.
pub fn mapping(
    input_format: &str,
    output_format: &str,
) -> Result<Option<&'static HashMap<char, char>>, Error> {
    if input_format == output_format {
        return Ok(None);
    }

    match (
        input_format.parse::<Format>(),
        output_format.parse::<Format>(),
    ) {
        (Ok(Format::Unicode), Ok(Format::Buckwalter)) => Ok(Some(&*UNICODE2BUCKWALTER)),
        (Ok(Format::Buckwalter), Ok(Format::Unicode)) => Ok(Some(&*BUCKWALTER2UNICODE)),
        _ => Err(Error::UnsupportedFormatPair {
            input: input_format.to_string(),
            output: output_format.to_string(),
        }),
    }
}

/// Map each character of `text` through `table`.
///
/// Characters absent from the table are dropped if `ignore_absent` is set, and kept as is otherwise.
pub fn apply(text: &str, table: &HashMap<char, char>, ignore_absent: bool) -> String {
    if ignore_absent {
        text.chars().filter_map(|c| table.get(&c).copied()).collect()
    } else {
        text.chars()
            .map(|c| table.get(&c).copied().unwrap_or(c))
            .collect()
    }
}

/// Transliterate `text` from `input_format` to `output_format` (`"unicode"` or `"buckwalter"`).
///
/// Equal formats short-circuit and return `text` untouched, even for unknown tags.
/// Any other pair that is not one of the two supported directions is an
/// [Error::UnsupportedFormatPair].
pub fn transliterate(
    text: &str,
    input_format: &str,
    output_format: &str,
    ignore_absent: bool,
) -> Result<String, Error> {
    match mapping(input_format, output_format)? {
        Some(table) => Ok(apply(text, table, ignore_absent)),
        None => Ok(text.to_string()),
    }
}

/// Transliterate a whole line-oriented stream.
///
/// The format pair is validated before anything is read.
/// Returns the number of lines written.
pub fn transliterate_lines<R: BufRead, W: Write>(
    src: R,
    dst: &mut W,
    input_format: &str,
    output_format: &str,
    ignore_absent: bool,
) -> Result<usize, Error> {
    let table = mapping(input_format, output_format)?;
    debug!("transliterating lines: {input_format} -> {output_format}");

    let mut nb_lines = 0;
    for line in src.lines() {
        let line = line?;
        match table {
            Some(table) => writeln!(dst, "{}", apply(&line, table, ignore_absent))?,
            None => writeln!(dst, "{}", line)?,
        }
        nb_lines += 1;
    }
    Ok(nb_lines)
}
