/*! Kaldi text conversions.

Turns Kaldi `text` files into plain text (one sentence per line) and into VariKN language modeling corpora,
where each sentence is surrounded by sentence boundary symbols.
!*/
use std::io::{BufRead, Write};

use itertools::Itertools;

use crate::error::Error;

pub const SENTENCE_START: &str = "<s>";
pub const SENTENCE_END: &str = "</s>";

/// Remove the utterance id from a Kaldi text line, normalizing whitespace.
pub fn strip_utterance_id(line: &str) -> String {
    line.split_whitespace().skip(1).join(" ")
}

/// Surround a sentence with sentence boundary symbols.
pub fn to_varikn_sentence(sentence: &str) -> String {
    format!("{} {} {}", SENTENCE_START, sentence.trim(), SENTENCE_END)
}

fn convert_lines<R, W, F>(src: R, dst: &mut W, convert: F) -> Result<usize, Error>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> String,
{
    let mut nb_lines = 0;
    for line in src.lines() {
        writeln!(dst, "{}", convert(&line?))?;
        nb_lines += 1;
    }
    dst.flush()?;
    Ok(nb_lines)
}

/// Kaldi text to plain text. Returns the number of lines written.
pub fn kaldi_text_to_plain<R: BufRead, W: Write>(src: R, dst: &mut W) -> Result<usize, Error> {
    convert_lines(src, dst, strip_utterance_id)
}

/// Kaldi text to VariKN corpus.
pub fn kaldi_text_to_varikn<R: BufRead, W: Write>(src: R, dst: &mut W) -> Result<usize, Error> {
    convert_lines(src, dst, |line| to_varikn_sentence(&strip_utterance_id(line)))
}

/// Plain text (one sentence per line) to VariKN corpus.
pub fn plain_text_to_varikn<R: BufRead, W: Write>(src: R, dst: &mut W) -> Result<usize, Error> {
    convert_lines(src, dst, to_varikn_sentence)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KALDI_TEXT: &str = "utt1 AhlA w shlA\nutt2   mrHbA\tbkm\nutt3\n";

    #[test]
    fn strip() {
        assert_eq!(strip_utterance_id("utt1 AhlA w shlA"), "AhlA w shlA");
        assert_eq!(strip_utterance_id("utt2   mrHbA\tbkm"), "mrHbA bkm");
        assert_eq!(strip_utterance_id("utt3"), "");
        assert_eq!(strip_utterance_id(""), "");
    }

    #[test]
    fn to_plain() {
        let mut out = Vec::new();
        let nb = kaldi_text_to_plain(KALDI_TEXT.as_bytes(), &mut out).unwrap();
        assert_eq!(nb, 3);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "AhlA w shlA\nmrHbA bkm\n\n"
        );
    }

    #[test]
    fn to_varikn() {
        let mut out = Vec::new();
        kaldi_text_to_varikn(KALDI_TEXT.as_bytes(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "<s> AhlA w shlA </s>\n<s> mrHbA bkm </s>\n<s>  </s>\n"
        );
    }

    #[test]
    fn plain_to_varikn() {
        let mut out = Vec::new();
        plain_text_to_varikn("  hello world \nfoo\n".as_bytes(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "<s> hello world </s>\n<s> foo </s>\n"
        );
    }
}
