//! CTM parsing and word id mapping.
use std::collections::HashMap;
use std::io::BufRead;

use crate::error::Error;

/// A CTM line: `<utterance-id> <channel> <start> <duration> <word> [<confidence>]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CtmEntry {
    pub utterance_id: String,
    pub channel: String,
    pub start: f64,
    pub duration: f64,
    /// Word, or word id if the decoder was not given a symbol table.
    pub word: String,
    pub confidence: Option<f64>,
}

impl CtmEntry {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Parse a CTM line. `line_nb` is only used in errors.
    pub fn parse(line: &str, line_nb: usize) -> Result<Self, Error> {
        let malformed = |reason: String| Error::MalformedLine {
            line: line_nb,
            reason,
        };

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if !(5..=6).contains(&tokens.len()) {
            return Err(malformed(format!(
                "expected 5 or 6 fields, got {}",
                tokens.len()
            )));
        }

        let float = |s: &str| {
            s.parse::<f64>()
                .map_err(|e| malformed(format!("invalid number {:?}: {}", s, e)))
        };

        Ok(Self {
            utterance_id: tokens[0].to_string(),
            channel: tokens[1].to_string(),
            start: float(tokens[2])?,
            duration: float(tokens[3])?,
            word: tokens[4].to_string(),
            confidence: tokens.get(5).map(|c| float(*c)).transpose()?,
        })
    }
}

/// Read every non-blank line of a CTM file.
pub fn read_ctm<R: BufRead>(src: R) -> Result<Vec<CtmEntry>, Error> {
    let mut entries = Vec::new();
    for (idx, line) in src.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        entries.push(CtmEntry::parse(&line, idx + 1)?);
    }
    Ok(entries)
}

/// Group entries by utterance, keeping utterances in order of first appearance.
pub fn group_by_utterance(entries: Vec<CtmEntry>) -> Vec<(String, Vec<CtmEntry>)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<CtmEntry>)> = Vec::new();
    for entry in entries {
        match index.get(&entry.utterance_id) {
            Some(&i) => groups[i].1.push(entry),
            None => {
                index.insert(entry.utterance_id.clone(), groups.len());
                groups.push((entry.utterance_id.clone(), vec![entry]));
            }
        }
    }
    groups
}

/// Word id to word mapping, built from a Kaldi `words.txt` (`<word> <id>` per line).
#[derive(Debug, Default, Clone)]
pub struct WordMap(HashMap<String, String>);

impl WordMap {
    pub fn from_reader<R: BufRead>(src: R) -> Result<Self, Error> {
        let mut map = HashMap::new();
        for (idx, line) in src.lines().enumerate() {
            let line = line?;
            let mut tokens = line.split_whitespace();
            match (tokens.next(), tokens.next(), tokens.next()) {
                (None, _, _) => continue,
                (Some(word), Some(id), None) => {
                    map.insert(id.to_string(), word.to_string());
                }
                _ => {
                    return Err(Error::MalformedLine {
                        line: idx + 1,
                        reason: "expected `<word> <word-id>`".to_string(),
                    })
                }
            }
        }
        Ok(Self(map))
    }

    pub fn word(&self, id: &str) -> Result<&str, Error> {
        self.0
            .get(id)
            .map(String::as_str)
            .ok_or_else(|| Error::UnknownWord(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_line() {
        let entry = CtmEntry::parse("utt1 1 0.50 0.25 42 0.98", 1).unwrap();
        assert_eq!(entry.utterance_id, "utt1");
        assert_eq!(entry.word, "42");
        assert_eq!(entry.confidence, Some(0.98));
        assert!((entry.end() - 0.75).abs() < 1e-9);

        let entry = CtmEntry::parse("utt1 A 1 2 bAb", 1).unwrap();
        assert_eq!(entry.confidence, None);
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            CtmEntry::parse("utt1 1 0.5", 3),
            Err(Error::MalformedLine { line: 3, .. })
        ));
        assert!(CtmEntry::parse("utt1 1 x 0.5 w", 1).is_err());
    }

    #[test]
    fn grouping_keeps_first_seen_order() {
        let ctm = "b 1 0 1 w1\na 1 0 1 w2\nb 1 1 1 w3\n\n";
        let groups = group_by_utterance(read_ctm(ctm.as_bytes()).unwrap());
        let ids: Vec<&str> = groups.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[0].1[1].word, "w3");
    }

    #[test]
    fn word_map() {
        let map = WordMap::from_reader("<eps> 0\nbAb 1\n\nktAb 2\n".as_bytes()).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map.word("2").unwrap(), "ktAb");
        assert!(matches!(map.word("3"), Err(Error::UnknownWord(_))));
        assert!(WordMap::from_reader("bAb\n".as_bytes()).is_err());
    }
}
