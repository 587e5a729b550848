//! i-vector files.
//!
//! An i-vector file holds one utterance per line: `<utterance-id> v1 v2 ...`.
//! Kaldi text archives wrap values in brackets (`utt [ v1 v2 ... ]`), which are accepted too.
use std::io::BufRead;
use std::path::Path;

use log::info;

use crate::error::Error;
use crate::io;

/// Dialects of the VarDial 2017 Arabic dialect identification task.
pub const DIALECTS: [&str; 5] = ["EGY", "GLF", "LAV", "MSA", "NOR"];

#[derive(Debug, Clone, PartialEq)]
pub struct LabelledIVector {
    pub utterance_id: String,
    pub dialect: String,
    pub ivector: Vec<f64>,
}

/// Parse an i-vector line. Returns `None` on blank lines.
pub fn parse_ivector_line(line: &str, line_nb: usize) -> Result<Option<(String, Vec<f64>)>, Error> {
    let mut tokens = line.split_whitespace();
    let utterance_id = match tokens.next() {
        Some(id) => id.to_string(),
        None => return Ok(None),
    };

    let ivector = tokens
        .filter(|t| *t != "[" && *t != "]")
        .map(|t| {
            t.parse::<f64>().map_err(|e| Error::MalformedLine {
                line: line_nb,
                reason: format!("invalid value {:?}: {}", t, e),
            })
        })
        .collect::<Result<Vec<f64>, Error>>()?;

    Ok(Some((utterance_id, ivector)))
}

/// Read every i-vector of `src`, labelled with `dialect`.
pub fn read_ivectors<R: BufRead>(src: R, dialect: &str) -> Result<Vec<LabelledIVector>, Error> {
    let mut ivectors = Vec::new();
    for (idx, line) in src.lines().enumerate() {
        if let Some((utterance_id, ivector)) = parse_ivector_line(&line?, idx + 1)? {
            ivectors.push(LabelledIVector {
                utterance_id,
                dialect: dialect.to_string(),
                ivector,
            });
        }
    }
    Ok(ivectors)
}

/// Read `<dir>/<dialect>.ivec` for each dialect.
pub fn read_ivector_set<S: AsRef<str>>(dir: &Path, dialects: &[S]) -> Result<Vec<LabelledIVector>, Error> {
    let mut ivectors = Vec::new();
    for dialect in dialects {
        let dialect = dialect.as_ref();
        let path = dir.join(format!("{}.ivec", dialect));
        let read = read_ivectors(io::reader(&path)?, dialect)?;
        info!("[{}] {} i-vectors read from {:?}", dialect, read.len(), path);
        ivectors.extend(read);
    }
    Ok(ivectors)
}
