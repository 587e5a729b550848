//! # arprep
//!
//! Corpus preparation tools for Arabic speech recognition and dialect identification.
//!
//! Every tool is a subcommand. Logging is configured through `RUST_LOG`.
//!
//! ```sh
//! arprep 1.0.0
//! Arabic speech recognition and dialect identification corpus preparation tools.
//!
//! USAGE:
//!     arprep <SUBCOMMAND>
//!
//! SUBCOMMANDS:
//!     transliterate         Transliterate text between Unicode and Buckwalter
//!     kaldi-text2-plain     Remove utterance ids from a Kaldi text
//!     kaldi-text2-varikn    Turn a Kaldi text into a VariKN corpus
//!     plain-text2-varikn    Turn a plain text (one sentence per line) into a VariKN corpus
//!     lex2-vocab            Extract a VariKN vocabulary from a Kaldi lexicon
//!     grapheme-lexicon      Build a grapheme lexicon from a Kaldi text
//!     remove-speakers       Remove speakers of a Kaldi directory from another one
//!     tdf2-kaldi            Convert an LDC TDF file into a Kaldi data directory
//!     prepare-mgb3          Aggregate MGB-3 annotator transcripts into Kaldi directories
//!     ctm2-srt              Generate SRT subtitles from a CTM file
//!     enroll                Enroll dialect models from i-vectors
//!     score                 Score test i-vectors against a dialect model
//! ```
use std::io::{BufRead, BufReader, BufWriter, Write};

use structopt::StructOpt;

use arprep::dialect::{self, DialectModel, DIALECTS, INTERPOLATION};
use arprep::error::Error;
use arprep::io;
use arprep::kaldi::{self, KaldiDir};
use arprep::mgb3::{self, Mgb3Layout};
use arprep::subtitles::{self, SubtitleOptions, WordMap};
use arprep::tdf;
use arprep::transliteration;

#[macro_use]
extern crate log;

mod cli;

/// Values given on the command line, or `defaults` if there are none.
fn or_defaults(values: Vec<String>, defaults: &[&str]) -> Vec<String> {
    if values.is_empty() {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        values
    }
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Arprep::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::Arprep::Transliterate(t) => {
            let src: Box<dyn BufRead> = match &t.src {
                Some(path) => Box::new(io::reader(path)?),
                None => Box::new(BufReader::new(std::io::stdin())),
            };
            let mut dst: Box<dyn Write> = match &t.dst {
                Some(path) => Box::new(io::writer(path)?),
                None => Box::new(BufWriter::new(std::io::stdout())),
            };
            let nb_lines = transliteration::transliterate_lines(
                src,
                &mut dst,
                &t.input_format,
                &t.output_format,
                t.ignore_absent,
            )?;
            dst.flush()?;
            info!("transliterated {} lines", nb_lines);
        }

        cli::Arprep::KaldiText2Plain(c) => {
            let nb = kaldi::text::kaldi_text_to_plain(io::reader(&c.src)?, &mut io::writer(&c.dst)?)?;
            info!("wrote {} lines to {:?}", nb, c.dst);
        }

        cli::Arprep::KaldiText2Varikn(c) => {
            let nb = kaldi::text::kaldi_text_to_varikn(io::reader(&c.src)?, &mut io::writer(&c.dst)?)?;
            info!("wrote {} sentences to {:?}", nb, c.dst);
        }

        cli::Arprep::PlainText2Varikn(c) => {
            let nb = kaldi::text::plain_text_to_varikn(io::reader(&c.src)?, &mut io::writer(&c.dst)?)?;
            info!("wrote {} sentences to {:?}", nb, c.dst);
        }

        cli::Arprep::Lex2Vocab(c) => {
            let nb = kaldi::lexicon::lexicon_to_vocab(io::reader(&c.src)?, &mut io::writer(&c.dst)?)?;
            info!("wrote {} words to {:?}", nb, c.dst);
        }

        cli::Arprep::GraphemeLexicon(g) => {
            let phones = match &g.phones {
                Some(path) => Some(kaldi::lexicon::read_phones(io::reader(path)?)?),
                None => None,
            };
            let words = kaldi::lexicon::collect_words(io::reader(&g.kaldi_text)?)?;
            kaldi::lexicon::write_grapheme_lexicon(
                &words,
                phones.as_ref(),
                &mut io::writer(&g.lexicon)?,
            )?;
        }

        cli::Arprep::RemoveSpeakers(r) => {
            let report = kaldi::speakers::remove_speakers(
                &KaldiDir::new(&r.to_clean),
                &KaldiDir::new(&r.spk_dir),
            )?;
            info!(
                "{} utterances kept, {} speakers removed",
                report.kept_utterances, report.removed_speakers
            );
        }

        cli::Arprep::Tdf2Kaldi(t) => {
            tdf::tdf_to_kaldi_dir(&t.tdf, &KaldiDir::new(&t.dst))?;
        }

        cli::Arprep::PrepareMgb3(p) => {
            let layout = Mgb3Layout {
                data_sets: or_defaults(p.data_sets, &mgb3::DATA_SETS),
                annotators: or_defaults(p.annotators, &mgb3::ANNOTATORS),
                ..Mgb3Layout::new(&p.src)
            };
            mgb3::aggregate(&layout, &p.dst)?;
        }

        cli::Arprep::Ctm2Srt(c) => {
            let words = match &c.words {
                Some(path) => Some(WordMap::from_reader(io::reader(path)?)?),
                None => None,
            };
            let options = SubtitleOptions {
                window: c.window.unwrap_or(subtitles::DEFAULT_WINDOW),
                input_format: Some(c.input_format),
                output_format: Some(c.output_format),
            };
            let entries = subtitles::read_ctm(io::reader(&c.ctm)?)?;
            let utterances = subtitles::group_by_utterance(entries);
            subtitles::write_srt_dir(&utterances, words.as_ref(), &options, &c.dst)?;
        }

        cli::Arprep::Enroll(e) => {
            let dialects = or_defaults(e.dialects, &DIALECTS);
            let train = dialect::read_ivector_set(&e.train, &dialects)?;
            let dev = dialect::read_ivector_set(&e.dev, &dialects)?;
            let model = DialectModel::enroll(
                &train,
                &dev,
                &dialects,
                e.interpolation.unwrap_or(INTERPOLATION),
            )?;
            match &e.save_to {
                Some(path) => model.write(&mut io::writer(path)?)?,
                None => model.write(&mut std::io::stdout())?,
            }
        }

        cli::Arprep::Score(s) => {
            let model = DialectModel::read(io::reader(&s.model)?)?;
            let test = dialect::read_ivector_set(&s.test, &or_defaults(s.dialects, &DIALECTS))?;
            let evaluation = dialect::evaluate(&model, &test)?;

            if let Some(path) = &s.predictions {
                let mut out = csv::WriterBuilder::new().from_path(path)?;
                for prediction in &evaluation.predictions {
                    out.serialize(prediction)?;
                }
                out.flush()?;
            }
            println!("accuracy: {}", evaluation.accuracy());
        }
    };
    Ok(())
}
