//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "arprep",
    about = "Arabic speech recognition and dialect identification corpus preparation tools."
)]
/// Holds every command that is callable by the `arprep` command.
pub enum Arprep {
    #[structopt(about = "Transliterate text between Unicode and Buckwalter")]
    Transliterate(Transliterate),
    #[structopt(about = "Remove utterance ids from a Kaldi text")]
    KaldiText2Plain(Convert),
    #[structopt(about = "Turn a Kaldi text into a VariKN corpus")]
    KaldiText2Varikn(Convert),
    #[structopt(about = "Turn a plain text (one sentence per line) into a VariKN corpus")]
    PlainText2Varikn(Convert),
    #[structopt(about = "Extract a VariKN vocabulary from a Kaldi lexicon")]
    Lex2Vocab(Convert),
    #[structopt(about = "Build a grapheme lexicon from a Kaldi text")]
    GraphemeLexicon(GraphemeLexicon),
    #[structopt(about = "Remove speakers of a Kaldi directory from another one")]
    RemoveSpeakers(RemoveSpeakers),
    #[structopt(about = "Convert an LDC TDF file into a Kaldi data directory")]
    Tdf2Kaldi(Tdf2Kaldi),
    #[structopt(about = "Aggregate MGB-3 annotator transcripts into Kaldi directories")]
    PrepareMgb3(PrepareMgb3),
    #[structopt(about = "Generate SRT subtitles from a CTM file")]
    Ctm2Srt(Ctm2Srt),
    #[structopt(about = "Enroll dialect models from i-vectors")]
    Enroll(Enroll),
    #[structopt(about = "Score test i-vectors against a dialect model")]
    Score(Score),
}

#[derive(Debug, StructOpt)]
/// Transliteration command and parameters.
///
/// Reads stdin and writes stdout when no files are given.
pub struct Transliterate {
    #[structopt(
        short = "i",
        long = "input-format",
        default_value = "unicode",
        help = "input format (unicode or buckwalter)"
    )]
    pub input_format: String,
    #[structopt(
        short = "o",
        long = "output-format",
        default_value = "buckwalter",
        help = "output format (unicode or buckwalter)"
    )]
    pub output_format: String,
    #[structopt(long = "ignore-absent", help = "drop characters absent from the mapping")]
    pub ignore_absent: bool,
    #[structopt(parse(from_os_str), help = "input file (default: stdin)")]
    pub src: Option<PathBuf>,
    #[structopt(parse(from_os_str), help = "output file (default: stdout)")]
    pub dst: Option<PathBuf>,
}

#[derive(Debug, StructOpt)]
/// Line by line file conversion.
pub struct Convert {
    #[structopt(parse(from_os_str), help = "source file")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "destination file")]
    pub dst: PathBuf,
}

#[derive(Debug, StructOpt)]
pub struct GraphemeLexicon {
    #[structopt(parse(from_os_str), help = "Kaldi text")]
    pub kaldi_text: PathBuf,
    #[structopt(parse(from_os_str), help = "destination lexicon")]
    pub lexicon: PathBuf,
    #[structopt(
        parse(from_os_str),
        long = "nonsilence-phones",
        help = "only keep words made of these phones"
    )]
    pub phones: Option<PathBuf>,
}

#[derive(Debug, StructOpt)]
pub struct RemoveSpeakers {
    #[structopt(parse(from_os_str), help = "Kaldi directory to remove the speakers from")]
    pub to_clean: PathBuf,
    #[structopt(parse(from_os_str), help = "Kaldi directory holding the speakers to remove")]
    pub spk_dir: PathBuf,
}

#[derive(Debug, StructOpt)]
pub struct Tdf2Kaldi {
    #[structopt(parse(from_os_str), help = "TDF file")]
    pub tdf: PathBuf,
    #[structopt(parse(from_os_str), help = "Kaldi data directory (files are appended)")]
    pub dst: PathBuf,
}

#[derive(Debug, StructOpt)]
pub struct PrepareMgb3 {
    #[structopt(parse(from_os_str), help = "MGB-3 base directory")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "aggregated data destination")]
    pub dst: PathBuf,
    #[structopt(
        long = "data-sets",
        use_delimiter = true,
        help = "data sets to aggregate [default: adapt.20170322,dev.20170322]"
    )]
    pub data_sets: Vec<String>,
    #[structopt(
        long = "annotators",
        use_delimiter = true,
        help = "annotators to aggregate [default: Alaa,Ali,Mohamed,Omar]"
    )]
    pub annotators: Vec<String>,
}

#[derive(Debug, StructOpt)]
pub struct Ctm2Srt {
    #[structopt(parse(from_os_str), help = "CTM file")]
    pub ctm: PathBuf,
    #[structopt(parse(from_os_str), help = "SRT destination directory")]
    pub dst: PathBuf,
    #[structopt(
        parse(from_os_str),
        long = "words",
        help = "Kaldi words.txt, if the CTM holds word ids"
    )]
    pub words: Option<PathBuf>,
    #[structopt(
        short = "w",
        long = "window",
        help = "cue length (in seconds) [default: 5]"
    )]
    pub window: Option<f64>,
    #[structopt(
        long = "input-format",
        default_value = "buckwalter",
        help = "format of the CTM words"
    )]
    pub input_format: String,
    #[structopt(
        long = "output-format",
        default_value = "unicode",
        help = "format of the subtitles"
    )]
    pub output_format: String,
}

#[derive(Debug, StructOpt)]
pub struct Enroll {
    #[structopt(parse(from_os_str), help = "training i-vectors directory (<dialect>.ivec)")]
    pub train: PathBuf,
    #[structopt(parse(from_os_str), help = "development i-vectors directory (<dialect>.ivec)")]
    pub dev: PathBuf,
    #[structopt(parse(from_os_str), long = "save-to", help = "dialect model destination")]
    pub save_to: Option<PathBuf>,
    #[structopt(
        long = "interpolation",
        help = "weight of the development model [default: 0.83]"
    )]
    pub interpolation: Option<f64>,
    #[structopt(
        long = "dialects",
        use_delimiter = true,
        help = "dialects to read [default: EGY,GLF,LAV,MSA,NOR]"
    )]
    pub dialects: Vec<String>,
}

#[derive(Debug, StructOpt)]
pub struct Score {
    #[structopt(parse(from_os_str), help = "dialect model (written by enroll)")]
    pub model: PathBuf,
    #[structopt(parse(from_os_str), help = "test i-vectors directory (<dialect>.ivec)")]
    pub test: PathBuf,
    #[structopt(parse(from_os_str), long = "predictions", help = "predictions csv destination")]
    pub predictions: Option<PathBuf>,
    #[structopt(
        long = "dialects",
        use_delimiter = true,
        help = "dialects to read [default: EGY,GLF,LAV,MSA,NOR]"
    )]
    pub dialects: Vec<String>,
}
