/*! Kaldi data directories and line-oriented corpus converters.

Kaldi files are line based, and most of them start with an utterance (or recording) id:

- `text`: `<utterance-id> <word> <word> ...`
- `utt2spk`: `<utterance-id> <speaker-id>`
- `segments`: `<utterance-id> <recording-id> <start> <end>`
- `wav.scp`: `<recording-id> <path>`

Converters are generic over [std::io::BufRead]/[std::io::Write] so that they can stream large files.
!*/
mod datadir;
pub mod lexicon;
pub mod speakers;
pub mod text;

pub use datadir::{utterance_id, DataFile, KaldiDir};
