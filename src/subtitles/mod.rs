/*! Subtitle generation from decoding output.

Kaldi decoding can produce CTM (time-marked conversation) files, where each line holds a word hypothesis with its timing.
This module turns them into SRT subtitles, one file per utterance, by grouping words into fixed windows.
!*/
mod ctm;
mod srt;

pub use ctm::{group_by_utterance, read_ctm, CtmEntry, WordMap};
pub use srt::{cues, format_timestamp, write_srt_dir, Cue, SubtitleOptions, DEFAULT_WINDOW};
