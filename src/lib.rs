pub mod dialect;
pub mod error;
pub mod io;
pub mod kaldi;
pub mod mgb3;
pub mod subtitles;
pub mod tdf;
pub mod transliteration;
