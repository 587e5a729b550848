use std::fs;
use std::path::Path;

use arprep::kaldi::{speakers, text, DataFile, KaldiDir};
use arprep::tdf;
use tempfile::tempdir;

const TDF: &str = "file;unicode\tchannel;int\tstart;float\tend;float\tspeaker;unicode\tspeakerType;unicode\tspeakerDialect;unicode\ttranscript;unicode\tsection;int\tturn;int\tsegment;int\tsectionType;unicode\tsuType;unicode
;;MM sectionTypes\t[(None, None)]
AJ_1.sph\t1\t0.5\t2.25\tspeaker 1\tmale\tnative\t\u{0628}\u{0627}\u{0628}\t0\t0\t0\treport\tstatement
AJ_1.sph\t1\t2.25\t3.0\tHost\tmale\tnative\t<non-MSA>\u{0645}\u{0646}\t0\t1\t0\treport\tstatement
AJ_1.sph\t1\t3.0\t4.0\tHost\tmale\tnative\t<foreign language=\"English\"> </foreign>\t0\t2\t0\treport\tstatement
AJ_2.sph\t1\t0.0\t1.0\tspeaker 1\tfemale\tnative\t\u{0643}\u{062A}\u{0627}\u{0628}\t0\t0\t0\treport\tstatement
";

fn read(dir: &KaldiDir, file: DataFile) -> String {
    fs::read_to_string(dir.path(file)).unwrap()
}

fn write_file(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

#[test_log::test]
fn tdf_to_kaldi() {
    let tmp = tempdir().unwrap();
    let tdf_path = tmp.path().join("corpus.tdf");
    write_file(&tdf_path, TDF);

    let dir = KaldiDir::new(&tmp.path().join("data/train"));
    let nb = tdf::tdf_to_kaldi_dir(&tdf_path, &dir).unwrap();
    assert_eq!(nb, 3);

    assert_eq!(
        read(&dir, DataFile::WavScp),
        "AJ_1.sph AJ_1.wav\nAJ_2.sph AJ_2.wav\n"
    );
    assert_eq!(
        read(&dir, DataFile::Segments),
        "AJ_1.sph_0.5-2.25 AJ_1.sph 0.5 2.25\nAJ_1.sph_2.25-3.0 AJ_1.sph 2.25 3.0\nAJ_2.sph_0.0-1.0 AJ_2.sph 0.0 1.0\n"
    );
    assert_eq!(
        read(&dir, DataFile::Text),
        "AJ_1.sph_0.5-2.25\tbAb\nAJ_1.sph_2.25-3.0\tmn\nAJ_2.sph_0.0-1.0\tktAb\n"
    );
    assert_eq!(
        read(&dir, DataFile::Utt2Spk),
        "AJ_1.sph_0.5-2.25 AJ_1.sph-speaker_1\nAJ_1.sph_2.25-3.0 AJ_1.sph-Host\nAJ_2.sph_0.0-1.0 AJ_2.sph-speaker_1\n"
    );

    // a second conversion appends
    tdf::tdf_to_kaldi_dir(&tdf_path, &dir).unwrap();
    assert_eq!(read(&dir, DataFile::Text).lines().count(), 6);
}

#[test_log::test]
fn tdf_missing_column() {
    let tmp = tempdir().unwrap();
    let tdf_path = tmp.path().join("broken.tdf");
    write_file(&tdf_path, "file;unicode\tstart;float\n");

    let dir = KaldiDir::new(&tmp.path().join("out"));
    let result = tdf::tdf_to_kaldi_dir(&tdf_path, &dir);
    assert!(matches!(result, Err(arprep::error::Error::MissingColumn(_))));
}

#[test_log::test]
fn remove_test_speakers() {
    let tmp = tempdir().unwrap();
    let train = KaldiDir::new(&tmp.path().join("train"));
    let test = KaldiDir::new(&tmp.path().join("test"));
    train.create().unwrap();
    test.create().unwrap();

    write_file(
        &train.path(DataFile::Utt2Spk),
        "u1 alice\nu2 bob\nu3 carol\n",
    );
    write_file(&train.path(DataFile::Segments), "u1 r1 0 1\nu2 r1 1 2\nu3 r2 0 1\n");
    write_file(&train.path(DataFile::Text), "u1 bAb\nu2 mn\nu3 ktAb\n");
    write_file(&train.path(DataFile::WavScp), "r1 r1.wav\nr2 r2.wav\n");
    write_file(&test.path(DataFile::Utt2Spk), "t1 bob\nt2 dave\n");

    let report = speakers::remove_speakers(&train, &test).unwrap();
    assert_eq!(report.kept_utterances, 2);
    assert_eq!(report.removed_speakers, 1);

    assert_eq!(read(&train, DataFile::Utt2Spk), "u1 alice\nu3 carol\n");
    assert_eq!(read(&train, DataFile::Segments), "u1 r1 0 1\nu3 r2 0 1\n");
    assert_eq!(read(&train, DataFile::Text), "u1 bAb\nu3 ktAb\n");
    // recordings are untouched when segments exist
    assert_eq!(read(&train, DataFile::WavScp), "r1 r1.wav\nr2 r2.wav\n");
    assert!(!train.contains(DataFile::FeatsScp));

    // plain text of what is left
    let mut plain = Vec::new();
    text::kaldi_text_to_plain(read(&train, DataFile::Text).as_bytes(), &mut plain).unwrap();
    assert_eq!(String::from_utf8(plain).unwrap(), "bAb\nktAb\n");
}

#[test_log::test]
fn remove_speakers_without_text() {
    let tmp = tempdir().unwrap();
    let train = KaldiDir::new(&tmp.path().join("train"));
    let test = KaldiDir::new(&tmp.path().join("test"));
    train.create().unwrap();
    test.create().unwrap();

    write_file(&train.path(DataFile::Utt2Spk), "u1 alice\nu2 bob\n");
    write_file(&train.path(DataFile::WavScp), "u1 u1.wav\nu2 u2.wav\n");
    write_file(&test.path(DataFile::Utt2Spk), "t1 bob\n");

    let result = speakers::remove_speakers(&train, &test);
    assert!(matches!(result, Err(arprep::error::Error::MissingFile(p)) if p.ends_with("text")));

    // the directory is left as it was
    assert_eq!(read(&train, DataFile::Utt2Spk), "u1 alice\nu2 bob\n");
    assert_eq!(read(&train, DataFile::WavScp), "u1 u1.wav\nu2 u2.wav\n");
}

#[test_log::test]
fn remove_speakers_without_recordings() {
    let tmp = tempdir().unwrap();
    let train = KaldiDir::new(&tmp.path().join("train"));
    let test = KaldiDir::new(&tmp.path().join("test"));
    train.create().unwrap();
    test.create().unwrap();

    write_file(&train.path(DataFile::Utt2Spk), "u1 alice\nu2 bob\n");
    write_file(&train.path(DataFile::Text), "u1 bAb\nu2 mn\n");
    write_file(&test.path(DataFile::Utt2Spk), "t1 bob\n");

    let result = speakers::remove_speakers(&train, &test);
    assert!(matches!(result, Err(arprep::error::Error::MissingFile(p)) if p.ends_with("wav.scp")));
    assert_eq!(read(&train, DataFile::Utt2Spk), "u1 alice\nu2 bob\n");
    assert_eq!(read(&train, DataFile::Text), "u1 bAb\nu2 mn\n");
}

#[test_log::test]
fn tdf_padded_times() {
    let tmp = tempdir().unwrap();
    let tdf_path = tmp.path().join("padded.tdf");
    write_file(
        &tdf_path,
        "file;unicode\tstart;float\tend;float\tspeaker;unicode\ttranscript;unicode\n\
         AJ_3.sph\t0.50\t3\tHost\t\u{0628}\n",
    );

    let dir = KaldiDir::new(&tmp.path().join("out"));
    tdf::tdf_to_kaldi_dir(&tdf_path, &dir).unwrap();
    assert_eq!(read(&dir, DataFile::Segments), "AJ_3.sph_0.5-3.0 AJ_3.sph 0.5 3.0\n");
    assert_eq!(read(&dir, DataFile::Text), "AJ_3.sph_0.5-3.0\tb\n");
}
