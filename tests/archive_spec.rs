use std::fs::File;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use termbank_reader::termbank::{load_index, load_index_from, NoopProgress, ProgressSink};
use termbank_reader::{CodeTable, Dictionary, TermbankError};

fn write_archive(dir: &Path, name: &str, members: &[(&str, Vec<u8>)]) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).expect("create archive");
    let mut writer = ZipWriter::new(file);
    for (member_name, bytes) in members {
        writer
            .start_file(*member_name, SimpleFileOptions::default())
            .expect("start member");
        writer.write_all(bytes).expect("write member");
    }
    writer.finish().expect("finish archive");
    path
}

fn json_archive(dir: &Path, name: &str, members: &[(&str, Value)]) -> PathBuf {
    let raw: Vec<(&str, Vec<u8>)> = members
        .iter()
        .map(|(member_name, payload)| (*member_name, payload.to_string().into_bytes()))
        .collect();
    write_archive(dir, name, &raw)
}

/// The end-to-end scenario entry: 食べる with a single span code.
fn taberu_entry(code: &str) -> Value {
    json!([
        "食べる",
        "たべる",
        ["v1"],
        0,
        0,
        [{
            "type": "structured-content",
            "content": {
                "tag": "ul",
                "content": [{
                    "tag": "li",
                    "content": [{
                        "tag": "span",
                        "data": { "code": code },
                        "content": "ichidan verb"
                    }]
                }]
            }
        }],
        42
    ])
}

/// A minimal entry with an empty glossary.
fn plain_entry(headword: &str, sequence_id: i64) -> Value {
    json!([headword, "よみ", [], 0, 0, [], sequence_id])
}

#[derive(Debug, Default)]
struct CollectingProgress {
    calls: Vec<(usize, usize)>,
}

impl ProgressSink for CollectingProgress {
    fn member_loaded(&mut self, processed: usize, total: usize) {
        self.calls.push((processed, total));
    }
}

#[test]
fn unrecognized_code_is_filtered_end_to_end() {
    let dir = TempDir::new().expect("temp dir");
    let path = json_archive(
        dir.path(),
        "dict.zip",
        &[("term_0.json", json!([taberu_entry("v1")]))],
    );

    let dictionary = Dictionary::load(&path).expect("load archive");
    let results = dictionary.lookup("食べる");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].entry.sequence_id, 42);
    assert_eq!(results[0].entry.reading, "たべる");
    // "v1" is outside the {"n", "uk"} allow-list: the list item is seen but
    // contributes an empty code group.
    assert_eq!(results[0].glossary.codes, vec![Vec::<String>::new()]);
}

#[test]
fn recognized_code_survives_end_to_end() {
    let dir = TempDir::new().expect("temp dir");
    let path = json_archive(
        dir.path(),
        "dict.zip",
        &[("term_0.json", json!([taberu_entry("n")]))],
    );

    let dictionary = Dictionary::load(&path).expect("load archive");
    let results = dictionary.lookup("食べる");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].glossary.codes, vec![vec!["n".to_owned()]]);
}

#[test]
fn missing_word_returns_empty_sequence() {
    let dir = TempDir::new().expect("temp dir");
    let path = json_archive(
        dir.path(),
        "dict.zip",
        &[("term_0.json", json!([taberu_entry("n")]))],
    );

    let dictionary = Dictionary::load(&path).expect("load archive");
    assert!(dictionary.lookup("存在しない").is_empty());
}

#[test]
fn duplicate_headwords_append_across_members() {
    let dir = TempDir::new().expect("temp dir");
    let path = json_archive(
        dir.path(),
        "dict.zip",
        &[
            (
                "term_bank_1.json",
                json!([plain_entry("同じ", 1), plain_entry("別", 2)]),
            ),
            (
                "term_bank_2.json",
                json!([plain_entry("同じ", 3)]),
            ),
        ],
    );

    let index = load_index(&path, &mut NoopProgress).expect("load archive");

    assert_eq!(index.num_entries(), 3);
    assert_eq!(index.num_headwords(), 2);

    let sequence_ids: Vec<i64> = index
        .entries("同じ")
        .iter()
        .map(|entry| entry.sequence_id)
        .collect();
    assert_eq!(sequence_ids, vec![1, 3]);
    assert_eq!(index.entries("別").len(), 1);

    // Headwords surface in first-occurrence order.
    let headwords: Vec<&str> = index.headwords().collect();
    assert_eq!(headwords, vec!["同じ", "別"]);
}

#[test]
fn every_entry_is_reachable_after_load() {
    let dir = TempDir::new().expect("temp dir");
    let members: Vec<(&str, Value)> = vec![
        ("term_0.json", json!([plain_entry("一", 10), plain_entry("二", 20)])),
        ("term_1.json", json!([plain_entry("三", 30)])),
    ];
    let path = json_archive(dir.path(), "dict.zip", &members);

    let dictionary = Dictionary::load(&path).expect("load archive");
    for (headword, sequence_id) in [("一", 10), ("二", 20), ("三", 30)] {
        let results = dictionary.lookup(headword);
        assert!(
            results.iter().any(|r| r.entry.sequence_id == sequence_id),
            "entry {} missing for {}",
            sequence_id,
            headword
        );
    }
}

#[test]
fn non_term_members_are_skipped() {
    let dir = TempDir::new().expect("temp dir");
    // Both extra members would fail entry decoding if they were parsed.
    let path = json_archive(
        dir.path(),
        "dict.zip",
        &[
            ("index.json", json!({ "title": "Test dictionary", "format": 3 })),
            ("tag_bank_1.json", json!([["v1", "partOfSpeech", -3]])),
            ("term_0.json", json!([plain_entry("語", 1)])),
        ],
    );

    let mut progress = CollectingProgress::default();
    let index = load_index(&path, &mut progress).expect("load archive");

    assert_eq!(index.num_entries(), 1);
    assert_eq!(progress.calls, vec![(1, 1)]);
}

#[test]
fn progress_reports_each_term_member() {
    let dir = TempDir::new().expect("temp dir");
    let path = json_archive(
        dir.path(),
        "dict.zip",
        &[
            ("term_0.json", json!([plain_entry("一", 1)])),
            ("term_1.json", json!([plain_entry("二", 2)])),
            ("term_2.json", json!([])),
        ],
    );

    let mut progress = CollectingProgress::default();
    load_index(&path, &mut progress).expect("load archive");

    assert_eq!(progress.calls, vec![(1, 3), (2, 3), (3, 3)]);
}

#[test]
fn reloading_identical_bytes_is_deterministic() {
    let dir = TempDir::new().expect("temp dir");
    let path = json_archive(
        dir.path(),
        "dict.zip",
        &[
            (
                "term_bank_1.json",
                json!([plain_entry("甲", 1), plain_entry("乙", 2), plain_entry("甲", 3)]),
            ),
            (
                "term_bank_2.json",
                json!([plain_entry("丙", 4), plain_entry("乙", 5)]),
            ),
        ],
    );

    let first = load_index(&path, &mut NoopProgress).expect("first load");
    let second = load_index(&path, &mut NoopProgress).expect("second load");

    let keys_first: Vec<&str> = first.headwords().collect();
    let keys_second: Vec<&str> = second.headwords().collect();
    assert_eq!(keys_first, keys_second);

    for headword in keys_first {
        let ids = |index: &termbank_reader::DictionaryIndex| -> Vec<i64> {
            index
                .entries(headword)
                .iter()
                .map(|entry| entry.sequence_id)
                .collect()
        };
        assert_eq!(ids(&first), ids(&second), "entry order differs for {}", headword);
    }
}

#[test]
fn in_memory_reader_matches_file_load() {
    let members = [("term_0.json", json!([plain_entry("語", 7)]))];

    let dir = TempDir::new().expect("temp dir");
    let path = json_archive(dir.path(), "dict.zip", &members);
    let from_file = load_index(&path, &mut NoopProgress).expect("file load");

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (member_name, payload) in &members {
        writer
            .start_file(*member_name, SimpleFileOptions::default())
            .expect("start member");
        writer
            .write_all(payload.to_string().as_bytes())
            .expect("write member");
    }
    let cursor = writer.finish().expect("finish archive");
    let from_memory = load_index_from(cursor, &mut NoopProgress).expect("memory load");

    let keys_file: Vec<&str> = from_file.headwords().collect();
    let keys_memory: Vec<&str> = from_memory.headwords().collect();
    assert_eq!(keys_file, keys_memory);
    assert_eq!(from_file.num_entries(), from_memory.num_entries());
}

#[test]
fn malformed_member_fails_the_whole_load() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_archive(
        dir.path(),
        "dict.zip",
        &[
            ("term_0.json", json!([plain_entry("語", 1)]).to_string().into_bytes()),
            ("term_bad.json", b"{not json".to_vec()),
        ],
    );

    let err = load_index(&path, &mut NoopProgress).expect_err("load must fail");
    assert!(
        matches!(&err, TermbankError::MalformedMember { member, .. } if member == "term_bad.json"),
        "unexpected error: {}",
        err
    );
}

#[test]
fn non_array_top_level_fails_the_whole_load() {
    let dir = TempDir::new().expect("temp dir");
    let path = json_archive(
        dir.path(),
        "dict.zip",
        &[("term_0.json", json!({ "entries": [] }))],
    );

    let err = load_index(&path, &mut NoopProgress).expect_err("load must fail");
    assert!(matches!(err, TermbankError::MalformedMember { .. }));
}

#[test]
fn wrong_entry_arity_fails_the_whole_load() {
    let dir = TempDir::new().expect("temp dir");
    let path = json_archive(
        dir.path(),
        "dict.zip",
        &[("term_0.json", json!([["語", "よみ"]]))],
    );

    let err = load_index(&path, &mut NoopProgress).expect_err("load must fail");
    assert!(matches!(err, TermbankError::MalformedMember { .. }));
}

#[test]
fn non_utf8_member_fails_the_whole_load() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_archive(
        dir.path(),
        "dict.zip",
        &[("term_0.json", vec![0xff, 0xfe, 0x00, 0x41])],
    );

    let err = load_index(&path, &mut NoopProgress).expect_err("load must fail");
    assert!(
        matches!(&err, TermbankError::MemberNotUtf8 { member, .. } if member == "term_0.json"),
        "unexpected error: {}",
        err
    );
}

#[test]
fn missing_archive_fails_to_open() {
    let dir = TempDir::new().expect("temp dir");
    let err = Dictionary::load(dir.path().join("nope.zip")).expect_err("open must fail");
    assert!(matches!(err, TermbankError::Io(_)));
}

#[test]
fn malformed_glossary_slot_still_indexes_the_entry() {
    let dir = TempDir::new().expect("temp dir");
    let path = json_archive(
        dir.path(),
        "dict.zip",
        &[("term_0.json", json!([["語", "ご", [], 0, 0, "oops", 5]]))],
    );

    let dictionary =
        Dictionary::load_with(&path, CodeTable::default(), &mut NoopProgress).expect("load archive");
    let results = dictionary.lookup("語");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].entry.sequence_id, 5);
    assert!(results[0].glossary.is_empty());
}
