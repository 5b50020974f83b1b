//! Tests for manifest parsing, serialization and file I/O.

use super::*;
use std::path::Path;

#[test]
fn parse_recovers_name_and_checksum() {
    let m = parse_manifest("video.mkv A1B2C3D4\n", Path::new("/data")).unwrap();
    assert_eq!(m.len(), 1);
    let r = &m.records()[0];
    assert_eq!(r.display_name(), "video.mkv");
    assert_eq!(r.declared_checksum(), Some("A1B2C3D4"));
    assert_eq!(r.path(), Path::new("/data/video.mkv"));
    assert_eq!(r.extension(), "mkv");
    assert_eq!(r.status(), Status::Unknown);
    assert_eq!(r.computed_checksum(), None);
}

#[test]
fn parse_preserves_checksum_case() {
    let m = parse_manifest("a.bin deadbeef", Path::new(".")).unwrap();
    assert_eq!(m.records()[0].declared_checksum(), Some("deadbeef"));
}

#[test]
fn parse_names_with_spaces_and_any_separator() {
    let text = "My Movie (2001).mkv 0000FFFF\nother.txt\t12345678\n";
    let m = parse_manifest(text, Path::new("/d")).unwrap();
    assert_eq!(m.records()[0].display_name(), "My Movie (2001).mkv");
    assert_eq!(m.records()[1].display_name(), "other.txt");
    assert_eq!(m.records()[1].declared_checksum(), Some("12345678"));
}

#[test]
fn parse_keeps_order_and_duplicates() {
    let text = "b.bin 00000002\na.bin 00000001\nb.bin 00000002\n";
    let m = parse_manifest(text, Path::new("/d")).unwrap();
    let names: Vec<_> = m.records().iter().map(|r| r.display_name()).collect();
    assert_eq!(names, ["b.bin", "a.bin", "b.bin"]);
}

#[test]
fn parse_skips_blank_lines_and_trims() {
    let text = "\n   \n  x.bin 0000000A  \r\n\n";
    let m = parse_manifest(text, Path::new("/d")).unwrap();
    assert_eq!(m.len(), 1);
    assert_eq!(m.records()[0].display_name(), "x.bin");
}

#[test]
fn parse_empty_text_is_empty_manifest() {
    assert!(parse_manifest("", Path::new("/d")).unwrap().is_empty());
}

#[test]
fn parse_ignores_bom() {
    let m = parse_manifest("\u{feff}x.bin 0000000A\n", Path::new("/d")).unwrap();
    assert_eq!(m.records()[0].display_name(), "x.bin");
}

#[test]
fn parse_short_line_is_format_error() {
    let err = parse_manifest("ok.bin 00000001\nABCDEF\n", Path::new("/d")).unwrap_err();
    match err {
        ManifestError::Format { line, .. } => assert_eq!(line, 2),
        other => panic!("expected Format, got {other:?}"),
    }
}

#[test]
fn parse_missing_filename_is_format_error() {
    let err = parse_manifest(" DEADBEEF", Path::new("/d"));
    // Trimmed to 8 characters.
    assert!(matches!(err, Err(ManifestError::Format { line: 1, .. })));
    let err = parse_manifest("_DEADBEEF", Path::new("/d"));
    assert!(matches!(err, Err(ManifestError::Format { line: 1, .. })));
}

#[test]
fn parse_non_hex_checksum_is_format_error() {
    let err = parse_manifest("file.bin NOTAHASH", Path::new("/d"));
    assert!(matches!(err, Err(ManifestError::Format { .. })));
}

#[test]
fn parse_non_ascii_names() {
    let m = parse_manifest("日本語.txt CAFEBABE\n", Path::new("/d")).unwrap();
    assert_eq!(m.records()[0].display_name(), "日本語.txt");
}

#[test]
fn comments_skipped_only_when_enabled() {
    let text = "; generated by sfv\nx.bin 0000000A\n";
    let opts = ParseOptions {
        skip_comments: true,
    };
    let m = parse_manifest_with(text, Path::new("/d"), &opts).unwrap();
    assert_eq!(m.len(), 1);
    // Without the option the comment parses as a (malformed) record.
    assert!(parse_manifest(text, Path::new("/d")).is_err());
}

#[test]
fn add_files_appends_raw_records_in_order() {
    let mut m = parse_manifest("x.bin 0000000A\n", Path::new("/d")).unwrap();
    m.add_files(["/tmp/one.ISO", "/tmp/two", "/tmp/one.ISO"]).unwrap();
    assert_eq!(m.len(), 4);
    let r = &m.records()[1];
    assert_eq!(r.display_name(), "one.ISO");
    assert_eq!(r.extension(), "iso");
    assert_eq!(r.declared_checksum(), None);
    assert_eq!(r.status(), Status::Unknown);
    assert_eq!(m.records()[3].path(), Path::new("/tmp/one.ISO"));
}

#[test]
fn add_files_rejects_empty_path_without_partial_append() {
    let mut m = Manifest::new();
    m.add_files(["/tmp/a.bin"]).unwrap();
    match m.add_files(["/tmp/b.bin", "", "/tmp/c.bin"]).unwrap_err() {
        ManifestError::InvalidRecord { reason, .. } => assert_eq!(reason, "empty path"),
        other => panic!("expected InvalidRecord, got {other:?}"),
    }
    assert_eq!(m.len(), 1);
    assert_eq!(m.add_files(["/tmp/b.bin", "/tmp/c.bin"]).unwrap(), 2);
    assert!(m.records().iter().all(|r| !r.display_name().is_empty()));
}

#[test]
fn pushed_records_always_roundtrip() {
    // Records can only be built through validated constructors, so whatever
    // is pushed serializes to a line the parser accepts.
    let mut m = Manifest::new();
    m.push(FileRecord::declared("/d/a b.bin".into(), "a b.bin", "cafebabe").unwrap());
    assert!(FileRecord::declared("".into(), "", "not-hex").is_err());
    let text = serialize_manifest(&m, DEFAULT_SEPARATOR).unwrap();
    assert_eq!(text, "a b.bin CAFEBABE\n");
    let reparsed = parse_manifest(&text, Path::new("/d")).unwrap();
    assert_eq!(reparsed.records()[0].display_name(), "a b.bin");
}

#[test]
fn clear_and_remove() {
    let mut m = Manifest::new();
    m.add_files(["a", "b", "c"]).unwrap();
    let removed = m.remove(1).unwrap();
    assert_eq!(removed.display_name(), "b");
    assert!(m.remove(5).is_none());
    assert_eq!(m.len(), 2);
    m.clear();
    assert!(m.is_empty());
}

#[test]
fn serialize_writes_uppercase_declared() {
    let m = parse_manifest("a.bin deadbeef\nb c.bin 0000000a\n", Path::new("/d")).unwrap();
    let text = serialize_manifest(&m, DEFAULT_SEPARATOR).unwrap();
    assert_eq!(text, "a.bin DEADBEEF\nb c.bin 0000000A\n");
}

#[test]
fn serialize_prefers_computed_checksum() {
    let mut m = parse_manifest("a.bin DEADBEEF\n", Path::new("/d")).unwrap();
    m.records_mut()[0].computed_checksum = Some("CAFEBABE".to_string());
    assert_eq!(serialize_manifest(&m, ' ').unwrap(), "a.bin CAFEBABE\n");
}

#[test]
fn serialize_without_checksum_fails() {
    let mut m = parse_manifest("a.bin DEADBEEF\n", Path::new("/d")).unwrap();
    m.add_files(["/x/new.bin"]).unwrap();
    match serialize_manifest(&m, ' ').unwrap_err() {
        ManifestError::Serialization { index, name } => {
            assert_eq!(index, 1);
            assert_eq!(name, "new.bin");
        }
        other => panic!("expected Serialization, got {other:?}"),
    }
}

#[test]
fn serialize_then_parse_roundtrip() {
    let text = "one.bin 00000001\nsub/two.bin ABCDEF01\n";
    let m = parse_manifest(text, Path::new("/d")).unwrap();
    let out = serialize_manifest(&m, ' ').unwrap();
    assert_eq!(out, text);
    assert_eq!(parse_manifest(&out, Path::new("/d")).unwrap(), m);
}

#[test]
fn load_resolves_against_manifest_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("set.SFV");
    std::fs::write(&path, "a.bin 00000001\n").unwrap();
    let m = load_manifest(&path, &LoadOptions::default()).unwrap();
    assert_eq!(m.records()[0].path(), dir.path().join("a.bin"));
}

#[test]
fn load_rejects_other_extensions_when_required() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("list.txt");
    std::fs::write(&path, "a.bin 00000001\n").unwrap();
    match load_manifest(&path, &LoadOptions::default()).unwrap_err() {
        ManifestError::UnsupportedExtension { extension, .. } => assert_eq!(extension, "txt"),
        other => panic!("expected UnsupportedExtension, got {other:?}"),
    }
    let opts = LoadOptions {
        require_sfv_extension: false,
        ..LoadOptions::default()
    };
    assert_eq!(load_manifest(&path, &opts).unwrap().len(), 1);
}

#[test]
fn load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_manifest(&dir.path().join("gone.sfv"), &LoadOptions::default());
    assert!(matches!(err, Err(ManifestError::Io { .. })));
}

#[test]
fn save_refuses_overwrite_unless_asked() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.sfv");
    std::fs::write(&path, "old\n").unwrap();
    let m = parse_manifest("a.bin 00000001\n", Path::new("/d")).unwrap();
    assert!(matches!(
        save_manifest(&m, &path, ' ', false),
        Err(ManifestError::AlreadyExists(_))
    ));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "old\n");
    save_manifest(&m, &path, ' ', true).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "a.bin 00000001\n");
}

#[test]
fn save_with_unusable_record_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.sfv");
    let mut m = Manifest::new();
    m.add_files(["/x/a.bin"]).unwrap();
    assert!(matches!(
        save_manifest(&m, &path, ' ', false),
        Err(ManifestError::Serialization { .. })
    ));
    assert!(!path.exists());
}

#[test]
fn status_counts_tally() {
    let mut m = Manifest::new();
    m.add_files(["a", "b", "c"]).unwrap();
    m.records_mut()[0].status = Status::Match;
    m.records_mut()[1].status = Status::Error;
    let c = m.status_counts();
    assert_eq!(c.matched, 1);
    assert_eq!(c.errors, 1);
    assert_eq!(c.unknown, 1);
}
