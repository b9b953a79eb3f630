use chrono::{Local, TimeZone};
use codeheap::utils::{display_path, has_allowed_extension, parse_modified_after};
use codeheap::HeapError;
use std::path::Path;
use std::time::SystemTime;

#[test]
fn test_parse_date_is_local_midnight() {
    let parsed = parse_modified_after("2024-03-05").unwrap();
    let expected: SystemTime = Local
        .with_ymd_and_hms(2024, 3, 5, 0, 0, 0)
        .earliest()
        .unwrap()
        .into();
    assert_eq!(parsed, expected);
}

#[test]
fn test_parse_date_rejects_malformed_input() {
    for bad in ["2024-13-01", "2024-02-30", "yesterday", "05/03/2024", ""] {
        match parse_modified_after(bad) {
            Err(HeapError::InvalidDate(value)) => assert_eq!(value, bad),
            other => panic!("expected InvalidDate for {:?}, got {:?}", bad, other),
        }
    }
}

#[test]
fn test_extension_match_is_a_suffix_match() {
    let extensions = vec![".py".to_string(), ".json".to_string()];
    assert!(has_allowed_extension("main.py", &extensions));
    assert!(has_allowed_extension("package.json", &extensions));
    assert!(has_allowed_extension("archive.tar.py", &extensions));
    assert!(!has_allowed_extension("main.pyc", &extensions));
    assert!(!has_allowed_extension("README", &extensions));
    assert!(!has_allowed_extension("main.py", &[]));
}

#[test]
fn test_display_path_uses_forward_slashes() {
    assert_eq!(display_path(Path::new("src/lib/util.py")), "src/lib/util.py");
}
