use codeheap::reporting::{build_trie, render_tree};
use codeheap::CopyRecord;
use std::path::PathBuf;

fn record(relative: &str, stored_as: &str, bytes: u64) -> CopyRecord {
    CopyRecord {
        source: PathBuf::from("/project").join(relative),
        relative: PathBuf::from(relative),
        destination: PathBuf::from("/heap").join(stored_as),
        bytes,
    }
}

#[test]
fn test_totals_cover_whole_run() {
    let records = vec![
        record("a/util.py", "util.py", 3),
        record("b/util.py", "util_1.py", 4),
        record("top.md", "top.md", 2),
    ];

    let trie = build_trie(&records);
    assert_eq!(trie.get_root().totals(), (3, 9));
    assert_eq!(trie.get_root().children["b"].totals(), (1, 4));
}

#[test]
fn test_tree_shows_renamed_files() {
    let records = vec![
        record("a/util.py", "util.py", 3),
        record("b/util.py", "util_1.py", 4),
        record("top.md", "top.md", 2),
    ];

    let trie = build_trie(&records);
    let lines = render_tree(trie.get_root(), "");

    assert_eq!(
        lines,
        vec![
            "┣━━ a/ (1 files, 3 bytes)",
            "┃    ┗━━ util.py (3 bytes)",
            "┣━━ b/ (1 files, 4 bytes)",
            "┃    ┗━━ util.py (4 bytes) -> util_1.py",
            "┗━━ top.md (2 bytes)",
        ]
    );
}

#[test]
fn test_empty_run_renders_nothing() {
    let trie = build_trie(&[]);
    assert!(render_tree(trie.get_root(), "").is_empty());
    assert_eq!(trie.get_root().totals(), (0, 0));
}
