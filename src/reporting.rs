use crate::aggregate::CopyRecord;
use crate::trie::{HeapEntry, Trie, TrieNode};
use tracing::{debug, info};

/// Builds the source-path trie for a finished run.
pub fn build_trie(records: &[CopyRecord]) -> Trie {
    let mut trie = Trie::new();
    for record in records {
        let stored_as = record
            .destination
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        trie.insert(
            &record.relative,
            HeapEntry {
                bytes: record.bytes,
                stored_as,
            },
        );
    }
    trie
}

/// Prints the copied files as a tree of their source locations.
pub fn print_stats(records: &[CopyRecord]) {
    debug!("Printing statistics for {} copied files", records.len());
    let trie = build_trie(records);
    let (files, bytes) = trie.get_root().totals();

    info!("Overall ({} files, {} bytes)", files, bytes);
    for line in render_tree(trie.get_root(), "") {
        info!("{}", line);
    }
}

/// Tree lines for `node`'s children; renamed files show their heap name.
pub fn render_tree(node: &TrieNode, prefix: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let count = node.children.len();

    for (i, (name, child)) in node.children.iter().enumerate() {
        let is_last = i + 1 == count;
        let connector = if is_last { "┗━━" } else { "┣━━" };

        match &child.entry {
            Some(entry) if child.children.is_empty() => {
                let renamed = if entry.stored_as != *name {
                    format!(" -> {}", entry.stored_as)
                } else {
                    String::new()
                };
                lines.push(format!(
                    "{}{} {} ({} bytes){}",
                    prefix, connector, name, entry.bytes, renamed
                ));
            }
            _ => {
                let (files, bytes) = child.totals();
                lines.push(format!(
                    "{}{} {}/ ({} files, {} bytes)",
                    prefix, connector, name, files, bytes
                ));
                let child_prefix = format!("{}{}    ", prefix, if is_last { " " } else { "┃" });
                lines.extend(render_tree(child, &child_prefix));
            }
        }
    }
    lines
}
