use std::collections::BTreeMap;
use std::path::Path;
use tracing::trace;

/// A copied file as it ends up in the heap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeapEntry {
    pub bytes: u64,
    pub stored_as: String,
}

/// Represents a node in a trie of source paths.
#[derive(Debug, Default)]
pub struct TrieNode {
    pub children: BTreeMap<String, TrieNode>,
    pub entry: Option<HeapEntry>,
}

impl TrieNode {
    pub fn new() -> Self {
        TrieNode::default()
    }

    /// Number of files and their combined size in the subtree.
    pub fn totals(&self) -> (usize, u64) {
        let own = self
            .entry
            .as_ref()
            .map(|entry| (1, entry.bytes))
            .unwrap_or((0, 0));
        self.children.values().fold(own, |(files, bytes), child| {
            let (child_files, child_bytes) = child.totals();
            (files + child_files, bytes + child_bytes)
        })
    }
}

/// Represents a trie data structure.
#[derive(Debug, Default)]
pub struct Trie {
    root: TrieNode,
}

impl Trie {
    pub fn new() -> Self {
        Trie::default()
    }

    /// Inserts a relative source path with the heap entry it was copied to.
    pub fn insert(&mut self, path: &Path, entry: HeapEntry) {
        trace!("Inserting path: {:?} ({} bytes)", path, entry.bytes);
        let mut current_node = &mut self.root;
        for component in path.iter() {
            let component_str = component.to_string_lossy().into_owned();
            current_node = current_node.children.entry(component_str).or_default();
        }
        if current_node.entry.is_some() {
            trace!("Overwriting existing entry for path: {:?}", path);
        }
        current_node.entry = Some(entry);
    }

    pub fn get_root(&self) -> &TrieNode {
        &self.root
    }
}
