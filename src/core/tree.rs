//! # Tree Builder
//!
//! Turns the flat, unordered entry list of an archive into the ordered
//! hierarchy shown in the sidebar.
//!
//! ```text
//! docs/a.txt                 docs/
//! readme.md        ──►       ├── a.txt
//! docs/b.txt                 └── b.txt
//!                            readme.md
//! ```
//!
//! Rules:
//! - Empty segments are dropped (`"docs/"`, `"/x"`, `"a//b"`).
//! - A path that is a strict prefix of another path is a directory, whatever
//!   its own entry says and whatever order the entries arrive in.
//! - Every level is sorted directories first, then by `compare_names`.
//!
//! The result depends only on the *set* of entries, never on their order.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::archive::ArchiveEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// A single path segment, never empty.
    pub name: String,
    pub is_directory: bool,
    /// Always empty for files.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_directory: false,
            children: Vec::new(),
        }
    }

    pub fn directory(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            name: name.into(),
            is_directory: true,
            children,
        }
    }

    /// Number of files below (and including) this node.
    pub fn file_count(&self) -> usize {
        if self.is_directory {
            self.children.iter().map(TreeNode::file_count).sum()
        } else {
            1
        }
    }
}

/// Intermediate node while entries are being inserted.
enum Slot {
    File,
    Dir(HashMap<String, Slot>),
}

/// Build the display tree for a set of archive entries.
pub fn build_tree(entries: &[ArchiveEntry]) -> Vec<TreeNode> {
    let mut root: HashMap<String, Slot> = HashMap::new();

    for entry in entries {
        let segments: Vec<&str> = entry.path.split('/').filter(|s| !s.is_empty()).collect();
        let Some((last, parents)) = segments.split_last() else {
            continue;
        };

        let mut level = &mut root;
        for segment in parents {
            level = descend(level, segment);
        }

        if entry.is_directory {
            descend(level, last);
        } else {
            // A directory already at this name wins over the file.
            level.entry((*last).to_string()).or_insert(Slot::File);
        }
    }

    into_nodes(root)
}

/// Get the child directory `name`, creating it or promoting a file to a directory.
fn descend<'a>(level: &'a mut HashMap<String, Slot>, name: &str) -> &'a mut HashMap<String, Slot> {
    let slot = level
        .entry(name.to_string())
        .or_insert_with(|| Slot::Dir(HashMap::new()));
    if matches!(slot, Slot::File) {
        *slot = Slot::Dir(HashMap::new());
    }
    match slot {
        Slot::Dir(children) => children,
        Slot::File => unreachable!("file slot promoted above"),
    }
}

fn into_nodes(level: HashMap<String, Slot>) -> Vec<TreeNode> {
    let mut nodes: Vec<TreeNode> = level
        .into_iter()
        .map(|(name, slot)| match slot {
            Slot::File => TreeNode::file(name),
            Slot::Dir(children) => TreeNode::directory(name, into_nodes(children)),
        })
        .collect();
    nodes.sort_by(compare_nodes);
    nodes
}

fn compare_nodes(a: &TreeNode, b: &TreeNode) -> Ordering {
    b.is_directory
        .cmp(&a.is_directory)
        .then_with(|| compare_names(&a.name, &b.name))
}

/// Locale-style name order: case-insensitive first, lowercase before
/// uppercase on case-only ties, then raw code points so the order is total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let folded = a.to_lowercase().cmp(&b.to_lowercase());
    if folded != Ordering::Equal {
        return folded;
    }
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca != cb {
            match (ca.is_lowercase(), cb.is_lowercase()) {
                (true, false) => return Ordering::Less,
                (false, true) => return Ordering::Greater,
                _ => return ca.cmp(&cb),
            }
        }
    }
    a.len().cmp(&b.len())
}

/// Resolve a slash-joined path (as produced by `join_path`) to its node.
pub fn find_node<'a>(nodes: &'a [TreeNode], path: &str) -> Option<&'a TreeNode> {
    let mut level = nodes;
    let mut found = None;
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        let node = level.iter().find(|n| n.name == segment)?;
        level = &node.children;
        found = Some(node);
    }
    found
}

/// Join a parent path and a child name the way tree paths are addressed.
pub fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// Total number of files in the tree.
pub fn file_count(nodes: &[TreeNode]) -> usize {
    nodes.iter().map(TreeNode::file_count).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(paths: &[&str]) -> Vec<ArchiveEntry> {
        paths.iter().map(|p| ArchiveEntry::file(*p, 0)).collect()
    }

    #[test]
    fn test_basic_example() {
        let tree = build_tree(&files(&["docs/a.txt", "docs/b.txt", "readme.md"]));
        assert_eq!(
            tree,
            vec![
                TreeNode::directory("docs", vec![TreeNode::file("a.txt"), TreeNode::file("b.txt")]),
                TreeNode::file("readme.md"),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(build_tree(&[]).is_empty());
    }

    #[test]
    fn test_directories_before_files() {
        let tree = build_tree(&files(&["a.txt", "z/inner.txt", "b.txt", "m/x"]));
        let names: Vec<_> = tree.iter().map(|n| (n.name.as_str(), n.is_directory)).collect();
        assert_eq!(
            names,
            vec![("m", true), ("z", true), ("a.txt", false), ("b.txt", false)]
        );
    }

    #[test]
    fn test_ordering_is_recursive() {
        let tree = build_tree(&files(&["root/z.txt", "root/sub/q", "root/a.txt"]));
        let root = &tree[0];
        let names: Vec<_> = root.children.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["sub", "a.txt", "z.txt"]);
    }

    #[test]
    fn test_names_sort_case_insensitively() {
        let tree = build_tree(&files(&["Banana", "apple", "cherry", "Apple"]));
        let names: Vec<_> = tree.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["apple", "Apple", "Banana", "cherry"]);
    }

    #[test]
    fn test_trailing_slash_directory_entry() {
        let entries = vec![ArchiveEntry::directory("empty/")];
        assert_eq!(build_tree(&entries), vec![TreeNode::directory("empty", vec![])]);
    }

    #[test]
    fn test_empty_segments_are_ignored() {
        let tree = build_tree(&files(&["/lead.txt", "a//b.txt", "/", "", "///"]));
        assert_eq!(
            tree,
            vec![
                TreeNode::directory("a", vec![TreeNode::file("b.txt")]),
                TreeNode::file("lead.txt"),
            ]
        );
    }

    #[test]
    fn test_prefix_path_becomes_directory_file_first() {
        let tree = build_tree(&files(&["docs", "docs/a.txt"]));
        assert_eq!(tree, vec![TreeNode::directory("docs", vec![TreeNode::file("a.txt")])]);
    }

    #[test]
    fn test_prefix_path_becomes_directory_file_last() {
        let tree = build_tree(&files(&["docs/a.txt", "docs"]));
        assert_eq!(tree, vec![TreeNode::directory("docs", vec![TreeNode::file("a.txt")])]);
    }

    #[test]
    fn test_directory_flag_on_leaf_path() {
        let entries = vec![ArchiveEntry::directory("docs"), ArchiveEntry::file("readme", 3)];
        let tree = build_tree(&entries);
        assert_eq!(
            tree,
            vec![TreeNode::directory("docs", vec![]), TreeNode::file("readme")]
        );
    }

    #[test]
    fn test_duplicate_entries_collapse() {
        let tree = build_tree(&files(&["a.txt", "a.txt"]));
        assert_eq!(tree, vec![TreeNode::file("a.txt")]);
    }

    #[test]
    fn test_deterministic_under_reordering() {
        let paths = [
            "word/document.xml",
            "[Content_Types].xml",
            "_rels/.rels",
            "word/_rels/document.xml.rels",
            "word/theme/theme1.xml",
            "docProps/core.xml",
            "word",
        ];
        let forward = build_tree(&files(&paths));
        let mut reversed_paths = paths.to_vec();
        reversed_paths.reverse();
        let backward = build_tree(&files(&reversed_paths));
        assert_eq!(forward, backward);
        assert_eq!(forward, build_tree(&files(&paths)));
    }

    #[test]
    fn test_compare_names_total() {
        assert_eq!(compare_names("a", "a"), Ordering::Equal);
        assert_eq!(compare_names("a", "B"), Ordering::Less);
        assert_eq!(compare_names("a", "A"), Ordering::Less);
        assert_eq!(compare_names("A", "a"), Ordering::Greater);
        assert_eq!(compare_names("file10", "file2"), Ordering::Less);
    }

    #[test]
    fn test_find_node() {
        let tree = build_tree(&files(&["docs/a.txt", "readme.md"]));
        assert!(find_node(&tree, "docs").unwrap().is_directory);
        assert!(!find_node(&tree, "docs/a.txt").unwrap().is_directory);
        assert!(find_node(&tree, "docs/missing").is_none());
        assert!(find_node(&tree, "").is_none());
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "a"), "a");
        assert_eq!(join_path("a/b", "c"), "a/b/c");
    }

    #[test]
    fn test_file_count() {
        let tree = build_tree(&files(&["docs/a.txt", "docs/deep/b.txt", "readme.md"]));
        assert_eq!(file_count(&tree), 3);
        assert_eq!(tree[0].file_count(), 2);
    }
}
