use super::hunk::Hunk;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// How a file changed between the old and new side of a diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    /// `new file mode` or `--- /dev/null`
    Added,
    /// `deleted file mode`
    Deleted,
    #[default]
    Modified,
}

impl ChangeType {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeType::Added => "added",
            ChangeType::Deleted => "deleted",
            ChangeType::Modified => "modified",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Line statistics and hunks for a single file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileStat {
    /// Number of `Add` lines across all hunks
    pub added: usize,
    /// Number of `Remove` lines across all hunks
    pub removed: usize,
    pub change_type: ChangeType,
    /// Hunks in the order they appear in the diff
    pub hunks: Vec<Hunk>,
}

impl FileStat {
    pub fn new(change_type: ChangeType) -> Self {
        FileStat {
            change_type,
            ..FileStat::default()
        }
    }
}

/// Per-file statistics keyed by destination path.
///
/// Iteration and serialization follow the order in which paths were first
/// seen. Replacing an existing path keeps its original position. Lookups
/// by path go through a hash index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileStats {
    entries: Vec<(String, FileStat)>,
    /// Path to position in `entries`
    index: HashMap<String, usize>,
}

impl FileStats {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&FileStat> {
        self.position(path).map(|i| &self.entries[i].1)
    }

    pub fn contains_key(&self, path: &str) -> bool {
        self.position(path).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FileStat)> {
        self.entries.iter().map(|(path, stat)| (path.as_str(), stat))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(path, _)| path.as_str())
    }

    pub(crate) fn position(&self, path: &str) -> Option<usize> {
        self.index.get(path).copied()
    }

    pub(crate) fn get_index_mut(&mut self, index: usize) -> Option<&mut FileStat> {
        self.entries.get_mut(index).map(|(_, stat)| stat)
    }

    /// Insert or replace the entry for `path`, returning its index.
    pub(crate) fn insert(&mut self, path: String, stat: FileStat) -> usize {
        match self.position(&path) {
            Some(i) => {
                self.entries[i].1 = stat;
                i
            }
            None => {
                let i = self.entries.len();
                self.index.insert(path.clone(), i);
                self.entries.push((path, stat));
                i
            }
        }
    }

    /// Index of the entry for `path`, inserting `stat` first if it is absent.
    pub(crate) fn insert_if_absent(&mut self, path: String, stat: FileStat) -> usize {
        match self.position(&path) {
            Some(i) => i,
            None => self.insert(path, stat),
        }
    }
}

impl Serialize for FileStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'a> IntoIterator for &'a FileStats {
    type Item = (&'a str, &'a FileStat);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a FileStat)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
