use super::file::{ChangeType, FileStats};
use serde::{Serialize, Serializer, ser::SerializeMap};
use std::fmt;

/// Aggregate and per-file statistics for a complete diff text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffReport {
    pub total_files_changed: usize,
    pub total_lines_added: usize,
    pub total_lines_removed: usize,
    pub files: FileStats,
}

impl DiffReport {
    /// Counts-only view of this report, without hunks.
    pub fn summary(&self) -> DiffSummary<'_> {
        DiffSummary { report: self }
    }
}

/// The report reduced to counts and change types.
///
/// Serializes to the same shape as [`DiffReport`] with the `hunks` arrays
/// left out of every file entry.
#[derive(Debug, Clone, Copy)]
pub struct DiffSummary<'a> {
    report: &'a DiffReport,
}

#[derive(Serialize)]
struct FileSummary {
    added: usize,
    removed: usize,
    change_type: ChangeType,
}

struct SummaryFiles<'a>(&'a FileStats);

impl Serialize for SummaryFiles<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (path, stat) in self.0.iter() {
            map.serialize_entry(
                path,
                &FileSummary {
                    added: stat.added,
                    removed: stat.removed,
                    change_type: stat.change_type,
                },
            )?;
        }
        map.end()
    }
}

impl Serialize for DiffSummary<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let report = self.report;
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("total_files_changed", &report.total_files_changed)?;
        map.serialize_entry("total_lines_added", &report.total_lines_added)?;
        map.serialize_entry("total_lines_removed", &report.total_lines_removed)?;
        map.serialize_entry("files", &SummaryFiles(&report.files))?;
        map.end()
    }
}

fn plural(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, plural)
    }
}

/// `git diff --stat` style text: one line per file, then the totals.
impl fmt::Display for DiffReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (path, stat) in &self.files {
            writeln!(
                f,
                "{:<8} {} (+{}, -{})",
                stat.change_type, path, stat.added, stat.removed
            )?;
        }

        write!(
            f,
            "{}, {}(+), {}(-)",
            plural(self.total_files_changed, "file changed", "files changed"),
            plural(self.total_lines_added, "insertion", "insertions"),
            plural(self.total_lines_removed, "deletion", "deletions"),
        )
    }
}
