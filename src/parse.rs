//! Single-pass scanner that turns unified diff text into a [`DiffReport`].
//!
//! Each line is classified against a fixed set of shapes, checked in this
//! order (first match wins):
//!
//! 1. `diff --git a/<old> b/<new>` starts a file entry keyed by `<new>`
//! 2. `new file mode …` marks the current file as added
//! 3. `deleted file mode …` marks the current file as deleted
//! 4. `+++ b/<path>` names the current file, creating it if unseen
//! 5. `--- <path>` marks the current file as added when `<path>` is `/dev/null`
//! 6. `@@ -a[,b] +c[,d] @@ …` opens a hunk in the current file
//! 7. `+…` (but not `+++`) is an added line
//! 8. `-…` (but not `---`) is a removed line
//! 9. anything else is a context line inside a hunk, and ignored outside one
//!
//! An empty path still gets an entry, but it never becomes the current file,
//! so markers and hunks that follow it are not attached anywhere.
//!
//! Parsing never fails. Lines that look like a marker but do not match its
//! pattern are skipped, so fragments pasted without headers still produce a
//! best-effort report.
//!
//! # Examples
//!
//! ```
//! use git_diffstats::{ChangeLine, ChangeType, parse_diff};
//!
//! let report = parse_diff(
//!     "diff --git a/greet.py b/greet.py
//! --- a/greet.py
//! +++ b/greet.py
//! @@ -1,2 +1,2 @@
//!  def greet():
//! -    print('hi')
//! +    print('hello')
//! ",
//! );
//!
//! assert_eq!(report.total_lines_added, 1);
//! let file = report.files.get("greet.py").unwrap();
//! assert_eq!(file.change_type, ChangeType::Modified);
//! assert_eq!(
//!     file.hunks[0].changes[2],
//!     ChangeLine::Add { line_number: 2, content: "    print('hello')".to_string() }
//! );
//! ```

use crate::diff::{ChangeLine, ChangeType, DiffReport, FileStat, Hunk, HunkHeader};
use nom::{
    IResult, Parser,
    bytes::complete::{tag, take_until},
    combinator::rest,
    sequence::preceded,
};
use tracing::debug;

/// Parse a complete unified diff into per-file and aggregate statistics.
///
/// `None` is treated as an empty diff. Unrecognized or malformed lines
/// contribute nothing to the result.
pub fn parse_diff<'a>(text: impl Into<Option<&'a str>>) -> DiffReport {
    let text = text.into().unwrap_or_default();

    let report = text
        .trim_end()
        .lines()
        .fold(Scanner::default(), |mut scanner, line| {
            scanner.feed(line);
            scanner
        })
        .finish();

    debug!(
        files = report.total_files_changed,
        added = report.total_lines_added,
        removed = report.total_lines_removed,
        "parsed diff"
    );

    report
}

/// The recognized shapes of a diff line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    /// `diff --git` header, with the destination path if the header matched
    FileHeader(Option<&'a str>),
    NewFileMode,
    DeletedFileMode,
    /// `+++ b/<path>`
    NewPath(&'a str),
    /// `--- <path>`
    OldPath(&'a str),
    /// `@@` line, with the parsed ranges if the header matched
    HunkHeader(Option<HunkHeader>),
    Added(&'a str),
    Removed(&'a str),
    Other,
}

impl<'a> LineKind<'a> {
    fn classify(line: &'a str) -> Self {
        if line.starts_with("diff --git ") {
            LineKind::FileHeader(diff_git_paths(line).ok().map(|(_, (_, new))| new))
        } else if line.starts_with("new file mode") {
            LineKind::NewFileMode
        } else if line.starts_with("deleted file mode") {
            LineKind::DeletedFileMode
        } else if let Some(path) = line.strip_prefix("+++ b/") {
            LineKind::NewPath(path)
        } else if let Some(path) = line.strip_prefix("--- ") {
            LineKind::OldPath(path)
        } else if line.starts_with("@@") {
            LineKind::HunkHeader(HunkHeader::parse(line))
        } else if let Some(content) = line.strip_prefix('+').filter(|_| !line.starts_with("+++")) {
            LineKind::Added(content)
        } else if let Some(content) = line.strip_prefix('-').filter(|_| !line.starts_with("---")) {
            LineKind::Removed(content)
        } else {
            LineKind::Other
        }
    }
}

/// `diff --git a/<old> b/<new>`, splitting at the first ` b/`.
fn diff_git_paths(input: &str) -> IResult<&str, (&str, &str)> {
    (
        preceded(tag("diff --git a/"), take_until(" b/")),
        preceded(tag(" b/"), rest),
    )
        .parse(input)
}

/// Line positions of the next body line in the open hunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    old_line: u64,
    new_line: u64,
}

/// Accumulating scan state.
///
/// While `cursor` is set, the open hunk is the last hunk of `current_file`.
#[derive(Debug, Default)]
struct Scanner {
    report: DiffReport,
    /// Index into `report.files`
    current_file: Option<usize>,
    /// Classification applied to files created from here on
    pending: ChangeType,
    cursor: Option<Cursor>,
}

impl Scanner {
    fn feed(&mut self, line: &str) {
        match LineKind::classify(line) {
            LineKind::FileHeader(Some(path)) => self.start_file(path.trim()),
            LineKind::FileHeader(None) => debug!(line, "skipping malformed diff --git header"),
            LineKind::NewFileMode => self.mark(ChangeType::Added),
            LineKind::DeletedFileMode => self.mark(ChangeType::Deleted),
            LineKind::NewPath(path) => self.switch_file(path.trim()),
            LineKind::OldPath("/dev/null") => self.mark(ChangeType::Added),
            LineKind::OldPath(_) => {}
            LineKind::HunkHeader(Some(header)) => self.open_hunk(header, line),
            LineKind::HunkHeader(None) => debug!(line, "skipping malformed hunk header"),
            LineKind::Added(content) => self.record_add(content),
            LineKind::Removed(content) => self.record_remove(content),
            LineKind::Other => self.record_context(line),
        }
    }

    fn finish(mut self) -> DiffReport {
        self.report.total_files_changed = self.report.files.len();
        self.report
    }

    fn start_file(&mut self, path: &str) {
        self.pending = ChangeType::Modified;
        let index = self
            .report
            .files
            .insert(path.to_string(), FileStat::new(self.pending));
        self.current_file = Some(index).filter(|_| !path.is_empty());
        self.cursor = None;
    }

    fn switch_file(&mut self, path: &str) {
        let index = self
            .report
            .files
            .insert_if_absent(path.to_string(), FileStat::new(self.pending));
        let index = Some(index).filter(|_| !path.is_empty());
        if self.current_file != index {
            self.cursor = None;
        }
        self.current_file = index;
    }

    fn mark(&mut self, change_type: ChangeType) {
        self.pending = change_type;
        if let Some(stat) = self.current_stat() {
            stat.change_type = change_type;
        }
    }

    fn open_hunk(&mut self, header: HunkHeader, line: &str) {
        let Some(stat) = self.current_stat() else {
            debug!(line, "skipping hunk header with no current file");
            return;
        };
        stat.hunks.push(Hunk::new(header, line));
        self.cursor = Some(Cursor {
            old_line: header.old_start,
            new_line: header.new_start,
        });
    }

    fn record_add(&mut self, content: &str) {
        self.report.total_lines_added += 1;
        let Some((stat, cursor)) = self.open_hunk_state() else {
            return;
        };
        let Some(hunk) = stat.hunks.last_mut() else {
            return;
        };
        hunk.changes.push(ChangeLine::Add {
            line_number: cursor.new_line,
            content: content.to_string(),
        });
        cursor.new_line = cursor.new_line.saturating_add(1);
        stat.added += 1;
    }

    fn record_remove(&mut self, content: &str) {
        self.report.total_lines_removed += 1;
        let Some((stat, cursor)) = self.open_hunk_state() else {
            return;
        };
        let Some(hunk) = stat.hunks.last_mut() else {
            return;
        };
        hunk.changes.push(ChangeLine::Remove {
            line_number: cursor.old_line,
            content: content.to_string(),
        });
        cursor.old_line = cursor.old_line.saturating_add(1);
        stat.removed += 1;
    }

    fn record_context(&mut self, line: &str) {
        let Some((stat, cursor)) = self.open_hunk_state() else {
            return;
        };
        let Some(hunk) = stat.hunks.last_mut() else {
            return;
        };
        hunk.changes.push(ChangeLine::Context {
            old_line_number: cursor.old_line,
            new_line_number: cursor.new_line,
            content: line.to_string(),
        });
        cursor.old_line = cursor.old_line.saturating_add(1);
        cursor.new_line = cursor.new_line.saturating_add(1);
    }

    fn current_stat(&mut self) -> Option<&mut FileStat> {
        self.report.files.get_index_mut(self.current_file?)
    }

    fn open_hunk_state(&mut self) -> Option<(&mut FileStat, &mut Cursor)> {
        let cursor = self.cursor.as_mut()?;
        let stat = self.report.files.get_index_mut(self.current_file?)?;
        Some((stat, cursor))
    }
}
