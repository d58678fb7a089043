use nom::{
    IResult, Parser,
    bytes::complete::tag,
    character::complete::{char, digit1},
    combinator::{map_res, opt},
    sequence::preceded,
};
use serde::Serialize;

/// The numeric part of a hunk header: `@@ -old_start[,old_count] +new_start[,new_count] @@`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunkHeader {
    pub old_start: u64,
    pub old_count: u64,
    pub new_start: u64,
    pub new_count: u64,
}

impl HunkHeader {
    /// Parse a hunk header line.
    ///
    /// Omitted counts default to 1 (`@@ -5 +7 @@` covers a single line on
    /// each side). Anything after the closing `@@` is ignored, so the
    /// function-context suffix git appends is accepted.
    ///
    /// Returns `None` if the line does not have the header shape or a
    /// number does not fit in a `u64`.
    ///
    /// # Examples
    ///
    /// ```
    /// use git_diffstats::HunkHeader;
    ///
    /// let header = HunkHeader::parse("@@ -10,7 +10,8 @@ def run():").unwrap();
    /// assert_eq!((header.old_start, header.old_count), (10, 7));
    /// assert_eq!((header.new_start, header.new_count), (10, 8));
    ///
    /// let header = HunkHeader::parse("@@ -3 +4 @@").unwrap();
    /// assert_eq!((header.old_count, header.new_count), (1, 1));
    ///
    /// assert!(HunkHeader::parse("@@ bogus @@").is_none());
    /// ```
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let (_, header) = hunk_header(line).ok()?;
        Some(header)
    }
}

fn hunk_header(input: &str) -> IResult<&str, HunkHeader> {
    let (rest, ((old_start, old_count), (new_start, new_count))) = (
        preceded(tag("@@ -"), range),
        preceded(tag(" +"), range),
    )
        .parse(input)?;
    let (rest, _) = tag(" @@").parse(rest)?;

    Ok((
        rest,
        HunkHeader {
            old_start,
            old_count: old_count.unwrap_or(1),
            new_start,
            new_count: new_count.unwrap_or(1),
        },
    ))
}

/// `start` or `start,count`
fn range(input: &str) -> IResult<&str, (u64, Option<u64>)> {
    (number, opt(preceded(char(','), number))).parse(input)
}

fn number(input: &str) -> IResult<&str, u64> {
    map_res(digit1, str::parse::<u64>).parse(input)
}

/// One line of a hunk body with its position in the old and/or new file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChangeLine {
    /// Line present only in the new file, at `line_number` (1-based)
    Add { line_number: u64, content: String },
    /// Line present only in the old file, at `line_number` (1-based)
    Remove { line_number: u64, content: String },
    /// Unchanged line present on both sides
    Context {
        old_line_number: u64,
        new_line_number: u64,
        content: String,
    },
}

impl ChangeLine {
    pub fn content(&self) -> &str {
        match self {
            ChangeLine::Add { content, .. }
            | ChangeLine::Remove { content, .. }
            | ChangeLine::Context { content, .. } => content,
        }
    }

    pub fn is_add(&self) -> bool {
        matches!(self, ChangeLine::Add { .. })
    }

    pub fn is_remove(&self) -> bool {
        matches!(self, ChangeLine::Remove { .. })
    }
}

/// A single hunk from a git diff, with every body line numbered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hunk {
    pub old_start: u64,
    pub old_count: u64,
    pub new_start: u64,
    pub new_count: u64,
    /// The header line exactly as it appeared in the diff
    pub header: String,
    pub changes: Vec<ChangeLine>,
}

impl Hunk {
    /// Start an empty hunk from its parsed header and raw header line.
    pub fn new(header: HunkHeader, line: &str) -> Self {
        Hunk {
            old_start: header.old_start,
            old_count: header.old_count,
            new_start: header.new_start,
            new_count: header.new_count,
            header: line.to_string(),
            changes: Vec::new(),
        }
    }

    /// Number of added lines recorded in this hunk
    pub fn added(&self) -> usize {
        self.changes.iter().filter(|c| c.is_add()).count()
    }

    /// Number of removed lines recorded in this hunk
    pub fn removed(&self) -> usize {
        self.changes.iter().filter(|c| c.is_remove()).count()
    }
}
