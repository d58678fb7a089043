pub mod file;
pub mod hunk;
pub mod report;

pub use file::{ChangeType, FileStat, FileStats};
pub use hunk::{ChangeLine, Hunk, HunkHeader};
pub use report::{DiffReport, DiffSummary};
