use error_set::error_set;
use std::io::Read;
use std::path::Path;

mod diff;
pub mod logging;
pub mod parse;

pub use diff::{
    ChangeLine, ChangeType, DiffReport, DiffSummary, FileStat, FileStats, Hunk, HunkHeader,
};
pub use parse::parse_diff;

error_set! {
    /// Top-level error for the git-diffstats front end
    DiffStatsError := {
        #[display("Failed to serialize report: {message}")]
        SerializeFailed { message: String },
        #[display("Failed to render man page: {message}")]
        ManPageFailed { message: String },
        #[display("Failed to write output: {message}")]
        WriteFailed { message: String },
        #[display("Failed to initialize logging: {message}")]
        LoggingFailed { message: String },
    } || InputError

    /// Errors obtaining the diff text
    InputError := {
        #[display("Failed to read diff from {path}: {message}")]
        ReadFailed { path: String, message: String },
        #[display("Failed to read diff from stdin: {message}")]
        StdinFailed { message: String },
    }
}

/// Read a diff from `path`, or from stdin when `path` is `None` or `-`.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
pub fn read_diff(path: Option<&Path>) -> Result<String, InputError> {
    match path.filter(|p| p.as_os_str() != "-") {
        Some(path) => std::fs::read(path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .map_err(|e| InputError::ReadFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            }),
        None => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .map_err(|e| InputError::StdinFailed {
                    message: e.to_string(),
                })?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}

/// JSON output options for [`render_json`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonOptions {
    /// Indent the output
    pub pretty: bool,
    /// Emit only counts and change types, without hunks
    pub summary_only: bool,
}

/// Serialize a report to JSON.
///
/// # Examples
///
/// ```
/// use git_diffstats::{JsonOptions, parse_diff, render_json};
///
/// let json = render_json(&parse_diff(""), JsonOptions::default()).unwrap();
/// assert_eq!(
///     json,
///     r#"{"total_files_changed":0,"total_lines_added":0,"total_lines_removed":0,"files":{}}"#
/// );
/// ```
pub fn render_json(report: &DiffReport, options: JsonOptions) -> Result<String, DiffStatsError> {
    let rendered = match (options.summary_only, options.pretty) {
        (false, false) => serde_json::to_string(report),
        (false, true) => serde_json::to_string_pretty(report),
        (true, false) => serde_json::to_string(&report.summary()),
        (true, true) => serde_json::to_string_pretty(&report.summary()),
    };
    rendered.map_err(|e| DiffStatsError::SerializeFailed {
        message: e.to_string(),
    })
}
