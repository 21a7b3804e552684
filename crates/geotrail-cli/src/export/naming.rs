use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

static UNSAFE_NAME_CHAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_-]").expect("valid file name regex"));

/// Replaces every character outside `[A-Za-z0-9_-]` with `_`.
///
/// An empty hint yields `default_name`.
pub(crate) fn sanitize_name(hint: &str, default_name: &str) -> String {
    if hint.is_empty() {
        return default_name.to_string();
    }
    UNSAFE_NAME_CHAR_RE.replace_all(hint, "_").into_owned()
}

/// Destination files for one export, stamped with the run time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OutputPaths {
    pub dir: PathBuf,
    /// Sanitized base name, also used as the map page title.
    pub title: String,
    pub html: PathBuf,
    pub table: Option<PathBuf>,
}

impl OutputPaths {
    pub(crate) fn new(dir: &Path, name: &str, now: NaiveDateTime, include_table: bool) -> Self {
        let stem = format!("{name}_{}", now.format("%Y%m%d_%H%M%S"));
        Self {
            dir: dir.to_path_buf(),
            title: name.to_string(),
            html: dir.join(format!("{stem}.html")),
            table: include_table.then(|| dir.join(format!("{stem}.csv"))),
        }
    }

    /// Human-readable list of the files this export would write.
    pub(crate) fn describe(&self) -> String {
        match &self.table {
            Some(table) => format!("'{}' and '{}'", self.html.display(), table.display()),
            None => format!("'{}'", self.html.display()),
        }
    }
}
