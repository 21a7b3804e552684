//! Writers for the finished timeline: an HTML map and an optional CSV table.

mod html;
mod naming;
mod table;

use std::path::Path;

use geotrail_timeline::TimelineSnapshot;
use thiserror::Error;

pub(crate) use html::render_map_html;
pub(crate) use naming::{sanitize_name, OutputPaths};
pub(crate) use table::write_table;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to encode map data: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExportError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        ExportError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExportSummary {
    /// Rows written to the table, when one was requested.
    pub table_rows: Option<usize>,
}

/// Writes the map and, if `paths.table` is set, the coordinate table.
///
/// The output directory is created when missing.
///
/// # Errors
///
/// Returns [`ExportError`] if the directory or either file cannot be written.
pub(crate) fn export_snapshot(
    snapshot: &TimelineSnapshot,
    paths: &OutputPaths,
) -> Result<ExportSummary, ExportError> {
    std::fs::create_dir_all(&paths.dir).map_err(|e| ExportError::io(&paths.dir, e))?;

    let html = render_map_html(snapshot, &paths.title)?;
    std::fs::write(&paths.html, html).map_err(|e| ExportError::io(&paths.html, e))?;
    tracing::debug!(path = %paths.html.display(), "wrote map");

    let table_rows = match &paths.table {
        Some(table_path) => {
            let rows = write_table(table_path, &snapshot.records)?;
            tracing::debug!(path = %table_path.display(), rows, "wrote coordinate table");
            Some(rows)
        }
        None => None,
    };

    Ok(ExportSummary { table_rows })
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
