//! The `render` command: build the timeline snapshot and export it.

use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Args;
use geotrail_core::{load_icon_table, AppConfig, IconTable};
use geotrail_timeline::{build_timeline_from_file, parse_boundary_date, DateWindow, PipelineStage};

use crate::export::{export_snapshot, sanitize_name, OutputPaths};

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Location-history JSON export (an array of entries)
    pub input: PathBuf,

    /// First day to include (YYYY-MM-DD)
    #[arg(value_parser = parse_date_arg)]
    pub start_date: NaiveDate,

    /// Last day to include (YYYY-MM-DD); only entries starting at its midnight qualify
    #[arg(value_parser = parse_date_arg)]
    pub end_date: NaiveDate,

    /// Also write a CSV table of every exported coordinate
    #[arg(long)]
    pub table: bool,

    /// Base name for output files; characters outside [A-Za-z0-9_-] become '_'
    #[arg(long, default_value = "")]
    pub name: String,

    /// Directory for output files (overrides GEOTRAIL_OUTPUT_DIR)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Build the timeline and report counts without writing files
    #[arg(long)]
    pub dry_run: bool,
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_boundary_date(value).map_err(|e| e.to_string())
}

fn load_icons(config: &AppConfig) -> anyhow::Result<IconTable> {
    match &config.icons_path {
        Some(path) => load_icon_table(path)
            .with_context(|| format!("failed to load icon table from {}", path.display())),
        None => Ok(IconTable::default()),
    }
}

/// Runs the pipeline over `args.input` and writes the map (and table).
///
/// # Errors
///
/// Returns an error if the icon table or input cannot be loaded, or if an
/// output file cannot be written. Problems with individual entries are
/// logged and skipped.
pub(crate) fn run_render(config: &AppConfig, args: &RenderArgs) -> anyhow::Result<()> {
    let icons = load_icons(config)?;
    let window = DateWindow::new(args.start_date, args.end_date);

    let snapshot = build_timeline_from_file(&args.input, &window, &icons)
        .with_context(|| format!("failed to build timeline from {}", args.input.display()))?;

    let stats = &snapshot.stats;
    tracing::info!(
        entries = stats.total_entries(),
        admitted = stats.admitted_entries,
        rejected = stats.rejected_entries(),
        records = snapshot.records.len(),
        paths = snapshot.path_count,
        skipped_points = stats.skipped_points,
        failed_shapes = stats.failed_shapes,
        "timeline built"
    );

    let name = sanitize_name(&args.name, &config.default_name);
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output_dir.clone());
    let paths = OutputPaths::new(&output_dir, &name, Local::now().naive_local(), args.table);

    if args.dry_run {
        println!(
            "dry-run: {} paths and {} coordinates from {} of {} entries; would write {}",
            snapshot.path_count,
            snapshot.records.len(),
            stats.admitted_entries,
            stats.total_entries(),
            paths.describe()
        );
        return Ok(());
    }

    let summary = export_snapshot(&snapshot, &paths)?;
    tracing::debug!(stage = %PipelineStage::Exported, "export complete");

    println!(
        "Map created with {} paths. Open '{}' to view.",
        snapshot.path_count,
        paths.html.display()
    );
    if let (Some(rows), Some(table)) = (summary.table_rows, paths.table.as_ref()) {
        println!("Exported {rows} coordinates to '{}'.", table.display());
    }
    Ok(())
}
