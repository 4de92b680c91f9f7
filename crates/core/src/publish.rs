use crate::archive::{update_archive, ArchiveEntry, UpdateOutcome};
use crate::domain::contract::{validate, ValidationError};
use crate::domain::report::{extract_daily, extract_weekly, ReportKind, ReportSchema};
use crate::storage::reports::{
    is_same_file, parse_document, read_archive, read_document, remove_source, store_report,
    write_archive,
};
use crate::storage::ProjectLayout;
use std::path::{Path, PathBuf};

/// Fatal conditions the CLI reports without a context chain.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("File not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("Invalid JSON - {0}")]
    InvalidJson(serde_json::Error),
    #[error("Validation failed with {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),
}

#[derive(Debug, Clone, Default)]
pub struct PublishOptions {
    /// Leave the input file in place after it has been copied.
    pub keep_source: bool,
    /// Validate and plan, but write nothing.
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceStatus {
    Removed,
    Kept,
    /// The input already was one of the published files, so it stays.
    IsDestination,
    RemoveFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveStatus {
    Updated(UpdateOutcome),
    /// Dry run: what the update would have done.
    Planned(UpdateOutcome),
    FileMissing,
}

#[derive(Debug, Clone)]
pub struct PublishReport {
    pub kind: ReportKind,
    pub schema: ReportSchema,
    pub input_name: String,
    pub date: String,
    /// Daily reports only.
    pub signal_count: Option<u64>,
    pub dated_path: PathBuf,
    pub latest_path: PathBuf,
    pub source: SourceStatus,
    pub archive: ArchiveStatus,
    pub dry_run: bool,
}

impl PublishReport {
    pub fn commit_message(&self) -> String {
        match self.kind {
            ReportKind::Daily => format!("Add report for {}", self.date),
            ReportKind::Weekly => format!("Add weekly analysis for {}", self.date),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Publisher {
    layout: ProjectLayout,
    options: PublishOptions,
}

impl Publisher {
    pub fn new(layout: ProjectLayout, options: PublishOptions) -> Self {
        Self { layout, options }
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Validate `input`, copy it into the reports tree and refresh the archive page.
    ///
    /// Nothing is written until validation has passed. Later failures do not roll back
    /// earlier copies.
    pub fn publish(&self, kind: ReportKind, input: &Path) -> anyhow::Result<PublishReport> {
        if !input.exists() {
            return Err(PublishError::InputNotFound(input.to_path_buf()).into());
        }

        let raw = read_document(input)?;
        let doc = parse_document(&raw).map_err(PublishError::InvalidJson)?;

        let errors = validate(kind, &doc);
        if !errors.is_empty() {
            tracing::warn!(?kind, errors = errors.len(), "report failed validation");
            return Err(PublishError::Validation(errors).into());
        }

        let (date, signal_count, schema, entry) = match kind {
            ReportKind::Daily => {
                let meta = extract_daily(&doc)?;
                let entry = ArchiveEntry::daily(&meta.date, meta.signal_count);
                (meta.date, Some(meta.signal_count), meta.schema, entry)
            }
            ReportKind::Weekly => {
                let meta = extract_weekly(&doc)?;
                let entry = ArchiveEntry::weekly(&meta.date);
                (meta.date, None, meta.schema, entry)
            }
        };
        tracing::info!(?kind, ?schema, %date, ?signal_count, "report validated");

        let dated_path = self.layout.dated_report(kind, &date);
        let latest_path = self.layout.latest_report(kind);

        let mut report = PublishReport {
            kind,
            schema,
            input_name: input
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| input.display().to_string()),
            date,
            signal_count,
            dated_path,
            latest_path,
            source: SourceStatus::Kept,
            archive: ArchiveStatus::FileMissing,
            dry_run: self.options.dry_run,
        };

        if self.options.dry_run {
            report.archive = match self.plan_archive(&entry)? {
                Some(outcome) => ArchiveStatus::Planned(outcome),
                None => ArchiveStatus::FileMissing,
            };
            tracing::info!(date = %report.date, dry_run = true, "publish planned");
            return Ok(report);
        }

        let input_is_destination = is_same_file(input, &report.dated_path)
            || is_same_file(input, &report.latest_path);

        store_report(input, &report.dated_path, &report.latest_path)?;
        tracing::info!(date = %report.date, path = %report.dated_path.display(), "report stored");

        if input_is_destination {
            report.source = SourceStatus::IsDestination;
        } else if !self.options.keep_source {
            report.source = match remove_source(input) {
                Ok(()) => SourceStatus::Removed,
                Err(err) => {
                    tracing::warn!(error = %err, "could not remove source file");
                    SourceStatus::RemoveFailed(format!("{err:#}"))
                }
            };
        }

        report.archive = self.apply_archive(&entry)?;
        Ok(report)
    }

    fn plan_archive(&self, entry: &ArchiveEntry) -> anyhow::Result<Option<UpdateOutcome>> {
        let path = self.layout.archive_path();
        if !path.exists() {
            return Ok(None);
        }
        let html = read_archive(&path)?;
        Ok(Some(update_archive(&html, entry)?.outcome))
    }

    fn apply_archive(&self, entry: &ArchiveEntry) -> anyhow::Result<ArchiveStatus> {
        let path = self.layout.archive_path();
        if !path.exists() {
            tracing::warn!(path = %path.display(), "archive page not found; skipping update");
            return Ok(ArchiveStatus::FileMissing);
        }

        let html = read_archive(&path)?;
        let update = update_archive(&html, entry)?;
        match update.outcome {
            UpdateOutcome::MarkerMissing => {
                tracing::warn!(
                    marker = entry.section.marker(),
                    "archive marker not found; skipping update"
                );
            }
            outcome => {
                write_archive(&path, &update.html)?;
                tracing::info!(date = %entry.date, ?outcome, "archive page updated");
            }
        }

        Ok(ArchiveStatus::Updated(update.outcome))
    }
}
