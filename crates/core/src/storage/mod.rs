pub mod reports;

use crate::domain::report::ReportKind;
use std::path::{Path, PathBuf};

pub const ARCHIVE_FILE: &str = "archive.html";
pub const LATEST_FILE: &str = "latest.json";

/// Where published files live, relative to an explicit project root.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn reports_dir(&self, kind: ReportKind) -> PathBuf {
        let reports = self.root.join("reports");
        match kind {
            ReportKind::Daily => reports,
            ReportKind::Weekly => reports.join("weekly"),
        }
    }

    pub fn dated_report(&self, kind: ReportKind, date: &str) -> PathBuf {
        self.reports_dir(kind).join(format!("{date}.json"))
    }

    pub fn latest_report(&self, kind: ReportKind) -> PathBuf {
        self.reports_dir(kind).join(LATEST_FILE)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.root.join(ARCHIVE_FILE)
    }

    /// `path` relative to the project root when it lives under it, for display.
    pub fn display_path<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}
