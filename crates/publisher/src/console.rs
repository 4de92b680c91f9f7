use crate::Tool;
use std::io::{self, Write};
use std::path::Path;
use swingsignal_core::archive::UpdateOutcome;
use swingsignal_core::domain::report::ReportKind;
use swingsignal_core::publish::{ArchiveStatus, PublishError, PublishReport, SourceStatus};
use swingsignal_core::storage::{ProjectLayout, ARCHIVE_FILE};

const RULE: &str = "========================================";
const THIN_RULE: &str = "----------------------------------------";

pub fn write_header(out: &mut impl Write, tool: &Tool) -> io::Result<()> {
    writeln!(out, "\n📊 {}", tool.title)?;
    writeln!(out, "{RULE}")
}

pub fn write_input(out: &mut impl Write, input: &Path) -> io::Result<()> {
    let name = input
        .file_name()
        .map_or_else(|| input.display().to_string(), |n| n.to_string_lossy().into_owned());
    writeln!(out, "\n📄 Input file: {name}")
}

pub fn write_usage_error(out: &mut impl Write, tool: &Tool, err: &clap::Error) -> io::Result<()> {
    write!(out, "{}", err.render())?;
    writeln!(out, "\nUsage: {} <path_to_json_report>", tool.bin)?;
    writeln!(out, "\nExample:")?;
    writeln!(out, "  {} {}", tool.bin, tool.example)
}

pub fn write_error(out: &mut impl Write, err: &anyhow::Error) -> io::Result<()> {
    match err.downcast_ref::<PublishError>() {
        Some(PublishError::Validation(errors)) => {
            writeln!(out, "❌ Validation errors:")?;
            for e in errors {
                writeln!(out, "   - {e}")?;
            }
            Ok(())
        }
        Some(e) => writeln!(out, "❌ Error: {e}"),
        None => writeln!(out, "❌ Error: {err:#}"),
    }
}

pub fn write_summary(
    out: &mut impl Write,
    layout: &ProjectLayout,
    report: &PublishReport,
) -> io::Result<()> {
    let section = match report.kind {
        ReportKind::Daily => "",
        ReportKind::Weekly => "weekly ",
    };

    writeln!(out, "  ✓ JSON structure validated")?;
    match report.kind {
        ReportKind::Daily => writeln!(out, "  ✓ Report date: {}", report.date)?,
        ReportKind::Weekly => writeln!(out, "  ✓ Week ending: {}", report.date)?,
    }
    if let Some(count) = report.signal_count {
        writeln!(out, "  ✓ Signal count: {count}")?;
    }

    let dated = layout.display_path(&report.dated_path).display();
    let latest = layout.display_path(&report.latest_path).display();

    if report.dry_run {
        writeln!(out, "\n📁 Would save to: {dated}")?;
        writeln!(out, "📁 Would update: {latest}")?;
    } else {
        writeln!(out, "\n📁 Saved to: {dated}")?;
        writeln!(out, "📁 Updated: {latest}")?;
    }

    match &report.source {
        SourceStatus::Removed => {
            writeln!(out, "🗑️  Removed source file: {}", report.input_name)?
        }
        SourceStatus::Kept => {}
        SourceStatus::IsDestination => writeln!(
            out,
            "  ✓ Source file {} is already published; left in place",
            report.input_name
        )?,
        SourceStatus::RemoveFailed(reason) => writeln!(
            out,
            "  ⚠ Warning: could not remove source file {}: {reason}",
            report.input_name
        )?,
    }

    match report.archive {
        ArchiveStatus::Updated(UpdateOutcome::Replaced) => writeln!(
            out,
            "  ✓ Updated existing {section}archive entry for {}",
            report.date
        )?,
        ArchiveStatus::Updated(UpdateOutcome::Inserted) => writeln!(
            out,
            "  ✓ Added new {section}archive entry for {}",
            report.date
        )?,
        ArchiveStatus::Planned(UpdateOutcome::Replaced) => writeln!(
            out,
            "  ✓ Would update existing {section}archive entry for {}",
            report.date
        )?,
        ArchiveStatus::Planned(UpdateOutcome::Inserted) => writeln!(
            out,
            "  ✓ Would add new {section}archive entry for {}",
            report.date
        )?,
        ArchiveStatus::Updated(UpdateOutcome::MarkerMissing)
        | ArchiveStatus::Planned(UpdateOutcome::MarkerMissing) => writeln!(
            out,
            "  ⚠ Warning: Could not find {section}archive marker in {ARCHIVE_FILE}"
        )?,
        ArchiveStatus::FileMissing => writeln!(out, "  ⚠ Warning: {ARCHIVE_FILE} not found")?,
    }

    writeln!(out, "\n{RULE}")?;
    if report.dry_run {
        writeln!(out, "🔍 Dry run complete; nothing was written.")?;
        return writeln!(out);
    }

    match report.kind {
        ReportKind::Daily => writeln!(out, "✅ Report published successfully!")?,
        ReportKind::Weekly => writeln!(out, "✅ Weekly report published successfully!")?,
    }
    writeln!(out, "\nTo deploy, run these commands:")?;
    writeln!(out, "{THIN_RULE}")?;
    writeln!(out, "git add .")?;
    writeln!(out, "git commit -m \"{}\"", report.commit_message())?;
    writeln!(out, "git push")?;
    writeln!(out, "{THIN_RULE}")?;
    writeln!(out)
}
