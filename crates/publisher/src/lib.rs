use clap::error::ErrorKind;
use clap::{CommandFactory, FromArgMatches, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use swingsignal_core::domain::report::ReportKind;
use swingsignal_core::publish::{PublishOptions, Publisher};
use swingsignal_core::storage::ProjectLayout;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod console;

/// One of the two publishing tools.
#[derive(Debug, Clone, Copy)]
pub struct Tool {
    pub kind: ReportKind,
    pub bin: &'static str,
    pub title: &'static str,
    pub example: &'static str,
}

pub const DAILY: Tool = Tool {
    kind: ReportKind::Daily,
    bin: "publish_report",
    title: "SwingSignal Report Publisher",
    example: "SwingSignal_Report_2025-12-24.json",
};

pub const WEEKLY: Tool = Tool {
    kind: ReportKind::Weekly,
    bin: "publish_weekly",
    title: "SwingSignal Weekly Report Publisher",
    example: "WeeklyAnalysis_2025-12-28.json",
};

#[derive(Debug, Parser)]
#[command(version)]
pub struct Args {
    /// JSON report to publish.
    pub report: PathBuf,

    /// Project root holding `reports/` and `archive.html`. Defaults to $SWINGSIGNAL_ROOT,
    /// then the current directory.
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Keep the input file instead of deleting it after publishing.
    #[arg(long)]
    pub keep_source: bool,

    /// Validate and show what would be written, without touching any file.
    #[arg(long)]
    pub dry_run: bool,
}

fn parse_args(tool: &Tool) -> Result<Args, clap::Error> {
    let matches = Args::command()
        .name(tool.bin)
        .about(tool.title)
        .try_get_matches()?;
    Args::from_arg_matches(&matches)
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Entry point shared by both binaries. Every failure exits with status 1.
pub fn run(tool: &Tool) -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = match parse_args(tool) {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            let mut out = std::io::stdout().lock();
            let _ = console::write_usage_error(&mut out, tool, &err);
            return ExitCode::FAILURE;
        }
    };

    match publish(tool, args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = %format!("{err:#}"), "publish failed");
            let mut out = std::io::stdout().lock();
            let _ = console::write_error(&mut out, &err);
            ExitCode::FAILURE
        }
    }
}

fn publish(tool: &Tool, args: Args) -> anyhow::Result<()> {
    let settings = swingsignal_core::config::Settings::from_env()?;
    let root = settings.resolve_project_root(args.root)?;
    tracing::debug!(root = %root.display(), "resolved project root");

    let mut out = std::io::stdout().lock();
    console::write_header(&mut out, tool)?;
    console::write_input(&mut out, &args.report)?;

    let publisher = Publisher::new(
        ProjectLayout::new(root),
        PublishOptions {
            keep_source: args.keep_source,
            dry_run: args.dry_run,
        },
    );
    let report = publisher.publish(tool.kind, &args.report)?;

    console::write_summary(&mut out, publisher.layout(), &report)?;
    Ok(())
}
