use anyhow::Context;
use serde_json::Value;
use std::fs;
use std::path::Path;

pub fn read_document(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {} failed", path.display()))
}

pub fn parse_document(raw: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Whether both paths resolve to the same existing file.
pub fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Copy the report to its dated file, then to `latest.json`. The pair is not atomic.
///
/// A destination that already is `source` is left untouched; copying a file onto itself
/// truncates it.
pub fn store_report(source: &Path, dated: &Path, latest: &Path) -> anyhow::Result<()> {
    if let Some(dir) = dated.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {} failed", dir.display()))?;
    }

    for dest in [dated, latest] {
        if is_same_file(source, dest) {
            tracing::debug!(path = %dest.display(), "source is the destination; copy skipped");
            continue;
        }
        fs::copy(source, dest)
            .with_context(|| format!("copy {} -> {} failed", source.display(), dest.display()))?;
        tracing::debug!(path = %dest.display(), "wrote report");
    }

    Ok(())
}

pub fn remove_source(source: &Path) -> anyhow::Result<()> {
    fs::remove_file(source).with_context(|| format!("remove {} failed", source.display()))
}

pub fn read_archive(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {} failed", path.display()))
}

pub fn write_archive(path: &Path, html: &str) -> anyhow::Result<()> {
    fs::write(path, html).with_context(|| format!("write {} failed", path.display()))
}
