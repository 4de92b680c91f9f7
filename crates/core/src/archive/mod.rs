use crate::time::report_date::display_label;
use anyhow::Context;
use regex::{NoExpand, Regex};

pub const DAILY_MARKER: &str = "<!-- ARCHIVE_ITEMS_START -->";
pub const WEEKLY_MARKER: &str = "<!-- WEEKLY_ITEMS_START -->";

// Indentation of entries inside the archive list container.
const ENTRY_INDENT: &str = "                    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveSection {
    Daily,
    Weekly,
}

impl ArchiveSection {
    pub fn marker(self) -> &'static str {
        match self {
            ArchiveSection::Daily => DAILY_MARKER,
            ArchiveSection::Weekly => WEEKLY_MARKER,
        }
    }

    /// Page the entry links to.
    pub fn page(self) -> &'static str {
        match self {
            ArchiveSection::Daily => "index.html",
            ArchiveSection::Weekly => "weekly.html",
        }
    }
}

/// One link in the archive page, keyed by its canonical date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub section: ArchiveSection,
    pub date: String,
    pub heading: String,
    pub meta: String,
}

impl ArchiveEntry {
    pub fn daily(date: &str, signal_count: u64) -> Self {
        Self {
            section: ArchiveSection::Daily,
            date: date.to_string(),
            heading: display_label(date),
            meta: format!("{signal_count} signals"),
        }
    }

    pub fn weekly(date: &str) -> Self {
        Self {
            section: ArchiveSection::Weekly,
            date: date.to_string(),
            heading: format!("Week of {}", display_label(date)),
            meta: "Weekly Analysis".to_string(),
        }
    }

    /// The anchor element, starting at `<a` with no leading indentation.
    pub fn render(&self) -> String {
        let i = ENTRY_INDENT;
        format!(
            "<a href=\"{page}?date={date}\" class=\"archive-item\" data-date=\"{date}\">\n\
             {i}    <div>\n\
             {i}        <div class=\"archive-date\">{heading}</div>\n\
             {i}        <div class=\"archive-meta\">\n\
             {i}            <span>{meta}</span>\n\
             {i}        </div>\n\
             {i}    </div>\n\
             {i}    <span class=\"archive-arrow\">→</span>\n\
             {i}</a>",
            page = self.section.page(),
            date = self.date,
            heading = self.heading,
            meta = self.meta,
        )
    }

    fn pattern(&self) -> anyhow::Result<Regex> {
        let pattern = format!(
            r#"(?s)<a href="{page}\?date={date}"[^>]*class="archive-item"[^>]*>.*?</a>"#,
            page = regex::escape(self.section.page()),
            date = regex::escape(&self.date),
        );
        Regex::new(&pattern).with_context(|| format!("invalid archive entry pattern: {pattern}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// An entry for the date already existed and was rewritten in place.
    Replaced,
    /// A new entry was placed right after the section marker.
    Inserted,
    /// No entry and no marker; the document is unchanged.
    MarkerMissing,
}

#[derive(Debug, Clone)]
pub struct ArchiveUpdate {
    pub html: String,
    pub outcome: UpdateOutcome,
}

/// Replace the entry for `entry.date` in `html`, or insert it after the section marker.
///
/// This is a textual substitution: an entry spans from its opening `<a` to the next `</a>`,
/// so entries must not contain nested anchors.
pub fn update_archive(html: &str, entry: &ArchiveEntry) -> anyhow::Result<ArchiveUpdate> {
    let rendered = entry.render();
    let pattern = entry.pattern()?;

    if pattern.is_match(html) {
        let html = pattern.replace_all(html, NoExpand(&rendered)).into_owned();
        return Ok(ArchiveUpdate {
            html,
            outcome: UpdateOutcome::Replaced,
        });
    }

    let marker = entry.section.marker();
    let Some(pos) = html.find(marker) else {
        return Ok(ArchiveUpdate {
            html: html.to_string(),
            outcome: UpdateOutcome::MarkerMissing,
        });
    };

    let at = pos + marker.len();
    let mut out = String::with_capacity(html.len() + rendered.len() + ENTRY_INDENT.len() + 1);
    out.push_str(&html[..at]);
    out.push('\n');
    out.push_str(ENTRY_INDENT);
    out.push_str(&rendered);
    out.push_str(&html[at..]);

    Ok(ArchiveUpdate {
        html: out,
        outcome: UpdateOutcome::Inserted,
    })
}
