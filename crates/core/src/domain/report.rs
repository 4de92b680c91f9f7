use crate::time::report_date::date_from_timestamp;
use anyhow::Context;
use serde_json::{Map, Value};

pub const LEGACY_METADATA_KEY: &str = "report_metadata";
pub const CURRENT_METADATA_KEY: &str = "meta";
pub const SIGNALS_KEY: &str = "signals";
pub const TOTAL_SIGNALS_KEY: &str = "total_signals";

const WEEK_ENDING: &str = "week_ending";
const GENERATED_DATE: &str = "generated_date";
const GENERATED_AT: &str = "generated_at";

/// Top-level sections of which a weekly report must carry at least one.
pub const WEEKLY_CONTENT_SECTIONS: [&str; 5] = [
    "market_overview",
    "key_insights",
    "top_picks",
    "sector_analysis",
    "outlook",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Daily,
    Weekly,
}

impl ReportKind {
    /// Metadata fields that may carry the report date, in precedence order.
    pub fn date_fields(self) -> &'static [&'static str] {
        match self {
            ReportKind::Daily => &[GENERATED_DATE, GENERATED_AT],
            ReportKind::Weekly => &[WEEK_ENDING, GENERATED_DATE, GENERATED_AT],
        }
    }
}

/// Which historical naming convention a report was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSchema {
    /// `report_metadata` + `symbol` / `action` / `trade_setup`.
    Legacy,
    /// `meta` + `ticker` / `signal` / `analysis.tradeSetup`.
    Current,
}

/// Resolved view over a report's metadata block, whichever key it lives under.
#[derive(Debug, Clone, Copy)]
pub struct Metadata<'a> {
    pub schema: ReportSchema,
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> Metadata<'a> {
    /// `report_metadata` wins unless it is falsy (null, false, zero, or an empty string, array
    /// or object) and `meta` is present.
    pub fn resolve(doc: &'a Value) -> Option<Self> {
        let legacy = doc.get(LEGACY_METADATA_KEY);
        let current = doc.get(CURRENT_METADATA_KEY);

        match (legacy, current) {
            (Some(l), Some(c)) if is_blank(l) => Some(Self::new(ReportSchema::Current, c)),
            (Some(l), _) => Some(Self::new(ReportSchema::Legacy, l)),
            (None, Some(c)) => Some(Self::new(ReportSchema::Current, c)),
            (None, None) => None,
        }
    }

    fn new(schema: ReportSchema, value: &'a Value) -> Self {
        Self {
            schema,
            fields: value.as_object(),
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.fields.is_some_and(|m| m.contains_key(key))
    }

    fn non_empty_str(&self, key: &str) -> Option<&'a str> {
        self.fields?
            .get(key)?
            .as_str()
            .filter(|s| !s.is_empty())
    }

    /// First usable date field for `kind`; `generated_at` is truncated to its date part.
    pub fn canonical_date(&self, kind: ReportKind) -> Option<String> {
        kind.date_fields().iter().find_map(|&key| {
            let raw = self.non_empty_str(key)?;
            let date = if key == GENERATED_AT {
                date_from_timestamp(raw)
            } else {
                raw
            };
            (!date.is_empty()).then(|| date.to_string())
        })
    }

    pub fn total_signals(&self) -> u64 {
        self.fields
            .and_then(|m| m.get(TOTAL_SIGNALS_KEY))
            .and_then(Value::as_u64)
            .unwrap_or(0)
    }
}

fn is_blank(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(m) => m.is_empty(),
    }
}

/// Field lookups on a single signal entry, accepting either naming convention.
#[derive(Debug, Clone, Copy)]
pub struct SignalFields<'a>(&'a Value);

impl<'a> SignalFields<'a> {
    pub fn new(signal: &'a Value) -> Self {
        Self(signal)
    }

    fn has(&self, key: &str) -> bool {
        self.0.get(key).is_some()
    }

    pub fn has_symbol(&self) -> bool {
        self.has("symbol") || self.has("ticker")
    }

    pub fn has_action(&self) -> bool {
        self.has("action") || self.has("signal")
    }

    pub fn has_trade_setup(&self) -> bool {
        self.has("trade_setup")
            || self
                .0
                .get("analysis")
                .and_then(|a| a.get("tradeSetup"))
                .is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyMetadata {
    pub date: String,
    pub signal_count: u64,
    pub schema: ReportSchema,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyMetadata {
    pub date: String,
    pub schema: ReportSchema,
}

/// Canonical date and signal count of a document that already passed validation.
pub fn extract_daily(doc: &Value) -> anyhow::Result<DailyMetadata> {
    let meta = Metadata::resolve(doc).context("report has no metadata block")?;
    let date = meta
        .canonical_date(ReportKind::Daily)
        .context("report metadata has no usable date")?;

    Ok(DailyMetadata {
        date,
        signal_count: meta.total_signals(),
        schema: meta.schema,
    })
}

pub fn extract_weekly(doc: &Value) -> anyhow::Result<WeeklyMetadata> {
    let meta = Metadata::resolve(doc).context("report has no metadata block")?;
    let date = meta
        .canonical_date(ReportKind::Weekly)
        .context("report metadata has no usable date")?;

    Ok(WeeklyMetadata {
        date,
        schema: meta.schema,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legacy_and_current_extract_the_same_metadata() {
        let legacy = json!({
            "report_metadata": {"generated_date": "2025-12-28", "total_signals": 3},
            "signals": [{"symbol": "AAPL", "action": "BUY", "trade_setup": {}}],
        });
        let current = json!({
            "meta": {"generated_at": "2025-12-28T06:29:37.692Z", "total_signals": 3},
            "signals": [{"ticker": "AAPL", "signal": "BUY", "analysis": {"tradeSetup": {}}}],
        });

        let a = extract_daily(&legacy).unwrap();
        let b = extract_daily(&current).unwrap();
        assert_eq!(a.schema, ReportSchema::Legacy);
        assert_eq!(b.schema, ReportSchema::Current);
        assert_eq!((a.date.as_str(), a.signal_count), ("2025-12-28", 3));
        assert_eq!((a.date, a.signal_count), (b.date, b.signal_count));
    }

    #[test]
    fn generated_at_is_truncated_to_date() {
        let doc = json!({"meta": {"generated_at": "2025-12-28T06:29:37.692Z"}, "signals": []});
        assert_eq!(extract_daily(&doc).unwrap().date, "2025-12-28");
    }

    #[test]
    fn generated_date_takes_precedence_over_generated_at() {
        let doc = json!({"meta": {
            "generated_date": "2025-12-27",
            "generated_at": "2025-12-28T06:29:37.692Z",
        }});
        assert_eq!(extract_daily(&doc).unwrap().date, "2025-12-27");
    }

    #[test]
    fn missing_total_signals_counts_as_zero() {
        let doc = json!({"meta": {"generated_date": "2025-12-28"}, "signals": []});
        assert_eq!(extract_daily(&doc).unwrap().signal_count, 0);
    }

    #[test]
    fn weekly_prefers_week_ending() {
        let doc = json!({"meta": {
            "week_ending": "2025-12-26",
            "generated_date": "2025-12-28",
        }, "outlook": "flat"});
        assert_eq!(extract_weekly(&doc).unwrap().date, "2025-12-26");
    }

    #[test]
    fn empty_week_ending_falls_through() {
        let doc = json!({"report_metadata": {
            "week_ending": "",
            "generated_at": "2025-12-28T00:00:00Z",
        }});
        assert_eq!(extract_weekly(&doc).unwrap().date, "2025-12-28");
    }

    #[test]
    fn empty_legacy_block_defers_to_meta() {
        let doc = json!({"report_metadata": {}, "meta": {"generated_date": "2025-12-28"}});
        let meta = Metadata::resolve(&doc).unwrap();
        assert_eq!(meta.schema, ReportSchema::Current);
        assert_eq!(meta.canonical_date(ReportKind::Daily).as_deref(), Some("2025-12-28"));
    }

    #[test]
    fn any_falsy_legacy_block_defers_to_meta() {
        for blank in [json!(null), json!(""), json!([]), json!(false), json!(0), json!(0.0)] {
            let doc = json!({"report_metadata": blank, "meta": {"generated_date": "2025-12-28"}});
            let meta = Metadata::resolve(&doc).unwrap();
            assert_eq!(meta.schema, ReportSchema::Current, "{blank}");
        }

        // A non-empty scalar still counts as the legacy block.
        let doc = json!({"report_metadata": "x", "meta": {"generated_date": "2025-12-28"}});
        assert_eq!(Metadata::resolve(&doc).unwrap().schema, ReportSchema::Legacy);

        // Without `meta` there is nothing to fall back to.
        let doc = json!({"report_metadata": false});
        assert_eq!(Metadata::resolve(&doc).unwrap().schema, ReportSchema::Legacy);
    }

    #[test]
    fn extraction_without_metadata_is_an_error() {
        assert!(extract_daily(&json!({"signals": []})).is_err());
        assert!(extract_weekly(&json!({"meta": {}})).is_err());
    }

    #[test]
    fn signal_fields_accept_both_conventions() {
        let legacy = json!({"symbol": "X", "action": "BUY", "trade_setup": {}});
        let current = json!({"ticker": "X", "signal": "BUY", "analysis": {"tradeSetup": {}}});
        let bare = json!({"analysis": {"confidenceScore": 0.7}});

        for s in [&legacy, &current] {
            let f = SignalFields::new(s);
            assert!(f.has_symbol() && f.has_action() && f.has_trade_setup());
        }
        let f = SignalFields::new(&bare);
        assert!(!f.has_symbol() && !f.has_action() && !f.has_trade_setup());
    }
}
