use crate::domain::report::{
    Metadata, ReportKind, ReportSchema, SignalFields, SIGNALS_KEY, TOTAL_SIGNALS_KEY,
    WEEKLY_CONTENT_SECTIONS,
};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing 'report_metadata' or 'meta' field")]
    MissingMetadata,
    #[error("Missing date field ({})", date_field_list(.0))]
    MissingDate(ReportKind),
    #[error("Missing 'total_signals' in metadata")]
    MissingTotalSignals,
    #[error("Missing 'signals' array")]
    MissingSignals,
    #[error("'signals' must be an array")]
    SignalsNotArray,
    #[error("Signal missing required field: 'symbol' or 'ticker'")]
    SignalMissingSymbol,
    #[error("Signal missing required field: 'action' or 'signal'")]
    SignalMissingAction,
    #[error("Signal missing required field: 'trade_setup' or 'analysis.tradeSetup'")]
    SignalMissingTradeSetup,
    #[error(
        "Missing content - need at least one of: {}",
        WEEKLY_CONTENT_SECTIONS.join(", ")
    )]
    MissingContent,
}

fn date_field_list(kind: &ReportKind) -> String {
    match kind.date_fields() {
        [a, b] => format!("{a} or {b}"),
        fields => match fields.split_last() {
            Some((last, rest)) => format!("{}, or {last}", rest.join(", ")),
            None => String::new(),
        },
    }
}

/// Every structural problem with `doc` for the given report kind. Empty means publishable.
pub fn validate(kind: ReportKind, doc: &Value) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    match Metadata::resolve(doc) {
        None => errors.push(ValidationError::MissingMetadata),
        Some(meta) => {
            if meta.canonical_date(kind).is_none() {
                errors.push(ValidationError::MissingDate(kind));
            }
            if kind == ReportKind::Daily
                && meta.schema == ReportSchema::Legacy
                && !meta.has(TOTAL_SIGNALS_KEY)
            {
                errors.push(ValidationError::MissingTotalSignals);
            }
        }
    }

    match kind {
        ReportKind::Daily => validate_signals(doc, &mut errors),
        ReportKind::Weekly => {
            if !WEEKLY_CONTENT_SECTIONS.iter().any(|s| doc.get(s).is_some()) {
                errors.push(ValidationError::MissingContent);
            }
        }
    }

    errors
}

// Only the first signal is inspected.
fn validate_signals(doc: &Value, errors: &mut Vec<ValidationError>) {
    let signals = match doc.get(SIGNALS_KEY) {
        Some(Value::Array(signals)) => signals,
        Some(_) => {
            errors.push(ValidationError::SignalsNotArray);
            return;
        }
        None => {
            errors.push(ValidationError::MissingSignals);
            return;
        }
    };

    let Some(first) = signals.first() else {
        return;
    };

    let fields = SignalFields::new(first);
    if !fields.has_symbol() {
        errors.push(ValidationError::SignalMissingSymbol);
    }
    if !fields.has_action() {
        errors.push(ValidationError::SignalMissingAction);
    }
    if !fields.has_trade_setup() {
        errors.push(ValidationError::SignalMissingTradeSetup);
    }
}
