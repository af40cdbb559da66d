//! Display formatting for individual table cells.
//!
//! Rules are checked in order and the first match wins: absent values, date
//! fields, long-text fields, then plain stringification. Formatting never
//! fails; an unparseable date becomes [`INVALID_DATE`]. An explicit JSON null
//! is not absent: it reads as `"null"`, or as the epoch in a date field.

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::{Number, Value};

use crate::FieldValue;

/// Placeholder rendered for a date field whose value cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";
/// Appended to truncated long-text values.
pub const ELLIPSIS: &str = "...";
pub const DEFAULT_TRUNCATE_AT: usize = 20;
pub const DEFAULT_DATE_MARKER: &str = "date";
pub const DEFAULT_LONG_TEXT_MARKERS: &[&str] = &["transaction_xml_response"];

/// en-US style local date and time, e.g. `1/1/2024, 12:00:00 AM`.
const DISPLAY_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatRules {
    /// Field names containing this (case-insensitive) are treated as dates.
    pub date_marker: String,
    /// Field names containing any of these (case-insensitive) are truncated.
    pub long_text_markers: Vec<String>,
    pub truncate_at: usize,
}

impl Default for FormatRules {
    fn default() -> Self {
        Self {
            date_marker: DEFAULT_DATE_MARKER.to_string(),
            long_text_markers: DEFAULT_LONG_TEXT_MARKERS
                .iter()
                .map(|marker| marker.to_string())
                .collect(),
            truncate_at: DEFAULT_TRUNCATE_AT,
        }
    }
}

impl FormatRules {
    fn is_date_field(&self, lowered: &str) -> bool {
        lowered.contains(&self.date_marker.to_ascii_lowercase())
    }

    fn is_long_text_field(&self, lowered: &str) -> bool {
        self.long_text_markers
            .iter()
            .any(|marker| lowered.contains(&marker.to_ascii_lowercase()))
    }
}

/// Field-aware cell formatter, rendering dates in the zone `Tz`.
#[derive(Debug, Clone)]
pub struct FieldFormatter<Tz: TimeZone = Local> {
    rules: FormatRules,
    zone: Tz,
}

impl FieldFormatter<Local> {
    /// Formatter rendering dates in the viewer's local zone.
    pub fn local(rules: FormatRules) -> Self {
        Self { rules, zone: Local }
    }
}

impl Default for FieldFormatter<Local> {
    fn default() -> Self {
        Self::local(FormatRules::default())
    }
}

impl<Tz> FieldFormatter<Tz>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    pub fn with_zone(rules: FormatRules, zone: Tz) -> Self {
        Self { rules, zone }
    }

    pub fn rules(&self) -> &FormatRules {
        &self.rules
    }

    pub fn format(&self, field: &str, value: FieldValue<'_>) -> String {
        let Some(value) = value.value() else {
            return String::new();
        };
        let lowered = field.to_ascii_lowercase();
        if self.rules.is_date_field(&lowered) {
            return self.format_date(value);
        }
        if self.rules.is_long_text_field(&lowered) {
            return truncate_text(&stringify(value), self.rules.truncate_at);
        }
        stringify(value)
    }

    /// Renders `value` as a local date and time, or [`INVALID_DATE`].
    pub fn format_date(&self, value: &Value) -> String {
        match parse_instant(value, &self.zone) {
            Some(instant) => instant.format(DISPLAY_FORMAT).to_string(),
            None => INVALID_DATE.to_string(),
        }
    }
}

/// Keeps the first `limit` characters and appends [`ELLIPSIS`] when `text` is longer.
pub fn truncate_text(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut out: String = text.chars().take(limit).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Plain display string for a JSON value.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => stringify_number(number),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn stringify_number(number: &Number) -> String {
    if !number.is_f64() {
        return number.to_string();
    }
    match number.as_f64() {
        Some(float) if float == 0.0 => "0".to_string(),
        Some(float) if float.fract() == 0.0 && float.abs() < 1e15 => format!("{float:.0}"),
        Some(float) => float.to_string(),
        None => number.to_string(),
    }
}

fn parse_instant<Tz: TimeZone>(value: &Value, zone: &Tz) -> Option<DateTime<Tz>> {
    match value {
        Value::Null => DateTime::from_timestamp_millis(0).map(|utc| utc.with_timezone(zone)),
        Value::String(text) => parse_date_text(text.trim(), zone),
        Value::Number(number) => {
            let millis = number
                .as_i64()
                .or_else(|| number.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))?;
            DateTime::from_timestamp_millis(millis).map(|utc| utc.with_timezone(zone))
        }
        _ => None,
    }
}

fn parse_date_text<Tz: TimeZone>(text: &str, zone: &Tz) -> Option<DateTime<Tz>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(zone));
    }
    // No offset: the instant is a wall-clock time in the viewer's zone.
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return zone.from_local_datetime(&naive).earliest();
        }
    }
    // Date-only values are midnight UTC.
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight).with_timezone(zone))
}
