use anyhow::Context;
use chrono::NaiveDate;
use regex::Regex;
use tracing::warn;
use unicode_normalization::UnicodeNormalization;

use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RowClass {
    YearMarker(YearSnapshot),
    StatementMarker(String),
    Noise,
    Item,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ItemRow {
    pub line: usize,
    pub raw_label: String,
    pub label: String,
    pub canonical: String,
    pub amount: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DocumentEvent {
    Year(YearSnapshot),
    Statement {
        raw_name: String,
        spelling: Option<&'static StatementSpelling>,
    },
    Item(ItemRow),
}

#[derive(Debug)]
pub(crate) struct RowClassifier {
    date_pattern: Regex,
}

impl RowClassifier {
    pub fn new() -> Result<Self> {
        let date_pattern = Regex::new(r"(\d{4})\s*[/年]\s*(\d{1,2})\s*[/月]\s*(\d{1,2})")
            .context("failed to compile year-marker date regex")?;
        Ok(Self { date_pattern })
    }

    pub fn classify_row(&self, row: &Row) -> RowClass {
        let label = row.field(0);

        if label.contains(YEAR_MARKER) && (label.contains('/') || label.contains('年')) {
            return RowClass::YearMarker(self.parse_year_marker(label));
        }

        if label == STATEMENT_NAME_LABEL {
            return RowClass::StatementMarker(row.field(1).to_string());
        }

        if lookup_statement(label).is_some()
            && parse_amount(row.field(2)).is_none()
            && parse_amount(row.field(3)).is_none()
        {
            return RowClass::StatementMarker(label.to_string());
        }

        if is_boilerplate_label(&canonicalize(label)) || (label.contains('/') && label.contains('-'))
        {
            return RowClass::Noise;
        }

        if label.is_empty() {
            RowClass::Noise
        } else {
            RowClass::Item
        }
    }

    /// Classifies every row and keeps only the item rows that fall inside a
    /// recognized statement.
    pub fn classify_document(&self, rows: &[Row]) -> Vec<DocumentEvent> {
        let mut events = Vec::with_capacity(rows.len());
        let mut statement_active = false;

        for row in rows {
            match self.classify_row(row) {
                RowClass::YearMarker(year) => events.push(DocumentEvent::Year(year)),
                RowClass::StatementMarker(raw_name) => {
                    let spelling = lookup_statement(&raw_name);
                    if spelling.is_none() {
                        warn!(line = row.line, name = %raw_name, "unrecognized statement name; rows ignored until next statement");
                    }
                    statement_active = spelling.is_some();
                    events.push(DocumentEvent::Statement { raw_name, spelling });
                }
                RowClass::Noise => {}
                RowClass::Item if statement_active => {
                    let label = row.field(0);
                    events.push(DocumentEvent::Item(ItemRow {
                        line: row.line,
                        raw_label: row.raw(0).trim_end().to_string(),
                        label: label.to_string(),
                        canonical: canonicalize(label),
                        amount: parse_amount(row.field(2))
                            .or_else(|| parse_amount(row.field(3)))
                            .map(str::to_string),
                    }));
                }
                RowClass::Item => {}
            }
        }

        events
    }

    fn parse_year_marker(&self, label: &str) -> YearSnapshot {
        let folded = label.nfkc().collect::<String>();
        let Some(captures) = self.date_pattern.captures(&folded) else {
            return YearSnapshot::new(label.replace(YEAR_MARKER, "").trim());
        };

        let part = |index: usize| {
            captures
                .get(index)
                .and_then(|value| value.as_str().parse::<u32>().ok())
                .unwrap_or(0)
        };
        let (year, month, day) = (part(1), part(2), part(3));

        match NaiveDate::from_ymd_opt(year as i32, month, day) {
            Some(date) => YearSnapshot::new(date.format("%Y/%m/%d").to_string()),
            None => YearSnapshot::new(format!("{year:04}/{month:02}/{day:02}")),
        }
    }
}

/// Returns the value when it is the nil dash or a numeral once separators
/// and sign markers are removed.
pub(crate) fn parse_amount(value: &str) -> Option<&str> {
    if value.is_empty() {
        return None;
    }
    if value == NIL_AMOUNT {
        return Some(value);
    }

    let digits = value
        .chars()
        .filter(|ch| !AMOUNT_IGNORED_CHARS.contains(ch))
        .collect::<String>();
    if is_numeral(&digits) { Some(value) } else { None }
}

fn is_numeral(value: &str) -> bool {
    let mut parts = value.splitn(2, '.');
    let integer = parts.next().unwrap_or("");
    let fraction = parts.next();

    !integer.is_empty()
        && integer.chars().all(|ch| ch.is_ascii_digit())
        && fraction.is_none_or(|fraction| {
            !fraction.is_empty() && fraction.chars().all(|ch| ch.is_ascii_digit())
        })
}

pub(crate) fn leading_indent(raw_label: &str) -> usize {
    raw_label
        .chars()
        .take_while(|ch| INDENT_CHARS.contains(ch))
        .count()
}
