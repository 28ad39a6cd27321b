use serde::Serialize;
use tracing::debug;

use super::*;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutBucket {
    pub year: YearSnapshot,
    pub standard: AccountingStandard,
    pub candidate_rows: usize,
    pub indented_rows: usize,
    pub indent_ratio: Option<f64>,
    pub flat: bool,
}

#[derive(Debug, Clone, Default)]
pub struct LayoutReport {
    buckets: Vec<LayoutBucket>,
    flat: BTreeSet<(YearSnapshot, AccountingStandard)>,
}

impl LayoutReport {
    pub fn buckets(&self) -> &[LayoutBucket] {
        &self.buckets
    }

    pub fn is_flat(&self, year: &YearSnapshot, standard: AccountingStandard) -> bool {
        self.flat.contains(&(year.clone(), standard))
    }

    pub fn flat_periods(&self) -> impl Iterator<Item = &(YearSnapshot, AccountingStandard)> + '_ {
        self.flat.iter()
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct BucketCounts {
    candidates: usize,
    indented: usize,
}

/// Pass B: decides per (year, standard) whether balance-sheet and
/// income-statement rows carry usable indentation.
pub(crate) fn classify_layout(
    events: &[DocumentEvent],
    standards: &StandardMap,
    config: &HeuristicConfig,
) -> LayoutReport {
    let mut counts = BTreeMap::<(YearSnapshot, AccountingStandard), BucketCounts>::new();
    let mut current_year: Option<&YearSnapshot> = None;
    let mut family: Option<StatementFamily> = None;

    for event in events {
        match event {
            DocumentEvent::Year(year) => current_year = Some(year),
            DocumentEvent::Statement { spelling, .. } => {
                family = spelling.map(|spelling| spelling.family);
            }
            DocumentEvent::Item(item) => {
                let Some(year) = current_year else {
                    continue;
                };
                if !family.is_some_and(StatementFamily::infers_flat_layout) {
                    continue;
                }
                let standard = standards.standard_of(year);
                let bucket = counts.entry((year.clone(), standard)).or_default();
                if item.canonical.chars().count() <= config.min_layout_label_chars {
                    continue;
                }

                bucket.candidates += 1;
                if leading_indent(&item.raw_label) > 0 {
                    bucket.indented += 1;
                }
            }
        }
    }

    let mut report = LayoutReport::default();
    for ((year, standard), bucket) in counts {
        let indent_ratio = indent_ratio(bucket.indented, bucket.candidates);
        let flat = indent_ratio.is_some_and(|ratio| ratio < config.flat_indent_threshold);
        if flat {
            report.flat.insert((year.clone(), standard));
        }
        report.buckets.push(LayoutBucket {
            year,
            standard,
            candidate_rows: bucket.candidates,
            indented_rows: bucket.indented,
            indent_ratio,
            flat,
        });
    }

    debug!(
        buckets = report.buckets.len(),
        flat = report.flat.len(),
        threshold = config.flat_indent_threshold,
        "layout pre-scan finished"
    );
    report
}

pub(crate) fn indent_ratio(indented: usize, candidates: usize) -> Option<f64> {
    if candidates == 0 {
        None
    } else {
        Some(indented as f64 / candidates as f64)
    }
}
