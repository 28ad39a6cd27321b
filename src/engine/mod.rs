//! Statement hierarchy reconstruction.
//!
//! The engine is a fixed pipeline over one decoded dump: tokenize, classify
//! rows, pre-scan accounting standards (pass A), pre-scan indentation layout
//! (pass B), then a single hierarchy pass that assigns every line item its
//! cross-year key. Pivot tables are selected from the finished tables only.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use anyhow::Result;
use tracing::debug;

use crate::heuristics::HeuristicConfig;

mod canonical;
mod classify;
mod hierarchy;
mod layout_scan;
mod pivot;
mod standard_scan;
#[cfg(test)]
mod tests;
mod tokenize;
mod types;
mod vocabulary;

pub use layout_scan::LayoutBucket;
pub use pivot::{Cell, PivotTable};
pub use standard_scan::StandardEvidence;
pub use types::{AccountingStandard, StatementFamily, YearSnapshot};

use canonical::*;
use classify::*;
use hierarchy::*;
use layout_scan::*;
use pivot::*;
use standard_scan::*;
use tokenize::*;
use types::*;
use vocabulary::*;

/// All statement tables of one dump, keyed by family.
pub type StatementTables = BTreeMap<StatementFamily, StatementTable>;

#[derive(Debug)]
pub struct StatementEngine {
    classifier: RowClassifier,
    config: HeuristicConfig,
}

impl StatementEngine {
    pub fn new(config: HeuristicConfig) -> Result<Self> {
        Ok(Self {
            classifier: RowClassifier::new()?,
            config,
        })
    }

    pub fn reconstruct(&self, text: &str) -> Reconstruction {
        let rows = tokenize_document(text);
        let events = self.classifier.classify_document(&rows);
        let item_row_count = events
            .iter()
            .filter(|event| matches!(event, DocumentEvent::Item(_)))
            .count();

        let standards = classify_standards(&events);
        let layout = classify_layout(&events, &standards, &self.config);
        let tables = build_hierarchy(&events, &standards, &layout);

        debug!(
            rows = rows.len(),
            item_rows = item_row_count,
            years = standards.years().len(),
            statements = tables.len(),
            "reconstruction finished"
        );

        Reconstruction {
            row_count: rows.len(),
            item_row_count,
            standards,
            layout,
            tables,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Reconstruction {
    pub row_count: usize,
    pub item_row_count: usize,
    pub standards: StandardMap,
    pub layout: LayoutReport,
    pub tables: StatementTables,
}

impl Reconstruction {
    /// The global year axis in chronological order.
    pub fn years(&self) -> &[YearSnapshot] {
        self.standards.years()
    }

    pub fn pivot_tables(&self) -> Vec<PivotTable> {
        select_pivots(&self.tables, &self.standards)
    }
}
