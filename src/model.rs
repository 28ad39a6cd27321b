use serde::Serialize;

use crate::engine::{
    AccountingStandard, LayoutBucket, PivotTable, StandardEvidence, StatementFamily, YearSnapshot,
};
use crate::heuristics::HeuristicConfig;

#[derive(Debug, Clone, Serialize)]
pub struct SourceDescriptor {
    pub path: String,
    pub sha256: String,
    pub byte_count: usize,
    pub encoding: String,
    pub replaced_malformed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct YearStandardEntry {
    pub year: YearSnapshot,
    pub standard: AccountingStandard,
    pub evidence: StandardEvidence,
}

#[derive(Debug, Clone, Serialize)]
pub struct SheetSummary {
    pub sheet_title: String,
    pub family: StatementFamily,
    pub standard: AccountingStandard,
    pub year_count: usize,
    pub row_count: usize,
    pub header_row_count: usize,
}

impl SheetSummary {
    pub fn from_table(table: &PivotTable) -> Self {
        Self {
            sheet_title: table.sheet_title.clone(),
            family: table.family,
            standard: table.standard,
            year_count: table.years.len(),
            row_count: table.rows.len(),
            header_row_count: table.rows.iter().filter(|row| row.header_only).count(),
        }
    }
}

/// What the workbook writer consumes: every sheet with typed cells.
#[derive(Debug, Clone, Serialize)]
pub struct PivotExport {
    pub export_version: u32,
    pub run_id: String,
    pub generated_at: String,
    pub source: SourceDescriptor,
    pub years: Vec<YearStandardEntry>,
    pub sheets: Vec<PivotTable>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConvertPaths {
    pub input_path: String,
    pub output_dir: String,
    pub json_path: String,
    pub manifest_path: String,
    pub db_path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConvertCounts {
    pub input_rows: usize,
    pub item_rows: usize,
    pub year_count: usize,
    pub ifrs_year_count: usize,
    pub statement_count: usize,
    pub line_item_count: usize,
    pub flat_period_count: usize,
    pub sheet_count: usize,
    pub sheet_row_count: usize,
    pub db_cells_inserted: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConvertRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub command: String,
    pub source: SourceDescriptor,
    pub heuristics: HeuristicConfig,
    pub heuristics_checksum: String,
    pub paths: ConvertPaths,
    pub counts: ConvertCounts,
    pub years: Vec<YearStandardEntry>,
    pub layout: Vec<LayoutBucket>,
    pub sheets: Vec<SheetSummary>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub source: SourceDescriptor,
    pub heuristics: HeuristicConfig,
    pub input_rows: usize,
    pub item_rows: usize,
    pub years: Vec<YearStandardEntry>,
    pub layout: Vec<LayoutBucket>,
    pub sheets: Vec<SheetSummary>,
}
