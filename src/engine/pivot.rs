use serde::Serialize;

use super::*;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    /// Numeric when the stored amount reads as a number; the nil dash and
    /// anything else unparseable is kept verbatim.
    pub fn from_amount(amount: Option<&str>) -> Self {
        let Some(amount) = amount else {
            return Cell::Empty;
        };
        if amount == NIL_AMOUNT {
            return Cell::Text(amount.to_string());
        }
        parse_number(amount)
            .map(Cell::Number)
            .unwrap_or_else(|| Cell::Text(amount.to_string()))
    }
}

fn parse_number(amount: &str) -> Option<f64> {
    let cleaned = amount.replace(',', "");
    let (negative, body) = match cleaned.strip_prefix(NEGATIVE_MARKERS) {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };
    let value = body.parse::<f64>().ok().filter(|value| value.is_finite())?;
    Some(if negative { -value } else { value })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotRow {
    pub unique_key: String,
    pub display_name: String,
    pub depth: usize,
    pub header_only: bool,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotTable {
    pub sheet_title: String,
    pub family: StatementFamily,
    pub standard: AccountingStandard,
    pub years: Vec<YearSnapshot>,
    pub header_row: Vec<String>,
    pub rows: Vec<PivotRow>,
}

/// One table per (family, standard) that has selected years and at least
/// one selected row.
pub(crate) fn select_pivots(tables: &StatementTables, standards: &StandardMap) -> Vec<PivotTable> {
    let mut pivots = Vec::new();

    for (family, table) in tables {
        if table.is_empty() {
            continue;
        }
        for standard in AccountingStandard::ALL {
            let years = standards.years_with(standard);
            if years.is_empty() {
                continue;
            }

            let items = table.ordered_items().collect::<Vec<&LineItem>>();
            let rows = items
                .iter()
                .enumerate()
                .filter(|(index, item)| {
                    item.has_amount_in(&years)
                        || (item.is_header_in(&years) && header_has_data_below(&items, *index, &years))
                })
                .map(|(_, item)| pivot_row(item, &years))
                .collect::<Vec<PivotRow>>();

            if rows.is_empty() {
                continue;
            }

            let mut header_row = Vec::with_capacity(years.len() + 1);
            header_row.push(ITEM_COLUMN_HEADER.to_string());
            header_row.extend(years.iter().map(|year| year.as_str().to_string()));

            pivots.push(PivotTable {
                sheet_title: sheet_title(*family, standard),
                family: *family,
                standard,
                years,
                header_row,
                rows,
            });
        }
    }

    pivots
}

/// A header is kept only when some later key, before the next header-only
/// key at the same or a shallower depth, has an amount in the selected years.
pub(crate) fn header_has_data_below(
    items: &[&LineItem],
    index: usize,
    years: &[YearSnapshot],
) -> bool {
    let Some(header) = items.get(index) else {
        return false;
    };

    for item in items.iter().skip(index + 1) {
        if !item.is_data() && item.depth <= header.depth {
            return false;
        }
        if item.has_amount_in(years) {
            return true;
        }
    }
    false
}

fn pivot_row(item: &LineItem, years: &[YearSnapshot]) -> PivotRow {
    PivotRow {
        unique_key: item.unique_key.clone(),
        display_name: item.display_name.clone(),
        depth: item.depth,
        header_only: !item.is_data(),
        cells: years
            .iter()
            .map(|year| Cell::from_amount(item.amounts.get(year).map(String::as_str)))
            .collect(),
    }
}
