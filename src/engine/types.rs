use std::fmt;

use serde::Serialize;

use super::*;

/// Separator between the family prefix and path segments of a unique key.
pub(crate) const KEY_SEPARATOR: &str = "|";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementFamily {
    BalanceSheet,
    IncomeStatement,
    ComprehensiveIncome,
    CashFlow,
    ChangesInEquity,
}

impl StatementFamily {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BalanceSheet => "balance_sheet",
            Self::IncomeStatement => "income_statement",
            Self::ComprehensiveIncome => "comprehensive_income",
            Self::CashFlow => "cash_flow",
            Self::ChangesInEquity => "changes_in_equity",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::BalanceSheet => "連結貸借対照表",
            Self::IncomeStatement => "連結損益計算書",
            Self::ComprehensiveIncome => "連結包括利益計算書",
            Self::CashFlow => "連結キャッシュ・フロー計算書",
            Self::ChangesInEquity => "連結株主資本等変動計算書",
        }
    }

    /// Prefix of every unique key in this family.
    pub fn key(self) -> &'static str {
        self.display_name()
    }

    /// Only these families take part in layout classification and receive
    /// keyword-based level inference when a period is flat.
    pub fn infers_flat_layout(self) -> bool {
        matches!(self, Self::BalanceSheet | Self::IncomeStatement)
    }
}

impl fmt::Display for StatementFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountingStandard {
    DomesticGaap,
    Ifrs,
}

impl AccountingStandard {
    pub const ALL: [AccountingStandard; 2] = [Self::DomesticGaap, Self::Ifrs];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DomesticGaap => "domestic_gaap",
            Self::Ifrs => "ifrs",
        }
    }

    pub fn sheet_suffix(self) -> &'static str {
        match self {
            Self::DomesticGaap => "日本基準",
            Self::Ifrs => "IFRS",
        }
    }
}

impl fmt::Display for AccountingStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One "as of" date of the dump, normalized to `YYYY/MM/DD` where possible.
/// Zero padding makes the lexical order chronological.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct YearSnapshot(String);

impl YearSnapshot {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for YearSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct InsertionPosition {
    pub year_index: usize,
    pub row_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Header,
    Data,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineItem {
    pub unique_key: String,
    pub display_name: String,
    pub depth: usize,
    pub position: InsertionPosition,
    pub kind: ItemKind,
    pub amounts: BTreeMap<YearSnapshot, String>,
    pub header_years: BTreeSet<YearSnapshot>,
}

impl LineItem {
    pub fn is_data(&self) -> bool {
        self.kind == ItemKind::Data
    }

    pub fn has_amount_in(&self, years: &[YearSnapshot]) -> bool {
        years.iter().any(|year| self.amounts.contains_key(year))
    }

    pub fn is_header_in(&self, years: &[YearSnapshot]) -> bool {
        years.iter().any(|year| self.header_years.contains(year))
    }
}

/// Number of path segments in a unique key.
///
/// Counted on the key string, so a canonical name that itself contains the
/// separator reads as deeper than it is.
pub(crate) fn path_depth(unique_key: &str) -> usize {
    unique_key.split(KEY_SEPARATOR).count().saturating_sub(1)
}

fn is_total_key(unique_key: &str) -> bool {
    unique_key
        .rsplit(KEY_SEPARATOR)
        .next()
        .is_some_and(is_total_label)
}

/// One observation of an item row handed to [`StatementTable::record`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct Observation<'a> {
    pub display_name: &'a str,
    pub year: Option<&'a YearSnapshot>,
    pub amount: Option<&'a str>,
    pub position: InsertionPosition,
    pub parent_key: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RecordOutcome {
    Inserted,
    AmountAdded,
    PromotedToData,
    HeaderYearAdded,
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct StatementTable {
    order: Vec<String>,
    items: HashMap<String, LineItem>,
}

impl StatementTable {
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn keys(&self) -> &[String] {
        &self.order
    }

    #[cfg(test)]
    pub(crate) fn get(&self, unique_key: &str) -> Option<&LineItem> {
        self.items.get(unique_key)
    }

    pub fn ordered_items(&self) -> impl Iterator<Item = &LineItem> + '_ {
        self.order.iter().filter_map(|key| self.items.get(key))
    }

    /// Applies header/data reconciliation for one row occurrence.
    pub(crate) fn record(&mut self, unique_key: &str, observation: Observation<'_>) -> RecordOutcome {
        if let Some(item) = self.items.get_mut(unique_key) {
            return match (item.kind, observation.amount) {
                (ItemKind::Data, Some(amount)) => {
                    if let Some(year) = observation.year {
                        item.amounts.insert(year.clone(), amount.to_string());
                    }
                    RecordOutcome::AmountAdded
                }
                (ItemKind::Data, None) => RecordOutcome::Ignored,
                (ItemKind::Header, Some(amount)) => {
                    item.kind = ItemKind::Data;
                    if let Some(year) = observation.year {
                        item.amounts.insert(year.clone(), amount.to_string());
                    }
                    RecordOutcome::PromotedToData
                }
                (ItemKind::Header, None) => {
                    if let Some(year) = observation.year {
                        item.header_years.insert(year.clone());
                    }
                    RecordOutcome::HeaderYearAdded
                }
            };
        }

        let mut item = LineItem {
            unique_key: unique_key.to_string(),
            display_name: observation.display_name.to_string(),
            depth: path_depth(unique_key),
            position: observation.position,
            kind: ItemKind::Header,
            amounts: BTreeMap::new(),
            header_years: BTreeSet::new(),
        };
        match (observation.amount, observation.year) {
            (Some(amount), Some(year)) => {
                item.kind = ItemKind::Data;
                item.amounts.insert(year.clone(), amount.to_string());
            }
            (Some(_), None) => item.kind = ItemKind::Data,
            (None, Some(year)) => {
                item.header_years.insert(year.clone());
            }
            (None, None) => {}
        }

        self.insert_ordered(unique_key, observation.parent_key);
        self.items.insert(unique_key.to_string(), item);
        RecordOutcome::Inserted
    }

    /// Places a new key right after the run of deeper entries that follows
    /// its parent, or at the end when the parent is not listed. A non-total
    /// key stops in front of a sibling total inside that run.
    fn insert_ordered(&mut self, unique_key: &str, parent_key: Option<&str>) {
        let parent_index =
            parent_key.and_then(|parent| self.order.iter().position(|key| key == parent));

        let Some(parent_index) = parent_index else {
            self.order.push(unique_key.to_string());
            return;
        };

        let parent_depth = path_depth(&self.order[parent_index]);
        let sibling_depth = (!is_total_key(unique_key)).then(|| path_depth(unique_key));
        let mut index = parent_index + 1;
        while index < self.order.len() {
            let depth = path_depth(&self.order[index]);
            if depth <= parent_depth
                || (Some(depth) == sibling_depth && is_total_key(&self.order[index]))
            {
                break;
            }
            index += 1;
        }
        self.order.insert(index, unique_key.to_string());
    }
}
