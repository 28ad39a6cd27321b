use serde::Serialize;
use tracing::debug;

use super::*;

/// Why a year ended up with its resolved standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StandardEvidence {
    IfrsStatementName,
    IfrsVocabulary,
    InheritedFromEarlierYear,
    Default,
}

impl StandardEvidence {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IfrsStatementName => "ifrs_statement_name",
            Self::IfrsVocabulary => "ifrs_vocabulary",
            Self::InheritedFromEarlierYear => "inherited_from_earlier_year",
            Self::Default => "default",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StandardMap {
    years: Vec<YearSnapshot>,
    resolved: BTreeMap<YearSnapshot, (AccountingStandard, StandardEvidence)>,
}

impl StandardMap {
    pub fn years(&self) -> &[YearSnapshot] {
        &self.years
    }

    /// Years never seen in the dump read as domestic.
    pub fn standard_of(&self, year: &YearSnapshot) -> AccountingStandard {
        self.resolved
            .get(year)
            .map(|(standard, _)| *standard)
            .unwrap_or(AccountingStandard::DomesticGaap)
    }

    pub fn evidence_of(&self, year: &YearSnapshot) -> StandardEvidence {
        self.resolved
            .get(year)
            .map(|(_, evidence)| *evidence)
            .unwrap_or(StandardEvidence::Default)
    }

    pub fn years_with(&self, standard: AccountingStandard) -> Vec<YearSnapshot> {
        self.years
            .iter()
            .filter(|year| self.standard_of(year) == standard)
            .cloned()
            .collect()
    }
}

/// Pass A: collects explicit international-standard evidence per year and
/// resolves the final, monotonic standard of every year on the axis.
pub(crate) fn classify_standards(events: &[DocumentEvent]) -> StandardMap {
    let mut years = BTreeSet::<YearSnapshot>::new();
    let mut marks = BTreeMap::<YearSnapshot, StandardEvidence>::new();
    let mut current_year: Option<&YearSnapshot> = None;
    let mut in_balance_sheet = false;

    for event in events {
        match event {
            DocumentEvent::Year(year) => {
                years.insert(year.clone());
                current_year = Some(year);
            }
            DocumentEvent::Statement { spelling, .. } => {
                in_balance_sheet = spelling
                    .is_some_and(|spelling| spelling.family == StatementFamily::BalanceSheet);

                let ifrs_name = spelling.is_some_and(|spelling| spelling.ifrs_evidence);
                if let (true, Some(year)) = (ifrs_name, current_year) {
                    marks
                        .entry(year.clone())
                        .or_insert(StandardEvidence::IfrsStatementName);
                }
            }
            DocumentEvent::Item(item) => {
                if !in_balance_sheet {
                    continue;
                }
                let Some(year) = current_year else {
                    continue;
                };
                if IFRS_ONLY_TERMS
                    .iter()
                    .any(|term| item.canonical.contains(term))
                {
                    marks
                        .entry(year.clone())
                        .or_insert(StandardEvidence::IfrsVocabulary);
                }
            }
        }
    }

    let map = resolve_monotonic(years.into_iter().collect(), &marks);
    debug!(
        years = map.years.len(),
        ifrs_years = map.years_with(AccountingStandard::Ifrs).len(),
        "standard pre-scan finished"
    );
    map
}

/// Once a year is international-standard, every later year is too. `years`
/// must be in chronological order.
pub(crate) fn resolve_monotonic(
    years: Vec<YearSnapshot>,
    marks: &BTreeMap<YearSnapshot, StandardEvidence>,
) -> StandardMap {
    let mut resolved = BTreeMap::new();
    let mut adopted = false;

    for year in &years {
        let entry = match marks.get(year) {
            Some(evidence) => {
                adopted = true;
                (AccountingStandard::Ifrs, *evidence)
            }
            None if adopted => (
                AccountingStandard::Ifrs,
                StandardEvidence::InheritedFromEarlierYear,
            ),
            None => (AccountingStandard::DomesticGaap, StandardEvidence::Default),
        };
        resolved.insert(year.clone(), entry);
    }

    StandardMap { years, resolved }
}
