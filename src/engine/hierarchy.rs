use tracing::debug;

use super::*;

#[derive(Debug, Clone)]
pub(crate) struct StackEntry {
    pub level: usize,
    pub raw_name: String,
    pub canonical: String,
    pub unique_key: String,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct LandmarkContext {
    pub major: Option<(MajorSection, String)>,
    pub sub: Option<(SubSection, String)>,
    pub pl_subsection: Option<String>,
}

impl LandmarkContext {
    fn major_label(&self) -> Option<&str> {
        self.major.as_ref().map(|(_, label)| label.as_str())
    }

    fn sub_label(&self) -> Option<&str> {
        self.sub.as_ref().map(|(_, label)| label.as_str())
    }
}

/// Transient state of the main pass. Everything except the year is reset
/// at each statement marker.
#[derive(Debug, Default)]
pub(crate) struct ParseContext {
    pub family: Option<StatementFamily>,
    pub year: Option<YearSnapshot>,
    pub year_index: usize,
    pub stack: Vec<StackEntry>,
    pub landmarks: LandmarkContext,
}

impl ParseContext {
    fn enter_year(&mut self, year: &YearSnapshot) {
        self.year_index += 1;
        self.year = Some(year.clone());
    }

    fn enter_statement(&mut self, family: Option<StatementFamily>) {
        self.family = family;
        self.stack.clear();
        self.landmarks = LandmarkContext::default();
    }

    /// Balance-sheet section captions. A new major section clears the stack
    /// and the sub-section.
    fn update_landmarks(&mut self, canonical: &str) {
        if let Some(section) = match_major(canonical) {
            let changed = self
                .landmarks
                .major
                .as_ref()
                .is_none_or(|(current, _)| *current != section);
            if changed {
                self.landmarks.major = Some((section, canonical.to_string()));
                self.stack.clear();
            }
            self.landmarks.sub = None;
            return;
        }

        if let Some(section) = match_sub(canonical) {
            let changed = self
                .landmarks
                .sub
                .as_ref()
                .is_none_or(|(current, _)| *current != section);
            if changed {
                self.landmarks.sub = Some((section, canonical.to_string()));
            }
        }
    }

    fn update_pl_subsection(&mut self, canonical: &str) {
        match match_pl_subsection(canonical) {
            Some(PlSubsectionAction::Open(label)) => {
                self.landmarks.pl_subsection = Some(label.to_string());
            }
            Some(PlSubsectionAction::OpenWithOwnName) => {
                self.landmarks.pl_subsection = Some(canonical.to_string());
            }
            Some(PlSubsectionAction::Clear) => self.landmarks.pl_subsection = None,
            None => {}
        }
    }

    fn pop_to_level(&mut self, level: usize) {
        while self.stack.last().is_some_and(|entry| entry.level >= level) {
            self.stack.pop();
        }
    }

    /// Path of a row in a period without usable indentation: major
    /// landmark, inferred parent sections, own name. Sub-section rows,
    /// their totals included, sit under the sub-section label exactly as
    /// they do in indented periods.
    fn flat_path(&self, family: StatementFamily, canonical: &str) -> Vec<String> {
        let mut path = Vec::new();
        push_unique(&mut path, self.landmarks.major_label());

        match family {
            StatementFamily::BalanceSheet => {
                push_unique(&mut path, self.landmarks.sub_label());
            }
            StatementFamily::IncomeStatement => {
                push_unique(&mut path, self.landmarks.pl_subsection.as_deref());
            }
            _ => {}
        }

        push_unique(&mut path, Some(canonical));
        path
    }

    /// Path of an indented row: landmarks, then the open stack entries.
    fn indented_path(&self, canonical: &str) -> Vec<String> {
        let major = self.landmarks.major_label();
        let sub = self.landmarks.sub_label();

        let mut path = Vec::new();
        path.extend(major.map(str::to_string));
        path.extend(sub.map(str::to_string));
        for entry in &self.stack {
            let name = entry.canonical.as_str();
            if Some(name) == major || Some(name) == sub {
                continue;
            }
            path.push(entry.canonical.clone());
        }
        if path.last().map(String::as_str) != Some(canonical) {
            path.push(canonical.to_string());
        }
        path
    }
}

fn push_unique(path: &mut Vec<String>, segment: Option<&str>) {
    let Some(segment) = segment else {
        return;
    };
    if !path.iter().any(|existing| existing == segment) {
        path.push(segment.to_string());
    }
}

pub(crate) fn build_unique_key(family: StatementFamily, path: &[String]) -> String {
    let mut key = family.key().to_string();
    for segment in path {
        key.push_str(KEY_SEPARATOR);
        key.push_str(segment);
    }
    key
}

/// Main pass: one sequential scan that places every item row of every
/// recognized statement into its family's table.
pub(crate) fn build_hierarchy(
    events: &[DocumentEvent],
    standards: &StandardMap,
    layout: &LayoutReport,
) -> StatementTables {
    let mut tables = StatementTables::new();
    let mut context = ParseContext::default();
    let mut promotions = 0usize;

    for event in events {
        match event {
            DocumentEvent::Year(year) => context.enter_year(year),
            DocumentEvent::Statement { spelling, .. } => {
                let family = spelling.map(|spelling| spelling.family);
                if let Some(family) = family {
                    tables.entry(family).or_default();
                }
                context.enter_statement(family);
            }
            DocumentEvent::Item(item) => {
                let Some(family) = context.family else {
                    continue;
                };
                let outcome = process_item(&mut context, &mut tables, family, item, standards, layout);
                if outcome == RecordOutcome::PromotedToData {
                    promotions += 1;
                }
            }
        }
    }

    debug!(
        statements = tables.len(),
        items = tables.values().map(StatementTable::len).sum::<usize>(),
        header_promotions = promotions,
        "hierarchy pass finished"
    );
    tables
}

fn process_item(
    context: &mut ParseContext,
    tables: &mut StatementTables,
    family: StatementFamily,
    item: &ItemRow,
    standards: &StandardMap,
    layout: &LayoutReport,
) -> RecordOutcome {
    let flat = family.infers_flat_layout()
        && context
            .year
            .as_ref()
            .is_some_and(|year| layout.is_flat(year, standards.standard_of(year)));

    let canonical = item.canonical.as_str();
    let level = if flat {
        infer_flat_level(canonical)
    } else {
        leading_indent(&item.raw_label)
    };

    if family == StatementFamily::BalanceSheet {
        context.update_landmarks(canonical);
    }
    if flat && family == StatementFamily::IncomeStatement {
        context.update_pl_subsection(canonical);
    }

    context.pop_to_level(level);

    let path = if flat {
        context.flat_path(family, canonical)
    } else {
        context.indented_path(canonical)
    };
    let unique_key = build_unique_key(family, &path);
    let parent_key = context.stack.last().map(|entry| entry.unique_key.clone());

    let table = tables.entry(family).or_default();
    let outcome = table.record(
        &unique_key,
        Observation {
            display_name: &item.label,
            year: context.year.as_ref(),
            amount: item.amount.as_deref(),
            position: InsertionPosition {
                year_index: context.year_index,
                row_index: item.line,
            },
            parent_key: parent_key.as_deref(),
        },
    );
    if outcome == RecordOutcome::PromotedToData {
        debug!(
            key = %unique_key,
            line = item.line,
            parent = context.stack.last().map(|entry| entry.raw_name.as_str()).unwrap_or(""),
            "header key promoted to data item"
        );
    }

    if !flat && item.amount.is_some() && is_total_label(canonical) {
        context.stack.pop();
    }

    context.stack.push(StackEntry {
        level,
        raw_name: item.label.clone(),
        canonical: canonical.to_string(),
        unique_key,
    });

    outcome
}
