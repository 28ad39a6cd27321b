//! Fixed keyword tables. Every needle is written in canonical form (see
//! [`canonicalize`](super::canonicalize)) so lookups compare canonical names.

use super::*;

pub(crate) const YEAR_MARKER: &str = "現在";
pub(crate) const STATEMENT_NAME_LABEL: &str = "表名称";
pub(crate) const NIL_AMOUNT: &str = "-";
pub(crate) const ITEM_COLUMN_HEADER: &str = "勘定科目";

/// Characters removed before an amount is checked for being a numeral.
pub(crate) const AMOUNT_IGNORED_CHARS: &[char] = &[',', '-', '+', '△', '▲'];
pub(crate) const NEGATIVE_MARKERS: &[char] = &['△', '▲'];
pub(crate) const INDENT_CHARS: &[char] = &[' ', '\u{3000}', '\t'];

pub(crate) const BOILERPLATE_LABELS: &[&str] = &[
    "企業名",
    "証券コード",
    "証券ｺｰﾄﾞ",
    "（百万円）",
    "（千円）",
    "（円）",
];

pub(crate) const TOTAL_MARKERS: &[&str] = &["合計", "小計"];

/// Balance-sheet vocabulary that only international-standard dumps use.
pub(crate) const IFRS_ONLY_TERMS: &[&str] = &["非流動資産", "非流動負債"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StatementSpelling {
    pub name: &'static str,
    pub family: StatementFamily,
    pub ifrs_evidence: bool,
}

pub(crate) const STATEMENT_SPELLINGS: &[StatementSpelling] = &[
    StatementSpelling {
        name: "連結貸借対照表",
        family: StatementFamily::BalanceSheet,
        ifrs_evidence: false,
    },
    StatementSpelling {
        name: "連結財政状態計算書",
        family: StatementFamily::BalanceSheet,
        ifrs_evidence: true,
    },
    StatementSpelling {
        name: "連結損益計算書",
        family: StatementFamily::IncomeStatement,
        ifrs_evidence: false,
    },
    StatementSpelling {
        name: "連結損益（及び包括利益）計算書",
        family: StatementFamily::IncomeStatement,
        ifrs_evidence: false,
    },
    StatementSpelling {
        name: "連結純損益及びその他の包括利益計算書",
        family: StatementFamily::IncomeStatement,
        ifrs_evidence: false,
    },
    StatementSpelling {
        name: "連結包括利益計算書",
        family: StatementFamily::ComprehensiveIncome,
        ifrs_evidence: false,
    },
    StatementSpelling {
        name: "連結キャッシュ・フロー計算書",
        family: StatementFamily::CashFlow,
        ifrs_evidence: false,
    },
    StatementSpelling {
        name: "連結株主資本等変動計算書",
        family: StatementFamily::ChangesInEquity,
        ifrs_evidence: false,
    },
    StatementSpelling {
        name: "連結持分変動計算書",
        family: StatementFamily::ChangesInEquity,
        ifrs_evidence: false,
    },
];

pub(crate) fn lookup_statement(name: &str) -> Option<&'static StatementSpelling> {
    let canonical = canonicalize(name);
    if canonical.is_empty() {
        return None;
    }
    STATEMENT_SPELLINGS
        .iter()
        .find(|spelling| canonicalize(spelling.name) == canonical)
}

pub(crate) fn is_boilerplate_label(canonical: &str) -> bool {
    BOILERPLATE_LABELS
        .iter()
        .any(|label| canonicalize(label) == canonical)
}

pub(crate) fn is_total_label(canonical: &str) -> bool {
    TOTAL_MARKERS.iter().any(|marker| canonical.contains(marker))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Needle {
    Exact(&'static str),
    Prefix(&'static str),
    Contains(&'static str),
}

impl Needle {
    pub fn matches(self, canonical: &str) -> bool {
        match self {
            Needle::Exact(value) => canonical == value,
            Needle::Prefix(value) => canonical.starts_with(value),
            Needle::Contains(value) => canonical.contains(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MajorSection {
    Assets,
    Liabilities,
    Equity,
    LiabilitiesAndEquity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SubSection {
    Current,
    NonCurrent,
}

pub(crate) const MAJOR_LANDMARKS: &[(Needle, MajorSection)] = &[
    (Needle::Prefix("負債純資産"), MajorSection::LiabilitiesAndEquity),
    (Needle::Prefix("負債及び純資産"), MajorSection::LiabilitiesAndEquity),
    (Needle::Prefix("負債及び資本"), MajorSection::LiabilitiesAndEquity),
    (Needle::Exact("資産の部"), MajorSection::Assets),
    (Needle::Exact("資産"), MajorSection::Assets),
    (Needle::Exact("資産合計"), MajorSection::Assets),
    (Needle::Exact("負債の部"), MajorSection::Liabilities),
    (Needle::Exact("負債"), MajorSection::Liabilities),
    (Needle::Exact("負債合計"), MajorSection::Liabilities),
    (Needle::Exact("純資産の部"), MajorSection::Equity),
    (Needle::Exact("純資産"), MajorSection::Equity),
    (Needle::Exact("純資産合計"), MajorSection::Equity),
    (Needle::Exact("資本の部"), MajorSection::Equity),
    (Needle::Exact("資本"), MajorSection::Equity),
    (Needle::Exact("資本合計"), MajorSection::Equity),
];

pub(crate) const SUB_LANDMARKS: &[(Needle, SubSection)] = &[
    (Needle::Prefix("非流動資産"), SubSection::NonCurrent),
    (Needle::Prefix("非流動負債"), SubSection::NonCurrent),
    (Needle::Prefix("流動資産"), SubSection::Current),
    (Needle::Prefix("流動負債"), SubSection::Current),
    (Needle::Prefix("固定資産"), SubSection::NonCurrent),
    (Needle::Prefix("固定負債"), SubSection::NonCurrent),
];

pub(crate) fn match_major(canonical: &str) -> Option<MajorSection> {
    MAJOR_LANDMARKS
        .iter()
        .find(|(needle, _)| needle.matches(canonical))
        .map(|(_, section)| *section)
}

pub(crate) fn match_sub(canonical: &str) -> Option<SubSection> {
    SUB_LANDMARKS
        .iter()
        .find(|(needle, _)| needle.matches(canonical))
        .map(|(_, section)| *section)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlSubsectionAction {
    Open(&'static str),
    OpenWithOwnName,
    Clear,
}

/// Income-statement blocks that disambiguate repeated captions under flat
/// layout. First match wins.
pub(crate) const PL_SUBSECTION_RULES: &[(Needle, PlSubsectionAction)] = &[
    (Needle::Prefix("その他の包括利益合計"), PlSubsectionAction::Clear),
    (Needle::Exact("当期包括利益"), PlSubsectionAction::Clear),
    (
        Needle::Prefix("純損益に振り替えられることのない"),
        PlSubsectionAction::Open("純損益に振り替えられることのない項目"),
    ),
    (
        Needle::Prefix("純損益に振り替えられる可能性のある"),
        PlSubsectionAction::Open("純損益に振り替えられる可能性のある項目"),
    ),
    (
        Needle::Exact("その他の包括利益"),
        PlSubsectionAction::Open("その他の包括利益"),
    ),
    (Needle::Contains("の帰属"), PlSubsectionAction::OpenWithOwnName),
    (Needle::Prefix("1株当たり"), PlSubsectionAction::OpenWithOwnName),
];

pub(crate) fn match_pl_subsection(canonical: &str) -> Option<PlSubsectionAction> {
    PL_SUBSECTION_RULES
        .iter()
        .find(|(needle, _)| needle.matches(canonical))
        .map(|(_, action)| *action)
}

pub(crate) const FLAT_ROOT_LEVEL: usize = 1;
pub(crate) const FLAT_SECTION_LEVEL: usize = 2;
pub(crate) const FLAT_ITEM_LEVEL: usize = 3;

/// Level of a row in a period whose source lost its indentation.
pub(crate) fn infer_flat_level(canonical: &str) -> usize {
    if match_major(canonical).is_some() {
        FLAT_ROOT_LEVEL
    } else if match_sub(canonical).is_some() {
        FLAT_SECTION_LEVEL
    } else {
        FLAT_ITEM_LEVEL
    }
}

const SHEET_TITLE_OVERRIDES: &[(StatementFamily, AccountingStandard, &str)] = &[(
    StatementFamily::BalanceSheet,
    AccountingStandard::Ifrs,
    "連結財政状態計算書",
)];

pub(crate) fn sheet_title(family: StatementFamily, standard: AccountingStandard) -> String {
    SHEET_TITLE_OVERRIDES
        .iter()
        .find(|(candidate_family, candidate_standard, _)| {
            *candidate_family == family && *candidate_standard == standard
        })
        .map(|(_, _, title)| (*title).to_string())
        .unwrap_or_else(|| format!("{}_{}", family.display_name(), standard.sheet_suffix()))
}
