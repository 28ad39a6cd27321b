use unicode_normalization::UnicodeNormalization;

/// One step of canonical-name folding.
#[derive(Debug, Clone, Copy)]
pub(crate) enum FoldRule {
    /// NFKC: full-width latin/digits and half-width kana to their usual forms.
    WidthFold,
    StripWhitespace,
    Strip(&'static [char]),
    Replace(&'static [char], char),
}

pub(crate) const CANONICAL_RULES: &[FoldRule] = &[
    FoldRule::WidthFold,
    FoldRule::StripWhitespace,
    FoldRule::Strip(&['・', '･', '·', '。', '．', '.', '、', '，', ',']),
    FoldRule::Replace(&['（', '〔', '［', '【', '['], '('),
    FoldRule::Replace(&['）', '〕', '］', '】', ']'], ')'),
];

/// Comparison key for an item label. Never used for display.
pub(crate) fn canonicalize(input: &str) -> String {
    apply_rules(input, CANONICAL_RULES)
}

pub(crate) fn apply_rules(input: &str, rules: &[FoldRule]) -> String {
    let mut value = input.to_string();
    for rule in rules {
        value = match rule {
            FoldRule::WidthFold => value.nfkc().collect(),
            FoldRule::StripWhitespace => value.chars().filter(|ch| !ch.is_whitespace()).collect(),
            FoldRule::Strip(chars) => value.chars().filter(|ch| !chars.contains(ch)).collect(),
            FoldRule::Replace(chars, target) => value
                .chars()
                .map(|ch| if chars.contains(&ch) { *target } else { ch })
                .collect(),
        };
    }
    value
}
