use csv::{ReaderBuilder, StringRecord, Trim};

/// Meaningful columns of an item row: label, secondary label, primary
/// amount, fallback amount.
pub(crate) const ROW_WIDTH: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Row {
    pub line: usize,
    fields: [String; ROW_WIDTH],
}

impl Row {
    pub fn from_fields(line: usize, fields: Vec<String>) -> Self {
        let mut row = Row {
            line,
            ..Row::default()
        };
        for (slot, value) in row.fields.iter_mut().zip(fields) {
            *slot = value;
        }
        row
    }

    /// Untrimmed field; leading whitespace of field 0 carries indentation.
    pub fn raw(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn field(&self, index: usize) -> &str {
        self.raw(index).trim()
    }
}

pub(crate) fn tokenize_document(text: &str) -> Vec<Row> {
    text.trim_start_matches('\u{feff}')
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| Row::from_fields(index + 1, split_fields(line)))
        .collect()
}

/// Splits one line into fields. Each line is read on its own so that a
/// stray quote never swallows the rows after it, and field 0 keeps its
/// leading whitespace.
pub(crate) fn split_fields(line: &str) -> Vec<String> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::None)
        .from_reader(line.as_bytes());

    let mut record = StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => record.iter().map(str::to_string).collect(),
        Ok(false) => Vec::new(),
        Err(_) => vec![line.to_string()],
    }
}
