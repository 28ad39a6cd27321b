use super::*;

fn engine() -> StatementEngine {
    StatementEngine::new(HeuristicConfig::default()).expect("engine should build")
}

fn reconstruct(dump: &str) -> Reconstruction {
    engine().reconstruct(dump)
}

fn year(id: &str) -> YearSnapshot {
    YearSnapshot::new(id)
}

fn classifier() -> RowClassifier {
    RowClassifier::new().expect("classifier should build")
}

fn row(fields: &[&str]) -> Row {
    Row::from_fields(1, fields.iter().map(|field| field.to_string()).collect())
}

fn keys(reconstruction: &Reconstruction, family: StatementFamily) -> Vec<String> {
    reconstruction
        .tables
        .get(&family)
        .map(|table| table.keys().to_vec())
        .unwrap_or_default()
}

/// Ten balance-sheet rows in one year, the first `indented` of them indented.
fn layout_dump(indented: usize) -> String {
    let mut dump = String::from("2024/03/31 現在,,,\n表名称,連結貸借対照表,,\n");
    for index in 0..10 {
        let prefix = if index < indented { "  " } else { "" };
        dump.push_str(&format!("{prefix}勘定項目{index:02},,{},\n", 100 + index));
    }
    dump
}

#[test]
fn split_fields_handles_quotes_and_doubled_quotes() {
    assert_eq!(
        split_fields(r#""1,000",,"say ""hi""",x"#),
        vec!["1,000", "", "say \"hi\"", "x"]
    );
    assert_eq!(split_fields("a,b"), vec!["a", "b"]);
    assert_eq!(split_fields(r#""unterminated,field"#), vec!["unterminated,field"]);
}

#[test]
fn split_fields_keeps_leading_indent_and_ragged_widths() {
    assert_eq!(split_fields("  現金,,500"), vec!["  現金", "", "500"]);
    assert_eq!(split_fields("\u{3000}売掛金,,1,2,3,4"), vec!["\u{3000}売掛金", "", "1", "2", "3", "4"]);

    let rows = tokenize_document("a,b,c,d,e,f\nx\n");
    assert_eq!(rows[0].field(3), "d");
    assert_eq!(rows[0].field(4), "");
    assert_eq!(rows[1].field(1), "");
}

#[test]
fn tokenize_document_skips_blank_lines_and_pads_short_rows() {
    let rows = tokenize_document("\u{feff}a,b\n\n   \n  c\n");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].line, 1);
    assert_eq!(rows[0].field(1), "b");
    assert_eq!(rows[0].field(3), "");
    assert_eq!(rows[1].line, 4);
    assert_eq!(rows[1].raw(0), "  c");
    assert_eq!(rows[1].field(0), "c");
}

#[test]
fn canonicalize_folds_width_punctuation_and_brackets() {
    assert_eq!(canonicalize(" 現金・預金 "), "現金預金");
    assert_eq!(canonicalize("（１）売上高"), "(1)売上高");
    assert_eq!(canonicalize("ｿﾌﾄｳｪｱ"), "ソフトウェア");
    assert_eq!(canonicalize("【注記】"), "(注記)");
    assert_eq!(canonicalize("連結損益（及び包括利益）計算書"), "連結損益(及び包括利益)計算書");
}

#[test]
fn classify_row_recognizes_year_markers_and_pads_dates() {
    let classifier = classifier();
    assert_eq!(
        classifier.classify_row(&row(&["2024/3/31 現在"])),
        RowClass::YearMarker(year("2024/03/31"))
    );
    assert_eq!(
        classifier.classify_row(&row(&["２０２３年３月３１日現在"])),
        RowClass::YearMarker(year("2023/03/31"))
    );
    assert_eq!(
        classifier.classify_row(&row(&["現在"])),
        RowClass::Item,
        "the marker word alone is not a year marker"
    );
}

#[test]
fn classify_row_recognizes_statement_markers() {
    let classifier = classifier();
    assert_eq!(
        classifier.classify_row(&row(&["表名称", "連結貸借対照表"])),
        RowClass::StatementMarker("連結貸借対照表".to_string())
    );
    assert_eq!(
        classifier.classify_row(&row(&["連結損益計算書", "", "", ""])),
        RowClass::StatementMarker("連結損益計算書".to_string())
    );
    assert_eq!(
        classifier.classify_row(&row(&["連結損益計算書", "", "100", ""])),
        RowClass::Item,
        "a family name followed by an amount is a line item"
    );
}

#[test]
fn classify_row_discards_boilerplate_and_date_ranges() {
    let classifier = classifier();
    assert_eq!(classifier.classify_row(&row(&["企業名", "サンプル株式会社"])), RowClass::Noise);
    assert_eq!(classifier.classify_row(&row(&["証券ｺｰﾄﾞ", "1234"])), RowClass::Noise);
    assert_eq!(classifier.classify_row(&row(&["（百万円）"])), RowClass::Noise);
    assert_eq!(
        classifier.classify_row(&row(&["2023/04/01-2024/03/31"])),
        RowClass::Noise
    );
    assert_eq!(classifier.classify_row(&row(&["", "", "100"])), RowClass::Noise);
    assert_eq!(classifier.classify_row(&row(&["現金及び預金", "", "100"])), RowClass::Item);
}

#[test]
fn parse_amount_accepts_numerals_nil_dash_and_sign_markers() {
    assert_eq!(parse_amount("1,234"), Some("1,234"));
    assert_eq!(parse_amount("-"), Some("-"));
    assert_eq!(parse_amount("△500"), Some("△500"));
    assert_eq!(parse_amount("-5"), Some("-5"));
    assert_eq!(parse_amount("12.5"), Some("12.5"));
    assert_eq!(parse_amount("12."), None);
    assert_eq!(parse_amount("百万円"), None);
    assert_eq!(parse_amount(""), None);
}

#[test]
fn item_amount_falls_back_to_fourth_field() {
    let events = classifier().classify_document(&tokenize_document(
        "表名称,連結貸借対照表,,\n現金,,,250\n売掛金,,注記,\n",
    ));
    let amounts = events
        .iter()
        .filter_map(|event| match event {
            DocumentEvent::Item(item) => Some(item.amount.clone()),
            _ => None,
        })
        .collect::<Vec<Option<String>>>();
    assert_eq!(amounts, vec![Some("250".to_string()), None]);
}

#[test]
fn resolve_monotonic_marks_every_later_year_ifrs() {
    let years = vec![year("2021/03/31"), year("2022/03/31"), year("2023/03/31")];
    let marks = BTreeMap::from([(year("2022/03/31"), StandardEvidence::IfrsStatementName)]);

    let map = resolve_monotonic(years, &marks);
    assert_eq!(map.standard_of(&year("2021/03/31")), AccountingStandard::DomesticGaap);
    assert_eq!(map.standard_of(&year("2022/03/31")), AccountingStandard::Ifrs);
    assert_eq!(map.standard_of(&year("2023/03/31")), AccountingStandard::Ifrs);
    assert_eq!(
        map.evidence_of(&year("2023/03/31")),
        StandardEvidence::InheritedFromEarlierYear
    );
    assert_eq!(
        map.years_with(AccountingStandard::DomesticGaap),
        vec![year("2021/03/31")]
    );
}

#[test]
fn ifrs_only_vocabulary_marks_a_year_ifrs() {
    let reconstruction = reconstruct(
        "\
2023/03/31 現在,,,
表名称,連結貸借対照表,,
流動資産合計,,100,
2024/03/31 現在,,,
表名称,連結貸借対照表,,
非流動資産合計,,100,
",
    );
    let standards = &reconstruction.standards;
    assert_eq!(standards.standard_of(&year("2023/03/31")), AccountingStandard::DomesticGaap);
    assert_eq!(standards.standard_of(&year("2024/03/31")), AccountingStandard::Ifrs);
    assert_eq!(
        standards.evidence_of(&year("2024/03/31")),
        StandardEvidence::IfrsVocabulary
    );
}

#[test]
fn layout_is_flat_only_strictly_below_threshold() {
    for (indented, expected_flat) in [(2, true), (3, false), (4, false)] {
        let reconstruction = reconstruct(&layout_dump(indented));
        let buckets = reconstruction.layout.buckets();
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].candidate_rows, 10);
        assert_eq!(buckets[0].indented_rows, indented);
        assert_eq!(
            buckets[0].flat, expected_flat,
            "{indented} of 10 indented rows"
        );
        assert_eq!(
            reconstruction
                .layout
                .is_flat(&year("2024/03/31"), AccountingStandard::DomesticGaap),
            expected_flat
        );
    }
}

#[test]
fn layout_threshold_follows_heuristic_config() {
    let config = HeuristicConfig {
        flat_indent_threshold: 0.5,
        ..HeuristicConfig::default()
    };
    let reconstruction = StatementEngine::new(config)
        .expect("engine should build")
        .reconstruct(&layout_dump(4));
    assert!(reconstruction.layout.buckets()[0].flat);
}

#[test]
fn layout_ignores_short_labels_and_empty_buckets_are_not_flat() {
    let reconstruction = reconstruct(
        "\
2024/03/31 現在,,,
表名称,連結貸借対照表,,
現金,,100,
  建物,,50,
表名称,連結キャッシュ・フロー計算書,,
営業活動によるキャッシュ・フロー,,,
",
    );
    let bucket = &reconstruction.layout.buckets()[0];
    assert_eq!(bucket.candidate_rows, 0);
    assert_eq!(bucket.indent_ratio, None);
    assert!(!bucket.flat);
    assert_eq!(reconstruction.layout.flat_periods().count(), 0);
}

#[test]
fn end_to_end_two_years_produce_one_domestic_balance_sheet() {
    let reconstruction = reconstruct(
        "\
2023/03/31 現在,,,
表名称,連結貸借対照表,,
\"資産合計\",\"\",\"1,000\",\"\"
\"  現金\",\"\",\"500\",\"\"
2024/03/31現在,,,
表名称,連結貸借対照表,,
\"資産合計\",\"\",\"1,000\",\"\"
\"  現金\",\"\",\"600\",\"\"
",
    );

    let pivots = reconstruction.pivot_tables();
    assert_eq!(pivots.len(), 1);
    let table = &pivots[0];
    assert_eq!(table.family, StatementFamily::BalanceSheet);
    assert_eq!(table.standard, AccountingStandard::DomesticGaap);
    assert_eq!(table.sheet_title, "連結貸借対照表_日本基準");
    assert_eq!(table.years, vec![year("2023/03/31"), year("2024/03/31")]);
    assert_eq!(table.header_row, vec!["勘定科目", "2023/03/31", "2024/03/31"]);

    let row_keys = table
        .rows
        .iter()
        .map(|row| row.unique_key.as_str())
        .collect::<Vec<&str>>();
    assert_eq!(
        row_keys,
        vec!["連結貸借対照表|資産合計", "連結貸借対照表|資産合計|現金"]
    );
    assert_eq!(table.rows[1].display_name, "現金");
    assert_eq!(table.rows[1].cells, vec![Cell::Number(500.0), Cell::Number(600.0)]);
    assert_eq!(table.rows[0].cells, vec![Cell::Number(1000.0), Cell::Number(1000.0)]);
}

#[test]
fn ifrs_statement_name_splits_later_years_into_their_own_sheet() {
    let reconstruction = reconstruct(
        "\
2022/03/31 現在,,,
表名称,連結貸借対照表,,
資産合計,,900,
  現金,,400,
2023/03/31 現在,,,
表名称,連結貸借対照表,,
資産合計,,\"1,000\",
  現金,,500,
2024/03/31 現在,,,
表名称,連結財政状態計算書,,
資産合計,,\"1,200\",
  現金,,700,
",
    );

    assert_eq!(reconstruction.tables.len(), 1, "both spellings share one family");
    assert_eq!(
        reconstruction.standards.years_with(AccountingStandard::Ifrs),
        vec![year("2024/03/31")]
    );

    let pivots = reconstruction.pivot_tables();
    assert_eq!(pivots.len(), 2);
    assert_eq!(pivots[0].sheet_title, "連結貸借対照表_日本基準");
    assert_eq!(pivots[0].years, vec![year("2022/03/31"), year("2023/03/31")]);
    assert_eq!(pivots[1].sheet_title, "連結財政状態計算書");
    assert_eq!(pivots[1].standard, AccountingStandard::Ifrs);
    assert_eq!(pivots[1].years, vec![year("2024/03/31")]);
    assert_eq!(pivots[1].rows[1].cells, vec![Cell::Number(700.0)]);
}

#[test]
fn a_key_with_any_amount_is_data_and_keeps_earlier_header_years() {
    let reconstruction = reconstruct(
        "\
2023/03/31 現在,,,
表名称,連結キャッシュ・フロー計算書,,
その他の収入,,,
受取利息,,10,
2024/03/31 現在,,,
表名称,連結キャッシュ・フロー計算書,,
その他の収入,,30,
受取利息,,,
",
    );
    let table = &reconstruction.tables[&StatementFamily::CashFlow];

    let promoted = table
        .get("連結キャッシュ・フロー計算書|その他の収入")
        .expect("promoted key should exist");
    assert_eq!(promoted.kind, ItemKind::Data);
    assert_eq!(promoted.amounts.len(), 1);
    assert_eq!(promoted.amounts[&year("2024/03/31")], "30");
    assert!(promoted.header_years.contains(&year("2023/03/31")));

    let kept = table
        .get("連結キャッシュ・フロー計算書|受取利息")
        .expect("data key should exist");
    assert_eq!(kept.kind, ItemKind::Data);
    assert_eq!(kept.amounts[&year("2023/03/31")], "10");
    assert!(kept.header_years.is_empty());

    let pivot = &reconstruction.pivot_tables()[0];
    assert_eq!(pivot.rows[0].cells, vec![Cell::Empty, Cell::Number(30.0)]);
    assert!(!pivot.rows[0].header_only);
}

#[test]
fn new_later_year_items_land_after_their_siblings() {
    let reconstruction = reconstruct(
        "\
2023/03/31 現在,,,
表名称,連結貸借対照表,,
流動資産,,,
  現金,,100,
  売掛金,,200,
固定資産,,,
  建物,,300,
2024/03/31 現在,,,
表名称,連結貸借対照表,,
流動資産,,,
  現金,,110,
  売掛金,,210,
  有価証券,,50,
固定資産,,,
  建物,,290,
",
    );

    assert_eq!(
        keys(&reconstruction, StatementFamily::BalanceSheet),
        vec![
            "連結貸借対照表|流動資産",
            "連結貸借対照表|流動資産|現金",
            "連結貸借対照表|流動資産|売掛金",
            "連結貸借対照表|流動資産|有価証券",
            "連結貸借対照表|固定資産",
            "連結貸借対照表|固定資産|建物",
        ]
    );

    let pivot = &reconstruction.pivot_tables()[0];
    assert_eq!(pivot.rows.len(), 6);
    assert!(pivot.rows[0].header_only);
    assert_eq!(pivot.rows[0].cells, vec![Cell::Empty, Cell::Empty]);
    assert_eq!(pivot.rows[3].cells, vec![Cell::Empty, Cell::Number(50.0)]);
}

#[test]
fn headers_without_data_below_are_dropped_from_pivots() {
    let reconstruction = reconstruct(
        "\
2024/03/31 現在,,,
表名称,連結キャッシュ・フロー計算書,,
営業活動によるキャッシュ・フロー,,,
  税金等調整前当期純利益,,100,
財務活動によるキャッシュ・フロー,,,
  注記事項,,,
",
    );

    let table = &reconstruction.tables[&StatementFamily::CashFlow];
    assert_eq!(table.len(), 4);

    let pivot = &reconstruction.pivot_tables()[0];
    let names = pivot
        .rows
        .iter()
        .map(|row| row.display_name.as_str())
        .collect::<Vec<&str>>();
    assert_eq!(
        names,
        vec!["営業活動によるキャッシュ・フロー", "税金等調整前当期純利益"]
    );
}

#[test]
fn header_retention_stops_at_next_header_of_same_depth() {
    let items = [
        ("連結キャッシュ・フロー計算書|A", false),
        ("連結キャッシュ・フロー計算書|B", false),
        ("連結キャッシュ・フロー計算書|B|x", true),
    ]
    .into_iter()
    .map(|(key, data)| {
        let mut item = LineItem {
            unique_key: key.to_string(),
            display_name: key.to_string(),
            depth: path_depth(key),
            position: InsertionPosition {
                year_index: 1,
                row_index: 1,
            },
            kind: ItemKind::Header,
            amounts: BTreeMap::new(),
            header_years: BTreeSet::from([year("2024/03/31")]),
        };
        if data {
            item.kind = ItemKind::Data;
            item.amounts.insert(year("2024/03/31"), "1".to_string());
        }
        item
    })
    .collect::<Vec<LineItem>>();
    let refs = items.iter().collect::<Vec<&LineItem>>();
    let years = [year("2024/03/31")];

    assert!(!header_has_data_below(&refs, 0, &years));
    assert!(header_has_data_below(&refs, 1, &years));
    assert!(!header_has_data_below(&refs, 2, &years));
}

#[test]
fn total_rows_close_their_section() {
    let reconstruction = reconstruct(
        "\
2024/03/31 現在,,,
表名称,連結キャッシュ・フロー計算書,,
営業活動によるキャッシュ・フロー,,,
  税金等調整前当期純利益,,100,
  小計,,100,
  利息の支払額,,-5,
",
    );

    assert_eq!(
        keys(&reconstruction, StatementFamily::CashFlow),
        vec![
            "連結キャッシュ・フロー計算書|営業活動によるキャッシュフロー",
            "連結キャッシュ・フロー計算書|営業活動によるキャッシュフロー|税金等調整前当期純利益",
            "連結キャッシュ・フロー計算書|営業活動によるキャッシュフロー|小計",
            "連結キャッシュ・フロー計算書|利息の支払額",
        ]
    );
    let pivot = &reconstruction.pivot_tables()[0];
    assert_eq!(pivot.rows[3].cells, vec![Cell::Number(-5.0)]);
}

#[test]
fn flat_balance_sheet_infers_sections_from_landmarks() {
    let reconstruction = reconstruct(
        "\
2024/03/31 現在,,,
表名称,連結貸借対照表,,
資産の部,,,
流動資産,,,
現金及び預金,,100,
固定資産,,,
建物,,50,
負債の部,,,
流動負債,,,
買掛金,,30,
",
    );

    assert!(reconstruction
        .layout
        .is_flat(&year("2024/03/31"), AccountingStandard::DomesticGaap));
    assert_eq!(
        keys(&reconstruction, StatementFamily::BalanceSheet),
        vec![
            "連結貸借対照表|資産の部",
            "連結貸借対照表|資産の部|流動資産",
            "連結貸借対照表|資産の部|流動資産|現金及び預金",
            "連結貸借対照表|資産の部|固定資産",
            "連結貸借対照表|資産の部|固定資産|建物",
            "連結貸借対照表|負債の部",
            "連結貸借対照表|負債の部|流動負債",
            "連結貸借対照表|負債の部|流動負債|買掛金",
        ]
    );
}

#[test]
fn flat_income_statement_separates_repeated_attribution_captions() {
    let reconstruction = reconstruct(
        "\
2024/03/31 現在,,,
連結損益計算書,,,
売上高,,1000,
当期純利益の帰属,,,
親会社の所有者,,80,
非支配持分,,20,
当期包括利益の帰属,,,
親会社の所有者,,90,
非支配持分,,25,
",
    );

    assert_eq!(
        keys(&reconstruction, StatementFamily::IncomeStatement),
        vec![
            "連結損益計算書|売上高",
            "連結損益計算書|当期純利益の帰属",
            "連結損益計算書|当期純利益の帰属|親会社の所有者",
            "連結損益計算書|当期純利益の帰属|非支配持分",
            "連結損益計算書|当期包括利益の帰属",
            "連結損益計算書|当期包括利益の帰属|親会社の所有者",
            "連結損益計算書|当期包括利益の帰属|非支配持分",
        ]
    );
}

#[test]
fn cells_coerce_numbers_and_keep_nil_dash_as_text() {
    assert_eq!(Cell::from_amount(Some("1,234")), Cell::Number(1234.0));
    assert_eq!(Cell::from_amount(Some("△1,000")), Cell::Number(-1000.0));
    assert_eq!(Cell::from_amount(Some("-")), Cell::Text("-".to_string()));
    assert_eq!(Cell::from_amount(None), Cell::Empty);
    assert_eq!(
        serde_json::to_value(Cell::Number(1234.0)).expect("cell should serialize"),
        serde_json::json!(1234.0)
    );
}

#[test]
fn unrecognized_statements_and_empty_input_yield_no_tables() {
    let empty = reconstruct("");
    assert!(empty.tables.is_empty());
    assert!(empty.pivot_tables().is_empty());

    let unknown = reconstruct(
        "\
2024/03/31 現在,,,
表名称,セグメント情報,,
売上高,,100,
",
    );
    assert!(unknown.tables.is_empty());
    assert_eq!(unknown.item_row_count, 0);
    assert!(unknown.pivot_tables().is_empty());
}

#[test]
fn rows_before_any_year_marker_have_no_amounts() {
    let reconstruction = reconstruct(
        "\
表名称,連結キャッシュ・フロー計算書,,
受取利息,,10,
",
    );
    let item = reconstruction.tables[&StatementFamily::CashFlow]
        .get("連結キャッシュ・フロー計算書|受取利息")
        .expect("key should be placed");
    assert!(item.amounts.is_empty());
    assert!(reconstruction.years().is_empty());
    assert!(reconstruction.pivot_tables().is_empty());
}

#[test]
fn reconstruction_is_deterministic() {
    let dump = layout_dump(5);
    assert_eq!(reconstruct(&dump).pivot_tables(), reconstruct(&dump).pivot_tables());
}

#[test]
fn sheet_titles_follow_family_and_standard() {
    assert_eq!(
        sheet_title(StatementFamily::CashFlow, AccountingStandard::Ifrs),
        "連結キャッシュ・フロー計算書_IFRS"
    );
    assert_eq!(
        sheet_title(StatementFamily::BalanceSheet, AccountingStandard::Ifrs),
        "連結財政状態計算書"
    );
}

#[test]
fn subtotal_keys_match_between_indented_and_flat_years() {
    let reconstruction = reconstruct(
        "\
2023/03/31 現在,,,
表名称,連結貸借対照表,,
資産の部,,,
  流動資産,,,
    現金及び預金,,200,
    売掛金,,100,
  流動資産合計,,300,
  固定資産,,,
    建物,,50,
  固定資産合計,,50,
資産合計,,350,
2024/03/31 現在,,,
表名称,連結貸借対照表,,
資産の部,,,
流動資産,,,
現金及び預金,,220,
売掛金,,90,
有価証券,,20,
流動資産合計,,330,
固定資産,,,
建物,,45,
固定資産合計,,45,
資産合計,,375,
",
    );

    assert!(!reconstruction
        .layout
        .is_flat(&year("2023/03/31"), AccountingStandard::DomesticGaap));
    assert!(reconstruction
        .layout
        .is_flat(&year("2024/03/31"), AccountingStandard::DomesticGaap));

    assert_eq!(
        keys(&reconstruction, StatementFamily::BalanceSheet),
        vec![
            "連結貸借対照表|資産の部",
            "連結貸借対照表|資産の部|流動資産",
            "連結貸借対照表|資産の部|流動資産|現金及び預金",
            "連結貸借対照表|資産の部|流動資産|売掛金",
            "連結貸借対照表|資産の部|流動資産|有価証券",
            "連結貸借対照表|資産の部|流動資産|流動資産合計",
            "連結貸借対照表|資産の部|固定資産",
            "連結貸借対照表|資産の部|固定資産|建物",
            "連結貸借対照表|資産の部|固定資産|固定資産合計",
            "連結貸借対照表|資産の部|資産合計",
        ]
    );

    let pivot = &reconstruction.pivot_tables()[0];
    let subtotal = pivot
        .rows
        .iter()
        .find(|row| row.display_name == "流動資産合計")
        .expect("subtotal row should be pivoted");
    assert_eq!(subtotal.cells, vec![Cell::Number(300.0), Cell::Number(330.0)]);
}

#[test]
fn new_items_are_placed_before_their_section_total() {
    let mut table = StatementTable::default();
    let first_year = year("2023/03/31");
    let observe = |table: &mut StatementTable, key: &str, parent: Option<&str>, row_index: usize| {
        table.record(
            key,
            Observation {
                display_name: key.rsplit(KEY_SEPARATOR).next().unwrap_or(key),
                year: Some(&first_year),
                amount: Some("1"),
                position: InsertionPosition {
                    year_index: 1,
                    row_index,
                },
                parent_key: parent,
            },
        );
    };

    observe(&mut table, "BS|資産の部", None, 1);
    observe(&mut table, "BS|資産の部|流動資産", Some("BS|資産の部"), 2);
    observe(&mut table, "BS|資産の部|流動資産|現金", Some("BS|資産の部|流動資産"), 3);
    observe(&mut table, "BS|資産の部|流動資産|流動資産合計", Some("BS|資産の部"), 4);
    observe(&mut table, "BS|資産の部|資産合計", None, 5);
    observe(&mut table, "BS|資産の部|流動資産|有価証券", Some("BS|資産の部|流動資産"), 6);
    observe(&mut table, "BS|資産の部|繰延資産", Some("BS|資産の部"), 7);

    assert_eq!(
        table.keys(),
        [
            "BS|資産の部",
            "BS|資産の部|流動資産",
            "BS|資産の部|流動資産|現金",
            "BS|資産の部|流動資産|有価証券",
            "BS|資産の部|流動資産|流動資産合計",
            "BS|資産の部|繰延資産",
            "BS|資産の部|資産合計",
        ]
    );
}
