use super::*;

pub fn run(args: ConvertArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("run-{}", utc_compact_string(started_ts));

    let output_dir = args.output_dir.clone();
    ensure_directory(&output_dir)?;

    let json_path = args
        .json_path
        .clone()
        .unwrap_or_else(|| default_json_path(&output_dir, &args.input));
    let manifest_path = args.manifest_path.clone().unwrap_or_else(|| {
        output_dir.join("manifests").join(format!(
            "convert_run_{}.json",
            utc_compact_string(started_ts)
        ))
    });

    info!(input = %args.input.display(), run_id = %run_id, "starting convert");

    let loaded = load_dump(&args.input, args.encoding, &args.heuristics)?;
    let reconstruction = &loaded.reconstruction;
    let sheets = reconstruction.pivot_tables();
    let years = year_standard_entries(reconstruction);

    let mut warnings = Vec::<String>::new();
    if loaded.source.replaced_malformed {
        warnings.push(format!(
            "input contained bytes that are not valid {}; they were replaced",
            loaded.source.encoding
        ));
    }
    if reconstruction.tables.is_empty() {
        warn!(input = %args.input.display(), "no recognized statements found");
        warnings.push("no recognized statement was found; export is empty".to_string());
    } else if sheets.is_empty() {
        warnings.push("statements were found but no line item carried an amount".to_string());
    }
    for period in reconstruction.layout.flat_periods() {
        info!(year = %period.0, standard = %period.1, "period has no usable indentation; inferring levels");
    }

    let export = PivotExport {
        export_version: 1,
        run_id: run_id.clone(),
        generated_at: now_utc_string(),
        source: loaded.source.clone(),
        years: years.clone(),
        sheets,
    };
    write_json_pretty(&json_path, &export)?;
    info!(path = %json_path.display(), sheets = export.sheets.len(), "wrote pivot export");

    let db_cells_inserted = match &args.db_path {
        Some(db_path) => {
            let mut connection = Connection::open(db_path)
                .with_context(|| format!("failed to open {}", db_path.display()))?;
            configure_connection(&connection)?;
            ensure_schema(&connection)?;
            let stats = write_export(&mut connection, &export)?;
            info!(
                path = %db_path.display(),
                sheets = stats.sheets_inserted,
                rows = stats.rows_inserted,
                cells = stats.cells_inserted,
                "wrote sqlite export"
            );
            stats.cells_inserted
        }
        None => 0,
    };

    let sheet_summaries = export
        .sheets
        .iter()
        .map(SheetSummary::from_table)
        .collect::<Vec<SheetSummary>>();

    let manifest = ConvertRunManifest {
        manifest_version: 1,
        run_id,
        status: "completed".to_string(),
        started_at,
        updated_at: now_utc_string(),
        command: render_convert_command(&args),
        source: loaded.source.clone(),
        heuristics_checksum: crate::heuristics::heuristic_config_checksum(&loaded.heuristics)?,
        heuristics: loaded.heuristics.clone(),
        paths: ConvertPaths {
            input_path: args.input.display().to_string(),
            output_dir: output_dir.display().to_string(),
            json_path: json_path.display().to_string(),
            manifest_path: manifest_path.display().to_string(),
            db_path: args.db_path.as_ref().map(|path| path.display().to_string()),
        },
        counts: ConvertCounts {
            input_rows: reconstruction.row_count,
            item_rows: reconstruction.item_row_count,
            year_count: years.len(),
            ifrs_year_count: years
                .iter()
                .filter(|entry| entry.standard == crate::engine::AccountingStandard::Ifrs)
                .count(),
            statement_count: reconstruction.tables.len(),
            line_item_count: reconstruction.tables.values().map(|table| table.len()).sum(),
            flat_period_count: reconstruction.layout.flat_periods().count(),
            sheet_count: sheet_summaries.len(),
            sheet_row_count: sheet_summaries.iter().map(|sheet| sheet.row_count).sum(),
            db_cells_inserted,
        },
        years,
        layout: reconstruction.layout.buckets().to_vec(),
        sheets: sheet_summaries,
        warnings,
    };

    write_json_pretty(&manifest_path, &manifest)?;

    info!(path = %manifest_path.display(), "wrote convert run manifest");
    info!(
        sheets = manifest.counts.sheet_count,
        rows = manifest.counts.sheet_row_count,
        "convert completed"
    );

    Ok(())
}

pub(super) fn default_json_path(output_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("statements");
    output_dir.join(format!("{stem}_{OUTPUT_SUFFIX}.json"))
}

fn render_convert_command(args: &ConvertArgs) -> String {
    let mut parts = vec![
        "fs-pivot".to_string(),
        "convert".to_string(),
        "--input".to_string(),
        args.input.display().to_string(),
        "--output-dir".to_string(),
        args.output_dir.display().to_string(),
        "--encoding".to_string(),
        args.encoding.as_str().to_string(),
    ];

    if let Some(path) = &args.json_path {
        parts.push("--json-path".to_string());
        parts.push(path.display().to_string());
    }
    if let Some(path) = &args.manifest_path {
        parts.push("--manifest-path".to_string());
        parts.push(path.display().to_string());
    }
    if let Some(path) = &args.db_path {
        parts.push("--db-path".to_string());
        parts.push(path.display().to_string());
    }
    if let Some(path) = &args.heuristics.heuristics_path {
        parts.push("--heuristics-path".to_string());
        parts.push(path.display().to_string());
    }
    if let Some(threshold) = args.heuristics.flat_indent_threshold {
        parts.push("--flat-indent-threshold".to_string());
        parts.push(threshold.to_string());
    }
    if let Some(min_chars) = args.heuristics.min_layout_label_chars {
        parts.push("--min-layout-label-chars".to_string());
        parts.push(min_chars.to_string());
    }

    parts.join(" ")
}
