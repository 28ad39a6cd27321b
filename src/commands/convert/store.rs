use super::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct ExportStats {
    pub sheets_inserted: usize,
    pub rows_inserted: usize,
    pub cells_inserted: usize,
}

pub(super) fn configure_connection(connection: &Connection) -> Result<()> {
    connection
        .pragma_update(None, "journal_mode", "WAL")
        .context("failed to set journal_mode=WAL")?;
    connection
        .pragma_update(None, "synchronous", "NORMAL")
        .context("failed to set synchronous=NORMAL")?;
    connection
        .pragma_update(None, "foreign_keys", "ON")
        .context("failed to enable foreign_keys")?;
    Ok(())
}

pub(super) fn ensure_schema(connection: &Connection) -> Result<()> {
    connection.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS metadata (
          key TEXT PRIMARY KEY,
          value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS sheets (
          sheet_index INTEGER PRIMARY KEY,
          sheet_title TEXT NOT NULL UNIQUE,
          family TEXT NOT NULL,
          standard TEXT NOT NULL,
          year_count INTEGER NOT NULL,
          row_count INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS sheet_columns (
          sheet_index INTEGER NOT NULL,
          col_idx INTEGER NOT NULL,
          label TEXT NOT NULL,
          PRIMARY KEY (sheet_index, col_idx),
          FOREIGN KEY (sheet_index) REFERENCES sheets(sheet_index) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS sheet_rows (
          sheet_index INTEGER NOT NULL,
          row_idx INTEGER NOT NULL,
          unique_key TEXT NOT NULL,
          display_name TEXT NOT NULL,
          depth INTEGER NOT NULL,
          header_only INTEGER NOT NULL,
          PRIMARY KEY (sheet_index, row_idx),
          FOREIGN KEY (sheet_index) REFERENCES sheets(sheet_index) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS sheet_cells (
          sheet_index INTEGER NOT NULL,
          row_idx INTEGER NOT NULL,
          col_idx INTEGER NOT NULL,
          cell_kind TEXT NOT NULL,
          number_value REAL,
          text_value TEXT,
          PRIMARY KEY (sheet_index, row_idx, col_idx),
          FOREIGN KEY (sheet_index, row_idx) REFERENCES sheet_rows(sheet_index, row_idx) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_sheet_rows_key ON sheet_rows(sheet_index, unique_key);
        ",
    )?;

    connection.execute(
        "INSERT INTO metadata(key, value) VALUES('db_schema_version', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        [EXPORT_SCHEMA_VERSION],
    )?;

    Ok(())
}

/// Replaces any previous export with this one inside a single transaction.
pub(super) fn write_export(connection: &mut Connection, export: &PivotExport) -> Result<ExportStats> {
    let tx = connection.transaction()?;
    let mut stats = ExportStats::default();

    tx.execute_batch(
        "
        DELETE FROM sheet_cells;
        DELETE FROM sheet_rows;
        DELETE FROM sheet_columns;
        DELETE FROM sheets;
        ",
    )
    .context("failed to clear previous export")?;

    write_source_metadata(&tx, &export.run_id, &export.source)?;

    {
        let mut sheet_statement = tx.prepare(
            "
            INSERT INTO sheets(sheet_index, sheet_title, family, standard, year_count, row_count)
            VALUES(?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )?;
        let mut column_statement = tx.prepare(
            "INSERT INTO sheet_columns(sheet_index, col_idx, label) VALUES(?1, ?2, ?3)",
        )?;
        let mut row_statement = tx.prepare(
            "
            INSERT INTO sheet_rows(sheet_index, row_idx, unique_key, display_name, depth, header_only)
            VALUES(?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )?;
        let mut cell_statement = tx.prepare(
            "
            INSERT INTO sheet_cells(sheet_index, row_idx, col_idx, cell_kind, number_value, text_value)
            VALUES(?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )?;

        for (sheet_index, sheet) in export.sheets.iter().enumerate() {
            sheet_statement
                .execute(params![
                    sheet_index as i64,
                    &sheet.sheet_title,
                    sheet.family.as_str(),
                    sheet.standard.as_str(),
                    sheet.years.len() as i64,
                    sheet.rows.len() as i64,
                ])
                .with_context(|| format!("failed to insert sheet {}", sheet.sheet_title))?;
            stats.sheets_inserted += 1;

            for (col_idx, label) in sheet.header_row.iter().enumerate() {
                column_statement.execute(params![sheet_index as i64, col_idx as i64, label])?;
            }

            for (row_idx, row) in sheet.rows.iter().enumerate() {
                row_statement.execute(params![
                    sheet_index as i64,
                    row_idx as i64,
                    &row.unique_key,
                    &row.display_name,
                    row.depth as i64,
                    row.header_only as i64,
                ])?;
                stats.rows_inserted += 1;

                // Column 0 holds the item label, so amounts start at 1.
                for (year_offset, cell) in row.cells.iter().enumerate() {
                    let (kind, number, text) = cell_columns(cell);
                    cell_statement.execute(params![
                        sheet_index as i64,
                        row_idx as i64,
                        (year_offset + 1) as i64,
                        kind,
                        number,
                        text,
                    ])?;
                    stats.cells_inserted += 1;
                }
            }
        }
    }

    tx.commit()?;
    Ok(stats)
}

fn write_source_metadata(
    connection: &Connection,
    run_id: &str,
    source: &SourceDescriptor,
) -> Result<()> {
    let entries = [
        ("run_id", run_id.to_string()),
        ("source_path", source.path.clone()),
        ("source_sha256", source.sha256.clone()),
        ("source_encoding", source.encoding.clone()),
        ("db_updated_at", now_utc_string()),
    ];

    let mut statement = connection.prepare(
        "INSERT INTO metadata(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
    )?;
    for (key, value) in entries {
        statement
            .execute(params![key, value])
            .with_context(|| format!("failed to write metadata key {key}"))?;
    }

    Ok(())
}

pub(super) fn cell_columns(cell: &Cell) -> (&'static str, Option<f64>, Option<&str>) {
    match cell {
        Cell::Number(value) => ("number", Some(*value), None),
        Cell::Text(text) => ("text", None, Some(text.as_str())),
        Cell::Empty => ("empty", None, None),
    }
}
