use std::io::{self, Write};

use anyhow::{Context, Result};

use crate::cli::InspectArgs;
use crate::commands::{load_dump, year_standard_entries};
use crate::model::{InspectReport, SheetSummary};

pub fn run(args: InspectArgs) -> Result<()> {
    let loaded = load_dump(&args.input, args.encoding, &args.heuristics)?;
    let reconstruction = &loaded.reconstruction;

    let report = InspectReport {
        source: loaded.source.clone(),
        heuristics: loaded.heuristics.clone(),
        input_rows: reconstruction.row_count,
        item_rows: reconstruction.item_row_count,
        years: year_standard_entries(reconstruction),
        layout: reconstruction.layout.buckets().to_vec(),
        sheets: reconstruction
            .pivot_tables()
            .iter()
            .map(SheetSummary::from_table)
            .collect(),
    };

    let mut output = io::BufWriter::new(io::stdout().lock());
    if args.json {
        serde_json::to_writer_pretty(&mut output, &report)
            .context("failed to serialize inspect json output")?;
        writeln!(output)?;
    } else {
        write_text_report(&mut output, &report)?;
    }
    output.flush()?;
    Ok(())
}

fn write_text_report(output: &mut impl Write, report: &InspectReport) -> Result<()> {
    writeln!(
        output,
        "Source: {} ({} bytes, {}{})",
        report.source.path,
        report.source.byte_count,
        report.source.encoding,
        if report.source.replaced_malformed {
            ", malformed bytes replaced"
        } else {
            ""
        }
    )?;
    writeln!(
        output,
        "Rows: input={} items={} threshold={:.2} min_label_chars={}",
        report.input_rows,
        report.item_rows,
        report.heuristics.flat_indent_threshold,
        report.heuristics.min_layout_label_chars,
    )?;

    writeln!(output, "Years: {}", report.years.len())?;
    for entry in &report.years {
        writeln!(
            output,
            "\t{}\t{}\t{}",
            entry.year,
            entry.standard,
            entry.evidence.as_str()
        )?;
    }

    writeln!(output, "Layout: {}", report.layout.len())?;
    for bucket in &report.layout {
        let ratio = bucket
            .indent_ratio
            .map(|ratio| format!("{ratio:.3}"))
            .unwrap_or_else(|| "n/a".to_string());
        writeln!(
            output,
            "\t{}\t{}\tcandidates={} indented={} ratio={} {}",
            bucket.year,
            bucket.standard,
            bucket.candidate_rows,
            bucket.indented_rows,
            ratio,
            if bucket.flat { "flat" } else { "indented" }
        )?;
    }

    writeln!(output, "Sheets: {}", report.sheets.len())?;
    for sheet in &report.sheets {
        writeln!(
            output,
            "\t{}\tyears={} rows={} headers={}",
            sheet.sheet_title, sheet.year_count, sheet.row_count, sheet.header_row_count
        )?;
    }

    Ok(())
}
