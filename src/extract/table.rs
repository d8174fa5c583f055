// src/extract/table.rs

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, trace, warn};

use super::types::{
    EmptyReason, ExtractOptions, ExtractStats, Extraction, HeaderScope, ResultRow, ResultTable,
};
use crate::error::ExtractError;

static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("tr selector should parse"));
static HEADER_CELL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("th").expect("th selector should parse"));
static DATA_CELL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("td selector should parse"));

fn cell_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn data_cells(row: ElementRef<'_>) -> ResultRow {
    row.select(&DATA_CELL).map(cell_text).collect()
}

/// Parse `html` and flatten every table's data rows into one `ResultTable`.
///
/// The first `tr` of each table is treated as that table's header row and is
/// never emitted as data. A data row survives only if its `td` count equals
/// the header width; everything else (merged cells, footers, dividers) is
/// dropped and counted in the stats.
#[instrument(level = "debug", skip(html, opts), fields(html_len = html.len(), scope = ?opts.header_scope))]
pub fn extract_table(html: &str, opts: &ExtractOptions) -> Result<Extraction, ExtractError> {
    let table_sel =
        Selector::parse(&opts.table_selector).map_err(|e| ExtractError::InvalidSelector {
            selector: opts.table_selector.clone(),
            reason: format!("{:?}", e),
        })?;

    let doc = Html::parse_document(html);
    let tables: Vec<ElementRef<'_>> = doc.select(&table_sel).collect();
    let mut stats = ExtractStats::default();

    if tables.is_empty() {
        debug!("no tables on page");
        return Ok(Extraction::Empty {
            reason: EmptyReason::NoTables,
            stats,
        });
    }

    let table = match opts.header_scope {
        HeaderScope::Document => document_scoped(&doc, &tables, opts.max_columns, &mut stats),
        HeaderScope::PerTable => table_scoped(&tables, opts.max_columns, &mut stats),
    };

    let Some(table) = table else {
        warn!(tables = stats.tables_seen, "no header cells found");
        return Ok(Extraction::Empty {
            reason: EmptyReason::NoHeader,
            stats,
        });
    };

    info!(
        columns = table.width(),
        rows_kept = stats.rows_kept,
        rows_dropped = stats.rows_dropped,
        tables_seen = stats.tables_seen,
        tables_skipped = stats.tables_skipped,
        "extracted table"
    );

    if table.is_empty() {
        return Ok(Extraction::Empty {
            reason: EmptyReason::NoMatchingRows,
            stats,
        });
    }
    Ok(Extraction::Table { table, stats })
}

/// Append the data rows of one table (everything after its first `tr`) whose
/// width matches the header of `out`.
fn collect_rows<'a>(
    rows: impl Iterator<Item = ElementRef<'a>>,
    out: &mut ResultTable,
    stats: &mut ExtractStats,
) {
    for row in rows {
        match out.push(data_cells(row)) {
            Ok(()) => stats.rows_kept += 1,
            Err(cells) => {
                trace!(cells = cells.len(), expected = out.width(), "dropping row");
                stats.rows_dropped += 1;
            }
        }
    }
}

fn document_scoped(
    doc: &Html,
    tables: &[ElementRef<'_>],
    max_columns: usize,
    stats: &mut ExtractStats,
) -> Option<ResultTable> {
    let header: Vec<String> = doc
        .select(&HEADER_CELL)
        .take(max_columns)
        .map(cell_text)
        .collect();
    stats.tables_seen = tables.len();
    if header.is_empty() {
        return None;
    }

    let mut out = ResultTable::new(&header);
    for table in tables {
        collect_rows(table.select(&ROW).skip(1), &mut out, stats);
    }
    Some(out)
}

fn table_scoped(
    tables: &[ElementRef<'_>],
    max_columns: usize,
    stats: &mut ExtractStats,
) -> Option<ResultTable> {
    let mut out: Option<ResultTable> = None;

    for (idx, table) in tables.iter().enumerate() {
        stats.tables_seen += 1;
        let mut table_rows = table.select(&ROW);
        let declared: Vec<String> = table_rows
            .next()
            .map(|first| {
                first
                    .select(&HEADER_CELL)
                    .take(max_columns)
                    .map(cell_text)
                    .collect()
            })
            .unwrap_or_default();

        if !declared.is_empty() {
            if let Some(current) = &out {
                if current.header() != declared.as_slice() {
                    warn!(table = idx, header = ?declared, expected = ?current.header(), "skipping table with a different header");
                    stats.tables_skipped += 1;
                    continue;
                }
            } else {
                debug!(table = idx, header = ?declared, "header schema");
                out = Some(ResultTable::new(&declared));
            }
        }

        let Some(current) = out.as_mut() else {
            debug!(table = idx, "skipping table before any header was declared");
            stats.tables_skipped += 1;
            continue;
        };
        collect_rows(table_rows, current, stats);
    }

    out
}
