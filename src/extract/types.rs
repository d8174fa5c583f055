// src/extract/types.rs

use serde::{Deserialize, Serialize};

/// One data row, positionally aligned to the table header.
pub type ResultRow = Vec<String>;

/// Header schema plus rows in page order.
///
/// Every row has exactly `header.len()` fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    header: Vec<String>,
    rows: Vec<ResultRow>,
}

impl ResultTable {
    /// Labels are trimmed on the way in.
    pub fn new<S: AsRef<str>>(header: &[S]) -> Self {
        Self {
            header: header.iter().map(|h| h.as_ref().trim().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.header.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends `row` if its width matches the header; hands it back otherwise.
    pub fn push(&mut self, row: ResultRow) -> Result<(), ResultRow> {
        if row.len() != self.width() {
            return Err(row);
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn column_index(&self, label: &str) -> Option<usize> {
        let label = label.trim();
        self.header.iter().position(|h| h == label)
    }

    pub fn column<'a>(&'a self, label: &str) -> Option<impl Iterator<Item = &'a str> + 'a> {
        let idx = self.column_index(label)?;
        Some(self.rows.iter().map(move |r| r[idx].as_str()))
    }
}

/// How the header schema is discovered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderScope {
    /// First `max_columns` header cells anywhere in the document, applied to
    /// every table.
    Document,
    /// Each table's first row declares its own header; tables that disagree
    /// with the first declared header are skipped.
    #[default]
    PerTable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub header_scope: HeaderScope,
    pub max_columns: usize,
    pub table_selector: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            header_scope: HeaderScope::default(),
            max_columns: 4,
            table_selector: "table".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub tables_seen: usize,
    pub tables_skipped: usize,
    pub rows_kept: usize,
    pub rows_dropped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    NoTables,
    NoHeader,
    NoMatchingRows,
}

impl std::fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            EmptyReason::NoTables => "page has no tables",
            EmptyReason::NoHeader => "page declares no header cells",
            EmptyReason::NoMatchingRows => "no row matched the header width",
        })
    }
}

/// Outcome of a successful parse: either rows, or a reason there are none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Table {
        table: ResultTable,
        stats: ExtractStats,
    },
    Empty {
        reason: EmptyReason,
        stats: ExtractStats,
    },
}

impl Extraction {
    pub fn stats(&self) -> ExtractStats {
        match self {
            Extraction::Table { stats, .. } | Extraction::Empty { stats, .. } => *stats,
        }
    }

    pub fn table(&self) -> Option<&ResultTable> {
        match self {
            Extraction::Table { table, .. } => Some(table),
            Extraction::Empty { .. } => None,
        }
    }

    pub fn into_table(self) -> Option<ResultTable> {
        match self {
            Extraction::Table { table, .. } => Some(table),
            Extraction::Empty { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_labels_are_trimmed() {
        let t = ResultTable::new(&["  Party ", "Won\n"]);
        assert_eq!(t.header(), &["Party".to_string(), "Won".to_string()]);
        assert_eq!(t.column_index(" Won "), Some(1));
    }

    #[test]
    fn push_rejects_wrong_width() {
        let mut t = ResultTable::new(&["A", "B"]);
        assert!(t.push(vec!["1".into(), "2".into()]).is_ok());
        let back = t.push(vec!["1".into()]).unwrap_err();
        assert_eq!(back, vec!["1".to_string()]);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn column_yields_values_in_row_order() {
        let mut t = ResultTable::new(&["Party", "Won"]);
        t.push(vec!["X".into(), "3".into()]).unwrap();
        t.push(vec!["Y".into(), "5".into()]).unwrap();
        let won: Vec<_> = t.column("Won").unwrap().collect();
        assert_eq!(won, vec!["3", "5"]);
        assert!(t.column("Lost").is_none());
    }
}
