// src/store/clean.rs

use crate::extract::{ResultRow, ResultTable};

/// A table in which no row has an empty field. The only input the charts
/// accept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedTable {
    table: ResultTable,
    dropped: usize,
}

impl CleanedTable {
    pub fn table(&self) -> &ResultTable {
        &self.table
    }

    pub fn into_inner(self) -> ResultTable {
        self.table
    }

    /// Rows removed by cleaning.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Blank after trimming counts as missing. A whitespace-only field is
/// treated as missing too, which a plain null check would keep.
pub fn is_complete(row: &[String]) -> bool {
    row.iter().all(|f| !f.trim().is_empty())
}

/// Re-trim the header and drop every row with a missing field.
pub fn clean(table: ResultTable) -> CleanedTable {
    clean_rows(table.header(), table.rows().iter().cloned())
}

pub(crate) fn clean_rows<S: AsRef<str>>(
    header: &[S],
    rows: impl IntoIterator<Item = ResultRow>,
) -> CleanedTable {
    let mut table = ResultTable::new(header);
    let mut dropped = 0;
    for row in rows {
        if !is_complete(&row) || table.push(row).is_err() {
            dropped += 1;
        }
    }
    CleanedTable { table, dropped }
}
