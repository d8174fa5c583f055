pub mod table;
pub mod types;

pub use table::extract_table;
pub use types::{
    EmptyReason, ExtractOptions, ExtractStats, Extraction, HeaderScope, ResultRow, ResultTable,
};
