pub mod command;
pub mod error;
pub mod export;
pub mod source;
pub mod table;
pub mod wire;

pub use command::CommandRecognizer;
pub use error::{Result, SourceError};
pub use export::{
    write_normalized_table, write_phone_list, write_results_csv, write_table_csv,
    write_table_xlsx,
};
pub use source::TableSource;
pub use table::{table_source_for, CsvTableSource, SpreadsheetTableSource, TableFormat};
pub use wire::parse_line_records;
