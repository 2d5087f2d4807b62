pub mod ast;
pub mod cache;
pub mod column;
pub mod config;
pub mod data_type;
pub mod database;
pub mod error;
pub mod formatter;
pub mod parser;
pub mod shell;
pub mod table;
pub mod tokenizer;
pub mod value;

pub use column::Column;
pub use config::ShellConfig;
pub use data_type::DataType;
pub use database::{Database, Outcome, QueryResult, TableInfo};
pub use error::{Error, Result, ShellError};
pub use shell::{LineReader, Reply, Shell};
pub use table::{ColumnDef, Row, RowId, Schema, Table};
pub use value::Value;
