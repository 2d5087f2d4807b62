use crate::{
    ast::{CreateTable, Delete, Insert, Literal, Predicate, Select, Statement, Update},
    cache::{CacheKey, CacheStats, ResultCache},
    error::{Error, Result},
    parser::Parser,
    table::{ColumnDef, Row, RowId, Schema, Table},
};
use std::{collections::HashMap, sync::Arc};

/// The main entry point for the in-memory database engine.
/// It owns the tables, remembers their creation order and memoizes `select`
/// results until the underlying table changes.
#[derive(Default)]
pub struct Database {
    /// A map of table names to their respective [Table] structures.
    tables: HashMap<String, Table>,
    /// Table names in creation order.
    order: Vec<String>,
    cache: ResultCache<QueryResult>,
}

/// Represents the result of a successful `select` query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    /// The names of the columns of every row, `ID` first.
    pub columns: Vec<String>,
    /// Matching rows in insertion order.
    pub rows: Vec<Row>,
}

/// Schema and size of one table, as reported by `info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    pub name: String,
    pub columns: Vec<ColumnDef>,
    pub row_count: usize,
}

/// What a successfully executed [Statement] produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Created {
        table: String,
        columns: Vec<ColumnDef>,
    },
    Dropped(String),
    Tables(Vec<String>),
    Inserted {
        table: String,
        id: RowId,
    },
    Rows(Arc<QueryResult>),
    Updated {
        table: String,
        ids: Vec<RowId>,
    },
    Deleted {
        table: String,
        ids: Vec<RowId>,
    },
    Info(TableInfo),
}

impl Database {
    /// Creates a new, empty database instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new table in the database.
    ///
    /// # Errors
    /// Returns [Error::DuplicateTable] if a table with the same name already exists.
    pub fn create_table(&mut self, name: String, schema: Schema) -> Result<()> {
        if self.tables.contains_key(&name) {
            return Err(Error::DuplicateTable(name));
        }
        log::debug!("creating table {name:?} with {} column(s)", schema.columns.len());
        let table = Table::new(name.clone(), schema);
        self.order.push(name.clone());
        self.tables.insert(name, table);
        Ok(())
    }

    /// Removes a table, its rows and every cached result that read it.
    ///
    /// # Errors
    /// Returns [Error::UnknownTable] if the table does not exist.
    pub fn drop_table(&mut self, name: &str) -> Result<()> {
        match self.tables.remove(name) {
            Some(_) => {
                self.order.retain(|n| n != name);
                self.cache.invalidate(name);
                log::debug!("dropped table {name:?}");
                Ok(())
            }
            None => Err(Error::UnknownTable(name.to_string())),
        }
    }

    /// Retrieves a reference to a table by name.
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    fn table(&self, name: &str) -> Result<&Table> {
        self.get_table(name)
            .ok_or_else(|| Error::UnknownTable(name.to_string()))
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| Error::UnknownTable(name.to_string()))
    }

    /// Returns the names of all tables in creation order.
    pub fn list_tables(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// Returns the column list of a table, `ID` first.
    pub fn describe(&self, name: &str) -> Result<Vec<ColumnDef>> {
        Ok(self.table(name)?.schema.describe())
    }

    /// Returns the column list and row count of a table.
    pub fn info(&self, name: &str) -> Result<TableInfo> {
        let table = self.table(name)?;
        Ok(TableInfo {
            name: table.name.clone(),
            columns: table.schema.describe(),
            row_count: table.row_count(),
        })
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Parses and executes one command line.
    ///
    /// # Errors
    /// Returns an error if tokenization, parsing, or execution fails. Nothing
    /// is modified when an error is returned.
    ///
    /// # Example
    /// ```
    /// use primdb::{Database, Value};
    /// let mut db = Database::new();
    /// db.execute("create_table users name:str active:bool").unwrap();
    /// db.execute("insert into users values (\"Sergei\", true)").unwrap();
    /// db.execute("update users set active = false where name = \"Sergei\"").unwrap();
    ///
    /// let result = db.query("select from users").unwrap();
    /// assert_eq!(result.columns, vec!["ID", "name", "active"]);
    /// assert_eq!(result.rows[0].id, 1);
    /// assert_eq!(result.rows[0].values[1], Value::Bool(false));
    /// ```
    pub fn execute(&mut self, line: &str) -> Result<Outcome> {
        let statement = Parser::parse_line(line)?;
        self.execute_statement(statement)
    }

    /// Executes an already parsed statement.
    pub fn execute_statement(&mut self, statement: Statement) -> Result<Outcome> {
        match statement {
            Statement::CreateTable(CreateTable { name, columns }) => {
                let schema = Schema::from_specs(&columns)?;
                let columns = schema.describe();
                self.create_table(name.clone(), schema)?;
                Ok(Outcome::Created {
                    table: name,
                    columns,
                })
            }
            Statement::DropTable(name) => {
                self.drop_table(&name)?;
                Ok(Outcome::Dropped(name))
            }
            Statement::ListTables => Ok(Outcome::Tables(
                self.list_tables().into_iter().map(String::from).collect(),
            )),
            Statement::Insert(Insert { table, values }) => {
                let id = self.insert(&table, &values)?;
                Ok(Outcome::Inserted { table, id })
            }
            Statement::Select(Select { table, predicate }) => {
                Ok(Outcome::Rows(self.select(&table, predicate.as_ref())?))
            }
            Statement::Update(Update {
                table,
                assignment,
                predicate,
            }) => {
                let ids = self.update(&table, &assignment.column, &assignment.value, &predicate)?;
                Ok(Outcome::Updated { table, ids })
            }
            Statement::Delete(Delete { table, predicate }) => {
                let ids = self.delete(&table, &predicate)?;
                Ok(Outcome::Deleted { table, ids })
            }
            Statement::Info(name) => Ok(Outcome::Info(self.info(&name)?)),
        }
    }

    /// Runs a `select` command and returns its rows.
    ///
    /// # Errors
    /// Returns [Error::Parse] if `line` is not a `select`.
    pub fn query(&mut self, line: &str) -> Result<Arc<QueryResult>> {
        match Parser::parse_line(line)? {
            Statement::Select(Select { table, predicate }) => {
                self.select(&table, predicate.as_ref())
            }
            other => Err(Error::Parse(format!(
                "{} is not a query, use execute instead",
                other.name()
            ))),
        }
    }

    /// Appends one row built from positional literals and returns its `ID`.
    ///
    /// # Errors
    /// [Error::UnknownTable], [Error::ArityMismatch] or [Error::TypeMismatch];
    /// the table is unchanged in every case.
    pub fn insert(&mut self, table_name: &str, values: &[Literal]) -> Result<RowId> {
        let table = self.table_mut(table_name)?;
        let row = table.coerce_row(values)?;
        let id = table.insert(row)?;
        self.cache.invalidate(table_name);
        Ok(id)
    }

    /// Returns the rows of a table matching `predicate`, or all rows.
    ///
    /// The predicate is resolved first so invalid queries are never cached.
    /// Identical queries are then served from the result cache until the
    /// table is mutated.
    pub fn select(
        &mut self,
        table_name: &str,
        predicate: Option<&Predicate>,
    ) -> Result<Arc<QueryResult>> {
        let table = self
            .tables
            .get(table_name)
            .ok_or_else(|| Error::UnknownTable(table_name.to_string()))?;
        let filter = predicate.map(|p| table.filter(p)).transpose()?;

        let key = CacheKey::new(table_name, filter.clone());
        self.cache.get_or_insert_with(key, || {
            let rows = table.rows(&table.scan(filter.as_ref()));
            Ok(QueryResult {
                columns: table
                    .schema
                    .describe()
                    .into_iter()
                    .map(|c| c.name)
                    .collect(),
                rows,
            })
        })
    }

    /// Sets `column` to `value` on every row matching `predicate` and returns
    /// the identifiers of the updated rows.
    ///
    /// The update is performed in two phases:
    /// 1. **Validation**: the assignment and the predicate are resolved and
    ///    coerced against the schema.
    /// 2. **Modification**: the matching rows are located and written.
    ///
    /// # Errors
    /// [Error::UnknownTable], [Error::UnknownColumn], [Error::ReadOnlyColumn]
    /// or [Error::TypeMismatch], all raised before any row is modified.
    pub fn update(
        &mut self,
        table_name: &str,
        column: &str,
        value: &Literal,
        predicate: &Predicate,
    ) -> Result<Vec<RowId>> {
        let table = self.table_mut(table_name)?;
        let (col, value) = table.assignment(column, value)?;
        let filter = table.filter(predicate)?;

        let rows = table.scan(Some(&filter));
        let ids = table.update_rows(&rows, col, &value)?;
        self.cache.invalidate(table_name);
        Ok(ids)
    }

    /// Removes every row matching `predicate` and returns their identifiers.
    ///
    /// # Errors
    /// [Error::UnknownTable], [Error::UnknownColumn] or [Error::TypeMismatch],
    /// all raised before any row is removed.
    pub fn delete(&mut self, table_name: &str, predicate: &Predicate) -> Result<Vec<RowId>> {
        let table = self.table_mut(table_name)?;
        let filter = table.filter(predicate)?;

        let rows = table.scan(Some(&filter));
        let ids = table.delete_rows(&rows)?;
        self.cache.invalidate(table_name);
        Ok(ids)
    }
}
