use std::collections::HashSet;

use crate::ast::{ColumnSpec, Literal, Predicate};
use crate::column::Column;
use crate::data_type::DataType;
use crate::error::{Error, Result};
use crate::value::Value;

/// Name of the implicit, auto-assigned identifier column.
pub const ID_COLUMN: &str = "ID";

/// Identifier assigned to every row on insert.
pub type RowId = i64;

/// Column definition in the schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: DataType,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// The user-declared columns of a table, in declaration order.
///
/// The implicit [ID_COLUMN] is not part of the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub columns: Vec<ColumnDef>,
}

impl Schema {
    /// Builds a validated schema.
    ///
    /// # Errors
    /// Returns [Error::InvalidSchema] if no column is given, a name is
    /// repeated, or a column is named [ID_COLUMN].
    pub fn new(columns: Vec<ColumnDef>) -> Result<Self> {
        if columns.is_empty() {
            return Err(Error::InvalidSchema(
                "a table needs at least one column".into(),
            ));
        }

        let mut seen = HashSet::new();
        for column in &columns {
            if column.name == ID_COLUMN {
                return Err(Error::InvalidSchema(format!(
                    "column \"{ID_COLUMN}\" is assigned automatically"
                )));
            }
            if !seen.insert(column.name.as_str()) {
                return Err(Error::InvalidSchema(format!(
                    "duplicate column \"{}\"",
                    column.name
                )));
            }
        }

        Ok(Self { columns })
    }

    /// Resolves `name:type` pairs from a `create_table` command.
    pub fn from_specs(specs: &[ColumnSpec]) -> Result<Self> {
        let columns = specs
            .iter()
            .map(|spec| -> Result<ColumnDef> {
                Ok(ColumnDef::new(spec.name.clone(), spec.type_name.parse()?))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(columns)
    }

    /// Full column list as shown to users, [ID_COLUMN] first.
    pub fn describe(&self) -> Vec<ColumnDef> {
        std::iter::once(ColumnDef::new(ID_COLUMN, DataType::Int))
            .chain(self.columns.iter().cloned())
            .collect()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }
}

/// One materialized row: its identifier plus one value per declared column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: RowId,
    pub values: Vec<Value>,
}

/// Where a filter reads its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRef {
    Id,
    Index(usize),
}

/// A predicate resolved against a schema: the literal is already coerced to
/// the column's declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Filter {
    pub column: ColumnRef,
    pub value: Value,
}

pub struct Table {
    pub name: String,
    pub schema: Schema,
    ids: Vec<RowId>,
    columns: Vec<Column>,
    /// Largest identifier ever assigned in this table.
    last_id: RowId,
}

impl Table {
    pub fn new(name: String, schema: Schema) -> Self {
        let columns = schema
            .columns
            .iter()
            .map(|column| Column::new(column.name.clone(), column.data_type))
            .collect();
        Self {
            name,
            schema,
            ids: vec![],
            columns,
            last_id: 0,
        }
    }

    pub fn row_count(&self) -> usize {
        self.ids.len()
    }

    /// Converts positional literals into a typed row for this table.
    ///
    /// # Errors
    /// [Error::ArityMismatch] if the number of values differs from the number
    /// of declared columns, [Error::TypeMismatch] if a value does not fit its
    /// column.
    pub fn coerce_row(&self, literals: &[Literal]) -> Result<Vec<Value>> {
        if literals.len() != self.schema.columns.len() {
            return Err(Error::ArityMismatch {
                expected: self.schema.columns.len(),
                found: literals.len(),
            });
        }
        self.schema
            .columns
            .iter()
            .zip(literals)
            .map(|(def, literal)| coerce(def, literal))
            .collect()
    }

    /// Resolves a `where` predicate against the schema.
    ///
    /// # Errors
    /// [Error::UnknownColumn] if the column is not declared (and is not
    /// [ID_COLUMN]), [Error::TypeMismatch] if the literal does not fit.
    pub fn filter(&self, predicate: &Predicate) -> Result<Filter> {
        let (column, def) = self.resolve(&predicate.column)?;
        Ok(Filter {
            column,
            value: coerce(&def, &predicate.value)?,
        })
    }

    /// Resolves the target of a `set` clause.
    ///
    /// # Errors
    /// [Error::ReadOnlyColumn] for [ID_COLUMN], otherwise as [Table::filter].
    pub fn assignment(&self, column: &str, literal: &Literal) -> Result<(usize, Value)> {
        match self.resolve(column)? {
            (ColumnRef::Id, _) => Err(Error::ReadOnlyColumn(ID_COLUMN.into())),
            (ColumnRef::Index(idx), def) => Ok((idx, coerce(&def, literal)?)),
        }
    }

    fn resolve(&self, column: &str) -> Result<(ColumnRef, ColumnDef)> {
        if column == ID_COLUMN {
            return Ok((ColumnRef::Id, ColumnDef::new(ID_COLUMN, DataType::Int)));
        }
        let idx = self
            .schema
            .position(column)
            .ok_or_else(|| Error::UnknownColumn {
                table: self.name.clone(),
                column: column.to_string(),
            })?;
        Ok((ColumnRef::Index(idx), self.schema.columns[idx].clone()))
    }

    /// Appends a row and returns the identifier assigned to it.
    ///
    /// Identifiers start at 1 and are never reused, even after deletions.
    /// The whole row is type checked before anything is stored.
    pub fn insert(&mut self, values: Vec<Value>) -> Result<RowId> {
        // different sizes
        if values.len() != self.schema.columns.len() {
            return Err(Error::ArityMismatch {
                expected: self.schema.columns.len(),
                found: values.len(),
            });
        }
        // different types
        for (value, def) in values.iter().zip(&self.schema.columns) {
            if value.data_type() != def.data_type {
                return Err(Error::TypeMismatch {
                    column: def.name.clone(),
                    expected: def.data_type.to_string(),
                    found: value.data_type().to_string(),
                });
            }
        }

        for (column, value) in self.columns.iter_mut().zip(values) {
            column.push(value)?;
        }
        self.last_id += 1;
        self.ids.push(self.last_id);
        Ok(self.last_id)
    }

    /// Indices of the rows matching `filter`, in insertion order.
    /// Every row matches when no filter is given.
    pub fn scan(&self, filter: Option<&Filter>) -> Vec<usize> {
        (0..self.row_count())
            .filter(|&idx| filter.is_none_or(|f| self.matches(idx, f)))
            .collect()
    }

    fn matches(&self, row_idx: usize, filter: &Filter) -> bool {
        match filter.column {
            ColumnRef::Id => filter.value.as_int() == Some(self.ids[row_idx]),
            ColumnRef::Index(col) => self.columns[col].value_eq(row_idx, &filter.value),
        }
    }

    pub fn get_row(&self, row_idx: usize) -> Option<Row> {
        let id = *self.ids.get(row_idx)?;
        let values = self
            .columns
            .iter()
            .map(|col| col.get(row_idx))
            .collect::<Option<Vec<_>>>()?;
        Some(Row { id, values })
    }

    /// Materializes the rows at `indices`.
    pub fn rows(&self, indices: &[usize]) -> Vec<Row> {
        indices
            .iter()
            .filter_map(|&idx| self.get_row(idx))
            .collect()
    }

    /// Writes `value` into column `col` of every row in `indices` and returns
    /// the identifiers of the updated rows.
    pub fn update_rows(&mut self, indices: &[usize], col: usize, value: &Value) -> Result<Vec<RowId>> {
        let column = self
            .columns
            .get_mut(col)
            .ok_or_else(|| Error::RowOutOfBounds(col))?;
        let mut updated = Vec::with_capacity(indices.len());
        for &idx in indices {
            column.set(idx, value)?;
            updated.push(self.ids[idx]);
        }
        Ok(updated)
    }

    /// Removes the rows at `indices` and returns their identifiers in
    /// insertion order.
    pub fn delete_rows(&mut self, indices: &[usize]) -> Result<Vec<RowId>> {
        let mut rows = indices.to_vec();
        // highest index first so earlier removals don't shift pending ones
        rows.sort_unstable_by(|a, b| b.cmp(a));
        rows.dedup();

        let mut deleted = Vec::with_capacity(rows.len());
        for idx in rows {
            if idx >= self.ids.len() {
                return Err(Error::RowOutOfBounds(idx));
            }
            for column in &mut self.columns {
                column.remove(idx)?;
            }
            deleted.push(self.ids.remove(idx));
        }
        deleted.reverse();
        Ok(deleted)
    }
}

fn coerce(def: &ColumnDef, literal: &Literal) -> Result<Value> {
    def.data_type
        .coerce(literal)
        .ok_or_else(|| Error::TypeMismatch {
            column: def.name.clone(),
            expected: def.data_type.to_string(),
            found: literal.to_string(),
        })
}
