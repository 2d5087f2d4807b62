use std::sync::Arc;

use crate::data_type::DataType;
use crate::error::{Error, Result};
use crate::value::Value;
use bitvec::prelude::*;

/// Physical storage for column data.
/// Each variant wraps a collection of a specific type to ensure contiguous memory
/// allocation (columnar storage).
#[derive(Debug, Clone)]
pub enum ColumnData {
    /// Vector of 64-bit integers.
    Int(Vec<i64>),
    /// Vector of reference-counted strings.
    Str(Vec<Arc<str>>),
    /// Compact bit-vector for boolean values.
    Bool(BitVec),
}

/// Represents a column within a table: its name, declared type and values.
#[derive(Debug, Clone)]
pub struct Column {
    /// The name of the column.
    pub name: String,
    /// The declared data type of the column.
    pub data_type: DataType,
    /// The actual values stored in the column.
    pub data: ColumnData,
}

impl Column {
    /// Creates a new, empty column with the specified name and data type.
    pub fn new(name: String, data_type: DataType) -> Self {
        let data = match data_type {
            DataType::Int => ColumnData::Int(vec![]),
            DataType::Str => ColumnData::Str(vec![]),
            DataType::Bool => ColumnData::Bool(bitvec!()),
        };
        Self {
            name,
            data_type,
            data,
        }
    }

    /// Appends a new value to the end of the column.
    ///
    /// # Errors
    /// Returns [Error::TypeMismatch] if the value's type does not match the
    /// column's data type. The column is left unchanged in that case.
    ///
    /// # Example
    /// ```
    /// # use primdb::column::Column;
    /// # use primdb::data_type::DataType;
    /// # use primdb::value::Value;
    /// let mut col = Column::new("age".into(), DataType::Int);
    /// col.push(Value::Int(30)).unwrap();
    /// assert!(col.push(Value::Bool(true)).is_err());
    ///
    /// assert_eq!(col.len(), 1);
    /// assert_eq!(col.get(0), Some(Value::Int(30)));
    /// ```
    pub fn push(&mut self, value: Value) -> Result<()> {
        match (&mut self.data, value) {
            (ColumnData::Int(col), Value::Int(v)) => col.push(v),
            (ColumnData::Str(col), Value::Str(v)) => col.push(v),
            (ColumnData::Bool(col), Value::Bool(v)) => col.push(v),
            (_, value) => return Err(mismatch(&self.name, self.data_type, &value)),
        }
        Ok(())
    }

    /// Returns the number of rows currently stored in the column.
    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Int(col) => col.len(),
            ColumnData::Str(col) => col.len(),
            ColumnData::Bool(col) => col.len(),
        }
    }

    /// Returns true if there is no row in the column, else false.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Retrieves the value at the specified row index.
    ///
    /// Returns `None` if the index is out of bounds.
    pub fn get(&self, row_idx: usize) -> Option<Value> {
        match &self.data {
            ColumnData::Int(col) => col.get(row_idx).map(|v| Value::Int(*v)),
            ColumnData::Str(col) => col.get(row_idx).map(|v| Value::Str(Arc::clone(v))),
            ColumnData::Bool(col) => col.get(row_idx).map(|v| Value::Bool(*v)),
        }
    }

    /// Returns true if the value stored at `row_idx` equals `value`.
    ///
    /// Compares in place without materializing a [Value] for the row.
    pub fn value_eq(&self, row_idx: usize, value: &Value) -> bool {
        match (&self.data, value) {
            (ColumnData::Int(col), Value::Int(v)) => col.get(row_idx) == Some(v),
            (ColumnData::Str(col), Value::Str(v)) => {
                col.get(row_idx).is_some_and(|s| s.as_ref() == v.as_ref())
            }
            (ColumnData::Bool(col), Value::Bool(v)) => col.get(row_idx).is_some_and(|b| *b == *v),
            _ => false,
        }
    }

    /// Remove the value at the specified row index.
    ///
    /// # Errors
    /// Returns [Error::RowOutOfBounds] if the index is out of bounds.
    pub fn remove(&mut self, row_idx: usize) -> Result<()> {
        if self.len() <= row_idx {
            return Err(Error::RowOutOfBounds(row_idx));
        }
        match &mut self.data {
            ColumnData::Int(col) => {
                col.remove(row_idx);
            }
            ColumnData::Str(col) => {
                col.remove(row_idx);
            }
            ColumnData::Bool(col) => {
                col.remove(row_idx);
            }
        }
        Ok(())
    }

    /// Replace a value in the column by a new value.
    ///
    /// # Errors
    /// Returns an error if the row_idx is too high or if the value's type does not match the
    /// column's data type.
    pub fn set(&mut self, row_idx: usize, value: &Value) -> Result<()> {
        if self.len() <= row_idx {
            return Err(Error::RowOutOfBounds(row_idx));
        }

        match (&mut self.data, value) {
            (ColumnData::Int(col), Value::Int(v)) => col[row_idx] = *v,
            (ColumnData::Str(col), Value::Str(v)) => col[row_idx] = Arc::clone(v),
            (ColumnData::Bool(col), Value::Bool(v)) => {
                col.replace(row_idx, *v);
            }
            _ => return Err(mismatch(&self.name, self.data_type, value)),
        }
        Ok(())
    }
}

fn mismatch(column: &str, expected: DataType, value: &Value) -> Error {
    Error::TypeMismatch {
        column: column.to_string(),
        expected: expected.to_string(),
        found: value.data_type().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_type::DataType;
    use crate::value::Value;

    // ─────────────────────────────────────────────────────────────
    // Test 1 : Creation
    // ─────────────────────────────────────────────────────────────
    #[test]
    fn test_column_new() {
        let col = Column::new("age".into(), DataType::Int);

        assert_eq!(col.name, "age");
        assert_eq!(col.data_type, DataType::Int);
        assert_eq!(col.len(), 0);
        assert!(col.is_empty());
    }

    // ─────────────────────────────────────────────────────────────
    // Test 2 : Basic Push & Get
    // ─────────────────────────────────────────────────────────────
    #[test]
    fn test_push_and_get() {
        let mut col = Column::new("test".into(), DataType::Int);

        col.push(Value::Int(42)).unwrap();

        assert_eq!(col.len(), 1);
        assert_eq!(col.get(0), Some(Value::Int(42)));
    }

    // ─────────────────────────────────────────────────────────────
    // Test 3 : Booleans are bit-packed
    // ─────────────────────────────────────────────────────────────
    #[test]
    fn test_bool_column() {
        let mut col = Column::new("active".into(), DataType::Bool);

        col.push(Value::Bool(true)).unwrap();
        col.push(Value::Bool(false)).unwrap();
        col.push(Value::Bool(true)).unwrap();

        assert_eq!(col.len(), 3);
        assert_eq!(col.get(1), Some(Value::Bool(false)));
        assert!(matches!(&col.data, ColumnData::Bool(bits) if bits.count_ones() == 2));
    }

    // ─────────────────────────────────────────────────────────────
    // Test 4 : Type mismatch
    // ─────────────────────────────────────────────────────────────
    #[test]
    fn test_type_mismatch() {
        let mut col = Column::new("int_col".into(), DataType::Int);

        let result = col.push(Value::Str("hello".into()));

        assert_eq!(
            result,
            Err(Error::TypeMismatch {
                column: "int_col".into(),
                expected: "int".into(),
                found: "str".into(),
            })
        );
        assert_eq!(col.len(), 0); // nothing inserted
    }

    // ─────────────────────────────────────────────────────────────
    // Test 5 : Out of bounds
    // ─────────────────────────────────────────────────────────────
    #[test]
    fn test_out_of_bounds() {
        let col = Column::new("test".into(), DataType::Str);

        assert_eq!(col.get(0), None);
        assert_eq!(col.get(100), None);
    }

    // ─────────────────────────────────────────────────────────────
    // Test 6 : Large Column
    // ─────────────────────────────────────────────────────────────
    #[test]
    fn test_large_column() {
        let mut col = Column::new("big".into(), DataType::Int);

        for i in 0..10_000 {
            col.push(Value::Int(i)).unwrap();
        }

        assert_eq!(col.len(), 10_000);
        assert_eq!(col.get(5_000), Some(Value::Int(5_000)));
        assert_eq!(col.get(9_999), Some(Value::Int(9_999)));
    }

    // ─────────────────────────────────────────────────────────────
    // Test 7 : in-place equality
    // ─────────────────────────────────────────────────────────────
    #[test]
    fn test_value_eq() {
        let mut col = Column::new("name".into(), DataType::Str);
        col.push(Value::Str("Alice".into())).unwrap();

        assert!(col.value_eq(0, &Value::Str("Alice".into())));
        assert!(!col.value_eq(0, &Value::Str("alice".into())));
        assert!(!col.value_eq(0, &Value::Int(0)));
        assert!(!col.value_eq(1, &Value::Str("Alice".into())));
    }

    // ─────────────────────────────────────────────────────────────
    // Test 8 : remove a value
    // ─────────────────────────────────────────────────────────────
    #[test]
    fn test_remove() {
        let mut col = Column::new("test".into(), DataType::Int);

        col.push(Value::Int(42)).unwrap();
        col.push(Value::Int(59)).unwrap();
        col.push(Value::Int(7)).unwrap();

        col.remove(1).unwrap();
        assert_eq!(col.len(), 2);
        assert_eq!(col.get(0), Some(Value::Int(42)));
        assert_eq!(col.get(1), Some(Value::Int(7)));

        assert_eq!(col.remove(2), Err(Error::RowOutOfBounds(2)));
    }

    // ─────────────────────────────────────────────────────────────
    // Test 9 : change a value
    // ─────────────────────────────────────────────────────────────
    #[test]
    fn test_column_set() {
        let mut col = Column::new("active".into(), DataType::Bool);
        col.push(Value::Bool(true)).unwrap();
        col.push(Value::Bool(true)).unwrap();

        col.set(0, &Value::Bool(false)).unwrap();
        assert_eq!(col.get(0), Some(Value::Bool(false)));
        assert_eq!(col.get(1), Some(Value::Bool(true)));

        assert!(col.set(0, &Value::Str("hello".into())).is_err());
        assert!(col.set(10, &Value::Bool(true)).is_err());
    }
}
