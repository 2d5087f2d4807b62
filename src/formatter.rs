//! Text rendering of command outcomes.

use colored::Colorize;

use crate::database::{Outcome, QueryResult};
use crate::table::{ColumnDef, RowId};

/// Formats outcomes for display in the terminal.
pub struct OutputFormatter {
    color: bool,
}

impl OutputFormatter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Renders one outcome as the text printed by the shell.
    pub fn format_outcome(&self, outcome: &Outcome) -> String {
        match outcome {
            Outcome::Created { table, columns } => format!(
                "Table \"{}\" created with columns: {}",
                table,
                format_columns(columns)
            ),
            Outcome::Dropped(table) => format!("Table \"{table}\" dropped."),
            Outcome::Tables(names) if names.is_empty() => "(no tables)".to_string(),
            Outcome::Tables(names) => names
                .iter()
                .map(|name| format!("- {name}"))
                .collect::<Vec<_>>()
                .join("\n"),
            Outcome::Inserted { table, id } => {
                format!("Row with ID={id} inserted into table \"{table}\".")
            }
            Outcome::Rows(result) => self.format_table(result),
            Outcome::Updated { ids, .. } if ids.is_empty() => "(nothing updated)".to_string(),
            Outcome::Updated { table, ids } => format!(
                "Updated {} row(s) in table \"{}\": {}.",
                ids.len(),
                table,
                format_ids(ids)
            ),
            Outcome::Deleted { ids, .. } if ids.is_empty() => "(nothing deleted)".to_string(),
            Outcome::Deleted { table, ids } => format!(
                "Deleted {} row(s) from table \"{}\": {}.",
                ids.len(),
                table,
                format_ids(ids)
            ),
            Outcome::Info(info) => format!(
                "Table: {}\nColumns: {}\nRows: {}",
                info.name,
                format_columns(&info.columns),
                info.row_count
            ),
        }
    }

    /// Renders rows as a bordered text table, `ID` first.
    pub fn format_table(&self, result: &QueryResult) -> String {
        if result.rows.is_empty() {
            return "(no rows)".to_string();
        }

        let cells: Vec<Vec<String>> = result
            .rows
            .iter()
            .map(|row| {
                std::iter::once(row.id.to_string())
                    .chain(row.values.iter().map(|v| v.to_string()))
                    .collect()
            })
            .collect();

        let mut widths: Vec<usize> = result.columns.iter().map(|c| c.chars().count()).collect();
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let border = format!(
            "+{}+",
            widths
                .iter()
                .map(|w| "-".repeat(w + 2))
                .collect::<Vec<_>>()
                .join("+")
        );

        let mut lines = vec![border.clone()];
        lines.push(self.format_line(&result.columns, &widths, true));
        lines.push(border.clone());
        for row in &cells {
            lines.push(self.format_line(row, &widths, false));
        }
        lines.push(border);
        lines.join("\n")
    }

    fn format_line(&self, cells: &[String], widths: &[usize], header: bool) -> String {
        let cells: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| {
                // pad before coloring, escape codes have no display width
                let padded = format!("{:<width$}", cell, width = *width);
                if header && self.color {
                    padded.bold().to_string()
                } else {
                    padded
                }
            })
            .collect();
        format!("| {} |", cells.join(" | "))
    }
}

fn format_columns(columns: &[ColumnDef]) -> String {
    columns
        .iter()
        .map(|c| format!("{}:{}", c.name, c.data_type))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_ids(ids: &[RowId]) -> String {
    let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    format!("ID={}", ids.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::TableInfo;
    use crate::table::Row;
    use crate::{DataType, Value};
    use std::sync::Arc;

    fn plain() -> OutputFormatter {
        OutputFormatter::new(false)
    }

    #[test]
    fn test_format_table() {
        let result = QueryResult {
            columns: vec!["ID".into(), "name".into(), "active".into()],
            rows: vec![
                Row {
                    id: 1,
                    values: vec![Value::Str("Sergei".into()), Value::Bool(true)],
                },
                Row {
                    id: 12,
                    values: vec![Value::Str("Ann".into()), Value::Bool(false)],
                },
            ],
        };

        let expected = "\
+----+--------+--------+
| ID | name   | active |
+----+--------+--------+
| 1  | Sergei | true   |
| 12 | Ann    | false  |
+----+--------+--------+";
        assert_eq!(plain().format_outcome(&Outcome::Rows(Arc::new(result))), expected);
    }

    #[test]
    fn test_format_empty_results() {
        let empty = QueryResult {
            columns: vec!["ID".into()],
            rows: vec![],
        };
        assert_eq!(plain().format_table(&empty), "(no rows)");
        assert_eq!(plain().format_outcome(&Outcome::Tables(vec![])), "(no tables)");
        assert_eq!(
            plain().format_outcome(&Outcome::Deleted {
                table: "users".into(),
                ids: vec![]
            }),
            "(nothing deleted)"
        );
    }

    #[test]
    fn test_format_messages() {
        let f = plain();

        assert_eq!(
            f.format_outcome(&Outcome::Created {
                table: "users".into(),
                columns: vec![
                    ColumnDef::new("ID", DataType::Int),
                    ColumnDef::new("name", DataType::Str),
                ],
            }),
            "Table \"users\" created with columns: ID:int, name:str"
        );
        assert_eq!(
            f.format_outcome(&Outcome::Inserted {
                table: "users".into(),
                id: 3
            }),
            "Row with ID=3 inserted into table \"users\"."
        );
        assert_eq!(
            f.format_outcome(&Outcome::Updated {
                table: "users".into(),
                ids: vec![1, 4]
            }),
            "Updated 2 row(s) in table \"users\": ID=1, 4."
        );
        assert_eq!(
            f.format_outcome(&Outcome::Tables(vec!["users".into(), "posts".into()])),
            "- users\n- posts"
        );
    }

    #[test]
    fn test_format_info() {
        let info = TableInfo {
            name: "users".into(),
            columns: vec![
                ColumnDef::new("ID", DataType::Int),
                ColumnDef::new("active", DataType::Bool),
            ],
            row_count: 2,
        };

        assert_eq!(
            plain().format_outcome(&Outcome::Info(info)),
            "Table: users\nColumns: ID:int, active:bool\nRows: 2"
        );
    }
}
