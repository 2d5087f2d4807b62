use std::fmt;

/// One parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    CreateTable(CreateTable),
    DropTable(String),
    ListTables,
    Insert(Insert),
    Select(Select),
    Update(Update),
    Delete(Delete),
    Info(String),
}

impl Statement {
    /// Short operation name used for timing and log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Statement::CreateTable(_) => "create_table",
            Statement::DropTable(_) => "drop_table",
            Statement::ListTables => "list_tables",
            Statement::Insert(_) => "insert",
            Statement::Select(_) => "select",
            Statement::Update(_) => "update",
            Statement::Delete(_) => "delete",
            Statement::Info(_) => "info",
        }
    }

    /// Description of the destructive action, or `None` if the statement
    /// can run without confirmation.
    pub fn destructive_action(&self) -> Option<&'static str> {
        match self {
            Statement::DropTable(_) => Some("drop table"),
            Statement::Delete(_) => Some("delete rows"),
            _ => None,
        }
    }
}

/// A `name:type` pair as written on the command line.
///
/// The type name is kept as text so the schema registry can reject unknown
/// types with a schema error rather than a syntax error.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub name: String,
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    pub name: String,
    pub columns: Vec<ColumnSpec>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: String,
    pub values: Vec<Literal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub table: String,
    pub predicate: Option<Predicate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub table: String,
    pub assignment: Assignment,
    pub predicate: Predicate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub table: String,
    pub predicate: Predicate,
}

/// `column = value` in a `set` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: String,
    pub value: Literal,
}

/// Equality condition `column = value` in a `where` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: String,
    pub value: Literal,
}

/// An untyped value as written in a command.
///
/// Literals become typed values only once the declared type of the target
/// column is known, see [crate::DataType::coerce].
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    /// Quoted text.
    Str(String),
    Bool(bool),
    /// An unquoted word, never accepted as a value of any type.
    Bare(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(i) => write!(f, "{i}"),
            Literal::Str(s) => write!(f, "\"{s}\""),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Bare(s) => f.write_str(s),
        }
    }
}
