use std::fmt;
use std::str::FromStr;

use crate::ast::Literal;
use crate::error::Error;
use crate::value::Value;

/// Represents the supported data types in the database schema.
/// These types define the structure of columns and the expected format of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// A 64-bit signed integer, declared as `int`.
    Int,
    /// A UTF-8 character string, declared as `str`.
    Str,
    /// A boolean value, declared as `bool`.
    Bool,
}

impl DataType {
    /// Name used in column definitions (`name:type`).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Str => "str",
            Self::Bool => "bool",
        }
    }

    /// Converts a parsed literal into a typed [Value] for a column of this type.
    ///
    /// Only the unambiguous spelling of each type is accepted: integer literals
    /// for `int`, quoted text for `str` and `true`/`false` for `bool`.
    /// Returns `None` when the literal does not fit.
    ///
    /// # Example
    /// ```
    /// # use primdb::ast::Literal;
    /// # use primdb::data_type::DataType;
    /// # use primdb::value::Value;
    /// assert_eq!(DataType::Int.coerce(&Literal::Int(7)), Some(Value::Int(7)));
    /// assert_eq!(DataType::Str.coerce(&Literal::Int(7)), None);
    /// assert_eq!(DataType::Str.coerce(&Literal::Bare("Bob".into())), None);
    /// ```
    pub fn coerce(&self, literal: &Literal) -> Option<Value> {
        match (self, literal) {
            (Self::Int, Literal::Int(i)) => Some(Value::Int(*i)),
            (Self::Str, Literal::Str(s)) => Some(Value::Str(s.as_str().into())),
            (Self::Bool, Literal::Bool(b)) => Some(Value::Bool(*b)),
            _ => None,
        }
    }
}

impl FromStr for DataType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => Ok(Self::Int),
            "str" => Ok(Self::Str),
            "bool" => Ok(Self::Bool),
            other => Err(Error::InvalidSchema(format!(
                "unsupported column type \"{other}\", expected one of int, str, bool"
            ))),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_type_names() {
        assert_eq!("int".parse::<DataType>(), Ok(DataType::Int));
        assert_eq!("str".parse::<DataType>(), Ok(DataType::Str));
        assert_eq!("bool".parse::<DataType>(), Ok(DataType::Bool));
    }

    #[test]
    fn test_reject_unknown_type_names() {
        for name in ["float", "text", "INT", ""] {
            let err = name.parse::<DataType>().unwrap_err();
            assert!(matches!(err, Error::InvalidSchema(_)), "{name}");
        }
    }

    #[test]
    fn test_coerce_matching_literals() {
        assert_eq!(DataType::Int.coerce(&Literal::Int(-3)), Some(Value::Int(-3)));
        assert_eq!(
            DataType::Str.coerce(&Literal::Str("Sergei".into())),
            Some(Value::Str("Sergei".into()))
        );
        assert_eq!(
            DataType::Bool.coerce(&Literal::Bool(false)),
            Some(Value::Bool(false))
        );
    }

    #[test]
    fn test_coerce_rejects_ambiguous_literals() {
        // quoted numbers stay text, bare words are never coerced
        assert_eq!(DataType::Int.coerce(&Literal::Str("42".into())), None);
        assert_eq!(DataType::Bool.coerce(&Literal::Int(1)), None);
        assert_eq!(DataType::Bool.coerce(&Literal::Str("true".into())), None);
        assert_eq!(DataType::Str.coerce(&Literal::Bare("Sergei".into())), None);
    }

    #[test]
    fn test_display_round_trips_with_from_str() {
        for ty in [DataType::Int, DataType::Str, DataType::Bool] {
            assert_eq!(ty.to_string().parse::<DataType>(), Ok(ty));
        }
    }
}
