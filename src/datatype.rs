// used for date values
use chrono::NaiveDate;
// used for decimal numbers
use bigdecimal::BigDecimal;

// used when parsing a string to a decimal
use std::str::FromStr;
// used to print out readable forms of a value
use std::fmt;
// used to reach the wrapped decimal without exposing the field
use std::ops;

/// A typed value held by an item attribute or a record field.
///
/// The set of variants is closed. Equality across variants is `false`,
/// never an error, so a predicate comparing a text attribute against an
/// integer simply does not match.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub enum Value {
    Text(String),
    Integer(i64),
    Boolean(bool),
    Decimal(Decimal),
    Date(NaiveDate),
}

impl Value {
    pub fn data_type(&self) -> &'static str {
        match self {
            Value::Text(_) => "Text",
            Value::Integer(_) => "Integer",
            Value::Boolean(_) => "Boolean",
            Value::Decimal(_) => "Decimal",
            Value::Date(_) => "Date",
        }
    }
}
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Text(v) => write!(f, "\"{}\"", v),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{}", v),
            // dates are written the way selector literals quote them
            Value::Date(v) => write!(f, "'{}'", v),
        }
    }
}
impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(String::from(v))
    }
}
impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}
impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}
impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}
impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

#[derive(Eq, PartialEq, Hash, PartialOrd, Ord, Clone, Debug)]
pub struct Decimal(BigDecimal);

impl Decimal {
    pub fn from_str(s: &str) -> Option<Decimal> {
        match BigDecimal::from_str(s) {
            Ok(decimal) => Some(Decimal(decimal)),
            _ => None,
        }
    }
}
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl ops::Deref for Decimal {
    type Target = BigDecimal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
