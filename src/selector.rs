//! Textual selectors that denote predicates.
//!
//! A selector is one or more `attribute = literal` comparisons joined by
//! `&`, for example `color = "green" & size = "large"`. Literal forms
//! mirror the value types: double-quoted text, integers, decimals,
//! `true`/`false` and single-quoted dates (`'2004-06-19'`). Grammar
//! details live in `selector.pest`.

use chrono::NaiveDate;
use pest::Parser;
use pest::error::LineColLocation;
use pest::iterators::Pair;
use pest_derive::Parser;
use tracing::trace;

use crate::datatype::{Decimal, Value};
use crate::error::{Result, SieveletError};
use crate::predicate::Predicate;

#[derive(Parser)]
#[grammar = "selector.pest"]
struct SelectorParser;

/// Parses a selector into a [`Predicate`].
///
/// A single comparison yields an atomic predicate, several yield their
/// conjunction. Malformed input is [`SieveletError::Parse`] with the
/// position pest reports.
pub fn parse(input: &str) -> Result<Predicate> {
    let mut pairs = SelectorParser::parse(Rule::selection, input).map_err(parse_error)?;
    let Some(selection) = pairs.next() else {
        return Err(SieveletError::Parse {
            message: String::from("empty selector"),
            line: None,
            col: None,
        });
    };
    let mut comparisons = Vec::new();
    for pair in selection.into_inner() {
        if pair.as_rule() == Rule::comparison {
            comparisons.push(parse_comparison(pair)?);
        }
    }
    trace!(comparisons = comparisons.len(), "selector parsed");
    match comparisons.len() {
        0 => Err(SieveletError::Parse {
            message: String::from("selector without comparisons"),
            line: None,
            col: None,
        }),
        1 => Ok(comparisons.remove(0)),
        _ => Predicate::all(comparisons),
    }
}

fn parse_comparison(pair: Pair<'_, Rule>) -> Result<Predicate> {
    let mut inner = pair.into_inner();
    let (Some(attribute), Some(literal)) = (inner.next(), inner.next()) else {
        return Err(SieveletError::Parse {
            message: String::from("malformed comparison"),
            line: None,
            col: None,
        });
    };
    Ok(Predicate::equals(attribute.as_str(), parse_literal(literal)?))
}

fn parse_literal(pair: Pair<'_, Rule>) -> Result<Value> {
    let slice = pair.as_str();
    match pair.as_rule() {
        // the grammar guarantees the enclosing quotes
        Rule::text => Ok(Value::Text(String::from(&slice[1..slice.len() - 1]))),
        Rule::integer => slice
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|e| literal_error(slice, &e.to_string())),
        Rule::decimal => Decimal::from_str(slice)
            .map(Value::Decimal)
            .ok_or_else(|| literal_error(slice, "not a decimal")),
        Rule::boolean => Ok(Value::Boolean(slice == "true")),
        Rule::date => NaiveDate::parse_from_str(&slice[1..slice.len() - 1], "%Y-%m-%d")
            .map(Value::Date)
            .map_err(|e| literal_error(slice, &e.to_string())),
        _ => Err(literal_error(slice, "unsupported literal form")),
    }
}

fn literal_error(slice: &str, reason: &str) -> SieveletError {
    SieveletError::Parse {
        message: format!("literal {}: {}", slice, reason),
        line: None,
        col: None,
    }
}

fn parse_error(e: pest::error::Error<Rule>) -> SieveletError {
    let (line, col) = match e.line_col {
        LineColLocation::Pos((line, col)) => (line, col),
        LineColLocation::Span((line, col), _) => (line, col),
    };
    SieveletError::Parse {
        message: e.variant.message().into_owned(),
        line: Some(line),
        col: Some(col),
    }
}
