//! Numeric values captured from input lines.
//!
//! A numeric field is either an integer or a float. Columns of values start
//! out as integers and are widened to floats as soon as one float is seen;
//! they are never narrowed back.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberKind {
    Integer,
    Float,
}

/// A parsed numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    pub fn kind(&self) -> NumberKind {
        match self {
            Number::Integer(_) => NumberKind::Integer,
            Number::Float(_) => NumberKind::Float,
        }
    }

    /// Value as `f64`. Integers convert with `as`, which is exact up to 2^53.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Integer(v) => v as f64,
            Number::Float(v) => v,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(v) => write!(f, "{v}"),
            Number::Float(v) => write!(f, "{v}"),
        }
    }
}

/// A numeric sample type a column can hold.
///
/// Lets the statistics code run over either `i64` or `f64` columns without
/// converting the integer ones up front.
pub trait Sample: Copy + PartialOrd {
    fn to_f64(self) -> f64;
    fn to_number(self) -> Number;
}

impl Sample for i64 {
    fn to_f64(self) -> f64 {
        self as f64
    }

    fn to_number(self) -> Number {
        Number::Integer(self)
    }
}

impl Sample for f64 {
    fn to_f64(self) -> f64 {
        self
    }

    fn to_number(self) -> Number {
        Number::Float(self)
    }
}

/// All observed values of one numeric field, oldest first.
///
/// The kind tag is column-wide: pushing a float into an integer column
/// converts every stored value in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "lowercase")]
pub enum Column {
    Integer(Vec<i64>),
    Float(Vec<f64>),
}

impl Column {
    /// Start a column from its first value.
    pub fn new(first: Number) -> Self {
        match first {
            Number::Integer(v) => Column::Integer(vec![v]),
            Number::Float(v) => Column::Float(vec![v]),
        }
    }

    pub fn kind(&self) -> NumberKind {
        match self {
            Column::Integer(_) => NumberKind::Integer,
            Column::Float(_) => NumberKind::Float,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Integer(values) => values.len(),
            Column::Float(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a value, widening the column or the value as needed.
    pub fn push(&mut self, value: Number) {
        match value {
            Number::Integer(v) => match self {
                Column::Integer(values) => values.push(v),
                Column::Float(values) => values.push(v as f64),
            },
            Number::Float(v) => {
                if let Column::Integer(values) = self {
                    let widened = values.iter().map(|&i| i as f64).collect();
                    *self = Column::Float(widened);
                }
                if let Column::Float(values) = self {
                    values.push(v);
                }
            }
        }
    }

    pub fn get(&self, index: usize) -> Option<Number> {
        match self {
            Column::Integer(values) => values.get(index).copied().map(Number::Integer),
            Column::Float(values) => values.get(index).copied().map(Number::Float),
        }
    }

    /// True when every stored value is exactly equal to the first one.
    pub fn is_constant(&self) -> bool {
        fn all_same<T: PartialEq>(values: &[T]) -> bool {
            values.windows(2).all(|w| w[0] == w[1])
        }

        match self {
            Column::Integer(values) => all_same(values),
            Column::Float(values) => all_same(values),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Number> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}
