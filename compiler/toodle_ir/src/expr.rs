//! Expression model for annotation parameters and constants.

use std::fmt;

use crate::{escape_string, Decimal};

/// A data literal, a reference to a constant, or a list of expressions.
///
/// Expressions are never evaluated: the expansion pass only replaces
/// `Var` references by the values they are bound to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expr {
    /// Decoded string literal.
    Str(String),
    /// Arbitrary-precision number literal.
    Number(Decimal),
    /// `$name` reference, stored without the `$`.
    Var(String),
    /// `[a b c]`
    List(Vec<Expr>),
}

impl Expr {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Expr::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Decimal> {
        match self {
            Expr::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_var(&self) -> Option<&str> {
        match self {
            Expr::Var(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Expr]> {
        match self {
            Expr::List(items) => Some(items),
            _ => None,
        }
    }

    /// Boolean reading of a string literal: only `"true"` and `"false"`.
    pub fn as_bool(&self) -> Option<bool> {
        match self.as_str()? {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    /// Integral numbers that fit an `i64`.
    pub fn as_int(&self) -> Option<i64> {
        self.as_number()?.to_i64()
    }

    /// True for an integral number of any size.
    pub fn is_integer(&self) -> bool {
        self.as_number().is_some_and(Decimal::is_integer)
    }

    /// Strings, numbers and references are scalars; lists are not.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Expr::List(_))
    }

    /// Source form of the expression, as the writer emits it.
    pub fn to_literal(&self) -> String {
        match self {
            Expr::Str(s) => escape_string(s),
            Expr::Number(n) => n.to_plain_string(),
            Expr::Var(name) => format!("${name}"),
            Expr::List(items) => {
                let inner: Vec<String> = items.iter().map(Expr::to_literal).collect();
                format!("[{}]", inner.join(" "))
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_literal())
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Expr::Str(value.to_owned())
    }
}

impl From<Decimal> for Expr {
    fn from(value: Decimal) -> Self {
        Expr::Number(value)
    }
}
