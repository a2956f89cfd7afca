//! Leaf expressions of a statement tree.
//!
//! [`Expr`] is a closed set of leaf kinds. Each leaf renders itself in literal or
//! prepared form through the [`Formatter`](crate::Formatter); constants (and any
//! composite containing constants) are *preparable*: in prepared mode they emit a
//! placeholder and contribute their value to the binding list.

use crate::error::{SqlError, SqlResult};
use crate::ident::Name;
use crate::node::Node;
use crate::query::Query;
use crate::value::Value;

static NULL_VALUE: Value = Value::Null;

/// Where an operator sits relative to its operands.
///
/// This is informational: the clause assembling the operator decides operand order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OperatorPosition {
    Prefix,
    #[default]
    Infix,
    Postfix,
}

/// A textual SQL operator such as `=`, `||` or `IS NOT DISTINCT FROM`.
#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    pub symbol: String,
    pub position: OperatorPosition,
}

/// A leaf of the statement tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Identifier, optionally qualified, quoted and aliased.
    Name(Name),

    /// Scalar literal; preparable.
    Constant(Value),

    /// Operator text.
    Operator(Operator),

    /// Raw SQL text emitted verbatim.
    Keyword(String),

    /// Comma-joined expressions. Parenthesizing is up to the enclosing node.
    List(Vec<Expr>),

    /// Function call: `name(arg, ...)`.
    Function { name: String, args: Vec<Expr> },

    /// A complete statement rendered inside parentheses.
    SubQuery {
        query: Box<Node>,
        alias: Option<String>,
    },

    /// `expr::type`
    Cast { expr: Box<Expr>, ty: String },

    /// `NULL`
    Null,
}

impl Expr {
    /// Create an unvalidated name leaf.
    pub fn name(text: impl Into<String>) -> Self {
        Expr::Name(Name::raw(text))
    }

    /// Parse a dotted, possibly quoted name.
    pub fn parse_name(text: &str) -> SqlResult<Self> {
        Name::parse(text).map(Expr::Name)
    }

    /// Create a quoted name leaf.
    pub fn quoted(text: &str) -> SqlResult<Self> {
        Name::quoted(text).map(Expr::Name)
    }

    /// Create a constant leaf.
    pub fn value(value: impl Into<Value>) -> Self {
        Expr::Constant(value.into())
    }

    /// Create an infix operator leaf.
    pub fn op(symbol: impl Into<String>) -> Self {
        Self::op_at(symbol, OperatorPosition::Infix)
    }

    /// Create an operator leaf with an explicit position.
    pub fn op_at(symbol: impl Into<String>, position: OperatorPosition) -> Self {
        Expr::Operator(Operator {
            symbol: symbol.into(),
            position,
        })
    }

    /// Create a raw keyword leaf.
    pub fn keyword(text: impl Into<String>) -> Self {
        Expr::Keyword(text.into())
    }

    /// Create a list leaf.
    pub fn list(items: impl IntoIterator<Item = Expr>) -> Self {
        Expr::List(items.into_iter().collect())
    }

    /// Create a function call leaf.
    pub fn function(name: impl Into<String>, args: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Function {
            name: name.into(),
            args: args.into_iter().collect(),
        }
    }

    /// Wrap a finished statement as a sub-query leaf.
    pub fn subquery(query: Query) -> Self {
        Expr::SubQuery {
            query: Box::new(query.into_root()),
            alias: None,
        }
    }

    /// Wrap a finished statement as an aliased sub-query: `(...) AS alias`.
    pub fn subquery_as(query: Query, alias: impl Into<String>) -> Self {
        Expr::SubQuery {
            query: Box::new(query.into_root()),
            alias: Some(alias.into()),
        }
    }

    /// Cast this expression: `self::ty`.
    pub fn cast(self, ty: impl Into<String>) -> Self {
        Expr::Cast {
            expr: Box::new(self),
            ty: ty.into(),
        }
    }

    /// Create a `NULL` leaf.
    pub fn null() -> Self {
        Expr::Null
    }

    /// Short name of the leaf kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Name(_) => "name",
            Expr::Constant(_) => "constant",
            Expr::Operator(_) => "operator",
            Expr::Keyword(_) => "keyword",
            Expr::List(_) => "list",
            Expr::Function { .. } => "function",
            Expr::SubQuery { .. } => "subquery",
            Expr::Cast { .. } => "cast",
            Expr::Null => "null",
        }
    }

    /// An empty leaf renders as an empty segment.
    pub fn is_empty(&self) -> bool {
        match self {
            Expr::Name(name) => name.is_empty(),
            Expr::Operator(op) => op.symbol.trim().is_empty(),
            Expr::Keyword(text) => text.trim().is_empty(),
            Expr::List(items) => items.iter().all(Expr::is_empty),
            Expr::Function { name, .. } => name.trim().is_empty(),
            Expr::Cast { expr, .. } => expr.is_empty(),
            Expr::Constant(_) | Expr::SubQuery { .. } | Expr::Null => false,
        }
    }

    /// Whether prepared rendering of this leaf emits at least one placeholder.
    pub fn is_preparable(&self) -> bool {
        match self {
            Expr::Constant(_) => true,
            Expr::Cast { expr, .. } => expr.is_preparable(),
            Expr::List(items) | Expr::Function { args: items, .. } => {
                items.iter().any(Expr::is_preparable)
            }
            Expr::SubQuery { query, .. } => query.has_preparable(),
            Expr::Name(_) | Expr::Operator(_) | Expr::Keyword(_) | Expr::Null => false,
        }
    }

    /// The single scalar value of this leaf.
    ///
    /// Constants, `NULL` and casts of those have one. Every other kind, composites
    /// in particular, fails with [`SqlError::CompositeValue`]: their values are reached
    /// through rendering, which binds each constant in order.
    pub fn scalar(&self) -> SqlResult<&Value> {
        match self {
            Expr::Constant(value) => Ok(value),
            Expr::Null => Ok(&NULL_VALUE),
            Expr::Cast { expr, .. } => expr.scalar(),
            other => Err(SqlError::CompositeValue(other.kind())),
        }
    }

    /// Every constant in left-to-right rendering order.
    pub fn constants(&self) -> Vec<&Value> {
        let mut out = Vec::new();
        self.collect_constants(&mut out);
        out
    }

    fn collect_constants<'a>(&'a self, out: &mut Vec<&'a Value>) {
        match self {
            Expr::Constant(value) => out.push(value),
            Expr::Cast { expr, .. } => expr.collect_constants(out),
            Expr::List(items) | Expr::Function { args: items, .. } => {
                for item in items {
                    item.collect_constants(out);
                }
            }
            Expr::SubQuery { query, .. } => query.collect_constants(out),
            Expr::Name(_) | Expr::Operator(_) | Expr::Keyword(_) | Expr::Null => {}
        }
    }
}

impl From<Name> for Expr {
    fn from(name: Name) -> Self {
        Expr::Name(name)
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Constant(value)
    }
}

impl From<&str> for Expr {
    fn from(text: &str) -> Self {
        Expr::name(text)
    }
}

impl From<String> for Expr {
    fn from(text: String) -> Self {
        Expr::name(text)
    }
}

impl From<Query> for Expr {
    fn from(query: Query) -> Self {
        Expr::subquery(query)
    }
}
