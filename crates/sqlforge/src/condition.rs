//! Boolean conditions for WHERE / HAVING / ON clauses.
//!
//! [`Condition`] supports AND/OR/NOT grouping, comparisons, IN lists, BETWEEN,
//! EXISTS and raw fragments. Conditions assemble into a tree like any other clause:
//! an AND group is a keyword-less node joined by `" AND "`, and an OR group nested
//! inside an AND (or the reverse) is a grouped node, so precedence survives rendering.

use crate::error::SqlResult;
use crate::expr::Expr;
use crate::node::NodeMeta;
use crate::query::Query;
use crate::tree::{Assemble, SyntaxTree};
use crate::value::Value;

/// A boolean condition.
#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    /// All conditions must be true.
    And(Vec<Condition>),

    /// At least one condition must be true.
    Or(Vec<Condition>),

    /// Negate the inner condition.
    Not(Box<Condition>),

    /// `left op right`
    Compare {
        left: Expr,
        op: &'static str,
        right: Expr,
    },

    /// `operand IS NULL` / `operand IS NOT NULL`
    NullCheck { operand: Expr, is_null: bool },

    /// `operand IN (v, ...)` / `operand NOT IN (v, ...)`
    InList {
        operand: Expr,
        values: Vec<Expr>,
        negated: bool,
    },

    /// `operand BETWEEN from AND to`
    Between {
        operand: Expr,
        from: Expr,
        to: Expr,
        negated: bool,
    },

    /// `EXISTS (subquery)` / `NOT EXISTS (subquery)`
    Exists { query: Expr, negated: bool },

    /// Raw SQL fragment without parameters.
    Raw(String),

    /// Always true (used for empty NOT IN lists).
    True,

    /// Always false (used for empty IN lists).
    False,
}

impl Condition {
    /// Create an AND group.
    pub fn and(conditions: Vec<Condition>) -> Self {
        Condition::And(conditions)
    }

    /// Create an OR group.
    pub fn or(conditions: Vec<Condition>) -> Self {
        Condition::Or(conditions)
    }

    /// Negate a condition.
    pub fn not(condition: Condition) -> Self {
        Condition::Not(Box::new(condition))
    }

    /// Compare two arbitrary expressions.
    pub fn compare(left: impl Into<Expr>, op: &'static str, right: impl Into<Expr>) -> Self {
        Condition::Compare {
            left: left.into(),
            op,
            right: right.into(),
        }
    }

    fn column_op(column: &str, op: &'static str, value: Value) -> Self {
        Self::compare(Expr::name(column), op, Expr::Constant(value))
    }

    /// column = value
    pub fn eq(column: &str, value: impl Into<Value>) -> Self {
        Self::column_op(column, "=", value.into())
    }

    /// column != value
    pub fn ne(column: &str, value: impl Into<Value>) -> Self {
        Self::column_op(column, "!=", value.into())
    }

    /// column > value
    pub fn gt(column: &str, value: impl Into<Value>) -> Self {
        Self::column_op(column, ">", value.into())
    }

    /// column >= value
    pub fn gte(column: &str, value: impl Into<Value>) -> Self {
        Self::column_op(column, ">=", value.into())
    }

    /// column < value
    pub fn lt(column: &str, value: impl Into<Value>) -> Self {
        Self::column_op(column, "<", value.into())
    }

    /// column <= value
    pub fn lte(column: &str, value: impl Into<Value>) -> Self {
        Self::column_op(column, "<=", value.into())
    }

    /// column LIKE pattern
    pub fn like(column: &str, pattern: impl Into<Value>) -> Self {
        Self::column_op(column, "LIKE", pattern.into())
    }

    /// column ILIKE pattern (case-insensitive)
    pub fn ilike(column: &str, pattern: impl Into<Value>) -> Self {
        Self::column_op(column, "ILIKE", pattern.into())
    }

    /// left = right, comparing two columns (join predicates).
    pub fn columns_eq(left: &str, right: &str) -> Self {
        Self::compare(Expr::name(left), "=", Expr::name(right))
    }

    /// column IS NULL
    pub fn is_null(column: &str) -> Self {
        Condition::NullCheck {
            operand: Expr::name(column),
            is_null: true,
        }
    }

    /// column IS NOT NULL
    pub fn is_not_null(column: &str) -> Self {
        Condition::NullCheck {
            operand: Expr::name(column),
            is_null: false,
        }
    }

    /// column IN (values...); an empty list is always false.
    pub fn in_list<T: Into<Value>>(column: &str, values: impl IntoIterator<Item = T>) -> Self {
        let values: Vec<Expr> = values.into_iter().map(Expr::value).collect();
        if values.is_empty() {
            return Condition::False;
        }
        Condition::InList {
            operand: Expr::name(column),
            values,
            negated: false,
        }
    }

    /// column NOT IN (values...); an empty list is always true.
    pub fn not_in<T: Into<Value>>(column: &str, values: impl IntoIterator<Item = T>) -> Self {
        let values: Vec<Expr> = values.into_iter().map(Expr::value).collect();
        if values.is_empty() {
            return Condition::True;
        }
        Condition::InList {
            operand: Expr::name(column),
            values,
            negated: true,
        }
    }

    /// column IN (subquery)
    pub fn in_query(column: &str, query: Query) -> Self {
        Self::compare(Expr::name(column), "IN", Expr::subquery(query))
    }

    /// column BETWEEN from AND to
    pub fn between(column: &str, from: impl Into<Value>, to: impl Into<Value>) -> Self {
        Condition::Between {
            operand: Expr::name(column),
            from: Expr::value(from),
            to: Expr::value(to),
            negated: false,
        }
    }

    /// column NOT BETWEEN from AND to
    pub fn not_between(column: &str, from: impl Into<Value>, to: impl Into<Value>) -> Self {
        Condition::Between {
            operand: Expr::name(column),
            from: Expr::value(from),
            to: Expr::value(to),
            negated: true,
        }
    }

    /// EXISTS (subquery)
    pub fn exists(query: Query) -> Self {
        Condition::Exists {
            query: Expr::subquery(query),
            negated: false,
        }
    }

    /// NOT EXISTS (subquery)
    pub fn not_exists(query: Query) -> Self {
        Condition::Exists {
            query: Expr::subquery(query),
            negated: true,
        }
    }

    /// Raw SQL fragment.
    pub fn raw(sql: impl Into<String>) -> Self {
        Condition::Raw(sql.into())
    }

    /// Check if this condition is empty (contains no conditions).
    pub fn is_empty(&self) -> bool {
        match self {
            Condition::And(items) | Condition::Or(items) => items.iter().all(Condition::is_empty),
            Condition::Not(inner) => inner.is_empty(),
            Condition::Raw(sql) => sql.trim().is_empty(),
            _ => false,
        }
    }

    /// Unwrap AND/OR groups that hold a single live member.
    fn effective(&self) -> &Condition {
        match self {
            Condition::And(items) | Condition::Or(items) => {
                let mut live = items.iter().filter(|c| !c.is_empty());
                match (live.next(), live.next()) {
                    (Some(only), None) => only.effective(),
                    _ => self,
                }
            }
            _ => self,
        }
    }

    fn assemble_in(&self, tree: &mut dyn SyntaxTree, grouped: bool) -> SqlResult<()> {
        if self.is_empty() {
            return Ok(());
        }
        let this = self.effective();
        match this {
            Condition::And(items) => this.assemble_group(tree, items, " AND ", grouped),
            Condition::Or(items) => this.assemble_group(tree, items, " OR ", grouped),
            Condition::Not(inner) => {
                // Grouping a keyword node wraps its body, so the outer parentheses
                // need their own keyword-less node.
                if grouped {
                    tree.start_node(NodeMeta::empty().grouped());
                }
                tree.start_node(NodeMeta::keyword("NOT"));
                inner.assemble_in(tree, true)?;
                tree.end_node()?;
                if grouped {
                    tree.end_node()?;
                }
                Ok(())
            }
            Condition::Compare { left, op, right } => leaves(
                tree,
                grouped,
                vec![left.clone(), Expr::op(*op), right.clone()],
            ),
            Condition::NullCheck { operand, is_null } => {
                let check = if *is_null { "IS NULL" } else { "IS NOT NULL" };
                leaves(tree, grouped, vec![operand.clone(), Expr::keyword(check)])
            }
            Condition::InList {
                operand,
                values,
                negated,
            } => {
                let op = if *negated { "NOT IN" } else { "IN" };
                tree.start_node(NodeMeta::empty().grouped_if(grouped))
                    .add_leaves(vec![operand.clone(), Expr::keyword(op)])
                    .start_node(NodeMeta::empty().with_delimiter(", ").grouped())
                    .add_leaves(values.clone())
                    .end_node()?
                    .end_node()?;
                Ok(())
            }
            Condition::Between {
                operand,
                from,
                to,
                negated,
            } => {
                let op = if *negated { "NOT BETWEEN" } else { "BETWEEN" };
                leaves(
                    tree,
                    grouped,
                    vec![
                        operand.clone(),
                        Expr::keyword(op),
                        from.clone(),
                        Expr::keyword("AND"),
                        to.clone(),
                    ],
                )
            }
            Condition::Exists { query, negated } => {
                let op = if *negated { "NOT EXISTS" } else { "EXISTS" };
                leaves(tree, grouped, vec![Expr::keyword(op), query.clone()])
            }
            Condition::Raw(sql) => leaves(tree, grouped, vec![Expr::keyword(sql.clone())]),
            Condition::True => leaves(tree, grouped, vec![Expr::keyword("1=1")]),
            Condition::False => leaves(tree, grouped, vec![Expr::keyword("1=0")]),
        }
    }

    fn assemble_group(
        &self,
        tree: &mut dyn SyntaxTree,
        items: &[Condition],
        delimiter: &str,
        grouped: bool,
    ) -> SqlResult<()> {
        tree.start_node(
            NodeMeta::empty()
                .with_delimiter(delimiter)
                .grouped_if(grouped),
        );
        for item in items.iter().filter(|c| !c.is_empty()) {
            let item = item.effective();
            // OR inside AND (and the reverse) keeps its parentheses.
            let nested = matches!(
                (self, item),
                (Condition::And(_), Condition::Or(_)) | (Condition::Or(_), Condition::And(_))
            );
            item.assemble_in(tree, nested)?;
        }
        tree.end_node()?;
        Ok(())
    }
}

/// Add one keyword-less node holding `exprs`.
fn leaves(tree: &mut dyn SyntaxTree, grouped: bool, exprs: Vec<Expr>) -> SqlResult<()> {
    tree.start_node(NodeMeta::empty().grouped_if(grouped))
        .add_leaves(exprs)
        .end_node()?;
    Ok(())
}

impl Assemble for Condition {
    fn assemble(&self, tree: &mut dyn SyntaxTree) -> SqlResult<()> {
        self.assemble_in(tree, false)
    }
}
