//! Statement builders.
//!
//! Each builder is a single consuming struct: clauses may be added in any order and
//! are assembled into the tree in canonical SQL order. Builders check their own
//! state in [`Statement::validate`] before anything is assembled.
//!
//! ```ignore
//! use sqlforge::{select, Condition, Filter, Statement};
//!
//! let query = select(["id", "name"])
//!     .from("users")
//!     .eq("status", "active")
//!     .order_by_desc("created_at")
//!     .limit(10)
//!     .build()?;
//!
//! let rendered = query.render_prepared();
//! assert_eq!(rendered.sql, "SELECT id, name FROM users WHERE status = ? ORDER BY created_at DESC LIMIT 10");
//! ```

mod delete;
mod insert;
mod select;
mod sequence;
mod update;

pub use delete::DeleteBuilder;
pub use insert::{ConflictAction, InsertBuilder};
pub use select::{Join, JoinConstraint, JoinKind, SelectBuilder};
pub use sequence::{CreateSequence, DropSequence, currval, nextval, setval};
pub use update::UpdateBuilder;

use crate::condition::Condition;
use crate::context::Context;
use crate::error::SqlResult;
use crate::expr::Expr;
use crate::format::Rendered;
use crate::ident::Name;
use crate::node::NodeMeta;
use crate::query::Query;
use crate::tree::{Assemble, SyntaxTree};
use crate::value::Value;

/// Create a SELECT builder for the given columns (`*` when empty).
///
/// # Example
/// ```ignore
/// let q = sqlforge::select(["id", "email"]).from("users");
/// ```
pub fn select<E: Into<Expr>>(columns: impl IntoIterator<Item = E>) -> SelectBuilder {
    SelectBuilder::new().columns(columns)
}

/// Create a `SELECT *` builder over a table.
pub fn select_from(table: impl Into<Expr>) -> SelectBuilder {
    SelectBuilder::new().from(table)
}

/// Create an INSERT builder for the given table.
pub fn insert_into(table: impl Into<Name>) -> InsertBuilder {
    InsertBuilder::new(table)
}

/// Create an UPDATE builder for the given table.
pub fn update(table: impl Into<Name>) -> UpdateBuilder {
    UpdateBuilder::new(table)
}

/// Create a DELETE builder for the given table.
///
/// DELETE without WHERE is rejected unless [`DeleteBuilder::all`] is called.
pub fn delete_from(table: impl Into<Name>) -> DeleteBuilder {
    DeleteBuilder::new(table)
}

/// Create a CREATE SEQUENCE builder.
pub fn create_sequence(name: impl Into<Name>) -> CreateSequence {
    CreateSequence::new(name)
}

/// Create a DROP SEQUENCE builder.
pub fn drop_sequence(name: impl Into<Name>) -> DropSequence {
    DropSequence::new(name)
}

/// A complete statement.
pub trait Statement: Assemble {
    /// Validate builder state before assembly.
    fn validate(&self) -> SqlResult<()> {
        Ok(())
    }

    /// Assemble into a tree from `ctx` and return the finished query.
    fn build_with(&self, ctx: &Context) -> SqlResult<Query> {
        self.validate()?;
        Query::assemble(ctx, self)
    }

    /// Assemble with the default context.
    fn build(&self) -> SqlResult<Query> {
        self.build_with(&Context::default())
    }

    /// Debug helper: literal SQL with the default context.
    fn to_sql(&self) -> SqlResult<String> {
        Ok(self.build()?.render())
    }

    /// Prepared SQL and bindings with the default context.
    fn to_prepared(&self) -> SqlResult<Rendered> {
        Ok(self.build()?.render_prepared())
    }
}

/// WHERE helpers shared by SELECT, UPDATE and DELETE.
///
/// Every condition added is ANDed with the previous ones.
pub trait Filter: Sized {
    /// Add a condition.
    fn and_where(self, condition: Condition) -> Self;

    /// Add WHERE: column = value
    fn eq(self, column: &str, value: impl Into<Value>) -> Self {
        self.and_where(Condition::eq(column, value))
    }

    /// Add WHERE: column != value
    fn ne(self, column: &str, value: impl Into<Value>) -> Self {
        self.and_where(Condition::ne(column, value))
    }

    /// Add WHERE: column > value
    fn gt(self, column: &str, value: impl Into<Value>) -> Self {
        self.and_where(Condition::gt(column, value))
    }

    /// Add WHERE: column >= value
    fn gte(self, column: &str, value: impl Into<Value>) -> Self {
        self.and_where(Condition::gte(column, value))
    }

    /// Add WHERE: column < value
    fn lt(self, column: &str, value: impl Into<Value>) -> Self {
        self.and_where(Condition::lt(column, value))
    }

    /// Add WHERE: column <= value
    fn lte(self, column: &str, value: impl Into<Value>) -> Self {
        self.and_where(Condition::lte(column, value))
    }

    /// Add WHERE: column LIKE pattern
    fn like(self, column: &str, pattern: impl Into<Value>) -> Self {
        self.and_where(Condition::like(column, pattern))
    }

    /// Add WHERE: column ILIKE pattern
    fn ilike(self, column: &str, pattern: impl Into<Value>) -> Self {
        self.and_where(Condition::ilike(column, pattern))
    }

    /// Add WHERE: column IS NULL
    fn is_null(self, column: &str) -> Self {
        self.and_where(Condition::is_null(column))
    }

    /// Add WHERE: column IS NOT NULL
    fn is_not_null(self, column: &str) -> Self {
        self.and_where(Condition::is_not_null(column))
    }

    /// Add WHERE: column IN (values...)
    fn in_list<T: Into<Value>>(self, column: &str, values: impl IntoIterator<Item = T>) -> Self {
        self.and_where(Condition::in_list(column, values))
    }

    /// Add WHERE: column NOT IN (values...)
    fn not_in<T: Into<Value>>(self, column: &str, values: impl IntoIterator<Item = T>) -> Self {
        self.and_where(Condition::not_in(column, values))
    }

    /// Add WHERE: column BETWEEN from AND to
    fn between(self, column: &str, from: impl Into<Value>, to: impl Into<Value>) -> Self {
        self.and_where(Condition::between(column, from, to))
    }

    /// Add a raw WHERE fragment.
    fn raw_where(self, sql: &str) -> Self {
        self.and_where(Condition::raw(sql))
    }

    /// Add WHERE if value is Some: column = value
    fn eq_opt<T: Into<Value>>(self, column: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.eq(column, v),
            None => self,
        }
    }
}

/// `KEYWORD a, b, c` - skipped when `exprs` is empty.
pub(crate) fn list_clause(
    tree: &mut dyn SyntaxTree,
    keyword: &str,
    exprs: &[Expr],
) -> SqlResult<()> {
    if exprs.is_empty() {
        return Ok(());
    }
    tree.start_node(NodeMeta::keyword(keyword).with_delimiter(", "))
        .add_leaves(exprs.to_vec())
        .end_node()?;
    Ok(())
}

/// `KEYWORD cond AND cond ...` - skipped when no live condition remains.
pub(crate) fn condition_clause(
    tree: &mut dyn SyntaxTree,
    keyword: &str,
    conditions: &[Condition],
) -> SqlResult<()> {
    let all = Condition::and(conditions.to_vec());
    if all.is_empty() {
        return Ok(());
    }
    tree.start_node(NodeMeta::keyword(keyword));
    all.assemble_checked(tree)?;
    tree.end_node()?;
    Ok(())
}

/// `KEYWORD value` for integer clauses such as LIMIT.
pub(crate) fn number_clause(
    tree: &mut dyn SyntaxTree,
    keyword: &str,
    value: Option<i64>,
) -> SqlResult<()> {
    if let Some(n) = value {
        tree.start_node(NodeMeta::keyword(keyword))
            .add_leaf(Expr::keyword(n.to_string()))
            .end_node()?;
    }
    Ok(())
}

/// `KEYWORD col = expr, col = expr` for SET lists.
pub(crate) fn assignment_clause(
    tree: &mut dyn SyntaxTree,
    keyword: &str,
    assignments: &[(Name, Expr)],
) -> SqlResult<()> {
    if assignments.is_empty() {
        return Ok(());
    }
    tree.start_node(NodeMeta::keyword(keyword).with_delimiter(", "));
    for (column, expr) in assignments {
        tree.start_node(NodeMeta::empty())
            .add_leaves(vec![Expr::Name(column.clone()), Expr::op("="), expr.clone()])
            .end_node()?;
    }
    tree.end_node()?;
    Ok(())
}

pub(crate) fn names_to_exprs(names: &[Name]) -> Vec<Expr> {
    names.iter().cloned().map(Expr::Name).collect()
}

#[cfg(test)]
mod tests;
