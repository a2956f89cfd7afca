//! UPDATE statement builder.

use crate::condition::Condition;
use crate::error::{SqlError, SqlResult};
use crate::expr::Expr;
use crate::ident::Name;
use crate::node::NodeMeta;
use crate::stmt::{Filter, Statement, assignment_clause, condition_clause, list_clause};
use crate::tree::{Assemble, SyntaxTree};
use crate::value::Value;

/// UPDATE builder.
#[derive(Clone, Debug)]
pub struct UpdateBuilder {
    table: Name,
    /// SET assignments, in call order
    assignments: Vec<(Name, Expr)>,
    /// UPDATE ... FROM items
    from: Vec<Expr>,
    where_conditions: Vec<Condition>,
    returning: Vec<Expr>,
}

impl UpdateBuilder {
    pub fn new(table: impl Into<Name>) -> Self {
        Self {
            table: table.into(),
            assignments: Vec::new(),
            from: Vec::new(),
            where_conditions: Vec::new(),
            returning: Vec::new(),
        }
    }

    /// SET column = value
    pub fn set(self, column: &str, value: impl Into<Value>) -> Self {
        self.set_expr(column, Expr::value(value))
    }

    /// SET column = value, skipped when `value` is None.
    pub fn set_opt<T: Into<Value>>(self, column: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.set(column, v),
            None => self,
        }
    }

    /// SET column = expr
    pub fn set_expr(mut self, column: &str, expr: Expr) -> Self {
        self.assignments.push((Name::raw(column), expr));
        self
    }

    /// SET column = raw SQL (e.g. `updated_at = now()`).
    pub fn set_raw(self, column: &str, sql: &str) -> Self {
        self.set_expr(column, Expr::keyword(sql))
    }

    /// Add an UPDATE ... FROM item.
    pub fn from(mut self, table: impl Into<Expr>) -> Self {
        self.from.push(table.into());
        self
    }

    /// Set RETURNING columns.
    pub fn returning(mut self, columns: &[&str]) -> Self {
        self.returning = columns.iter().map(|c| Expr::name(*c)).collect();
        self
    }
}

impl Filter for UpdateBuilder {
    fn and_where(mut self, condition: Condition) -> Self {
        self.where_conditions.push(condition);
        self
    }
}

impl Assemble for UpdateBuilder {
    fn assemble(&self, tree: &mut dyn SyntaxTree) -> SqlResult<()> {
        tree.start_node(NodeMeta::keyword("UPDATE"))
            .add_leaf(Expr::Name(self.table.clone()))
            .end_node()?;
        assignment_clause(tree, "SET", &self.assignments)?;
        list_clause(tree, "FROM", &self.from)?;
        condition_clause(tree, "WHERE", &self.where_conditions)?;
        list_clause(tree, "RETURNING", &self.returning)
    }
}

impl Statement for UpdateBuilder {
    fn validate(&self) -> SqlResult<()> {
        if self.table.is_empty() {
            return Err(SqlError::validation("UPDATE requires a table"));
        }
        if self.assignments.is_empty() {
            return Err(SqlError::validation("UPDATE requires at least one SET"));
        }
        Ok(())
    }
}
