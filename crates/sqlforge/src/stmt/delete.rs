//! DELETE statement builder.

use crate::condition::Condition;
use crate::error::{SqlError, SqlResult};
use crate::expr::Expr;
use crate::ident::Name;
use crate::node::NodeMeta;
use crate::stmt::{Filter, Statement, condition_clause, list_clause};
use crate::tree::{Assemble, SyntaxTree};

/// DELETE builder.
#[derive(Clone, Debug)]
pub struct DeleteBuilder {
    table: Name,
    /// DELETE ... USING items
    using: Vec<Expr>,
    where_conditions: Vec<Condition>,
    returning: Vec<Expr>,
    /// Whether DELETE without WHERE is allowed
    all: bool,
}

impl DeleteBuilder {
    pub fn new(table: impl Into<Name>) -> Self {
        Self {
            table: table.into(),
            using: Vec::new(),
            where_conditions: Vec::new(),
            returning: Vec::new(),
            all: false,
        }
    }

    /// Allow DELETE without WHERE conditions (deletes every row).
    pub fn all(mut self) -> Self {
        self.all = true;
        self
    }

    /// Add a DELETE ... USING item.
    pub fn using(mut self, table: impl Into<Expr>) -> Self {
        self.using.push(table.into());
        self
    }

    /// Set RETURNING columns.
    pub fn returning(mut self, columns: &[&str]) -> Self {
        self.returning = columns.iter().map(|c| Expr::name(*c)).collect();
        self
    }
}

impl Filter for DeleteBuilder {
    fn and_where(mut self, condition: Condition) -> Self {
        self.where_conditions.push(condition);
        self
    }
}

impl Assemble for DeleteBuilder {
    fn assemble(&self, tree: &mut dyn SyntaxTree) -> SqlResult<()> {
        tree.start_node(NodeMeta::keyword("DELETE FROM"))
            .add_leaf(Expr::Name(self.table.clone()))
            .end_node()?;
        list_clause(tree, "USING", &self.using)?;
        condition_clause(tree, "WHERE", &self.where_conditions)?;
        list_clause(tree, "RETURNING", &self.returning)
    }
}

impl Statement for DeleteBuilder {
    fn validate(&self) -> SqlResult<()> {
        if self.table.is_empty() {
            return Err(SqlError::validation("DELETE requires a table"));
        }
        let filtered = !Condition::and(self.where_conditions.clone()).is_empty();
        if !filtered && !self.all {
            return Err(SqlError::validation(
                "DELETE without WHERE; call all() to delete every row",
            ));
        }
        Ok(())
    }
}
