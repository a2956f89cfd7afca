//! INSERT statement builder.

use crate::error::{SqlError, SqlResult};
use crate::expr::Expr;
use crate::ident::Name;
use crate::node::NodeMeta;
use crate::stmt::{SelectBuilder, Statement, assignment_clause, list_clause, names_to_exprs};
use crate::tree::{Assemble, SyntaxTree};
use crate::value::Value;

/// Conflict resolution action.
#[derive(Clone, Debug, PartialEq)]
pub enum ConflictAction {
    /// DO NOTHING
    DoNothing,
    /// DO UPDATE SET col = expr, ...
    DoUpdate(Vec<(Name, Expr)>),
}

/// INSERT builder.
///
/// Rows come either from VALUES (`set`, `values`, `values_exprs`) or from a
/// SELECT (`select`), never both.
#[derive(Clone, Debug)]
pub struct InsertBuilder {
    table: Name,
    columns: Vec<Name>,
    /// VALUES rows
    rows: Vec<Vec<Expr>>,
    /// INSERT ... SELECT source
    source: Option<SelectBuilder>,
    conflict_target: Vec<Name>,
    conflict_action: Option<ConflictAction>,
    returning: Vec<Expr>,
}

impl InsertBuilder {
    pub fn new(table: impl Into<Name>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            rows: Vec::new(),
            source: None,
            conflict_target: Vec::new(),
            conflict_action: None,
            returning: Vec::new(),
        }
    }

    /// Set the column list.
    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| Name::raw(*c)).collect();
        self
    }

    /// Append a row of bound values.
    pub fn values<T: Into<Value>>(mut self, row: impl IntoIterator<Item = T>) -> Self {
        self.rows.push(row.into_iter().map(Expr::value).collect());
        self
    }

    /// Append a row of arbitrary expressions.
    pub fn values_exprs(mut self, row: Vec<Expr>) -> Self {
        self.rows.push(row);
        self
    }

    /// Single-row helper: add a column and its value.
    pub fn set(self, column: &str, value: impl Into<Value>) -> Self {
        self.set_expr(column, Expr::value(value))
    }

    /// Single-row helper: add a column only when the value is present.
    pub fn set_opt<T: Into<Value>>(self, column: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.set(column, v),
            None => self,
        }
    }

    /// Single-row helper: add a column set to an expression.
    pub fn set_expr(mut self, column: &str, expr: Expr) -> Self {
        self.columns.push(Name::raw(column));
        match self.rows.first_mut() {
            Some(row) => row.push(expr),
            None => self.rows.push(vec![expr]),
        }
        self
    }

    /// Single-row helper: add a column set to raw SQL (e.g. `now()`).
    pub fn set_raw(self, column: &str, sql: &str) -> Self {
        self.set_expr(column, Expr::keyword(sql))
    }

    /// Insert the rows produced by a SELECT.
    pub fn select(mut self, source: SelectBuilder) -> Self {
        self.source = Some(source);
        self
    }

    /// ON CONFLICT (target) DO NOTHING. An empty target matches any conflict.
    pub fn on_conflict_do_nothing(mut self, target: &[&str]) -> Self {
        self.conflict_target = target.iter().map(|c| Name::raw(*c)).collect();
        self.conflict_action = Some(ConflictAction::DoNothing);
        self
    }

    /// ON CONFLICT (target) DO UPDATE SET col = excluded.col for each column.
    pub fn on_conflict_do_update(mut self, target: &[&str], columns: &[&str]) -> Self {
        self.conflict_target = target.iter().map(|c| Name::raw(*c)).collect();
        let assignments = columns
            .iter()
            .map(|c| {
                let excluded = Name::raw(*c).qualify(Name::raw("excluded"));
                (Name::raw(*c), Expr::Name(excluded))
            })
            .collect();
        self.conflict_action = Some(ConflictAction::DoUpdate(assignments));
        self
    }

    /// ON CONFLICT (target) with an explicit action.
    pub fn on_conflict(mut self, target: &[&str], action: ConflictAction) -> Self {
        self.conflict_target = target.iter().map(|c| Name::raw(*c)).collect();
        self.conflict_action = Some(action);
        self
    }

    /// Set RETURNING columns.
    pub fn returning(mut self, columns: &[&str]) -> Self {
        self.returning = columns.iter().map(|c| Expr::name(*c)).collect();
        self
    }
}

impl Assemble for InsertBuilder {
    fn assemble(&self, tree: &mut dyn SyntaxTree) -> SqlResult<()> {
        tree.start_node(NodeMeta::keyword("INSERT INTO"))
            .add_leaf(Expr::Name(self.table.clone()));
        if !self.columns.is_empty() {
            tree.start_node(NodeMeta::empty().with_delimiter(", ").grouped())
                .add_leaves(names_to_exprs(&self.columns))
                .end_node()?;
        }
        tree.end_node()?;

        match &self.source {
            Some(source) => source.assemble_checked(tree)?,
            None => {
                tree.start_node(NodeMeta::keyword("VALUES").with_delimiter(", "));
                for row in &self.rows {
                    tree.start_node(NodeMeta::empty().with_delimiter(", ").grouped())
                        .add_leaves(row.clone())
                        .end_node()?;
                }
                tree.end_node()?;
            }
        }

        if let Some(action) = &self.conflict_action {
            tree.start_node(NodeMeta::keyword("ON CONFLICT"));
            if !self.conflict_target.is_empty() {
                tree.start_node(NodeMeta::empty().with_delimiter(", ").grouped())
                    .add_leaves(names_to_exprs(&self.conflict_target))
                    .end_node()?;
            }
            match action {
                ConflictAction::DoNothing => {
                    tree.start_node(NodeMeta::keyword("DO NOTHING")).end_node()?;
                }
                ConflictAction::DoUpdate(assignments) => {
                    assignment_clause(tree, "DO UPDATE SET", assignments)?;
                }
            }
            tree.end_node()?;
        }

        list_clause(tree, "RETURNING", &self.returning)
    }
}

impl Statement for InsertBuilder {
    fn validate(&self) -> SqlResult<()> {
        if self.table.is_empty() {
            return Err(SqlError::validation("INSERT requires a table"));
        }
        match (&self.source, self.rows.is_empty()) {
            (Some(_), false) => {
                return Err(SqlError::validation(
                    "INSERT takes either VALUES rows or a SELECT, not both",
                ));
            }
            (None, true) => {
                return Err(SqlError::validation("INSERT requires at least one row"));
            }
            _ => {}
        }
        for (i, row) in self.rows.iter().enumerate() {
            if row.is_empty() {
                return Err(SqlError::validation(format!("INSERT row {} is empty", i + 1)));
            }
            if !self.columns.is_empty() && row.len() != self.columns.len() {
                return Err(SqlError::validation(format!(
                    "INSERT row {} has {} values for {} columns",
                    i + 1,
                    row.len(),
                    self.columns.len()
                )));
            }
        }
        if let Some(ConflictAction::DoUpdate(assignments)) = &self.conflict_action {
            if self.conflict_target.is_empty() {
                return Err(SqlError::validation(
                    "ON CONFLICT DO UPDATE requires a conflict target",
                ));
            }
            if assignments.is_empty() {
                return Err(SqlError::validation(
                    "ON CONFLICT DO UPDATE requires at least one assignment",
                ));
            }
        }
        if let Some(source) = &self.source {
            source.validate()?;
        }
        Ok(())
    }
}
