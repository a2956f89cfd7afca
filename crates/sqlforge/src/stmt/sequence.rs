//! Sequence DDL and sequence function helpers.

use crate::error::{SqlError, SqlResult};
use crate::expr::Expr;
use crate::ident::Name;
use crate::node::NodeMeta;
use crate::stmt::{Statement, names_to_exprs, number_clause};
use crate::tree::{Assemble, SyntaxTree};
use crate::value::Value;

/// `nextval('seq')`
pub fn nextval(sequence: &str) -> Expr {
    Expr::function("nextval", [sequence_literal(sequence)])
}

/// `currval('seq')`
pub fn currval(sequence: &str) -> Expr {
    Expr::function("currval", [sequence_literal(sequence)])
}

/// `setval('seq', value)` with the value bound.
pub fn setval(sequence: &str, value: impl Into<Value>) -> Expr {
    Expr::function("setval", [sequence_literal(sequence), Expr::value(value)])
}

// The sequence name is a regclass literal, not a bind parameter.
fn sequence_literal(sequence: &str) -> Expr {
    Expr::keyword(Value::from(sequence).to_literal())
}

/// CREATE SEQUENCE builder.
#[derive(Clone, Debug)]
pub struct CreateSequence {
    name: Name,
    if_not_exists: bool,
    increment_by: Option<i64>,
    min_value: Option<i64>,
    max_value: Option<i64>,
    start_with: Option<i64>,
    cache: Option<i64>,
    /// `Some(true)` renders CYCLE, `Some(false)` NO CYCLE
    cycle: Option<bool>,
    owned_by: Option<Name>,
}

impl CreateSequence {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            if_not_exists: false,
            increment_by: None,
            min_value: None,
            max_value: None,
            start_with: None,
            cache: None,
            cycle: None,
            owned_by: None,
        }
    }

    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    pub fn increment_by(mut self, n: i64) -> Self {
        self.increment_by = Some(n);
        self
    }

    pub fn min_value(mut self, n: i64) -> Self {
        self.min_value = Some(n);
        self
    }

    pub fn max_value(mut self, n: i64) -> Self {
        self.max_value = Some(n);
        self
    }

    pub fn start_with(mut self, n: i64) -> Self {
        self.start_with = Some(n);
        self
    }

    pub fn cache(mut self, n: i64) -> Self {
        self.cache = Some(n);
        self
    }

    /// CYCLE when `true`, NO CYCLE when `false`.
    pub fn cycle(mut self, cycle: bool) -> Self {
        self.cycle = Some(cycle);
        self
    }

    /// OWNED BY table.column
    pub fn owned_by(mut self, column: impl Into<Name>) -> Self {
        self.owned_by = Some(column.into());
        self
    }
}

impl Assemble for CreateSequence {
    fn assemble(&self, tree: &mut dyn SyntaxTree) -> SqlResult<()> {
        let keyword = if self.if_not_exists {
            "CREATE SEQUENCE IF NOT EXISTS"
        } else {
            "CREATE SEQUENCE"
        };
        tree.start_node(NodeMeta::keyword(keyword))
            .add_leaf(Expr::Name(self.name.clone()))
            .end_node()?;
        number_clause(tree, "INCREMENT BY", self.increment_by)?;
        number_clause(tree, "MINVALUE", self.min_value)?;
        number_clause(tree, "MAXVALUE", self.max_value)?;
        number_clause(tree, "START WITH", self.start_with)?;
        number_clause(tree, "CACHE", self.cache)?;
        if let Some(cycle) = self.cycle {
            let keyword = if cycle { "CYCLE" } else { "NO CYCLE" };
            tree.start_node(NodeMeta::keyword(keyword)).end_node()?;
        }
        if let Some(owner) = &self.owned_by {
            tree.start_node(NodeMeta::keyword("OWNED BY"))
                .add_leaf(Expr::Name(owner.clone()))
                .end_node()?;
        }
        Ok(())
    }
}

impl Statement for CreateSequence {
    fn validate(&self) -> SqlResult<()> {
        if self.name.is_empty() {
            return Err(SqlError::validation("CREATE SEQUENCE requires a name"));
        }
        if self.increment_by == Some(0) {
            return Err(SqlError::validation("INCREMENT BY must not be zero"));
        }
        if let (Some(min), Some(max)) = (self.min_value, self.max_value) {
            if min > max {
                return Err(SqlError::validation(format!(
                    "MINVALUE ({min}) must not exceed MAXVALUE ({max})"
                )));
            }
        }
        if self.cache.is_some_and(|n| n < 1) {
            return Err(SqlError::validation("CACHE must be at least 1"));
        }
        Ok(())
    }
}

/// DROP SEQUENCE builder.
#[derive(Clone, Debug)]
pub struct DropSequence {
    names: Vec<Name>,
    if_exists: bool,
    cascade: bool,
}

impl DropSequence {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            names: vec![name.into()],
            if_exists: false,
            cascade: false,
        }
    }

    /// Drop another sequence in the same statement.
    pub fn and(mut self, name: impl Into<Name>) -> Self {
        self.names.push(name.into());
        self
    }

    pub fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }

    pub fn cascade(mut self) -> Self {
        self.cascade = true;
        self
    }
}

impl Assemble for DropSequence {
    fn assemble(&self, tree: &mut dyn SyntaxTree) -> SqlResult<()> {
        let keyword = if self.if_exists {
            "DROP SEQUENCE IF EXISTS"
        } else {
            "DROP SEQUENCE"
        };
        tree.start_node(NodeMeta::keyword(keyword).with_delimiter(", "))
            .add_leaves(names_to_exprs(&self.names))
            .end_node()?;
        if self.cascade {
            tree.start_node(NodeMeta::keyword("CASCADE")).end_node()?;
        }
        Ok(())
    }
}

impl Statement for DropSequence {
    fn validate(&self) -> SqlResult<()> {
        if self.names.iter().any(Name::is_empty) {
            return Err(SqlError::validation("DROP SEQUENCE requires non-empty names"));
        }
        Ok(())
    }
}
