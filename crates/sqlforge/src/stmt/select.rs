//! SELECT statement builder.

use crate::condition::Condition;
use crate::error::{SqlError, SqlResult};
use crate::expr::Expr;
use crate::ident::Name;
use crate::node::NodeMeta;
use crate::stmt::{Filter, Statement, condition_clause, list_clause, number_clause};
use crate::tree::{Assemble, SyntaxTree};

/// Join flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinKind {
    fn keyword(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL OUTER JOIN",
            JoinKind::Cross => "CROSS JOIN",
        }
    }
}

/// How joined rows are matched.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinConstraint {
    On(Condition),
    Using(Vec<Name>),
    None,
}

/// A single JOIN clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub kind: JoinKind,
    pub table: Expr,
    pub constraint: JoinConstraint,
}

impl Assemble for Join {
    fn assemble(&self, tree: &mut dyn SyntaxTree) -> SqlResult<()> {
        tree.start_node(NodeMeta::keyword(self.kind.keyword()))
            .add_leaf(self.table.clone());
        match &self.constraint {
            JoinConstraint::On(condition) => {
                tree.start_node(NodeMeta::keyword("ON"));
                condition.assemble_checked(tree)?;
                tree.end_node()?;
            }
            JoinConstraint::Using(columns) => {
                tree.start_node(NodeMeta::keyword("USING").with_delimiter(", ").grouped())
                    .add_leaves(columns.iter().cloned().map(Expr::Name).collect())
                    .end_node()?;
            }
            JoinConstraint::None => {}
        }
        tree.end_node()?;
        Ok(())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Default,
    Asc,
    Desc,
}

/// SELECT builder.
#[derive(Clone, Debug, Default)]
pub struct SelectBuilder {
    distinct: bool,
    /// SELECT columns (empty renders `*`)
    columns: Vec<Expr>,
    /// FROM items
    from: Vec<Expr>,
    joins: Vec<Join>,
    where_conditions: Vec<Condition>,
    group_by: Vec<Expr>,
    having: Vec<Condition>,
    order_by: Vec<(Expr, Direction)>,
    limit: Option<i64>,
    offset: Option<i64>,
    /// Set when `paginate` could not compute an offset.
    offset_overflow: bool,
    for_update: bool,
}

impl SelectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== SELECT columns ====================

    /// Emit `SELECT DISTINCT`.
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Append one column or expression.
    pub fn column(mut self, column: impl Into<Expr>) -> Self {
        self.columns.push(column.into());
        self
    }

    /// Append several columns.
    pub fn columns<E: Into<Expr>>(mut self, columns: impl IntoIterator<Item = E>) -> Self {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    // ==================== FROM / JOIN ====================

    /// Add a FROM item (table name, aliased name or sub-query).
    pub fn from(mut self, table: impl Into<Expr>) -> Self {
        self.from.push(table.into());
        self
    }

    /// Add a join.
    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }

    fn join_on(self, kind: JoinKind, table: impl Into<Expr>, on: Condition) -> Self {
        self.join(Join {
            kind,
            table: table.into(),
            constraint: JoinConstraint::On(on),
        })
    }

    /// Add INNER JOIN ... ON.
    pub fn inner_join(self, table: impl Into<Expr>, on: Condition) -> Self {
        self.join_on(JoinKind::Inner, table, on)
    }

    /// Add LEFT JOIN ... ON.
    pub fn left_join(self, table: impl Into<Expr>, on: Condition) -> Self {
        self.join_on(JoinKind::Left, table, on)
    }

    /// Add RIGHT JOIN ... ON.
    pub fn right_join(self, table: impl Into<Expr>, on: Condition) -> Self {
        self.join_on(JoinKind::Right, table, on)
    }

    /// Add FULL OUTER JOIN ... ON.
    pub fn full_join(self, table: impl Into<Expr>, on: Condition) -> Self {
        self.join_on(JoinKind::Full, table, on)
    }

    /// Add CROSS JOIN.
    pub fn cross_join(self, table: impl Into<Expr>) -> Self {
        self.join(Join {
            kind: JoinKind::Cross,
            table: table.into(),
            constraint: JoinConstraint::None,
        })
    }

    /// Add a join matched with USING (columns...).
    pub fn join_using(self, kind: JoinKind, table: impl Into<Expr>, columns: &[&str]) -> Self {
        self.join(Join {
            kind,
            table: table.into(),
            constraint: JoinConstraint::Using(columns.iter().map(|c| Name::raw(*c)).collect()),
        })
    }

    // ==================== Grouping & ordering ====================

    /// Add a GROUP BY expression.
    pub fn group_by(mut self, expr: impl Into<Expr>) -> Self {
        self.group_by.push(expr.into());
        self
    }

    /// Add a HAVING condition.
    pub fn having(mut self, condition: Condition) -> Self {
        self.having.push(condition);
        self
    }

    /// Add ORDER BY expression (database default direction).
    pub fn order_by(mut self, expr: impl Into<Expr>) -> Self {
        self.order_by.push((expr.into(), Direction::Default));
        self
    }

    /// Add ORDER BY expression ASC.
    pub fn order_by_asc(mut self, expr: impl Into<Expr>) -> Self {
        self.order_by.push((expr.into(), Direction::Asc));
        self
    }

    /// Add ORDER BY expression DESC.
    pub fn order_by_desc(mut self, expr: impl Into<Expr>) -> Self {
        self.order_by.push((expr.into(), Direction::Desc));
        self
    }

    // ==================== Pagination & locking ====================

    /// Set LIMIT.
    pub fn limit(mut self, n: i64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Set OFFSET.
    pub fn offset(mut self, n: i64) -> Self {
        self.offset = Some(n);
        self.offset_overflow = false;
        self
    }

    /// Pagination helper.
    ///
    /// `page` is 1-based (clamped to >= 1).
    /// `per_page` is clamped to >= 1.
    /// An offset that does not fit in `i64` is reported by [`Statement::validate`].
    pub fn paginate(mut self, page: i64, per_page: i64) -> Self {
        let p = page.max(1);
        let size = per_page.max(1);
        let offset = (p - 1).checked_mul(size);
        self.limit = Some(size);
        self.offset = offset;
        self.offset_overflow = offset.is_none();
        self
    }

    /// Append FOR UPDATE.
    pub fn for_update(mut self) -> Self {
        self.for_update = true;
        self
    }
}

impl Filter for SelectBuilder {
    fn and_where(mut self, condition: Condition) -> Self {
        self.where_conditions.push(condition);
        self
    }
}

impl Assemble for SelectBuilder {
    fn assemble(&self, tree: &mut dyn SyntaxTree) -> SqlResult<()> {
        let keyword = if self.distinct {
            "SELECT DISTINCT"
        } else {
            "SELECT"
        };
        if self.columns.is_empty() {
            list_clause(tree, keyword, &[Expr::keyword("*")])?;
        } else {
            list_clause(tree, keyword, &self.columns)?;
        }
        list_clause(tree, "FROM", &self.from)?;
        for join in &self.joins {
            join.assemble_checked(tree)?;
        }
        condition_clause(tree, "WHERE", &self.where_conditions)?;
        list_clause(tree, "GROUP BY", &self.group_by)?;
        condition_clause(tree, "HAVING", &self.having)?;

        if !self.order_by.is_empty() {
            tree.start_node(NodeMeta::keyword("ORDER BY").with_delimiter(", "));
            for (expr, direction) in &self.order_by {
                tree.start_node(NodeMeta::empty()).add_leaf(expr.clone());
                match direction {
                    Direction::Default => {}
                    Direction::Asc => {
                        tree.add_leaf(Expr::keyword("ASC"));
                    }
                    Direction::Desc => {
                        tree.add_leaf(Expr::keyword("DESC"));
                    }
                }
                tree.end_node()?;
            }
            tree.end_node()?;
        }

        number_clause(tree, "LIMIT", self.limit)?;
        number_clause(tree, "OFFSET", self.offset)?;
        if self.for_update {
            tree.start_node(NodeMeta::keyword("FOR UPDATE")).end_node()?;
        }
        Ok(())
    }
}

impl Statement for SelectBuilder {
    fn validate(&self) -> SqlResult<()> {
        if self.from.is_empty() && !self.joins.is_empty() {
            return Err(SqlError::validation("SELECT with JOIN requires a FROM item"));
        }
        if self.offset_overflow {
            return Err(SqlError::validation("pagination offset overflows"));
        }
        if self.limit.is_some_and(|n| n < 0) || self.offset.is_some_and(|n| n < 0) {
            return Err(SqlError::validation("LIMIT and OFFSET must not be negative"));
        }
        if self.for_update && self.from.is_empty() {
            return Err(SqlError::validation("FOR UPDATE requires a FROM item"));
        }
        Ok(())
    }
}
