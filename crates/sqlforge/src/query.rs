//! A finished statement ready for rendering.

use crate::context::Context;
use crate::error::SqlResult;
use crate::format::{Formatter, Rendered};
use crate::node::Node;
use crate::tree::{Assemble, SyntaxTree};
use std::fmt;

/// A completed statement tree plus the formatter that renders it.
///
/// A `Query` is only ever created from a balanced tree, so rendering cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    root: Node,
    formatter: Formatter,
}

impl Query {
    /// Wrap an already finished root node.
    pub fn new(root: Node, formatter: Formatter) -> Self {
        Self { root, formatter }
    }

    /// Finish `tree` and wrap its root.
    pub fn from_tree(tree: Box<dyn SyntaxTree>, formatter: Formatter) -> SqlResult<Self> {
        let root = tree.finish()?;
        Ok(Self::new(root, formatter))
    }

    /// Assemble `clause` into a fresh tree from `ctx`.
    pub fn assemble<A: Assemble + ?Sized>(ctx: &Context, clause: &A) -> SqlResult<Self> {
        let mut tree = ctx.new_tree();
        clause.assemble_checked(&mut *tree)?;
        Self::from_tree(tree, *ctx.formatter())
    }

    /// Literal SQL, constants inlined.
    pub fn render(&self) -> String {
        self.formatter.render(&self.root)
    }

    /// Parameterized SQL with ordered positional bindings.
    pub fn render_prepared(&self) -> Rendered {
        self.formatter.render_prepared(&self.root)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    /// Render the same tree with another formatter.
    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn into_root(self) -> Node {
        self.root
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
