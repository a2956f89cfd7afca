//! Statement trees and the cursor API used to assemble them.
//!
//! A tree is built by a single synchronous pass of cursor calls:
//!
//! ```ignore
//! use sqlforge::{AbstractSyntaxTree, Expr, NodeMeta, SyntaxTree};
//!
//! let mut tree = AbstractSyntaxTree::new();
//! tree.start_node(NodeMeta::keyword("SELECT").with_delimiter(", "))
//!     .add_leaves(vec![Expr::name("id"), Expr::name("name")])
//!     .end_node()?
//!     .start_node(NodeMeta::keyword("FROM"))
//!     .add_leaf(Expr::name("users"))
//!     .end_node()?;
//! let root = Box::new(tree).finish()?;
//! ```
//!
//! Every `start_node` must be matched by exactly one `end_node`; children always
//! attach to the node open at the time of the call.

use crate::error::{SqlError, SqlResult};
use crate::expr::Expr;
use crate::node::{Node, NodeMeta};
use std::fmt;

/// Cursor API over a single-rooted statement tree.
///
/// The root is open from construction; `depth()` is 1 when only the root is open.
/// Implementations other than [`AbstractSyntaxTree`] can be plugged in through a
/// [`TreeFactory`].
pub trait SyntaxTree: Send {
    /// Open a new node as a child of the current node and make it current.
    fn start_node(&mut self, meta: NodeMeta) -> &mut dyn SyntaxTree;

    /// Append a leaf to the current node.
    fn add_leaf(&mut self, leaf: Expr) -> &mut dyn SyntaxTree;

    /// Append several leaves to the current node, preserving order.
    fn add_leaves(&mut self, leaves: Vec<Expr>) -> &mut dyn SyntaxTree;

    /// Close the current node, making its parent current again.
    ///
    /// Fails with [`SqlError::UnbalancedEnd`] when only the root is open.
    fn end_node(&mut self) -> SqlResult<&mut dyn SyntaxTree>;

    /// Let `visitor` contribute directly to the current node.
    fn peek(&mut self, visitor: &mut dyn FnMut(&mut Node)) -> &mut dyn SyntaxTree;

    /// Number of open nodes, root included.
    fn depth(&self) -> usize;

    /// The completed root. Fails with [`SqlError::Unfinished`] while nodes are open.
    fn root(&self) -> SqlResult<&Node>;

    /// Consume the tree, returning the completed root.
    fn finish(self: Box<Self>) -> SqlResult<Node>;
}

/// A clause that knows how to add itself to a tree.
///
/// An implementation must leave the cursor at the depth it found it.
pub trait Assemble {
    /// Add this clause's nodes and leaves under the current node.
    fn assemble(&self, tree: &mut dyn SyntaxTree) -> SqlResult<()>;

    /// [`assemble`](Assemble::assemble), then verify the cursor depth is unchanged.
    fn assemble_checked(&self, tree: &mut dyn SyntaxTree) -> SqlResult<()> {
        let expected = tree.depth();
        self.assemble(tree)?;
        let actual = tree.depth();
        if actual != expected {
            tracing::warn!(target: "sqlforge.tree", expected, actual, "unbalanced clause");
            return Err(SqlError::UnbalancedClause { expected, actual });
        }
        Ok(())
    }
}

/// Stack-based default [`SyntaxTree`].
///
/// The stack owns the open nodes; closing a node moves it into its parent.
#[derive(Debug, Clone)]
pub struct AbstractSyntaxTree {
    stack: Vec<Node>,
}

impl AbstractSyntaxTree {
    pub fn new() -> Self {
        Self {
            stack: vec![Node::root()],
        }
    }

    fn current(&mut self) -> &mut Node {
        // The root is never popped.
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }
}

impl Default for AbstractSyntaxTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxTree for AbstractSyntaxTree {
    fn start_node(&mut self, meta: NodeMeta) -> &mut dyn SyntaxTree {
        self.stack.push(Node::new(meta));
        self
    }

    fn add_leaf(&mut self, leaf: Expr) -> &mut dyn SyntaxTree {
        self.current().add_leaf(leaf);
        self
    }

    fn add_leaves(&mut self, leaves: Vec<Expr>) -> &mut dyn SyntaxTree {
        self.current().add_leaves(leaves);
        self
    }

    fn end_node(&mut self) -> SqlResult<&mut dyn SyntaxTree> {
        if self.stack.len() <= 1 {
            tracing::warn!(target: "sqlforge.tree", "end_node at root depth");
            return Err(SqlError::UnbalancedEnd);
        }
        if let Some(node) = self.stack.pop() {
            self.current().add_child_node(node);
        }
        Ok(self)
    }

    fn peek(&mut self, visitor: &mut dyn FnMut(&mut Node)) -> &mut dyn SyntaxTree {
        visitor(self.current());
        self
    }

    fn depth(&self) -> usize {
        self.stack.len()
    }

    fn root(&self) -> SqlResult<&Node> {
        match self.stack.as_slice() {
            [root] => Ok(root),
            _ => Err(unfinished(self.stack.len())),
        }
    }

    fn finish(mut self: Box<Self>) -> SqlResult<Node> {
        if self.stack.len() != 1 {
            return Err(unfinished(self.stack.len()));
        }
        Ok(self.stack.pop().unwrap_or_default())
    }
}

fn unfinished(depth: usize) -> SqlError {
    let open = depth.saturating_sub(1);
    tracing::warn!(target: "sqlforge.tree", open, "tree finished with open nodes");
    SqlError::Unfinished { depth: open }
}

/// A [`SyntaxTree`] that emits a `trace` event for every cursor operation.
#[derive(Debug, Default)]
pub struct TracingTree {
    inner: AbstractSyntaxTree,
}

impl TracingTree {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SyntaxTree for TracingTree {
    fn start_node(&mut self, meta: NodeMeta) -> &mut dyn SyntaxTree {
        tracing::trace!(
            target: "sqlforge.tree",
            depth = self.inner.depth(),
            keyword = meta.keyword_text().unwrap_or("-"),
            "start_node"
        );
        self.inner.start_node(meta);
        self
    }

    fn add_leaf(&mut self, leaf: Expr) -> &mut dyn SyntaxTree {
        tracing::trace!(
            target: "sqlforge.tree",
            depth = self.inner.depth(),
            kind = leaf.kind(),
            "add_leaf"
        );
        self.inner.add_leaf(leaf);
        self
    }

    fn add_leaves(&mut self, leaves: Vec<Expr>) -> &mut dyn SyntaxTree {
        tracing::trace!(
            target: "sqlforge.tree",
            depth = self.inner.depth(),
            count = leaves.len(),
            "add_leaves"
        );
        self.inner.add_leaves(leaves);
        self
    }

    fn end_node(&mut self) -> SqlResult<&mut dyn SyntaxTree> {
        tracing::trace!(target: "sqlforge.tree", depth = self.inner.depth(), "end_node");
        self.inner.end_node()?;
        Ok(self)
    }

    fn peek(&mut self, visitor: &mut dyn FnMut(&mut Node)) -> &mut dyn SyntaxTree {
        tracing::trace!(target: "sqlforge.tree", depth = self.inner.depth(), "peek");
        self.inner.peek(visitor);
        self
    }

    fn depth(&self) -> usize {
        self.inner.depth()
    }

    fn root(&self) -> SqlResult<&Node> {
        self.inner.root()
    }

    fn finish(self: Box<Self>) -> SqlResult<Node> {
        tracing::trace!(target: "sqlforge.tree", depth = self.inner.depth(), "finish");
        Box::new(self.inner).finish()
    }
}

/// Creates a fresh tree for each statement assembly.
pub trait TreeFactory: Send + Sync + fmt::Debug {
    fn create(&self) -> Box<dyn SyntaxTree>;
}

/// Serves [`AbstractSyntaxTree`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTreeFactory;

impl TreeFactory for DefaultTreeFactory {
    fn create(&self) -> Box<dyn SyntaxTree> {
        Box::new(AbstractSyntaxTree::new())
    }
}

/// Serves [`TracingTree`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTreeFactory;

impl TreeFactory for TracingTreeFactory {
    fn create(&self) -> Box<dyn SyntaxTree> {
        Box::new(TracingTree::new())
    }
}

#[cfg(test)]
mod tests;
