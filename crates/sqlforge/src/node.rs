//! Structural units of a statement tree.

use crate::expr::Expr;
use crate::value::Value;

/// Delimiter used when a node does not override it.
pub const DEFAULT_DELIMITER: &str = " ";

/// Label and layout of a [`Node`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeMeta {
    keyword: Option<String>,
    delimiter: Option<String>,
    grouped: bool,
}

impl NodeMeta {
    /// A node introduced by a keyword, e.g. `SELECT` or `LEFT JOIN`.
    pub fn keyword(keyword: impl Into<String>) -> Self {
        Self {
            keyword: Some(keyword.into()),
            ..Self::default()
        }
    }

    /// A node whose keyword is suppressed: only its children are rendered.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Join children with `delimiter` instead of a single space.
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    /// Wrap the joined children in parentheses.
    pub fn grouped(mut self) -> Self {
        self.grouped = true;
        self
    }

    /// Set the grouping flag.
    pub fn grouped_if(mut self, grouped: bool) -> Self {
        self.grouped = grouped;
        self
    }

    /// The keyword, or `None` when suppressed.
    pub fn keyword_text(&self) -> Option<&str> {
        self.keyword.as_deref().filter(|k| !k.trim().is_empty())
    }

    /// Whether the keyword is suppressed.
    pub fn is_empty(&self) -> bool {
        self.keyword_text().is_none()
    }

    pub fn delimiter(&self) -> &str {
        self.delimiter.as_deref().unwrap_or(DEFAULT_DELIMITER)
    }

    pub fn is_grouped(&self) -> bool {
        self.grouped
    }
}

/// A child of a node: either a leaf or a nested node.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Leaf(Expr),
    Node(Node),
}

/// A keyword-labelled, ordered collection of children.
///
/// Children are exclusively owned and kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    meta: NodeMeta,
    children: Vec<Child>,
}

impl Node {
    pub fn new(meta: NodeMeta) -> Self {
        Self {
            meta,
            children: Vec::new(),
        }
    }

    /// A node with a suppressed keyword, as used for tree roots.
    pub fn root() -> Self {
        Self::new(NodeMeta::empty())
    }

    /// Append a leaf.
    pub fn add_leaf(&mut self, leaf: Expr) -> &mut Self {
        self.children.push(Child::Leaf(leaf));
        self
    }

    /// Append several leaves, preserving their order.
    pub fn add_leaves(&mut self, leaves: impl IntoIterator<Item = Expr>) -> &mut Self {
        self.children.extend(leaves.into_iter().map(Child::Leaf));
        self
    }

    /// Append a nested node.
    pub fn add_child_node(&mut self, node: Node) -> &mut Self {
        self.children.push(Child::Node(node));
        self
    }

    /// Override the delimiter joining this node's direct children.
    pub fn set_delimiter(&mut self, delimiter: impl Into<String>) -> &mut Self {
        self.meta.delimiter = Some(delimiter.into());
        self
    }

    /// Set the grouping flag.
    pub fn set_grouped(&mut self, grouped: bool) -> &mut Self {
        self.meta.grouped = grouped;
        self
    }

    pub fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn is_leafless(&self) -> bool {
        self.children.is_empty()
    }

    pub fn delimiter(&self) -> &str {
        self.meta.delimiter()
    }

    pub(crate) fn has_preparable(&self) -> bool {
        self.children.iter().any(|child| match child {
            Child::Leaf(leaf) => leaf.is_preparable(),
            Child::Node(node) => node.has_preparable(),
        })
    }

    pub(crate) fn collect_constants<'a>(&'a self, out: &mut Vec<&'a Value>) {
        for child in &self.children {
            match child {
                Child::Leaf(leaf) => out.extend(leaf.constants()),
                Child::Node(node) => node.collect_constants(out),
            }
        }
    }
}
