//! Explicit assembly context: which tree factory and which formatter to use.

use crate::format::Formatter;
use crate::tree::{DefaultTreeFactory, SyntaxTree, TreeFactory};
use std::sync::Arc;

/// Passed to every statement build.
///
/// `Context::default()` (an [`AbstractSyntaxTree`](crate::AbstractSyntaxTree) factory
/// and default formatting) is the composition-root default; anything else is
/// built from [`SqlConfig`](crate::SqlConfig) or assembled by hand.
#[derive(Debug, Clone)]
pub struct Context {
    factory: Arc<dyn TreeFactory>,
    formatter: Formatter,
}

impl Context {
    pub fn new(factory: Arc<dyn TreeFactory>, formatter: Formatter) -> Self {
        Self { factory, formatter }
    }

    /// Replace the tree factory.
    pub fn with_factory(mut self, factory: Arc<dyn TreeFactory>) -> Self {
        self.factory = factory;
        self
    }

    /// Replace the formatter.
    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// A fresh tree from the configured factory.
    pub fn new_tree(&self) -> Box<dyn SyntaxTree> {
        self.factory.create()
    }

    pub fn factory(&self) -> &Arc<dyn TreeFactory> {
        &self.factory
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(Arc::new(DefaultTreeFactory), Formatter::default())
    }
}
