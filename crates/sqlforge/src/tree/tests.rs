//! Cursor and balance tests for the tree module.

use super::*;
use crate::format::Formatter;
use crate::node::Child;

fn render(root: &Node) -> String {
    Formatter::default().render(root)
}

#[test]
fn test_balanced_tree_finishes() {
    let mut tree = AbstractSyntaxTree::new();
    assert_eq!(tree.depth(), 1);

    tree.start_node(NodeMeta::keyword("SELECT").with_delimiter(", "))
        .add_leaves(vec![Expr::name("id"), Expr::name("name")])
        .end_node()
        .unwrap()
        .start_node(NodeMeta::keyword("FROM"))
        .add_leaf(Expr::name("users"))
        .end_node()
        .unwrap();

    assert_eq!(tree.depth(), 1);
    assert!(tree.root().is_ok());

    let root = Box::new(tree).finish().unwrap();
    assert_eq!(root.children().len(), 2);
    assert_eq!(render(&root), "SELECT id, name FROM users");
}

#[test]
fn test_children_attach_to_open_node() {
    let mut tree = AbstractSyntaxTree::new();
    tree.start_node(NodeMeta::keyword("FROM"))
        .add_leaf(Expr::name("a"))
        .start_node(NodeMeta::keyword("LEFT JOIN"))
        .add_leaf(Expr::name("b"))
        .end_node()
        .unwrap()
        .end_node()
        .unwrap();

    let root = Box::new(tree).finish().unwrap();
    let Child::Node(from) = &root.children()[0] else {
        panic!("expected FROM node");
    };
    assert_eq!(from.meta().keyword_text(), Some("FROM"));
    assert_eq!(from.children().len(), 2);
    assert!(matches!(&from.children()[1], Child::Node(join) if join.meta().keyword_text() == Some("LEFT JOIN")));
}

#[test]
fn test_end_node_at_root_fails() {
    let mut tree = AbstractSyntaxTree::new();
    let err = tree.end_node().err().unwrap();
    assert!(matches!(err, SqlError::UnbalancedEnd));
    assert!(err.is_structural());
    // The root survives the failed call.
    assert_eq!(tree.depth(), 1);
}

#[test]
fn test_finish_with_open_nodes_fails() {
    let mut tree = AbstractSyntaxTree::new();
    tree.start_node(NodeMeta::keyword("WHERE"))
        .start_node(NodeMeta::empty());

    assert_eq!(tree.depth(), 3);
    assert!(matches!(tree.root(), Err(SqlError::Unfinished { depth: 2 })));

    let err = Box::new(tree).finish().unwrap_err();
    assert!(matches!(err, SqlError::Unfinished { depth: 2 }));
}

#[test]
fn test_peek_contributes_to_current_node() {
    let mut tree = AbstractSyntaxTree::new();
    tree.start_node(NodeMeta::keyword("ORDER BY"));
    tree.peek(&mut |node: &mut Node| {
        node.add_leaf(Expr::name("created_at"));
        node.set_delimiter(", ");
    });
    tree.add_leaf(Expr::name("id")).end_node().unwrap();

    let root = Box::new(tree).finish().unwrap();
    assert_eq!(render(&root), "ORDER BY created_at, id");
}

#[test]
fn test_tracing_tree_matches_default_tree() {
    let build = |mut tree: Box<dyn SyntaxTree>| {
        tree.start_node(NodeMeta::keyword("SELECT"))
            .add_leaf(Expr::keyword("*"))
            .end_node()
            .unwrap()
            .start_node(NodeMeta::keyword("FROM"))
            .add_leaf(Expr::name("t"))
            .end_node()
            .unwrap();
        tree.finish().unwrap()
    };

    let plain = build(DefaultTreeFactory.create());
    let traced = build(TracingTreeFactory.create());
    assert_eq!(plain, traced);
    assert_eq!(render(&traced), "SELECT * FROM t");
}

#[test]
fn test_tracing_tree_reports_unbalanced_end() {
    let mut tree = TracingTree::new();
    assert!(matches!(tree.end_node(), Err(SqlError::UnbalancedEnd)));
}

struct LeavesNodeOpen;

impl Assemble for LeavesNodeOpen {
    fn assemble(&self, tree: &mut dyn SyntaxTree) -> SqlResult<()> {
        tree.start_node(NodeMeta::keyword("WHERE"))
            .add_leaf(Expr::keyword("1=1"));
        Ok(())
    }
}

struct Balanced;

impl Assemble for Balanced {
    fn assemble(&self, tree: &mut dyn SyntaxTree) -> SqlResult<()> {
        tree.start_node(NodeMeta::keyword("LIMIT"))
            .add_leaf(Expr::keyword("1"))
            .end_node()?;
        Ok(())
    }
}

#[test]
fn test_assemble_checked_detects_depth_change() {
    let mut tree = AbstractSyntaxTree::new();
    let err = LeavesNodeOpen.assemble_checked(&mut tree).unwrap_err();
    assert!(matches!(
        err,
        SqlError::UnbalancedClause {
            expected: 1,
            actual: 2
        }
    ));

    let mut tree = AbstractSyntaxTree::new();
    Balanced.assemble_checked(&mut tree).unwrap();
    assert_eq!(tree.depth(), 1);
}
