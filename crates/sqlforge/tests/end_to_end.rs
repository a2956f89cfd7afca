//! End-to-end assembly and rendering through the public API.

use sqlforge::{
    Condition, Context, Expr, Filter, FormatConfig, Formatter, KeywordCase, NodeMeta,
    PlaceholderStyle, Query, SqlConfig, SqlError, SqlResult, Statement, SyntaxTree, Value, select,
};
use std::sync::Arc;

/// Root -> select / from (left join (on)) / cross join / where / having / order by / limit / offset.
fn assemble_report(tree: &mut dyn SyntaxTree) -> SqlResult<()> {
    tree.start_node(NodeMeta::keyword("select").with_delimiter(", "))
        .add_leaves(vec![Expr::keyword("?"), Expr::name("id")])
        .end_node()?
        .start_node(NodeMeta::keyword("from"))
        .add_leaf(Expr::value("users"))
        .start_node(NodeMeta::keyword("left join"))
        .add_leaf(Expr::value("orders"))
        .start_node(NodeMeta::keyword("on"))
        .add_leaves(vec![Expr::name("id"), Expr::op("="), Expr::value(42i64)])
        .end_node()?
        .end_node()?
        .end_node()?
        .start_node(NodeMeta::keyword("cross join"))
        .add_leaf(Expr::quoted("order")?)
        .end_node()?
        .start_node(NodeMeta::keyword("where"))
        .add_leaves(vec![Expr::name("year"), Expr::op("="), Expr::value(2024i32)])
        .end_node()?
        .start_node(NodeMeta::keyword("having"))
        .add_leaves(vec![Expr::name("year"), Expr::op("="), Expr::value(2025i32)])
        .end_node()?
        .start_node(NodeMeta::keyword("order by"))
        .add_leaf(Expr::name("test"))
        .end_node()?
        .start_node(NodeMeta::keyword("limit"))
        .add_leaf(Expr::keyword("1"))
        .end_node()?
        .start_node(NodeMeta::keyword("offset"))
        .add_leaf(Expr::keyword("10"))
        .end_node()?;
    Ok(())
}

fn build_report(ctx: &Context) -> Query {
    let mut tree = ctx.new_tree();
    assemble_report(&mut *tree).unwrap();
    Query::from_tree(tree, *ctx.formatter()).unwrap()
}

fn upper_ctx(placeholder: PlaceholderStyle) -> Context {
    Context::default().with_formatter(Formatter::new(
        FormatConfig::new()
            .with_keyword_case(KeywordCase::Upper)
            .with_placeholder(placeholder),
    ))
}

#[test]
fn prepared_report_matches_expected_text() {
    let query = build_report(&upper_ctx(PlaceholderStyle::Question));
    let rendered = query.render_prepared();

    assert_eq!(
        rendered.sql,
        r#"SELECT ?, id FROM ? LEFT JOIN ? ON id = ? CROSS JOIN "order" WHERE year = ? HAVING year = ? ORDER BY test LIMIT 1 OFFSET 10"#
    );
    assert_eq!(rendered.params.len(), 5);
    assert_eq!(
        rendered.params.values(),
        &[
            Value::from("users"),
            Value::from("orders"),
            Value::Int(42),
            Value::Int(2024),
            Value::Int(2025),
        ]
    );
    let positions: Vec<usize> = rendered.params.iter().map(|(pos, _)| pos).collect();
    assert_eq!(positions, vec![1, 2, 3, 4, 5]);
}

#[test]
fn literal_report_inlines_constants() {
    let query = build_report(&upper_ctx(PlaceholderStyle::Question));
    assert_eq!(
        query.render(),
        r#"SELECT ?, id FROM 'users' LEFT JOIN 'orders' ON id = 42 CROSS JOIN "order" WHERE year = 2024 HAVING year = 2025 ORDER BY test LIMIT 1 OFFSET 10"#
    );
}

#[test]
fn config_file_drives_context() {
    let path = std::env::temp_dir().join(format!("sqlforge-e2e-{}.toml", std::process::id()));
    std::fs::write(
        &path,
        "[format]\nkeyword_case = \"upper\"\nplaceholder = \"dollar\"\n\n[tree]\nfactory = \"tracing\"\n",
    )
    .unwrap();
    let config = SqlConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let ctx = config.into_context().unwrap();
    let rendered = build_report(&ctx).render_prepared();
    assert_eq!(
        rendered.sql,
        r#"SELECT ?, id FROM $1 LEFT JOIN $2 ON id = $3 CROSS JOIN "order" WHERE year = $4 HAVING year = $5 ORDER BY test LIMIT 1 OFFSET 10"#
    );
}

#[test]
fn unbalanced_assembly_never_produces_a_query() {
    let ctx = Context::default();
    let mut tree = ctx.new_tree();
    tree.start_node(NodeMeta::keyword("select"))
        .add_leaf(Expr::name("id"));
    let err = Query::from_tree(tree, *ctx.formatter()).unwrap_err();
    assert!(matches!(err, SqlError::Unfinished { depth: 1 }));
}

#[test]
fn builder_and_tree_agree() {
    let ctx = upper_ctx(PlaceholderStyle::Dollar);
    let built = select(["id", "total"])
        .from("orders")
        .and_where(Condition::or(vec![
            Condition::eq("status", "open"),
            Condition::gt("total", 100i64),
        ]))
        .limit(5)
        .build_with(&ctx)
        .unwrap();
    let rendered = built.render_prepared();
    assert_eq!(
        rendered.sql,
        "SELECT id, total FROM orders WHERE status = $1 OR total > $2 LIMIT 5"
    );
    assert_eq!(rendered.params.len(), 2);
}

#[test]
fn queries_render_concurrently() {
    let query = Arc::new(build_report(&upper_ctx(PlaceholderStyle::Dollar)));
    let expected = query.render_prepared();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let query = Arc::clone(&query);
                s.spawn(move || query.render_prepared())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn scalar_access_rejects_composites() {
    assert_eq!(Expr::value(3i32).scalar().unwrap(), &Value::Int(3));
    assert_eq!(Expr::null().scalar().unwrap(), &Value::Null);
    let list = Expr::list([Expr::value(1i32), Expr::value(2i32)]);
    assert!(matches!(list.scalar(), Err(SqlError::CompositeValue("list"))));
    assert_eq!(list.constants().len(), 2);
}
