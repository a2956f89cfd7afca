//! Integration tests for the statement builders.

use super::*;
use crate::config::{FormatConfig, KeywordCase, PlaceholderStyle, QuoteMode};
use crate::error::SqlError;
use crate::format::Formatter;

fn ints(rendered: &Rendered) -> Vec<i64> {
    rendered
        .params
        .values()
        .iter()
        .map(|v| match v {
            Value::Int(n) => *n,
            other => panic!("expected int binding, got {other:?}"),
        })
        .collect()
}

fn assert_validation<S: Statement>(stmt: &S) {
    match stmt.build() {
        Err(SqlError::Validation(_)) => {}
        other => panic!("expected validation error, got {other:?}"),
    }
}

// ==================== SELECT ====================

#[test]
fn test_select_basic() {
    assert_eq!(select_from("users").to_sql().unwrap(), "SELECT * FROM users");
}

#[test]
fn test_select_with_conditions() {
    let rendered = select(["id", "name"])
        .from("users")
        .eq("status", "active")
        .gt("age", 18i32)
        .limit(10)
        .to_prepared()
        .unwrap();

    assert_eq!(
        rendered.sql,
        "SELECT id, name FROM users WHERE status = ? AND age > ? LIMIT 10"
    );
    assert_eq!(rendered.params.len(), 2);
    assert_eq!(rendered.params.get(1), Some(&Value::Text("active".into())));
}

#[test]
fn test_select_joins() {
    let sql = select(["u.id", "o.total"])
        .from(Name::raw("users").alias("u"))
        .inner_join(
            Name::raw("orders").alias("o"),
            Condition::columns_eq("o.user_id", "u.id"),
        )
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT u.id, o.total FROM users AS u INNER JOIN orders AS o ON o.user_id = u.id"
    );

    let sql = select_from("a")
        .join_using(JoinKind::Left, "b", &["id", "tenant_id"])
        .cross_join("c")
        .to_sql()
        .unwrap();
    assert_eq!(sql, "SELECT * FROM a LEFT JOIN b USING (id, tenant_id) CROSS JOIN c");
}

#[test]
fn test_select_join_condition_binds_in_order() {
    let rendered = select_from("a")
        .left_join(
            "b",
            Condition::and(vec![
                Condition::columns_eq("a.id", "b.a_id"),
                Condition::eq("b.kind", 1i32),
            ]),
        )
        .eq("a.flag", 2i32)
        .to_prepared()
        .unwrap();
    assert_eq!(
        rendered.sql,
        "SELECT * FROM a LEFT JOIN b ON a.id = b.a_id AND b.kind = ? WHERE a.flag = ?"
    );
    assert_eq!(ints(&rendered), vec![1, 2]);
}

#[test]
fn test_select_grouping_and_ordering() {
    let count = || Expr::function("count", [Expr::keyword("*")]);
    let sql = SelectBuilder::new()
        .column("dept")
        .column(count())
        .from("emp")
        .group_by("dept")
        .having(Condition::compare(count(), ">", Expr::value(5i32)))
        .order_by_desc("dept")
        .order_by_asc("x")
        .order_by("y")
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT dept, count(*) FROM emp GROUP BY dept HAVING count(*) > 5 ORDER BY dept DESC, x ASC, y"
    );
}

#[test]
fn test_select_distinct_paginate_for_update() {
    let sql = select(["id"])
        .distinct()
        .from("jobs")
        .eq("state", "queued")
        .paginate(3, 20)
        .for_update()
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT DISTINCT id FROM jobs WHERE state = 'queued' LIMIT 20 OFFSET 40 FOR UPDATE"
    );

    // page and size are clamped to 1
    let sql = select_from("t").paginate(0, 0).to_sql().unwrap();
    assert_eq!(sql, "SELECT * FROM t LIMIT 1 OFFSET 0");
}

#[test]
fn test_select_subqueries() {
    let inner = select(["id"]).from("t").eq("a", 1i32).build().unwrap();
    let rendered = select_from(Expr::subquery_as(inner, "s"))
        .eq("b", 2i32)
        .to_prepared()
        .unwrap();
    assert_eq!(
        rendered.sql,
        "SELECT * FROM (SELECT id FROM t WHERE a = ?) AS s WHERE b = ?"
    );
    assert_eq!(ints(&rendered), vec![1, 2]);

    let banned = select(["user_id"]).from("bans").build().unwrap();
    let sql = select_from("users")
        .and_where(Condition::in_query("id", banned))
        .to_sql()
        .unwrap();
    assert_eq!(sql, "SELECT * FROM users WHERE id IN (SELECT user_id FROM bans)");
}

#[test]
fn test_select_filter_helpers() {
    let sql = select_from("users")
        .eq_opt("team", None::<i32>)
        .eq_opt("org", Some(3i32))
        .in_list("role", ["a", "b"])
        .is_not_null("email")
        .between("age", 18i32, 65i32)
        .ilike("name", "%al%")
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT * FROM users WHERE org = 3 AND role IN ('a', 'b') AND email IS NOT NULL \
         AND age BETWEEN 18 AND 65 AND name ILIKE '%al%'"
    );

    let sql = select_from("users")
        .in_list("id", Vec::<i64>::new())
        .to_sql()
        .unwrap();
    assert_eq!(sql, "SELECT * FROM users WHERE 1=0");
}

#[test]
fn test_select_validation() {
    assert_validation(&SelectBuilder::new().cross_join("x"));
    assert_validation(&select_from("t").limit(-1));
    assert_validation(&SelectBuilder::new().for_update());
}

#[test]
fn test_select_paginate_overflow_is_rejected() {
    assert_validation(&select_from("t").paginate(i64::MAX, 2));
    assert_validation(&select_from("t").paginate(i64::MAX / 2, i64::MAX));

    // An explicit offset replaces the overflowed one.
    let sql = select_from("t")
        .paginate(i64::MAX, 2)
        .offset(4)
        .to_sql()
        .unwrap();
    assert_eq!(sql, "SELECT * FROM t LIMIT 2 OFFSET 4");

    let sql = select_from("t").paginate(i64::MAX, 1).to_sql().unwrap();
    assert_eq!(sql, format!("SELECT * FROM t LIMIT 1 OFFSET {}", i64::MAX - 1));
}

#[test]
fn test_select_whole_float_literal_keeps_fraction() {
    let sql = select(["x"])
        .from("t")
        .and_where(Condition::compare(Expr::name("x"), "/", Expr::value(2.0f64)))
        .to_sql()
        .unwrap();
    assert_eq!(sql, "SELECT x FROM t WHERE x / 2.0");
}

#[test]
fn test_select_quote_always_splits_qualified_columns() {
    let ctx = Context::default().with_formatter(Formatter::new(
        FormatConfig::new().with_quote_identifiers(QuoteMode::Always),
    ));
    let query = select(["u.id"])
        .from("users")
        .and_where(Condition::columns_eq("u.id", "o.user_id"))
        .build_with(&ctx)
        .unwrap();
    assert_eq!(
        query.to_string(),
        r#"SELECT "u"."id" FROM "users" WHERE "u"."id" = "o"."user_id""#
    );
}

// ==================== INSERT ====================

#[test]
fn test_insert_basic() {
    let rendered = insert_into("users")
        .set("username", "alice")
        .set("email", "alice@example.com")
        .to_prepared()
        .unwrap();
    assert_eq!(
        rendered.sql,
        "INSERT INTO users (username, email) VALUES (?, ?)"
    );
    assert_eq!(rendered.params.len(), 2);
}

#[test]
fn test_insert_multiple_rows() {
    let sql = insert_into("t")
        .columns(&["a", "b"])
        .values([1i32, 2])
        .values([3i32, 4])
        .to_sql()
        .unwrap();
    assert_eq!(sql, "INSERT INTO t (a, b) VALUES (1, 2), (3, 4)");
}

#[test]
fn test_insert_on_conflict() {
    let sql = insert_into("users")
        .set("email", "e")
        .set("name", "n")
        .on_conflict_do_update(&["email"], &["name"])
        .returning(&["id"])
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        "INSERT INTO users (email, name) VALUES ('e', 'n') \
         ON CONFLICT (email) DO UPDATE SET name = excluded.name RETURNING id"
    );

    let sql = insert_into("tags")
        .set("name", "rust")
        .on_conflict_do_nothing(&[])
        .to_sql()
        .unwrap();
    assert_eq!(sql, "INSERT INTO tags (name) VALUES ('rust') ON CONFLICT DO NOTHING");
}

#[test]
fn test_insert_on_conflict_quote_always() {
    let ctx = Context::default().with_formatter(Formatter::new(
        FormatConfig::new().with_quote_identifiers(QuoteMode::Always),
    ));
    let query = insert_into("users")
        .set("email", "e")
        .set("name", "n")
        .on_conflict_do_update(&["email"], &["name"])
        .build_with(&ctx)
        .unwrap();
    assert_eq!(
        query.to_string(),
        r#"INSERT INTO "users" ("email", "name") VALUES ('e', 'n') ON CONFLICT ("email") DO UPDATE SET "name" = "excluded"."name""#
    );
}

#[test]
fn test_insert_select() {
    let rendered = insert_into("archive")
        .columns(&["id"])
        .select(select(["id"]).from("users").lt("last_login", 100i64))
        .to_prepared()
        .unwrap();
    assert_eq!(
        rendered.sql,
        "INSERT INTO archive (id) SELECT id FROM users WHERE last_login < ?"
    );
    assert_eq!(ints(&rendered), vec![100]);
}

#[test]
fn test_insert_validation() {
    assert_validation(&insert_into("t"));
    assert_validation(&insert_into("t").columns(&["a", "b"]).values([1i32]));
    assert_validation(
        &insert_into("t")
            .set("a", 1i32)
            .select(select(["a"]).from("s")),
    );
    assert_validation(
        &insert_into("t")
            .set("a", 1i32)
            .on_conflict_do_update(&[], &["a"]),
    );
}

// ==================== UPDATE ====================

#[test]
fn test_update_basic() {
    let rendered = update("users")
        .set("status", "inactive")
        .set_raw("updated_at", "now()")
        .eq("id", 1i64)
        .to_prepared()
        .unwrap();
    assert_eq!(
        rendered.sql,
        "UPDATE users SET status = ?, updated_at = now() WHERE id = ?"
    );
    assert_eq!(rendered.params.len(), 2);
}

#[test]
fn test_update_from_returning() {
    let sql = update("t")
        .set("a", 1i32)
        .set_opt("b", None::<i32>)
        .from("s")
        .raw_where("t.id = s.id")
        .returning(&["t.id"])
        .to_sql()
        .unwrap();
    assert_eq!(sql, "UPDATE t SET a = 1 FROM s WHERE t.id = s.id RETURNING t.id");
}

#[test]
fn test_update_requires_set() {
    assert_validation(&update("users").eq("id", 1i64));
}

// ==================== DELETE ====================

#[test]
fn test_delete_basic() {
    let rendered = delete_from("users").eq("id", 1i64).to_prepared().unwrap();
    assert_eq!(rendered.sql, "DELETE FROM users WHERE id = ?");
    assert_eq!(ints(&rendered), vec![1]);
}

#[test]
fn test_delete_requires_where_unless_all() {
    assert_validation(&delete_from("users"));
    assert_validation(&delete_from("users").and_where(Condition::and(vec![])));
    assert_eq!(delete_from("users").all().to_sql().unwrap(), "DELETE FROM users");
}

#[test]
fn test_delete_using_returning() {
    let sql = delete_from("orders")
        .using("customers")
        .raw_where("orders.customer_id = customers.id")
        .eq("customers.banned", true)
        .returning(&["orders.id"])
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        "DELETE FROM orders USING customers WHERE orders.customer_id = customers.id \
         AND customers.banned = TRUE RETURNING orders.id"
    );
}

// ==================== Sequences ====================

#[test]
fn test_create_sequence() {
    let sql = create_sequence("order_seq")
        .if_not_exists()
        .increment_by(1)
        .min_value(1)
        .max_value(1000)
        .start_with(10)
        .cache(5)
        .cycle(false)
        .owned_by("orders.id")
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        "CREATE SEQUENCE IF NOT EXISTS order_seq INCREMENT BY 1 MINVALUE 1 MAXVALUE 1000 \
         START WITH 10 CACHE 5 NO CYCLE OWNED BY orders.id"
    );

    assert_eq!(
        create_sequence("s").cycle(true).to_sql().unwrap(),
        "CREATE SEQUENCE s CYCLE"
    );
}

#[test]
fn test_create_sequence_validation() {
    assert_validation(&create_sequence("s").increment_by(0));
    assert_validation(&create_sequence("s").min_value(10).max_value(1));
    assert_validation(&create_sequence("s").cache(0));
}

#[test]
fn test_drop_sequence() {
    let sql = drop_sequence("a").and("b").if_exists().cascade().to_sql().unwrap();
    assert_eq!(sql, "DROP SEQUENCE IF EXISTS a, b CASCADE");
}

#[test]
fn test_sequence_functions() {
    let rendered = insert_into("orders")
        .set_expr("id", nextval("order_seq"))
        .set("total", 10i32)
        .to_prepared()
        .unwrap();
    assert_eq!(
        rendered.sql,
        "INSERT INTO orders (id, total) VALUES (nextval('order_seq'), ?)"
    );
    assert_eq!(ints(&rendered), vec![10]);

    let rendered = select([setval("s", 42i64)]).to_prepared().unwrap();
    assert_eq!(rendered.sql, "SELECT setval('s', ?)");
    assert_eq!(ints(&rendered), vec![42]);

    assert_eq!(select([currval("s")]).to_sql().unwrap(), "SELECT currval('s')");
}

// ==================== Context ====================

#[test]
fn test_build_with_context() {
    let ctx = Context::default().with_formatter(Formatter::new(
        FormatConfig::new()
            .with_placeholder(PlaceholderStyle::Dollar)
            .with_keyword_case(KeywordCase::Lower),
    ));
    let query = select(["id"])
        .from("t")
        .eq("a", 1i32)
        .eq("b", 2i32)
        .build_with(&ctx)
        .unwrap();
    let rendered = query.render_prepared();
    // Condition joiners are delimiters, not keywords, so they keep their case.
    assert_eq!(rendered.sql, "select id from t where a = $1 AND b = $2");
    assert_eq!(ints(&rendered), vec![1, 2]);
    assert_eq!(query.to_string(), "select id from t where a = 1 AND b = 2");
}
