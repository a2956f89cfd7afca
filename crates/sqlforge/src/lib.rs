//! # sqlforge
//!
//! SQL statement trees and a formatter that renders them as literal or prepared SQL.
//!
//! ## Features
//!
//! - **Tree first**: every statement is assembled into a [`Node`] tree through a cursor API
//!   ([`SyntaxTree`]) and only then rendered
//! - **Two render modes**: literal SQL for logs, prepared SQL plus ordered bindings for execution
//! - **Checked structure**: unbalanced `start_node` / `end_node` sequences are reported, never rendered
//! - **Safe defaults**: DELETE requires WHERE (or `all()`), UPDATE requires SET
//! - **Configurable output**: keyword case, `?` or `$n` placeholders, identifier quoting, from TOML
//! - **Driver-ready bindings**: [`Value`] implements `tokio_postgres::types::ToSql`
//!
//! ## Statement builders
//!
//! ```ignore
//! use sqlforge::{Condition, Filter, Statement, delete_from, insert_into, select, update};
//!
//! // SELECT
//! let rendered = select(["id", "username"])
//!     .from("users")
//!     .eq("status", "active")
//!     .and_where(Condition::or(vec![
//!         Condition::eq("role", "admin"),
//!         Condition::eq("role", "owner"),
//!     ]))
//!     .order_by_desc("created_at")
//!     .limit(10)
//!     .to_prepared()?;
//!
//! // INSERT
//! let sql = insert_into("users")
//!     .set("username", "alice")
//!     .set("email", "alice@example.com")
//!     .returning(&["id"])
//!     .to_sql()?;
//!
//! // UPDATE
//! let q = update("users").set("status", "inactive").eq("id", 7i64).build()?;
//!
//! // DELETE
//! let q = delete_from("sessions").lt("expires_at", chrono::Utc::now()).build()?;
//! ```
//!
//! ## Trees directly
//!
//! ```ignore
//! use sqlforge::{Context, Expr, NodeMeta, Query};
//!
//! let ctx = Context::default();
//! let mut tree = ctx.new_tree();
//! tree.start_node(NodeMeta::keyword("SELECT").with_delimiter(", "))
//!     .add_leaves(vec![Expr::name("id"), Expr::name("name")])
//!     .end_node()?;
//! let query = Query::from_tree(tree, *ctx.formatter())?;
//! assert_eq!(query.render(), "SELECT id, name");
//! ```

pub mod condition;
pub mod config;
pub mod context;
pub mod error;
pub mod expr;
pub mod format;
pub mod ident;
pub mod node;
pub mod param;
pub mod query;
pub mod stmt;
pub mod tree;
pub mod value;

pub use condition::Condition;
pub use config::{FormatConfig, KeywordCase, PlaceholderStyle, QuoteMode, SqlConfig, TreeConfig};
pub use context::Context;
pub use error::{SqlError, SqlResult};
pub use expr::{Expr, Operator, OperatorPosition};
pub use format::{Formatter, RenderMode, Rendered};
pub use ident::{IdentPart, Name};
pub use node::{Child, Node, NodeMeta};
pub use param::ParamList;
pub use query::Query;
pub use tree::{
    AbstractSyntaxTree, Assemble, DefaultTreeFactory, SyntaxTree, TracingTree, TracingTreeFactory,
    TreeFactory,
};
pub use value::Value;

// Re-export the builders for easy access
pub use stmt::{
    ConflictAction, CreateSequence, DeleteBuilder, DropSequence, Filter, InsertBuilder, Join,
    JoinConstraint, JoinKind, SelectBuilder, Statement, UpdateBuilder, create_sequence, currval,
    delete_from, drop_sequence, insert_into, nextval, select, select_from, setval, update,
};
