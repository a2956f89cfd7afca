//! Rendering statement trees to SQL text.
//!
//! The [`Formatter`] walks a tree depth-first, in child order. In prepared mode each
//! constant becomes a placeholder and its value is appended to the returned
//! [`ParamList`]; one running counter spans the whole walk, so positions match the
//! order in which placeholders appear in the text.
//!
//! A formatter holds only configuration. Every call starts from a fresh counter and
//! binding list, so rendering is deterministic and a formatter can be shared freely.

use crate::config::{FormatConfig, KeywordCase, PlaceholderStyle};
use crate::expr::Expr;
use crate::node::{Child, Node};
use crate::param::ParamList;
use crate::value::Value;
use std::fmt::Write;

/// Longest SQL text emitted in render log events, in bytes.
const MAX_LOGGED_SQL: usize = 200;

/// How constants are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Inline constants as SQL literals.
    Literal,
    /// Emit placeholders and collect the constants as bindings.
    Prepared,
}

/// The result of rendering: SQL text plus positional bindings.
///
/// `params` is empty in literal mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub sql: String,
    pub params: ParamList,
}

/// Stateless tree renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Formatter {
    config: FormatConfig,
}

impl Formatter {
    pub fn new(config: FormatConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// Render with constants inlined.
    pub fn render(&self, root: &Node) -> String {
        self.render_with(root, RenderMode::Literal).sql
    }

    /// Render with placeholders and ordered bindings.
    pub fn render_prepared(&self, root: &Node) -> Rendered {
        self.render_with(root, RenderMode::Prepared)
    }

    /// Render a tree in the given mode.
    pub fn render_with(&self, root: &Node, mode: RenderMode) -> Rendered {
        let mut renderer = Renderer::new(&self.config, mode);
        let sql = renderer.node(root);
        tracing::debug!(
            target: "sqlforge.render",
            mode = ?mode,
            param_count = renderer.params.len(),
            sql = %truncate_sql_bytes(&sql, MAX_LOGGED_SQL),
            "rendered statement"
        );
        Rendered {
            sql,
            params: renderer.params,
        }
    }

    /// Render a single leaf in the given mode.
    pub fn render_expr(&self, expr: &Expr, mode: RenderMode) -> Rendered {
        let mut renderer = Renderer::new(&self.config, mode);
        let mut sql = String::new();
        renderer.expr(expr, &mut sql);
        Rendered {
            sql,
            params: renderer.params,
        }
    }
}

/// Per-call rendering state.
struct Renderer<'a> {
    config: &'a FormatConfig,
    mode: RenderMode,
    params: ParamList,
}

impl<'a> Renderer<'a> {
    fn new(config: &'a FormatConfig, mode: RenderMode) -> Self {
        Self {
            config,
            mode,
            params: ParamList::new(),
        }
    }

    fn node(&mut self, node: &Node) -> String {
        let delimiter = node.delimiter();
        let mut body = String::new();
        let mut first = true;
        for child in node.children() {
            let rendered = match child {
                // Empty leaves produce neither text nor bindings.
                Child::Leaf(leaf) if leaf.is_empty() => continue,
                Child::Leaf(leaf) => {
                    let mut out = String::new();
                    self.expr(leaf, &mut out);
                    out
                }
                Child::Node(inner) => self.node(inner),
            };
            let segment = rendered.trim();
            if segment.is_empty() {
                continue;
            }
            if !first {
                body.push_str(delimiter);
            }
            body.push_str(segment);
            first = false;
        }

        if node.meta().is_grouped() {
            body = format!("({body})");
        }

        match node.meta().keyword_text() {
            Some(keyword) => {
                let keyword = self.keyword(keyword.trim());
                if body.is_empty() {
                    keyword
                } else {
                    format!("{keyword} {body}")
                }
            }
            None => body,
        }
    }

    fn keyword(&self, keyword: &str) -> String {
        match self.config.keyword_case {
            KeywordCase::Preserve => keyword.to_string(),
            KeywordCase::Upper => keyword.to_uppercase(),
            KeywordCase::Lower => keyword.to_lowercase(),
        }
    }

    fn expr(&mut self, expr: &Expr, out: &mut String) {
        match expr {
            Expr::Name(name) => name.write_sql(out, self.config.quote_identifiers),
            Expr::Constant(value) => self.constant(value, out),
            Expr::Operator(op) => out.push_str(op.symbol.trim()),
            Expr::Keyword(text) => out.push_str(text),
            Expr::List(items) => self.comma_list(items, out),
            Expr::Function { name, args } => {
                out.push_str(name);
                match args.as_slice() {
                    // The sub-query brings its own parentheses unless it is aliased.
                    [Expr::SubQuery { query, alias: None }] => self.subquery(query, out),
                    [Expr::List(items)] => {
                        out.push('(');
                        self.comma_list(items, out);
                        out.push(')');
                    }
                    _ => {
                        out.push('(');
                        self.comma_list(args, out);
                        out.push(')');
                    }
                }
            }
            Expr::SubQuery { query, alias } => {
                self.subquery(query, out);
                if let Some(alias) = alias {
                    out.push_str(" AS ");
                    out.push_str(alias);
                }
            }
            Expr::Cast { expr, ty } => {
                self.expr(expr, out);
                out.push_str("::");
                out.push_str(ty);
            }
            Expr::Null => out.push_str("NULL"),
        }
    }

    fn subquery(&mut self, query: &Node, out: &mut String) {
        let inner = self.node(query);
        out.push('(');
        out.push_str(&inner);
        out.push(')');
    }

    fn comma_list(&mut self, items: &[Expr], out: &mut String) {
        let mut first = true;
        for item in items {
            if item.is_empty() {
                continue;
            }
            if !first {
                out.push_str(", ");
            }
            self.expr(item, out);
            first = false;
        }
    }

    fn constant(&mut self, value: &Value, out: &mut String) {
        match self.mode {
            RenderMode::Literal => value.write_literal(out),
            RenderMode::Prepared => {
                let position = self.params.push(value.clone());
                match self.config.placeholder {
                    PlaceholderStyle::Question => out.push('?'),
                    PlaceholderStyle::Dollar => {
                        let _ = write!(out, "${position}");
                    }
                }
            }
        }
    }
}

/// Cut `sql` to at most `max` bytes on a char boundary.
fn truncate_sql_bytes(sql: &str, max: usize) -> &str {
    if sql.len() <= max {
        return sql;
    }
    let mut end = max;
    while !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
