//! Formatting and tree-factory configuration.
//!
//! [`FormatConfig`] controls how a tree is turned into text. [`SqlConfig`] is the
//! file-level configuration (TOML) that resolves into a [`Context`] at the
//! composition root.
//!
//! ```toml
//! [format]
//! keyword_case = "upper"
//! placeholder = "dollar"
//! quote_identifiers = "always"
//!
//! [tree]
//! factory = "tracing"
//! ```

use crate::context::Context;
use crate::error::{SqlError, SqlResult};
use crate::format::Formatter;
use crate::tree::{DefaultTreeFactory, TracingTreeFactory, TreeFactory};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

/// Case applied to node keywords when rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordCase {
    /// Emit keywords exactly as the tree holds them.
    #[default]
    Preserve,
    /// Emit keywords upper-cased.
    Upper,
    /// Emit keywords lower-cased.
    Lower,
}

/// Placeholder syntax used in prepared rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderStyle {
    /// `?` for every parameter (JDBC/ODBC style).
    #[default]
    Question,
    /// `$1`, `$2`, ... (PostgreSQL style).
    Dollar,
}

/// Identifier quoting policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteMode {
    /// Quote only the names that were built quoted.
    #[default]
    AsDeclared,
    /// Quote every name part (except `*`).
    Always,
}

/// Options controlling SQL text generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    pub keyword_case: KeywordCase,
    pub placeholder: PlaceholderStyle,
    pub quote_identifiers: QuoteMode,
}

impl FormatConfig {
    /// Create a configuration with defaults (keywords as written, `?` placeholders,
    /// quoting as declared).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the keyword case.
    pub fn with_keyword_case(mut self, case: KeywordCase) -> Self {
        self.keyword_case = case;
        self
    }

    /// Set the placeholder style.
    pub fn with_placeholder(mut self, style: PlaceholderStyle) -> Self {
        self.placeholder = style;
        self
    }

    /// Set the identifier quoting policy.
    pub fn with_quote_identifiers(mut self, mode: QuoteMode) -> Self {
        self.quote_identifiers = mode;
        self
    }

    /// PostgreSQL flavored output: upper-case keywords and `$n` placeholders.
    pub fn postgres() -> Self {
        Self::new()
            .with_keyword_case(KeywordCase::Upper)
            .with_placeholder(PlaceholderStyle::Dollar)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Tree factory name: `default` or `tracing`.
    pub factory: String,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            factory: "default".to_string(),
        }
    }
}

/// File-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SqlConfig {
    pub format: FormatConfig,
    pub tree: TreeConfig,
}

impl SqlConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(raw: &str) -> SqlResult<Self> {
        let config: SqlConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> SqlResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&raw).map_err(|e| match e {
            SqlError::ConfigParse(e) => {
                SqlError::config(format!("failed to parse {}: {e}", path.display()))
            }
            other => other,
        })?;
        tracing::debug!(
            target: "sqlforge.config",
            path = %path.display(),
            factory = %config.tree.factory,
            "loaded sql config"
        );
        Ok(config)
    }

    /// Check that every named component exists.
    pub fn validate(&self) -> SqlResult<()> {
        self.tree_factory().map(|_| ())
    }

    /// Resolve the configured tree factory.
    pub fn tree_factory(&self) -> SqlResult<Arc<dyn TreeFactory>> {
        match self.tree.factory.as_str() {
            "default" => Ok(Arc::new(DefaultTreeFactory)),
            "tracing" => Ok(Arc::new(TracingTreeFactory)),
            other => Err(SqlError::config(format!("unknown tree factory '{other}'"))),
        }
    }

    /// Build the statement context described by this configuration.
    pub fn into_context(self) -> SqlResult<Context> {
        let factory = self.tree_factory()?;
        Ok(Context::new(factory, Formatter::new(self.format)))
    }
}
