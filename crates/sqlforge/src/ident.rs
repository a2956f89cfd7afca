//! SQL names: identifiers with optional qualification, quoting and alias.
//!
//! [`Name`] represents a (possibly dotted) identifier such as `schema.table.column`,
//! where each part may be quoted (`"CamelCase"`). Names can also carry an alias
//! rendered as `name AS alias`.
//!
//! - Parsed unquoted parts are validated against: `[A-Za-z_][A-Za-z0-9_$]*`
//! - Quoted parts allow any characters except NUL and escape `"` as `""`
//! - A trailing `*` part is accepted (`t.*`) and is never quoted
//!
//! # Example
//! ```ignore
//! use sqlforge::Name;
//!
//! let t = Name::parse("public.users")?;
//! let c = Name::parse(r#""CamelCase"."UserTable""#)?;
//! # Ok::<(), sqlforge::SqlError>(())
//! ```

use crate::config::QuoteMode;
use crate::error::{SqlError, SqlResult};

/// A part of a SQL name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentPart {
    /// Unquoted part, rendered verbatim unless quoting is forced.
    Unquoted(String),
    /// Quoted part: allows any characters except NUL.
    Quoted(String),
}

impl IdentPart {
    fn text(&self) -> &str {
        match self {
            Self::Unquoted(s) | Self::Quoted(s) => s,
        }
    }
}

/// A SQL name (column, table, schema, function, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    parts: Vec<IdentPart>,
    alias: Option<String>,
}

impl Name {
    /// Create a name from raw text without validation.
    ///
    /// The text is kept as a single unquoted part, so `"u.id"` renders exactly as given.
    /// When quoting is forced, each dotted piece is quoted separately (`"u"."id"`).
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            parts: vec![IdentPart::Unquoted(text.into())],
            alias: None,
        }
    }

    /// Create a single quoted name.
    pub fn quoted(name: &str) -> SqlResult<Self> {
        if name.is_empty() {
            return Err(SqlError::invalid_identifier("Empty quoted identifier"));
        }
        if name.contains('\0') {
            return Err(SqlError::invalid_identifier(
                "Identifier cannot contain NUL character",
            ));
        }
        Ok(Self {
            parts: vec![IdentPart::Quoted(name.to_string())],
            alias: None,
        })
    }

    /// Parse a name, supporting dotted and quoted forms.
    ///
    /// - Dotted: `schema.table.column`
    /// - Quoted: `"CamelCase"."UserTable"`
    /// - Mixed: `public."UserTable".id`
    /// - Wildcard: `u.*`
    pub fn parse(s: &str) -> SqlResult<Self> {
        if s.is_empty() {
            return Err(SqlError::invalid_identifier("Identifier cannot be empty"));
        }
        if s.contains('\0') {
            return Err(SqlError::invalid_identifier(
                "Identifier cannot contain NUL character",
            ));
        }

        let mut parts = Vec::new();
        let mut chars = s.chars().peekable();

        while chars.peek().is_some() {
            if !parts.is_empty() {
                match chars.next() {
                    Some('.') => {
                        if chars.peek().is_none() {
                            return Err(SqlError::invalid_identifier(format!(
                                "Trailing '.' in identifier '{s}'"
                            )));
                        }
                    }
                    Some(c) => {
                        return Err(SqlError::invalid_identifier(format!(
                            "Expected '.' between identifier parts, got '{c}'"
                        )));
                    }
                    None => break,
                }
            }

            if matches!(parts.last(), Some(IdentPart::Unquoted(last)) if last == "*") {
                return Err(SqlError::invalid_identifier(format!(
                    "'*' must be the last part of '{s}'"
                )));
            }

            if chars.peek() == Some(&'"') {
                chars.next();
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('"') => {
                            if chars.peek() == Some(&'"') {
                                chars.next();
                                name.push('"');
                            } else {
                                break;
                            }
                        }
                        Some(c) => name.push(c),
                        None => {
                            return Err(SqlError::invalid_identifier(format!(
                                "Unclosed quoted identifier in '{s}'"
                            )));
                        }
                    }
                }
                if name.is_empty() {
                    return Err(SqlError::invalid_identifier("Empty quoted identifier"));
                }
                parts.push(IdentPart::Quoted(name));
                continue;
            }

            if chars.peek() == Some(&'*') {
                chars.next();
                parts.push(IdentPart::Unquoted("*".to_string()));
                continue;
            }

            let mut name = String::new();
            while let Some(&c) = chars.peek() {
                if c == '.' {
                    break;
                }
                let valid = if name.is_empty() {
                    c == '_' || c.is_ascii_alphabetic()
                } else {
                    c == '_' || c == '$' || c.is_ascii_alphanumeric()
                };
                if !valid {
                    return Err(SqlError::invalid_identifier(format!(
                        "Invalid character '{c}' in identifier '{s}'"
                    )));
                }
                name.push(c);
                chars.next();
            }
            if name.is_empty() {
                return Err(SqlError::invalid_identifier(format!(
                    "Empty identifier segment in '{s}'"
                )));
            }
            parts.push(IdentPart::Unquoted(name));
        }

        Ok(Self { parts, alias: None })
    }

    /// Prefix this name with a qualifier (`qualifier.name`).
    pub fn qualify(mut self, qualifier: Name) -> Self {
        let mut parts = qualifier.parts;
        parts.append(&mut self.parts);
        self.parts = parts;
        self
    }

    /// Attach an alias, rendered as `name AS alias`.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// The identifier parts, outermost qualifier first.
    pub fn parts(&self) -> &[IdentPart] {
        &self.parts
    }

    /// The alias, if any.
    pub fn alias_name(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// A name with no text renders as an empty segment.
    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(|p| p.text().trim().is_empty())
    }

    pub(crate) fn write_sql(&self, out: &mut String, quote: QuoteMode) {
        if self.is_empty() {
            return;
        }
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            match part {
                IdentPart::Unquoted(s) if quote == QuoteMode::AsDeclared => out.push_str(s),
                // Raw text may be dotted (`u.id`); each piece is its own identifier.
                IdentPart::Unquoted(s) => {
                    for (j, piece) in s.split('.').enumerate() {
                        if j > 0 {
                            out.push('.');
                        }
                        if piece == "*" {
                            out.push('*');
                        } else {
                            write_quoted_ident(out, piece);
                        }
                    }
                }
                IdentPart::Quoted(s) => write_quoted_ident(out, s),
            }
        }
        if let Some(alias) = &self.alias {
            out.push_str(" AS ");
            match quote {
                QuoteMode::AsDeclared => out.push_str(alias),
                QuoteMode::Always => write_quoted_ident(out, alias),
            }
        }
    }
}

fn write_quoted_ident(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        if ch == '"' {
            out.push('"');
        }
        out.push(ch);
    }
    out.push('"');
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Self::raw(s)
    }
}

impl From<String> for Name {
    fn from(s: String) -> Self {
        Self::raw(s)
    }
}
