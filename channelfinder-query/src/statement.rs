//! Composable SQL fragments with typed parameter slots.
//!
//! A [`Fragment`] keeps SQL text and bound values apart until it is rendered
//! for a [`Dialect`]; clauses are built as separate fragments and joined with
//! their separator, so no generated text is ever trimmed after the fact.

/// A value bound to a parameter slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    /// Integer value.
    Int(i64),
    /// Text value.
    Text(String),
    /// Integer set bound to a single slot; SQLite reads it through the
    /// `rarray` table-valued function, Postgres as an array.
    IntList(Vec<i64>),
}

impl From<i64> for SqlParam {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<String> for SqlParam {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

/// SQL flavour a fragment is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// `?` placeholders, `ESCAPE '\'`.
    #[default]
    Sqlite,
    /// `$1, $2, ...` placeholders, `ESCAPE '\'`.
    Postgres,
    /// `?` placeholders; backslash doubled inside the escape literal.
    MySql,
}

impl Dialect {
    fn write_placeholder(self, out: &mut String, index: usize) {
        match self {
            Self::Sqlite | Self::MySql => out.push('?'),
            Self::Postgres => {
                out.push('$');
                out.push_str(&index.to_string());
            }
        }
    }

    fn write_in_list(self, out: &mut String, params: &mut Vec<SqlParam>, column: &str, ids: &SqlParam) {
        match (self, ids) {
            (Self::MySql, SqlParam::IntList(values)) => {
                out.push_str(column);
                out.push_str(" IN (");
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    params.push(SqlParam::Int(*v));
                    self.write_placeholder(out, params.len());
                }
                out.push(')');
            }
            (Self::Postgres, _) => {
                params.push(ids.clone());
                out.push_str(column);
                out.push_str(" = ANY(");
                self.write_placeholder(out, params.len());
                out.push(')');
            }
            _ => {
                params.push(ids.clone());
                out.push_str(column);
                out.push_str(" IN rarray(");
                self.write_placeholder(out, params.len());
                out.push(')');
            }
        }
    }

    fn like_escape(self) -> &'static str {
        match self {
            Self::Sqlite | Self::Postgres => r" ESCAPE '\'",
            Self::MySql => r" ESCAPE '\\'",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Sql(String),
    Param(SqlParam),
    LikeEscape,
    InList { column: String, ids: SqlParam },
}

/// SQL text interleaved with parameter slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    parts: Vec<Part>,
}

impl Fragment {
    /// An empty fragment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A fragment holding only SQL text.
    #[must_use]
    pub fn sql(text: impl Into<String>) -> Self {
        Self::new().push_sql(text)
    }

    /// Appends SQL text.
    #[must_use]
    pub fn push_sql(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            return self;
        }
        match self.parts.last_mut() {
            Some(Part::Sql(prev)) => prev.push_str(&text),
            _ => self.parts.push(Part::Sql(text)),
        }
        self
    }

    /// Appends a parameter slot bound to `value`.
    #[must_use]
    pub fn push_param(mut self, value: impl Into<SqlParam>) -> Self {
        self.parts.push(Part::Param(value.into()));
        self
    }

    /// Appends `<column> LIKE <slot>` with the dialect's escape clause.
    #[must_use]
    pub fn push_like(mut self, column: &str, pattern: impl Into<String>) -> Self {
        self = self.push_sql(format!("{column} LIKE ")).push_param(pattern.into());
        self.parts.push(Part::LikeEscape);
        self
    }

    /// Appends `LOWER(<column>) LIKE LOWER(<slot>)`, folding both sides with
    /// the store's own `LOWER`, plus the escape clause.
    #[must_use]
    pub fn push_like_folded(mut self, column: &str, pattern: impl Into<String>) -> Self {
        self = self
            .push_sql(format!("LOWER({column}) LIKE LOWER("))
            .push_param(pattern.into())
            .push_sql(")");
        self.parts.push(Part::LikeEscape);
        self
    }

    /// Appends a membership test of `column` against `ids`.
    ///
    /// The set occupies one slot (`IN rarray(?)` for SQLite, `= ANY($n)` for
    /// Postgres) so its size is not bounded by the store's variable limit.
    /// MySQL has no array binding and gets one slot per value.
    #[must_use]
    pub fn push_in_list<I>(mut self, column: &str, ids: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        self.parts.push(Part::InList {
            column: column.to_owned(),
            ids: SqlParam::IntList(ids.into_iter().collect()),
        });
        self
    }

    /// Appends another fragment.
    #[must_use]
    pub fn push(mut self, other: Fragment) -> Self {
        for part in other.parts {
            self = match part {
                Part::Sql(text) => self.push_sql(text),
                part => {
                    self.parts.push(part);
                    self
                }
            };
        }
        self
    }

    /// Wraps the fragment in parentheses.
    #[must_use]
    pub fn parenthesized(self) -> Self {
        Self::sql("(").push(self).push_sql(")")
    }

    /// Joins fragments with `separator` (e.g. `" AND "`).
    pub fn join<I>(fragments: I, separator: &str) -> Self
    where
        I: IntoIterator<Item = Fragment>,
    {
        let mut joined = Self::new();
        for (i, fragment) in fragments.into_iter().enumerate() {
            if i > 0 {
                joined = joined.push_sql(separator);
            }
            joined = joined.push(fragment);
        }
        joined
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Bound values in slot order. An id set counts as one value here even
    /// where a dialect expands it.
    pub fn params(&self) -> impl Iterator<Item = &SqlParam> {
        self.parts.iter().filter_map(|part| match part {
            Part::Param(p) | Part::InList { ids: p, .. } => Some(p),
            _ => None,
        })
    }

    /// Renders SQL text and the ordered parameter list for `dialect`.
    pub fn render(&self, dialect: Dialect) -> RenderedQuery {
        let mut sql = String::new();
        let mut params = Vec::new();
        for part in &self.parts {
            match part {
                Part::Sql(text) => sql.push_str(text),
                Part::Param(value) => {
                    params.push(value.clone());
                    dialect.write_placeholder(&mut sql, params.len());
                }
                Part::LikeEscape => sql.push_str(dialect.like_escape()),
                Part::InList { column, ids } => {
                    dialect.write_in_list(&mut sql, &mut params, column, ids);
                }
            }
        }
        RenderedQuery { sql, params }
    }
}

/// A statement ready to hand to an executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedQuery {
    pub sql: String,
    pub params: Vec<SqlParam>,
}
