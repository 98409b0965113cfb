//! SQL predicate generation.
//!
//! Produces filter clauses, a scoring expression and positional parameters
//! that a relational store can evaluate with the same AND-across-groups,
//! OR-within-group semantics as the in-memory scorer. User text never reaches
//! the SQL string: every group is bound as one `text[]` parameter of
//! `%word%` patterns and matched with `ILIKE ANY`.

use crate::error::{AppError, Result};
use crate::relevance::tokenize::TokenGroup;
use crate::relevance::weights::PredicateWeights;
use serde::Serialize;

/// Column names the generated fragments refer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateColumns {
    pub name: String,
    pub description: String,
    pub category: String,
    pub quality_score: String,
    /// Stable key for the final tie-break, ascending in catalog order.
    pub id: String,
}

impl Default for PredicateColumns {
    fn default() -> Self {
        Self {
            name: "name".to_string(),
            description: "description".to_string(),
            category: "category_name".to_string(),
            quality_score: "quality_score".to_string(),
            id: "id".to_string(),
        }
    }
}

impl PredicateColumns {
    pub fn validate(&self) -> Result<()> {
        for ident in [
            &self.name,
            &self.description,
            &self.category,
            &self.quality_score,
            &self.id,
        ] {
            validate_identifier(ident)?;
        }
        Ok(())
    }
}

/// Accept plain or schema-qualified SQL identifiers only.
pub fn validate_identifier(ident: &str) -> Result<()> {
    let valid = ident.split('.').all(|part| {
        let mut chars = part.chars();
        matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    });

    if valid {
        Ok(())
    } else {
        Err(AppError::ValidationError(format!(
            "'{}' is not a valid SQL identifier",
            ident
        )))
    }
}

/// Generated SQL fragments for one query.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SqlPredicate {
    /// One clause per token group; all of them must hold.
    pub clauses: Vec<String>,
    /// Relevance expression, larger is better. `None` when there is nothing to score.
    pub order_by: Option<String>,
    /// Keys that break relevance ties: quality descending, then id ascending.
    pub tie_breakers: Vec<String>,
    /// Positional parameters; entry `i` binds to the `i`-th placeholder.
    pub params: Vec<Vec<String>>,
}

impl SqlPredicate {
    /// True when the query produced no filter at all.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn where_clause(&self) -> Option<String> {
        if self.clauses.is_empty() {
            None
        } else {
            Some(self.clauses.join(" AND "))
        }
    }

    /// Full `ORDER BY` list: relevance descending, then the tie-break keys.
    pub fn order_by_clause(&self) -> Option<String> {
        self.order_by.as_ref().map(|expr| {
            std::iter::once(format!("{} DESC", expr))
                .chain(self.tie_breakers.iter().cloned())
                .collect::<Vec<_>>()
                .join(", ")
        })
    }

    /// Render a complete parameterized `SELECT` against `table`.
    pub fn select_statement(&self, table: &str, limit: Option<usize>) -> Result<String> {
        validate_identifier(table)?;

        let mut sql = format!("SELECT * FROM {}", table);
        if let Some(filter) = self.where_clause() {
            sql.push_str(" WHERE ");
            sql.push_str(&filter);
        }
        if let Some(order) = self.order_by_clause() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&order);
        }
        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        Ok(sql)
    }
}

/// Builds [`SqlPredicate`]s for a fixed column layout.
#[derive(Debug, Clone)]
pub struct PredicateBuilder {
    columns: PredicateColumns,
    weights: PredicateWeights,
    first_placeholder: usize,
}

impl Default for PredicateBuilder {
    fn default() -> Self {
        Self {
            columns: PredicateColumns::default(),
            weights: PredicateWeights::DEFAULT,
            first_placeholder: 1,
        }
    }
}

impl PredicateBuilder {
    pub fn new(columns: PredicateColumns) -> Result<Self> {
        columns.validate()?;
        Ok(Self {
            columns,
            ..Self::default()
        })
    }

    /// Number the placeholders from `index` so the fragments can follow other
    /// bound parameters in a larger statement. Placeholders start at `$1`.
    pub fn with_first_placeholder(mut self, index: usize) -> Self {
        self.first_placeholder = index.max(1);
        self
    }

    pub fn with_weights(mut self, weights: PredicateWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn columns(&self) -> &PredicateColumns {
        &self.columns
    }

    pub fn build(&self, groups: &[TokenGroup]) -> SqlPredicate {
        if groups.is_empty() {
            return SqlPredicate::default();
        }

        let cols = &self.columns;
        let mut clauses = Vec::with_capacity(groups.len());
        let mut terms = Vec::with_capacity(groups.len());
        let mut params = Vec::with_capacity(groups.len());

        for (offset, group) in groups.iter().enumerate() {
            let slot = format!("${}", self.first_placeholder + offset);

            clauses.push(format!(
                "({name} ILIKE ANY({slot}) OR {desc} ILIKE ANY({slot}) OR {cat} ILIKE ANY({slot}))",
                name = cols.name,
                desc = cols.description,
                cat = cols.category,
                slot = slot,
            ));

            terms.push(format!(
                "CASE WHEN {name} ILIKE ANY({slot}) THEN {wn} ELSE 0 END + \
                 CASE WHEN {cat} ILIKE ANY({slot}) THEN {wc} ELSE 0 END + \
                 CASE WHEN {desc} ILIKE ANY({slot}) THEN {wd} ELSE 0 END",
                name = cols.name,
                desc = cols.description,
                cat = cols.category,
                slot = slot,
                wn = self.weights.name,
                wc = self.weights.category,
                wd = self.weights.description,
            ));

            params.push(group.members().map(like_pattern).collect());
        }

        let order_by = format!(
            "(({}) * (1 + COALESCE({}, 0) / 100.0))",
            terms.join(" + "),
            cols.quality_score
        );

        SqlPredicate {
            clauses,
            order_by: Some(order_by),
            tie_breakers: vec![
                format!("COALESCE({}, 0) DESC", cols.quality_score),
                format!("{} ASC", cols.id),
            ],
            params,
        }
    }
}

/// Wrap `word` as a `%word%` substring pattern with LIKE metacharacters escaped.
pub fn like_pattern(word: &str) -> String {
    let mut pattern = String::with_capacity(word.len() + 2);
    pattern.push('%');
    for c in word.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
