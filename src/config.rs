use crate::relevance::PredicateColumns;
use std::env;
use std::path::PathBuf;

pub struct Config {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
    /// JSON catalog to serve. Without one the service starts empty and not ready.
    pub catalog_path: Option<PathBuf>,
    /// Optional replacement for the built-in synonym table.
    pub synonyms_path: Option<PathBuf>,
    /// Infer categories from name/description for records that have none.
    pub infer_categories: bool,
    /// Results returned when a search request gives no limit.
    pub default_limit: usize,
    /// Hard cap on results per search request.
    pub max_results: usize,
    /// Longest accepted query, in characters.
    pub max_query_length: usize,
    /// Optional override for concurrent search permits. If None, uses available cores.
    pub search_permits: Option<usize>,
    /// Upper bound on the CPU work of a single search.
    pub search_timeout_secs: u64,
    /// Table named in rendered predicate statements.
    pub catalog_table: String,
    pub predicate_columns: PredicateColumns,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout_secs: 30,
            catalog_path: None,
            synonyms_path: None,
            infer_categories: false,
            default_limit: 30,
            max_results: 100,
            max_query_length: 256,
            search_permits: None,
            search_timeout_secs: 5,
            catalog_table: "published_tools".to_string(),
            predicate_columns: PredicateColumns::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();
        let columns = defaults.predicate_columns;

        let config = Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .unwrap_or_else(|_| defaults.port.to_string())
                .parse()?,
            shutdown_timeout_secs: env::var("SHUTDOWN_TIMEOUT")
                .unwrap_or_else(|_| defaults.shutdown_timeout_secs.to_string())
                .parse()?,
            catalog_path: env::var("CATALOG_PATH").ok().map(PathBuf::from),
            synonyms_path: env::var("SYNONYMS_PATH").ok().map(PathBuf::from),
            infer_categories: parse_flag(env::var("INFER_CATEGORIES").ok().as_deref()),
            default_limit: env::var("DEFAULT_LIMIT")
                .unwrap_or_else(|_| defaults.default_limit.to_string())
                .parse()?,
            max_results: env::var("MAX_RESULTS")
                .unwrap_or_else(|_| defaults.max_results.to_string())
                .parse()?,
            max_query_length: env::var("MAX_QUERY_LENGTH")
                .unwrap_or_else(|_| defaults.max_query_length.to_string())
                .parse()?,
            search_permits: env::var("SEARCH_PERMITS").ok().and_then(|s| s.parse().ok()),
            search_timeout_secs: env::var("SEARCH_TIMEOUT_SECS")
                .unwrap_or_else(|_| defaults.search_timeout_secs.to_string())
                .parse()?,
            catalog_table: env::var("CATALOG_TABLE").unwrap_or(defaults.catalog_table),
            predicate_columns: PredicateColumns {
                name: env::var("NAME_COLUMN").unwrap_or(columns.name),
                description: env::var("DESCRIPTION_COLUMN").unwrap_or(columns.description),
                category: env::var("CATEGORY_COLUMN").unwrap_or(columns.category),
                quality_score: env::var("QUALITY_COLUMN").unwrap_or(columns.quality_score),
                id: env::var("ID_COLUMN").unwrap_or(columns.id),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject combinations the service cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.default_limit == 0 || self.max_results == 0 {
            anyhow::bail!("DEFAULT_LIMIT and MAX_RESULTS must be at least 1");
        }
        if self.max_query_length == 0 {
            anyhow::bail!("MAX_QUERY_LENGTH must be at least 1");
        }
        if self.search_permits == Some(0) {
            anyhow::bail!("SEARCH_PERMITS must be at least 1");
        }
        crate::relevance::predicate::validate_identifier(&self.catalog_table)?;
        self.predicate_columns.validate()?;
        Ok(())
    }
}

fn parse_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let config = Config {
            max_results: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_identifiers() {
        let config = Config {
            catalog_table: "tools; DROP TABLE tools".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag(Some("true")));
        assert!(parse_flag(Some(" YES ")));
        assert!(parse_flag(Some("1")));
        assert!(!parse_flag(Some("false")));
        assert!(!parse_flag(None));
    }
}
