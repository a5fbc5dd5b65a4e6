//! Locating and patching level tokens inside a panel's query list.
//!
//! Patching is two-phase: [`QueryPaths::scan`] enumerates the query entries
//! whose parsed query carries tokens, then [`QueryPaths::apply`] rewrites
//! exactly those. An empty scan is what validation keys on.

use levelboard_json_pointer::{get, get_mut, parse_validated, Path};
use serde_json::Value;

use crate::error::{Result, SyncError, ValidationKind};
use crate::level_token::LevelToken;
use crate::options::SyncOptions;

/// A query entry whose parsed query holds at least one level token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteSite {
    /// Position in the panel's query list.
    pub query: usize,
    pub tokens: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteScan {
    pub sites: Vec<RewriteSite>,
    /// Query entries holding a parsed query string, with or without tokens.
    pub parsed_queries: usize,
}

impl SiteScan {
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Why this scan cannot satisfy a panel that requires a rewrite.
    pub fn failure(&self) -> Option<ValidationKind> {
        if !self.sites.is_empty() {
            None
        } else if self.parsed_queries == 0 {
            Some(ValidationKind::MissingParsedQuery)
        } else {
            Some(ValidationKind::MissingLevelToken)
        }
    }
}

/// Where queries live inside a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPaths {
    /// Panel → query list.
    queries: Path,
    /// Query entry → parsed query string.
    parsed_query: Path,
}

impl QueryPaths {
    pub fn new(queries_pointer: &str, parsed_query_pointer: &str) -> Result<Self> {
        let queries = parse_validated(queries_pointer)
            .map_err(|source| SyncError::InvalidPointer { name: "queries", source })?;
        let parsed_query = parse_validated(parsed_query_pointer).map_err(|source| {
            SyncError::InvalidPointer {
                name: "parsed query",
                source,
            }
        })?;
        Ok(Self {
            queries,
            parsed_query,
        })
    }

    pub fn from_options(options: &SyncOptions) -> Result<Self> {
        Self::new(&options.queries_pointer, &options.parsed_query_pointer)
    }

    fn query_list<'a>(&self, panel: &'a Value) -> &'a [Value] {
        match get(panel, &self.queries) {
            Some(Value::Array(queries)) => queries.as_slice(),
            _ => &[],
        }
    }

    /// Enumerate the rewrite sites of `panel`.
    pub fn scan(&self, panel: &Value, token: &LevelToken) -> SiteScan {
        let mut scan = SiteScan::default();
        for (index, query) in self.query_list(panel).iter().enumerate() {
            let Some(Value::String(text)) = get(query, &self.parsed_query) else {
                continue;
            };
            scan.parsed_queries += 1;
            let tokens = token.count(text);
            if tokens > 0 {
                scan.sites.push(RewriteSite {
                    query: index,
                    tokens,
                });
            }
        }
        scan
    }

    /// Rewrite the tokens at `sites` to `level_index`. Returns the number of
    /// tokens rewritten.
    pub fn apply(
        &self,
        panel: &mut Value,
        sites: &[RewriteSite],
        token: &LevelToken,
        level_index: i32,
    ) -> usize {
        let Some(Value::Array(queries)) = get_mut(panel, &self.queries) else {
            return 0;
        };
        let mut rewritten = 0;
        for site in sites {
            let Some(query) = queries.get_mut(site.query) else {
                continue;
            };
            if let Some(Value::String(text)) = get_mut(query, &self.parsed_query) {
                rewritten += token.count(text);
                *text = token.rewrite(text, level_index);
            }
        }
        rewritten
    }
}
