//! The `"level index":"<n>"` token embedded in parsed query strings.
//!
//! Query strings are opaque text; the token is located and replaced as a
//! substring, never by parsing the query.

use regex::{NoExpand, Regex};

use crate::error::{Result, SyncError};

#[derive(Debug, Clone)]
pub struct LevelToken {
    field: String,
    pattern: Regex,
}

impl LevelToken {
    /// Token matcher for `field`, e.g. `level index`.
    ///
    /// The value may carry a leading `-` so the `-1` written for a `00-` level
    /// is recognised on the next run.
    pub fn new(field: &str) -> Result<Self> {
        if field.is_empty() || field.contains('"') {
            return Err(SyncError::InvalidLevelField(field.to_string()));
        }
        let pattern = format!(r#""{}":"-?[0-9]+""#, regex::escape(field));
        let pattern =
            Regex::new(&pattern).map_err(|_| SyncError::InvalidLevelField(field.to_string()))?;
        Ok(Self {
            field: field.to_string(),
            pattern,
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Number of tokens in `text`.
    pub fn count(&self, text: &str) -> usize {
        self.pattern.find_iter(text).count()
    }

    /// The token as it should read for `level_index`.
    pub fn render(&self, level_index: i32) -> String {
        format!(r#""{}":"{}""#, self.field, level_index)
    }

    /// `text` with every token's value set to `level_index`. Everything
    /// outside the tokens is kept as is.
    pub fn rewrite(&self, text: &str, level_index: i32) -> String {
        let token = self.render(level_index);
        self.pattern
            .replace_all(text, NoExpand(&token))
            .into_owned()
    }
}
