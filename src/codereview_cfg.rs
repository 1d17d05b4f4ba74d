//! Reader for the repository's `codereview.cfg`.
//!
//! The file is a flat list of `key: value` lines. Blank lines and lines
//! starting with `#` are skipped; anything else without a `:` is an error.
//!
//! ```text
//! # review settings
//! gerrit: https://review.gerrithub.io/a/cue-lang/cue
//! github: https://github.com/cue-lang/cue
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use url::{Position, Url};

/// Name of the config file inside a repository root.
pub const FILE_NAME: &str = "codereview.cfg";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load config from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("bad config line in {}; expected 'key: value': {line:?}", path.display())]
    BadLine { path: PathBuf, line: String },

    #[error("failed to parse URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("unexpected URL format {0:?}")]
    UnexpectedUrl(String),
}

/// Parsed `codereview.cfg` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    entries: BTreeMap<String, String>,
}

impl Config {
    /// Load `<root>/codereview.cfg`.
    pub fn load(root: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = root.as_ref().join(FILE_NAME);
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read { path: path.clone(), source })?;
        Self::parse(&text, &path)
    }

    /// Parse config text; `path` only appears in error messages.
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let mut entries = BTreeMap::new();
        for line in text.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                return Err(ConfigError::BadLine { path: path.to_path_buf(), line: line.to_string() });
            };
            entries.insert(key.trim().to_string(), value.trim().to_string());
        }
        Ok(Config { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Server part of a Gerrit project URL: the URL with its path removed.
///
/// `https://review.gerrithub.io/a/cue-lang/cue` -> `https://review.gerrithub.io`
pub fn gerrit_url_to_server(url: &str) -> Result<String, ConfigError> {
    let u = Url::parse(url)?;
    Ok(format!("{}{}", &u[..Position::BeforePath], &u[Position::AfterPath..]))
}

/// `(owner, repo)` of a GitHub repository URL.
pub fn github_url_to_parts(url: &str) -> Result<(String, String), ConfigError> {
    let u = Url::parse(url)?;
    let parts: Vec<&str> = u.path().split('/').collect();
    match parts.as_slice() {
        ["", owner, repo] => Ok((owner.to_string(), repo.to_string())),
        _ => Err(ConfigError::UnexpectedUrl(url.to_string())),
    }
}
