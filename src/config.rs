//! Runtime configuration from `MUSTER_*` environment variables.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use crate::cache::{DocumentCache, FileStore};
use crate::data::loader::DatasetLoader;
use crate::data::source::{AnySource, DirSource, HttpSource};
use crate::scoreboard::{Scoreboard, SCORE_EXTENSION};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_CACHE_DIR: &str = ".muster/cache";
pub const DEFAULT_SCORE_DIR: &str = ".muster/scores";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSourceConfig {
    Http { base_url: String },
    Dir(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub data_source: DataSourceConfig,
    pub cache_dir: PathBuf,
    pub score_dir: PathBuf,
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// `MUSTER_DATA_URL` wins over `MUSTER_DATA_DIR` when both are set. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let data_source = match var("MUSTER_DATA_URL") {
            Some(base_url) => DataSourceConfig::Http { base_url },
            None => DataSourceConfig::Dir(PathBuf::from(
                var("MUSTER_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
            )),
        };

        RuntimeConfig {
            bind_addr: var("MUSTER_BIND").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            data_source,
            cache_dir: PathBuf::from(
                var("MUSTER_CACHE_DIR").unwrap_or_else(|| DEFAULT_CACHE_DIR.to_string()),
            ),
            score_dir: PathBuf::from(
                var("MUSTER_SCORE_DIR").unwrap_or_else(|| DEFAULT_SCORE_DIR.to_string()),
            ),
        }
    }

    pub fn source(&self) -> AnySource {
        match &self.data_source {
            DataSourceConfig::Http { base_url } => AnySource::Http(HttpSource::new(base_url.clone())),
            DataSourceConfig::Dir(dir) => AnySource::Dir(DirSource::new(dir.clone())),
        }
    }

    pub fn document_cache(&self) -> Arc<DocumentCache> {
        Arc::new(DocumentCache::new(Box::new(FileStore::new(self.cache_dir.clone()))))
    }

    pub fn loader(&self) -> DatasetLoader<AnySource> {
        DatasetLoader::new(self.document_cache(), self.source())
    }

    pub fn scoreboard(&self) -> Scoreboard {
        Scoreboard::new(Box::new(FileStore::with_extension(
            self.score_dir.clone(),
            SCORE_EXTENSION,
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::data::dataset::DatasetKey;
    use crate::scoreboard::ScoreCategory;

    fn config(vars: &[(&str, &str)]) -> RuntimeConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RuntimeConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let cfg = config(&[]);
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(cfg.data_source, DataSourceConfig::Dir(PathBuf::from(DEFAULT_DATA_DIR)));
        assert_eq!(cfg.cache_dir, PathBuf::from(DEFAULT_CACHE_DIR));
        assert_eq!(cfg.score_dir, PathBuf::from(DEFAULT_SCORE_DIR));
    }

    #[test]
    fn data_url_takes_precedence_over_data_dir() {
        let cfg = config(&[
            ("MUSTER_DATA_URL", "https://example.test/data"),
            ("MUSTER_DATA_DIR", "/srv/data"),
        ]);
        assert_eq!(
            cfg.data_source,
            DataSourceConfig::Http {
                base_url: "https://example.test/data".to_string()
            }
        );
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = config(&[("MUSTER_BIND", "  "), ("MUSTER_DATA_URL", ""), ("MUSTER_DATA_DIR", "fixtures")]);
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(cfg.data_source, DataSourceConfig::Dir(PathBuf::from("fixtures")));
    }

    #[test]
    fn clearing_the_cache_keeps_scores_in_a_shared_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let shared = dir.path().to_string_lossy().into_owned();
        let cfg = config(&[("MUSTER_CACHE_DIR", shared.as_str()), ("MUSTER_SCORE_DIR", shared.as_str())]);

        let cache = cfg.document_cache();
        cache.put(DatasetKey::Units, "[]").expect("put");
        cfg.scoreboard().set(1, ScoreCategory::Primary, 12).expect("set");

        cache.clear_all().expect("clear");

        assert!(cache.get(DatasetKey::Units).is_none());
        assert_eq!(cfg.scoreboard().get(1, ScoreCategory::Primary), 12);
    }
}
