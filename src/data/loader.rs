//! Dataset loader: serve each dataset from the document cache, or fetch, parse, store, then serve.
//! Failures are logged and the sink is never called, leaving that dataset absent.

use std::sync::Arc;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::{DocumentCache, RefreshPass};
use crate::data::ability::AbilityGlossaryEntry;
use crate::data::army::Army;
use crate::data::dataset::DatasetKey;
use crate::data::detachment::Detachment;
use crate::data::library::{Library, SharedLibrary};
use crate::data::settings::AppSettings;
use crate::data::source::DocumentSource;
use crate::data::strategem::Strategem;
use crate::data::unit::Unit;

#[derive(Debug)]
pub struct DatasetLoader<S> {
    cache: Arc<DocumentCache>,
    source: S,
}

impl<S: DocumentSource> DatasetLoader<S> {
    pub fn new(cache: Arc<DocumentCache>, source: S) -> Self {
        DatasetLoader { cache, source }
    }

    pub fn cache(&self) -> &Arc<DocumentCache> {
        &self.cache
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Load one dataset and hand it to `sink`. Returns whether the sink was called.
    pub async fn load<T, F>(&self, key: DatasetKey, pass: &RefreshPass, sink: F) -> bool
    where
        T: DeserializeOwned + Serialize,
        F: FnOnce(T),
    {
        if let Some(blob) = self.cache.get(key) {
            match serde_json::from_str::<T>(&blob) {
                Ok(document) => {
                    tracing::debug!(dataset = %key, "served from cache");
                    sink(document);
                    return true;
                }
                Err(err) => {
                    tracing::warn!(dataset = %key, error = %err, "cached record unreadable; refetching");
                }
            }
        }

        let raw = match self.source.fetch(key).await {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(dataset = %key, source = %self.source.describe(), error = %err, "fetch failed");
                return false;
            }
        };
        let document: T = match serde_yaml::from_str(&raw) {
            Ok(document) => document,
            Err(err) => {
                tracing::warn!(dataset = %key, error = %err, "document did not parse");
                return false;
            }
        };

        match serde_json::to_string(&document) {
            Ok(blob) => match self.cache.commit(pass, key, &blob) {
                Ok(true) => tracing::info!(dataset = %key, "fetched and cached"),
                Ok(false) => tracing::info!(dataset = %key, "fetched; cache was reset meanwhile, not stored"),
                Err(err) => tracing::warn!(dataset = %key, error = %err, "fetched but could not cache"),
            },
            Err(err) => tracing::warn!(dataset = %key, error = %err, "could not serialize for cache"),
        }

        sink(document);
        true
    }
}

fn sink<T>(
    library: &SharedLibrary,
    assign: impl FnOnce(&mut Library, T),
) -> impl FnOnce(T) {
    let library = Arc::clone(library);
    move |document| {
        let mut guard = library.write().unwrap_or_else(|p| p.into_inner());
        assign(&mut guard, document);
    }
}

/// Startup sequence: expire a stale cache, then load all six datasets concurrently in one
/// refresh pass. Each dataset fills its own library slot whenever it completes.
pub async fn load_library<S: DocumentSource>(loader: &DatasetLoader<S>, library: &SharedLibrary) {
    let now = Utc::now();
    loader.cache().expire_if_stale(now);
    let pass = loader.cache().begin_refresh(now);

    let (settings, armies, detachments, units, strategems, abilities) = futures_util::join!(
        loader.load(
            DatasetKey::Settings,
            &pass,
            sink(library, |lib, doc: AppSettings| lib.settings = Some(doc)),
        ),
        loader.load(
            DatasetKey::Armies,
            &pass,
            sink(library, |lib, doc: Vec<Army>| lib.armies = Some(doc)),
        ),
        loader.load(
            DatasetKey::Detachments,
            &pass,
            sink(library, |lib, doc: Vec<Detachment>| lib.detachments = Some(doc)),
        ),
        loader.load(
            DatasetKey::Units,
            &pass,
            sink(library, |lib, doc: Vec<Unit>| lib.units = Some(doc)),
        ),
        loader.load(
            DatasetKey::Strategems,
            &pass,
            sink(library, |lib, doc: Vec<Strategem>| lib.strategems = Some(doc)),
        ),
        loader.load(
            DatasetKey::Abilities,
            &pass,
            sink(library, |lib, doc: Vec<AbilityGlossaryEntry>| lib.abilities = Some(doc)),
        ),
    );

    let delivered = [settings, armies, detachments, units, strategems, abilities]
        .into_iter()
        .filter(|ok| *ok)
        .count();
    tracing::info!(delivered, total = DatasetKey::ALL.len(), "library load finished");
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::cache::MemoryStore;
    use crate::data::library;
    use crate::data::source::FetchError;

    /// Serves fixed documents and counts fetches.
    #[derive(Default)]
    struct FixedSource {
        documents: HashMap<DatasetKey, String>,
        fetches: AtomicUsize,
    }

    impl FixedSource {
        fn with(mut self, key: DatasetKey, body: &str) -> Self {
            self.documents.insert(key, body.to_string());
            self
        }
    }

    impl DocumentSource for FixedSource {
        async fn fetch(&self, key: DatasetKey) -> Result<String, FetchError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.documents.get(&key).cloned().ok_or_else(|| FetchError::Status {
                status: 404,
                url: key.file_name(),
            })
        }

        fn describe(&self) -> String {
            "fixed".to_string()
        }
    }

    fn loader(source: FixedSource) -> DatasetLoader<FixedSource> {
        DatasetLoader::new(Arc::new(DocumentCache::new(Box::new(MemoryStore::default()))), source)
    }

    #[tokio::test]
    async fn first_load_fetches_and_second_load_uses_cache() {
        let loader = loader(FixedSource::default().with(DatasetKey::Armies, "- id: a\n  name: Alpha\n"));
        let pass = loader.cache().begin_refresh(Utc::now());

        let mut first: Option<Vec<Army>> = None;
        assert!(loader.load(DatasetKey::Armies, &pass, |doc| first = Some(doc)).await);
        let mut second: Option<Vec<Army>> = None;
        assert!(loader.load(DatasetKey::Armies, &pass, |doc| second = Some(doc)).await);

        assert_eq!(loader.source().fetches.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
        assert_eq!(loader.cache().last_refresh(), Some(pass.instant));
    }

    #[tokio::test]
    async fn fetch_failure_never_calls_sink() {
        let loader = loader(FixedSource::default());
        let pass = loader.cache().begin_refresh(Utc::now());
        let mut called = false;
        let delivered = loader
            .load(DatasetKey::Units, &pass, |_: Vec<Unit>| called = true)
            .await;
        assert!(!delivered);
        assert!(!called);
        assert!(loader.cache().get(DatasetKey::Units).is_none());
    }

    #[tokio::test]
    async fn unparsable_document_never_calls_sink() {
        let loader = loader(FixedSource::default().with(DatasetKey::Units, "name: [unterminated"));
        let pass = loader.cache().begin_refresh(Utc::now());
        let delivered = loader.load(DatasetKey::Units, &pass, |_: Vec<Unit>| {}).await;
        assert!(!delivered);
        assert!(loader.cache().last_refresh().is_none());
    }

    #[tokio::test]
    async fn corrupt_cache_record_triggers_refetch() {
        let loader = loader(FixedSource::default().with(DatasetKey::Armies, "- id: a\n  name: Alpha\n"));
        loader.cache().put(DatasetKey::Armies, "{not json").expect("put");
        let pass = loader.cache().begin_refresh(Utc::now());

        let mut armies: Option<Vec<Army>> = None;
        assert!(loader.load(DatasetKey::Armies, &pass, |doc| armies = Some(doc)).await);
        assert_eq!(loader.source().fetches.load(Ordering::SeqCst), 1);
        assert_eq!(armies.map(|a| a.len()), Some(1));
        let repaired = loader.cache().get(DatasetKey::Armies).expect("record rewritten");
        assert!(serde_json::from_str::<Vec<Army>>(&repaired).is_ok());
    }

    #[tokio::test]
    async fn load_library_fills_available_slots_and_leaves_failures_absent() {
        let source = FixedSource::default()
            .with(DatasetKey::Settings, "summaryKeywords: [\"smoke\"]\n")
            .with(DatasetKey::Armies, "- id: a\n  name: Alpha\n")
            .with(DatasetKey::Units, "- name: Rhino\n");
        let loader = loader(source);
        let shared = library::shared(Library::default());

        load_library(&loader, &shared).await;

        let lib = shared.read().expect("library lock");
        assert!(lib.settings.is_some());
        assert!(lib.armies.is_some());
        assert!(lib.units.is_some());
        assert!(lib.detachments.is_none());
        assert!(lib.strategems.is_none());
        assert!(lib.abilities.is_none());
    }
}
