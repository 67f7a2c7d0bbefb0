//! Cached response catalog
//!
//! Loads the response documents of a language once and answers later
//! lookups from memory. Lookups follow exactly the same search and
//! rendering rules as [`ResponseResolver`], so both give the same text
//! while the files on disk are unchanged.

use crate::document::ResponseDocument;
use crate::error::{ResolveError, ResolveResult};
use crate::resolver::{FoundTemplate, ResponseRequest, ResponseResolver};
use crate::scan::{list_documents, DocumentFilter};
use dashmap::DashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    language: String,
    filter: DocumentFilter,
}

/// Documents loaded for one language and filter
#[derive(Debug)]
enum CachedDocuments {
    Loaded(Vec<ResponseDocument>),
    /// Directory missing or unreadable; not scanned again until invalidated
    Missing,
}

/// Per-language cache of parsed response documents
pub struct ResponseCatalog {
    resolver: ResponseResolver,
    cache: DashMap<CacheKey, Arc<CachedDocuments>>,
    load_lock: Mutex<()>,
}

impl ResponseCatalog {
    /// Empty catalog; documents load on first use
    pub fn new(resolver: ResponseResolver) -> Self {
        Self {
            resolver,
            cache: DashMap::new(),
            load_lock: Mutex::new(()),
        }
    }

    pub fn resolver(&self) -> &ResponseResolver {
        &self.resolver
    }

    /// Resolve a request against the cached documents
    pub async fn resolve(&self, request: ResponseRequest) -> String {
        let found = self.find_template(&request).await;
        self.resolver.finish(&request, found)
    }

    /// Locate template text for a request, loading documents if needed
    pub async fn find_template(&self, request: &ResponseRequest) -> ResolveResult<Option<FoundTemplate>> {
        let language = self.resolver.language_for(request);
        let documents = self.documents(&language, request.filter()).await?;

        let CachedDocuments::Loaded(documents) = documents.as_ref() else {
            return Err(ResolveError::DirectoryNotFound {
                path: self.resolver.language_dir(&language),
            });
        };

        let found = documents.iter().find_map(|document| {
            document
                .first_candidate(&request.key, request.intent.as_deref(), request.platform.as_deref())
                .map(|candidate| FoundTemplate {
                    candidate,
                    document: document.path().to_path_buf(),
                })
        });
        Ok(found)
    }

    async fn documents(&self, language: &str, filter: DocumentFilter) -> ResolveResult<Arc<CachedDocuments>> {
        let key = CacheKey {
            language: language.to_string(),
            filter,
        };

        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached.clone());
        }

        let _guard = self.load_lock.lock().await;

        // another task may have loaded while we waited
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached.clone());
        }

        let dir = self.resolver.language_dir(language);
        let scan_filter = key.filter.clone();
        let loaded = tokio::task::spawn_blocking(move || load_documents(dir, &scan_filter))
            .await
            .map_err(|e| ResolveError::TaskFailed {
                message: e.to_string(),
            })?;

        let cached = Arc::new(loaded);
        self.cache.insert(key, cached.clone());
        Ok(cached)
    }

    /// Drop every cached entry for a language
    ///
    /// Waits for a load in progress so documents read before the call are
    /// not cached after it returns.
    pub async fn invalidate(&self, language: &str) {
        let _guard = self.load_lock.lock().await;
        self.cache.retain(|key, _| key.language != language);
        debug!(language, "response catalog invalidated");
    }

    /// Drop every cached entry, waiting for a load in progress
    pub async fn clear(&self) {
        let _guard = self.load_lock.lock().await;
        self.cache.clear();
        debug!("response catalog cleared");
    }

    /// True when some documents of `language` are cached
    pub fn is_cached(&self, language: &str) -> bool {
        self.cache.iter().any(|entry| entry.key().language == language)
    }
}

fn load_documents(dir: PathBuf, filter: &DocumentFilter) -> CachedDocuments {
    let paths = match list_documents(&dir, filter) {
        Ok(paths) => paths,
        Err(e) => {
            warn!(error = %e, "response resource directory unavailable");
            return CachedDocuments::Missing;
        }
    };

    let documents: Vec<ResponseDocument> = paths
        .into_iter()
        .filter_map(|path| match ResponseDocument::load(&path) {
            Ok(document) => Some(document),
            Err(e) => {
                warn!(error = %e, "skipping response document");
                None
            }
        })
        .collect();

    debug!(dir = %dir.display(), count = documents.len(), "loaded response documents");
    CachedDocuments::Loaded(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_language_is_remembered() {
        let dir = TempDir::new().unwrap();
        let catalog = ResponseCatalog::new(ResponseResolver::new(dir.path()));
        let request = ResponseRequest::new("greet").language("xx");

        let first = catalog.resolve(request.clone()).await;
        assert!(first.contains("could not be found or read"));
        assert!(catalog.is_cached("xx"));

        // directory created later is not seen until invalidated
        fs::create_dir(dir.path().join("xx")).unwrap();
        fs::write(dir.path().join("xx").join("a.yaml"), "responses:\n  greet: hi\n").unwrap();
        assert_eq!(catalog.resolve(request.clone()).await, first);

        catalog.invalidate("xx").await;
        assert!(!catalog.is_cached("xx"));
        assert_eq!(catalog.resolve(request.platform_files_only(false)).await, "hi");
    }

    fn cache_key(language: &str) -> CacheKey {
        CacheKey {
            language: language.to_string(),
            filter: DocumentFilter::all(),
        }
    }

    #[tokio::test]
    async fn test_invalidate_waits_for_running_load() {
        let dir = TempDir::new().unwrap();
        let catalog = Arc::new(ResponseCatalog::new(ResponseResolver::new(dir.path())));

        // a load holds the lock while it reads documents
        let load = catalog.load_lock.lock().await;

        let invalidate = tokio::spawn({
            let catalog = catalog.clone();
            async move { catalog.invalidate("en").await }
        });
        tokio::task::yield_now().await;
        assert!(!invalidate.is_finished());

        // the load stores what it read, then releases the lock
        catalog.cache.insert(cache_key("en"), Arc::new(CachedDocuments::Missing));
        drop(load);

        invalidate.await.unwrap();
        assert!(!catalog.is_cached("en"));
    }

    #[tokio::test]
    async fn test_clear_drops_every_language() {
        let dir = TempDir::new().unwrap();
        let catalog = ResponseCatalog::new(ResponseResolver::new(dir.path()));
        catalog.cache.insert(cache_key("en"), Arc::new(CachedDocuments::Missing));
        catalog.cache.insert(cache_key("nl"), Arc::new(CachedDocuments::Loaded(Vec::new())));

        catalog.invalidate("nl").await;
        assert!(catalog.is_cached("en"));
        assert!(!catalog.is_cached("nl"));

        catalog.clear().await;
        assert!(!catalog.is_cached("en"));
    }
}
