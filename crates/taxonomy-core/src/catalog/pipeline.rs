//! Pipeline orchestration and caching
//!
//! normalize → merge → split → specialize → dedupe を1本のパイプラインに組み立てる。
//!
//! - [`Pipeline`]: 純粋・同期のステージ合成
//! - [`TaxonomyContext`]: 生テーブルを保持し、入力ソースごとに1回だけ構築してキャッシュ
//! - [`CatalogHandle`]: 利用側が参照するツリー + ロード中フラグ

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use once_cell::sync::OnceCell;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::error::{Result, TaxonomyError};

use super::builtin::{builtin_base, builtin_extras};
use super::dedupe::dedupe_tree;
use super::merge::merge_trees_with_report;
use super::model::Category;
use super::normalize::normalize;
use super::snapshot::{Catalog, CatalogSource};
use super::source::RemoteSource;
use super::specialize::{specialize_with, SpecializationRule, SPECIALIZATION_RULES};
use super::split::{collapse, expand_with, SplitRule, SPLIT_TABLE};

/// Stage composition with its static tables
#[derive(Debug, Clone, Copy)]
pub struct Pipeline {
    split_table: &'static [SplitRule],
    rules: &'static [SpecializationRule],
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            split_table: SPLIT_TABLE,
            rules: SPECIALIZATION_RULES,
        }
    }
}

impl Pipeline {
    pub fn new(split_table: &'static [SplitRule], rules: &'static [SpecializationRule]) -> Self {
        Self { split_table, rules }
    }

    /// Full pipeline over raw records
    pub fn run(&self, base: &[Value], extras: &[Value]) -> Vec<Category> {
        self.compose(normalize(base), &normalize(extras))
    }

    /// Merge, split, specialize and dedupe already-normalized trees
    pub fn compose(&self, base: Vec<Category>, extras: &[Category]) -> Vec<Category> {
        let (merged, _) = merge_trees_with_report(base, extras);
        let expanded = expand_with(merged, self.split_table);
        let specialized = specialize_with(expanded, self.rules);
        let tree = dedupe_tree(collapse(specialized));
        debug!(categories = tree.len(), "pipeline finished");
        tree
    }
}

/// Receives refresh outcomes that are otherwise swallowed
pub trait RefreshObserver: Send + Sync {
    /// A remote fetch or rebuild failed and the local tree was kept
    fn remote_failed(&self, source: &str, error: &TaxonomyError);

    /// A remote tree replaced the local one
    fn remote_applied(&self, _source: &str, _catalog: &Catalog) {}
}

/// Default observer, reports through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl RefreshObserver for LogObserver {
    fn remote_failed(&self, source: &str, error: &TaxonomyError) {
        warn!(source, %error, "remote category source unavailable, keeping local tree");
    }

    fn remote_applied(&self, source: &str, catalog: &Catalog) {
        info!(
            source,
            categories = catalog.categories.len(),
            "remote category tree applied"
        );
    }
}

/// Consumer view: the current tree plus a loading flag.
///
/// The tree is replaced whole; readers never observe a partial update.
#[derive(Debug)]
pub struct CatalogHandle {
    current: RwLock<Arc<Catalog>>,
    loading: AtomicBool,
    refreshed: AtomicBool,
}

impl CatalogHandle {
    fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            current: RwLock::new(catalog),
            loading: AtomicBool::new(false),
            refreshed: AtomicBool::new(false),
        }
    }

    pub fn catalog(&self) -> Arc<Catalog> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.catalog().categories.clone()
    }

    /// True while a remote refresh is in flight
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    fn replace(&self, catalog: Arc<Catalog>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = catalog;
    }
}

/// Owns the raw input tables and memoizes the catalogs built from them.
///
/// The local catalog is built once. Only the most recent remote build is
/// kept, keyed by the fingerprint of its documents.
pub struct TaxonomyContext {
    pipeline: Pipeline,
    base: Vec<Value>,
    extras: Vec<Value>,
    normalized_extras: OnceCell<Vec<Category>>,
    local: OnceCell<Arc<Catalog>>,
    remote: Mutex<Option<Arc<Catalog>>>,
    observer: Arc<dyn RefreshObserver>,
}

impl Default for TaxonomyContext {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TaxonomyContext {
    /// Context over the builtin tables
    pub fn builtin() -> Self {
        Self::with_tables(builtin_base(), builtin_extras())
    }

    pub fn with_tables(base: Vec<Value>, extras: Vec<Value>) -> Self {
        Self {
            pipeline: Pipeline::default(),
            base,
            extras,
            normalized_extras: OnceCell::new(),
            local: OnceCell::new(),
            remote: Mutex::new(None),
            observer: Arc::new(LogObserver),
        }
    }

    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn RefreshObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Local-source catalog, built on first access
    pub fn local(&self) -> Arc<Catalog> {
        self.local
            .get_or_init(|| {
                let tree = self
                    .pipeline
                    .compose(normalize(&self.base), self.extras_tree());
                let catalog = Catalog::new(
                    tree,
                    CatalogSource::Local,
                    fingerprint(&self.base, &self.extras),
                );
                info!(
                    categories = catalog.categories.len(),
                    fingerprint = %catalog.fingerprint,
                    "built local category tree"
                );
                Arc::new(catalog)
            })
            .clone()
    }

    /// Build the catalog for a remote base, reusing the last remote build
    /// when the documents are unchanged
    pub fn remote(&self, source: &dyn RemoteSource) -> Result<Arc<Catalog>> {
        let docs = source.fetch().map_err(|e| match e {
            TaxonomyError::RemoteUnavailable { .. } => e,
            other => TaxonomyError::RemoteUnavailable {
                source_name: source.name().to_string(),
                message: other.to_string(),
            },
        })?;

        if docs.is_empty() {
            return Err(TaxonomyError::RemoteEmpty {
                source_name: source.name().to_string(),
            });
        }

        let key = fingerprint(&docs, &self.extras);
        if let Some(hit) = self.remote_cache().as_ref().filter(|c| c.fingerprint == key) {
            debug!(source = source.name(), "remote tree cache hit");
            return Ok(hit.clone());
        }

        let tree = self.pipeline.compose(normalize(&docs), self.extras_tree());
        let catalog = Arc::new(Catalog::new(
            tree,
            CatalogSource::Remote {
                name: source.name().to_string(),
            },
            key,
        ));
        *self.remote_cache() = Some(catalog.clone());
        Ok(catalog)
    }

    /// Handle showing the local tree
    pub fn handle(&self) -> CatalogHandle {
        CatalogHandle::new(self.local())
    }

    /// Local handle, refreshed from `source` when one is given
    pub fn load(&self, source: Option<&dyn RemoteSource>) -> CatalogHandle {
        let handle = self.handle();
        if let Some(source) = source {
            self.refresh(&handle, source);
        }
        handle
    }

    /// One-shot remote refresh of a handle.
    ///
    /// Returns `true` when the remote tree was installed. Failures keep the
    /// current tree and go to the observer only. A handle is refreshed at most
    /// once; later calls return `false` without fetching.
    pub fn refresh(&self, handle: &CatalogHandle, source: &dyn RemoteSource) -> bool {
        if handle.refreshed.swap(true, Ordering::AcqRel) {
            debug!(source = source.name(), "handle already refreshed");
            return false;
        }

        handle.loading.store(true, Ordering::Release);
        let applied = match self.remote(source) {
            Ok(catalog) => {
                self.observer.remote_applied(source.name(), &catalog);
                handle.replace(catalog);
                true
            }
            Err(e) => {
                self.observer.remote_failed(source.name(), &e);
                false
            }
        };
        handle.loading.store(false, Ordering::Release);
        applied
    }

    fn extras_tree(&self) -> &[Category] {
        self.normalized_extras.get_or_init(|| normalize(&self.extras))
    }

    fn remote_cache(&self) -> std::sync::MutexGuard<'_, Option<Arc<Catalog>>> {
        self.remote.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// SHA-256 over the raw base and extras records
pub fn fingerprint(base: &[Value], extras: &[Value]) -> String {
    let mut hasher = Sha256::new();
    for doc in base {
        hasher.update(doc.to_string().as_bytes());
        hasher.update(b"\n");
    }
    hasher.update(b"--extras--\n");
    for doc in extras {
        hasher.update(doc.to_string().as_bytes());
        hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;

    struct FixedSource {
        docs: Vec<Value>,
        calls: AtomicUsize,
    }

    impl FixedSource {
        fn new(docs: Vec<Value>) -> Self {
            Self {
                docs,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl RemoteSource for FixedSource {
        fn name(&self) -> &str {
            "fixed"
        }

        fn fetch(&self) -> Result<Vec<Value>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.docs.clone())
        }
    }

    struct FailingSource;

    impl RemoteSource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        fn fetch(&self) -> Result<Vec<Value>> {
            Err(TaxonomyError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "offline",
            )))
        }
    }

    #[derive(Default)]
    struct Recorder {
        failures: Mutex<Vec<String>>,
        applied: AtomicUsize,
    }

    impl RefreshObserver for Recorder {
        fn remote_failed(&self, source: &str, error: &TaxonomyError) {
            self.failures
                .lock()
                .unwrap()
                .push(format!("{source}: {error}"));
        }

        fn remote_applied(&self, _source: &str, _catalog: &Catalog) {
            self.applied.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn small_context() -> TaxonomyContext {
        TaxonomyContext::with_tables(
            vec![json!({"nome": "Bombas", "subcategorias": ["Polpa"]})],
            vec![json!({"nome": "Moinhos", "subcategorias": ["Bolas"]})],
        )
    }

    #[test]
    fn test_local_is_memoized() {
        let ctx = small_context();
        let first = ctx.local();
        let second = ctx.local();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.source, CatalogSource::Local);

        let ids: Vec<_> = first.categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["bombas", "moinhos"]);
    }

    #[test]
    fn test_refresh_replaces_tree() {
        let recorder = Arc::new(Recorder::default());
        let ctx = small_context().with_observer(recorder.clone());
        let source = FixedSource::new(vec![json!({"nome": "Britadores"})]);

        let handle = ctx.handle();
        assert!(!handle.is_loading());
        assert!(ctx.refresh(&handle, &source));
        assert!(!handle.is_loading());

        let catalog = handle.catalog();
        assert!(catalog.is_remote());
        let ids: Vec<_> = catalog.categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["britadores", "moinhos"]);
        assert_eq!(recorder.applied.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_refresh_failure_keeps_local_and_reports() {
        let recorder = Arc::new(Recorder::default());
        let ctx = small_context().with_observer(recorder.clone());

        let handle = ctx.handle();
        assert!(!ctx.refresh(&handle, &FailingSource));
        assert!(!handle.is_loading());
        assert!(Arc::ptr_eq(&handle.catalog(), &ctx.local()));

        let failures = recorder.failures.lock().unwrap();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].starts_with("failing: "));
        assert!(failures[0].contains("offline"));
    }

    #[test]
    fn test_empty_remote_falls_back() {
        let recorder = Arc::new(Recorder::default());
        let ctx = small_context().with_observer(recorder.clone());

        let handle = ctx.load(Some(&FixedSource::new(Vec::new())));
        assert!(!handle.catalog().is_remote());
        assert!(recorder.failures.lock().unwrap()[0].contains("no documents"));
    }

    #[test]
    fn test_refresh_is_one_shot() {
        let ctx = small_context();
        let source = FixedSource::new(vec![json!({"nome": "Britadores"})]);

        let handle = ctx.handle();
        assert!(ctx.refresh(&handle, &source));
        assert!(!ctx.refresh(&handle, &source));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_remote_builds_are_cached_by_content() {
        let ctx = small_context();
        let a = FixedSource::new(vec![json!({"nome": "Britadores"})]);
        let b = FixedSource::new(vec![json!({"nome": "Britadores"})]);

        let first = ctx.remote(&a).unwrap();
        let second = ctx.remote(&b).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let other = ctx
            .remote(&FixedSource::new(vec![json!({"nome": "Peneiras"})]))
            .unwrap();
        assert_ne!(other.fingerprint, first.fingerprint);
    }

    #[test]
    fn test_remote_cache_keeps_latest_build_only() {
        let ctx = small_context();
        let a = FixedSource::new(vec![json!({"nome": "Britadores"})]);
        let b = FixedSource::new(vec![json!({"nome": "Peneiras"})]);

        let first = ctx.remote(&a).unwrap();
        let latest = ctx.remote(&b).unwrap();
        assert!(Arc::ptr_eq(&ctx.remote(&b).unwrap(), &latest));

        let rebuilt = ctx.remote(&a).unwrap();
        assert!(!Arc::ptr_eq(&rebuilt, &first));
        assert_eq!(rebuilt.categories, first.categories);
        assert_eq!(Arc::strong_count(&latest), 1);
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let base = vec![json!({"nome": "A"})];
        let extras = vec![json!({"nome": "B"})];
        assert_eq!(fingerprint(&base, &extras), fingerprint(&base, &extras));
        assert_ne!(fingerprint(&base, &extras), fingerprint(&extras, &base));
        assert_eq!(fingerprint(&base, &extras).len(), 64);
    }

    #[test]
    fn test_context_is_shareable_across_threads() {
        let ctx = Arc::new(TaxonomyContext::builtin());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ctx = ctx.clone();
                std::thread::spawn(move || ctx.local().fingerprint.clone())
            })
            .collect();
        let prints: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(prints.windows(2).all(|w| w[0] == w[1]));
    }
}
