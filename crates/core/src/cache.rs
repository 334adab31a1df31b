//! Memoized analysis results, keyed by file revision.
//!
//! The key is an xxh3 digest of the options and the exact source text, so an
//! edited file or a changed configuration is simply a miss. Parse failures
//! are never stored.

use dashmap::DashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use varscope_api::models::RefactorOptions;
use varscope_java::{ParseError, UnitAnalysis};
use xxhash_rust::xxh3::Xxh3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

#[derive(Default)]
pub struct AnalysisCache {
    entries: DashMap<u64, Arc<UnitAnalysis>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(options: &RefactorOptions, source: &str) -> u64 {
        let mut hasher = Xxh3::new();
        options.hash(&mut hasher);
        hasher.write(source.as_bytes());
        hasher.finish()
    }

    pub fn get_or_analyze<F>(
        &self,
        options: &RefactorOptions,
        source: &str,
        analyze: F,
    ) -> Result<Arc<UnitAnalysis>, ParseError>
    where
        F: FnOnce() -> Result<UnitAnalysis, ParseError>,
    {
        let key = Self::key(options, source);
        if let Some(hit) = self.entries.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Arc::clone(hit.value()));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let analysis = Arc::new(analyze()?);
        self.entries.insert(key, Arc::clone(&analysis));
        Ok(analysis)
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use varscope_api::models::Toggle;

    const SRC: &str = "class A { void m() { String s = \"\"; } }";

    #[test]
    fn key_depends_on_options_and_source() {
        let base = RefactorOptions::default();
        let other = base.clone().with_loop_variables(Toggle::Disabled);
        assert_eq!(AnalysisCache::key(&base, SRC), AnalysisCache::key(&base, SRC));
        assert_ne!(AnalysisCache::key(&base, SRC), AnalysisCache::key(&other, SRC));
        assert_ne!(
            AnalysisCache::key(&base, SRC),
            AnalysisCache::key(&base, "class B {}")
        );
    }

    #[test]
    fn second_lookup_is_a_hit() {
        let cache = AnalysisCache::new();
        let options = RefactorOptions::default();
        let run = || varscope_java::analyze_source(SRC, &options);

        let first = cache.get_or_analyze(&options, SRC, run).unwrap();
        let second = cache
            .get_or_analyze(&options, SRC, || panic!("should be cached"))
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(
            cache.stats(),
            CacheStats {
                entries: 1,
                hits: 1,
                misses: 1
            }
        );
    }

    #[test]
    fn parse_failures_are_not_cached() {
        let cache = AnalysisCache::new();
        let options = RefactorOptions::default();
        let bad = "class {";
        assert!(
            cache
                .get_or_analyze(&options, bad, || varscope_java::analyze_source(bad, &options))
                .is_err()
        );
        assert_eq!(cache.stats().entries, 0);
    }
}
