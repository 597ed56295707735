//! Compile-once cache for criteria expressions

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};
use study_eligibility_ast::CompiledExpression;
use study_eligibility_diagnostics::Result;

static GLOBAL_CACHE: LazyLock<Arc<ExpressionCache>> =
    LazyLock::new(|| Arc::new(ExpressionCache::new()));

/// Compiled expressions keyed by their exact source text
///
/// Entries are never replaced or removed. Two threads missing on the same
/// source may both compile it; the first insert wins and both get equal trees.
/// Expressions that fail to compile are not cached.
#[derive(Debug, Default)]
pub struct ExpressionCache {
    entries: RwLock<HashMap<String, Arc<CompiledExpression>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ExpressionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache
    pub fn global() -> Arc<ExpressionCache> {
        Arc::clone(&GLOBAL_CACHE)
    }

    /// Return the cached compilation of `source`, compiling it on a miss
    pub fn get_or_compile(&self, source: &str) -> Result<Arc<CompiledExpression>> {
        if let Some(compiled) = self.entries.read().get(source) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            log::trace!("criteria cache hit: {:?}", source);
            return Ok(Arc::clone(compiled));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        log::debug!("criteria cache miss: {:?}", source);
        let compiled = study_eligibility_parser::compile(source)?;

        let mut entries = self.entries.write();
        let entry = entries
            .entry(source.to_string())
            .or_insert_with(|| Arc::new(compiled));
        Ok(Arc::clone(entry))
    }

    /// Look up `source` without compiling
    pub fn get(&self, source: &str) -> Option<Arc<CompiledExpression>> {
        self.entries.read().get(source).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}
